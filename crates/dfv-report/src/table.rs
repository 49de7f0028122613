//! Text table rendering for the result and failure ledgers.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use dfv_common::any_to_string;
use dfv_model::{ExpectationResult, RenderConfig, ResultStyle};

const RESULT_HEADERS: [&str; 5] = [
    "column_name",
    "expectation_name",
    "expectation_args",
    "result",
    "fail_rows",
];

/// Results ordered by `column_name`; equal names keep invocation order.
pub fn ordered_results(results: &[ExpectationResult]) -> Vec<&ExpectationResult> {
    let mut ordered: Vec<&ExpectationResult> = results.iter().collect();
    ordered.sort_by(|a, b| a.column_name.cmp(&b.column_name));
    ordered
}

/// Render the result ledger, one row per expectation invocation.
pub fn render_results(results: &[ExpectationResult], config: &RenderConfig) -> String {
    let mut table = Table::new();
    table.set_header(RESULT_HEADERS.iter().copied().map(header_cell).collect::<Vec<_>>());
    apply_table_style(&mut table, config);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for result in ordered_results(results) {
        table.add_row(vec![
            Cell::new(&result.column_name),
            Cell::new(&result.expectation_name),
            Cell::new(&result.expectation_args),
            result_cell(result.result, config.result_style),
            fail_rows_cell(result.fail_rows),
        ]);
    }
    table.to_string()
}

/// Render the failure ledger exactly as stored.
pub fn render_failures(failures: &DataFrame, config: &RenderConfig) -> String {
    let mut table = Table::new();
    apply_table_style(&mut table, config);
    if failures.width() == 0 {
        return table.to_string();
    }
    table.set_header(
        failures
            .get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    let columns = failures.get_columns();
    for idx in 0..failures.height() {
        let row: Vec<Cell> = columns
            .iter()
            .map(|column| Cell::new(any_to_string(column.get(idx).unwrap_or(AnyValue::Null))))
            .collect();
        table.add_row(row);
    }
    table.to_string()
}

fn apply_table_style(table: &mut Table, config: &RenderConfig) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(config.width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn result_cell(passed: bool, style: ResultStyle) -> Cell {
    let label = match (style, passed) {
        (ResultStyle::Text, true) => "true",
        (ResultStyle::Text, false) => "false",
        (ResultStyle::Symbols, true) => "✅",
        (ResultStyle::Symbols, false) => "❌",
    };
    let color = if passed { Color::Green } else { Color::Red };
    Cell::new(label).fg(color)
}

fn fail_rows_cell(count: Option<u64>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(Color::Red),
        Some(value) => Cell::new(value),
        None => Cell::new(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(column: &str, name: &str, passed: bool, fail_rows: Option<u64>) -> ExpectationResult {
        ExpectationResult {
            column_name: column.to_string(),
            expectation_name: name.to_string(),
            expectation_args: String::new(),
            result: passed,
            fail_rows,
        }
    }

    #[test]
    fn ordering_is_stable_within_a_column() {
        let results = vec![
            result("b", "first", true, Some(0)),
            result("a", "second", true, None),
            result("b", "third", false, Some(2)),
            result("a", "fourth", false, Some(1)),
        ];
        let names: Vec<&str> = ordered_results(&results)
            .iter()
            .map(|r| r.expectation_name.as_str())
            .collect();
        assert_eq!(names, vec!["second", "fourth", "first", "third"]);
    }

    #[test]
    fn symbols_style_renders_marks() {
        let results = vec![
            result("a", "expect_column_to_exist", true, None),
            result("b", "expect_column_to_exist", false, None),
        ];
        let config = RenderConfig::default().with_result_style(ResultStyle::Symbols);
        let rendered = render_results(&results, &config);
        assert!(rendered.contains('✅'));
        assert!(rendered.contains('❌'));
        assert!(!rendered.contains("false"));
    }

    #[test]
    fn fail_rows_cell_is_blank_only_when_absent() {
        assert_eq!(fail_rows_cell(None).content(), "");
        assert_eq!(fail_rows_cell(Some(0)).content(), "0");
        assert_eq!(fail_rows_cell(Some(12)).content(), "12");
    }

    #[test]
    fn empty_failure_ledger_renders_without_header() {
        let rendered = render_failures(&DataFrame::empty(), &RenderConfig::default());
        assert!(!rendered.contains("expectation_name"));
    }
}
