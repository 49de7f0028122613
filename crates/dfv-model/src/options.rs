//! Configuration options for validation and rendering.

use serde::{Deserialize, Serialize};

/// Options fixed when a validator is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Route failing rows to a quarantine sink during validation.
    ///
    /// Declared but not implemented: the flag is stored and reported, nothing
    /// reads it. Use `Validator::export_failures` instead.
    pub quarantine: bool,
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quarantine(mut self, enable: bool) -> Self {
        self.quarantine = enable;
        self
    }
}

/// How the `result` column is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStyle {
    /// `true` / `false`.
    #[default]
    Text,
    /// ✅ / ❌.
    Symbols,
}

/// Options for rendering ledgers as text tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum table width in characters.
    pub width: u16,
    /// Rendering of the `result` column.
    pub result_style: ResultStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 160,
            result_style: ResultStyle::Text,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn with_result_style(mut self, style: ResultStyle) -> Self {
        self.result_style = style;
        self
    }
}
