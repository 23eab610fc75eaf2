use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, ValueObject};

/// Responsive display mode selecting the page size.
///
/// Supplied externally (viewport detection is the renderer's concern), never
/// derived by this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Desktop,
    Tablet,
    Mobile,
}

impl DisplayMode {
    /// Products shown per page in this mode.
    ///
    /// Mobile effectively disables batching: one item per page.
    pub fn page_size(self) -> usize {
        match self {
            DisplayMode::Desktop => 8,
            DisplayMode::Tablet => 2,
            DisplayMode::Mobile => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Desktop => "desktop",
            DisplayMode::Tablet => "tablet",
            DisplayMode::Mobile => "mobile",
        }
    }
}

impl ValueObject for DisplayMode {}

impl core::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for DisplayMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(DisplayMode::Desktop),
            "tablet" => Ok(DisplayMode::Tablet),
            "mobile" => Ok(DisplayMode::Mobile),
            other => Err(DomainError::validation(format!(
                "unknown display mode: {other:?}"
            ))),
        }
    }
}
