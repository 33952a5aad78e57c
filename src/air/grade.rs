//! Categorical air-quality grade.
//!
//! AirKorea reports every pollutant grade as the code "1" (good) through
//! "4" (awful). Anything else — missing field, empty string, an unknown
//! code — collapses to Unknown rather than failing the whole reading.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Air-quality severity bucket for one pollutant (or the integrated index).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Good,
    Normal,
    Bad,
    Awful,
    #[default]
    Unknown,
}

impl Grade {
    /// Map a provider grade code to a grade. Unrecognized or absent → Unknown.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("1") => Grade::Good,
            Some("2") => Grade::Normal,
            Some("3") => Grade::Bad,
            Some("4") => Grade::Awful,
            _ => Grade::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Good => "Good",
            Grade::Normal => "Normal",
            Grade::Bad => "Bad",
            Grade::Awful => "Awful",
            Grade::Unknown => "Not measured",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Grade::Good => "\u{1F600}",
            Grade::Normal => "\u{1F606}",
            Grade::Bad => "\u{1F62B}",
            Grade::Awful => "\u{1F631}",
            Grade::Unknown => "\u{1F635}",
        }
    }

    /// Display color (CSS name), used by the web page and JSON consumers.
    pub fn color(&self) -> &'static str {
        match self {
            Grade::Good => "dodgerblue",
            Grade::Normal => "mediumseagreen",
            Grade::Bad => "orange",
            Grade::Awful => "crimson",
            Grade::Unknown => "gray",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.emoji())
    }
}

/// Deserialize a provider grade code field into a Grade.
///
/// Accepts a missing field (via `#[serde(default)]`), null, or any string;
/// never errors.
pub fn grade_from_code<'de, D>(deserializer: D) -> Result<Grade, D::Error>
where
    D: Deserializer<'de>,
{
    let code: Option<String> = Option::deserialize(deserializer)?;
    Ok(Grade::from_code(code.as_deref()))
}
