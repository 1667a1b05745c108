//! Options shared by the compiler and the flattener.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Keyword used when a fallback chain has no concrete value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    #[default]
    Unset,
    RevertLayer,
}

impl Fallback {
    /// CSS keyword text.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::RevertLayer => "revert-layer",
        }
    }

    /// Parse the CSS keyword text.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "unset" => Some(Self::Unset),
            "revert-layer" => Some(Self::RevertLayer),
            _ => None,
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.keyword())
    }
}

/// Behaviour switches for a hooks instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Keyword substituted when no outer value exists.
    pub fallback: Fallback,
    /// Keep output properties in source order rather than hook-expansion order.
    pub sort: bool,
    /// Use readable `name-hash` identifiers instead of bare hashes.
    pub debug: bool,
}
