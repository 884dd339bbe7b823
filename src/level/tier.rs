//! Severity tiers for the liquid level.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Classified level state, ordered by severity: `Normal < Info < Notice < Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Tier {
    /// Below the info threshold.  AC on, LED dark.
    #[default]
    Normal = 0,
    /// Rising.  AC on, dim amber.
    Info = 1,
    /// Near full.  AC on, amber (optional chirp).
    Notice = 2,
    /// Overflow imminent.  AC cut, red.
    Warning = 3,
}

impl Tier {
    /// All tiers in ascending severity; also the agreement check order.
    pub const ALL: [Self; 4] = [Self::Normal, Self::Info, Self::Notice, Self::Warning];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
        }
    }

    /// Whether the AC supply must be cut in this tier.
    pub const fn cuts_power(self) -> bool {
        matches!(self, Self::Warning)
    }

    /// Whether this tier may sound the piezo.
    pub const fn is_audible(self) -> bool {
        matches!(self, Self::Notice | Self::Warning)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
