//! Engagement phases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recommended engagement tier for an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Phase 1A")]
    Phase1A,
    #[serde(rename = "Phase 1B")]
    Phase1B,
    #[serde(rename = "Phase 2")]
    Phase2,
    #[serde(rename = "Phase 3")]
    Phase3,
}

impl Phase {
    /// Canonical order, as offered by the phase selector
    pub const ALL: [Phase; 4] = [Phase::Phase1A, Phase::Phase1B, Phase::Phase2, Phase::Phase3];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Phase1A => "Phase 1A",
            Phase::Phase1B => "Phase 1B",
            Phase::Phase2 => "Phase 2",
            Phase::Phase3 => "Phase 3",
        }
    }

    /// Exact label match, as the workbook spells it. Use [`FromStr`] for user input.
    pub fn from_label(s: &str) -> Option<Phase> {
        Phase::ALL.into_iter().find(|p| p.label() == s)
    }
}

pub(crate) fn unknown_phase(value: &str) -> String {
    format!(
        "unknown phase '{}' (expected one of: {})",
        value,
        Phase::ALL.map(|p| p.label()).join(", ")
    )
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = String;

    /// Accepts the full label ("Phase 1A") or the bare tier ("1A"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        let tier = normalized
            .strip_prefix("PHASE")
            .map(str::trim_start)
            .unwrap_or(&normalized);

        match tier {
            "1A" => Ok(Phase::Phase1A),
            "1B" => Ok(Phase::Phase1B),
            "2" => Ok(Phase::Phase2),
            "3" => Ok(Phase::Phase3),
            _ => Err(unknown_phase(s.trim())),
        }
    }
}
