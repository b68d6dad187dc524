//! Letter grades and the pass threshold.
//!
//! Breakpoints are evaluated top-down and the first one whose minimum is met
//! wins. The pass threshold coincides with the lowest `C`.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Minimum average percentage for a course to count as completed.
pub const PASS_THRESHOLD: Decimal = dec!(60);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GradeLetter {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

const BREAKPOINTS: [(Decimal, GradeLetter); 12] = [
    (dec!(95), GradeLetter::APlus),
    (dec!(90), GradeLetter::A),
    (dec!(85), GradeLetter::AMinus),
    (dec!(80), GradeLetter::BPlus),
    (dec!(75), GradeLetter::B),
    (dec!(70), GradeLetter::BMinus),
    (dec!(65), GradeLetter::CPlus),
    (dec!(60), GradeLetter::C),
    (dec!(55), GradeLetter::CMinus),
    (dec!(50), GradeLetter::DPlus),
    (dec!(45), GradeLetter::D),
    (dec!(0), GradeLetter::F),
];

impl GradeLetter {
    /// Maps an average percentage onto its letter.
    #[must_use]
    pub fn from_percent(percent: Decimal) -> Self {
        BREAKPOINTS
            .iter()
            .find(|(minimum, _)| percent >= *minimum)
            .map_or(Self::F, |(_, letter)| *letter)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for GradeLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown grade letter: {0}")]
pub struct UnknownGradeLetter(pub String);

impl FromStr for GradeLetter {
    type Err = UnknownGradeLetter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BREAKPOINTS
            .iter()
            .map(|(_, letter)| *letter)
            .find(|letter| letter.as_str() == s)
            .ok_or_else(|| UnknownGradeLetter(s.to_owned()))
    }
}
