use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::game_engine::error::GameError;

/// A guess counts as correct when it lands strictly inside this distance.
pub const TOLERANCE: f64 = 0.03;

/// Global reference values for life expectancy, mean years of schooling and
/// GNI per capita (thousands), in the same order as the stats chart bars.
pub const GLOBAL_AVERAGES: [f64; 3] = [73.6, 8.7, 12.8];

// ---------------------------------------------------------------------------
// Dataset rows
// ---------------------------------------------------------------------------

/// One row of the country table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    pub country_code: String,
    #[serde(rename = "HDI")]
    pub hdi: f64,
    #[serde(rename = "GII")]
    pub gii: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "life expectancy")]
    pub life_expectancy: f64,
    #[serde(rename = "mean years of schooling")]
    pub mean_years_schooling: f64,
    #[serde(rename = "GNI per capita")]
    pub gni_per_capita: f64,
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Starting attempt count for this tier.
    pub fn attempts(self) -> u8 {
        match self {
            Difficulty::Easy   => 5,
            Difficulty::Medium => 3,
            Difficulty::Hard   => 1,
        }
    }

    /// Menu label shown while the player is choosing.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy   => "🟢 easy (5 attempts)",
            Difficulty::Medium => "🟠 medium (3 attempts)",
            Difficulty::Hard   => "🔴 hard (1 attempt)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy   => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard   => write!(f, "hard"),
        }
    }
}

/// Accepts the bare tier name or any label containing it, so menu labels
/// such as `"🟠 medium (3 attempts)"` parse too.
impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| lower.contains(&d.to_string()))
            .ok_or_else(|| GameError::InvalidDifficulty(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Guess evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indicator {
    Hdi,
    Gii,
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::Hdi => write!(f, "HDI"),
            Indicator::Gii => write!(f, "GII"),
        }
    }
}

/// Per-indicator result of one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    TooHigh,
    TooLow,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::TooHigh => write!(f, "too high"),
            Verdict::TooLow  => write!(f, "too low"),
        }
    }
}

/// Everything the caller needs to render after a submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub hdi: Verdict,
    pub gii: Verdict,
    pub attempts_left: u8,
    pub game_over: bool,
    /// Both indicators were within tolerance.
    pub won: bool,
}

// ---------------------------------------------------------------------------
// Round lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    SelectingDifficulty,
    Playing,
    RoundOver,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundPhase::SelectingDifficulty => write!(f, "selecting difficulty"),
            RoundPhase::Playing             => write!(f, "playing"),
            RoundPhase::RoundOver           => write!(f, "round over"),
        }
    }
}
