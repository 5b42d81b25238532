use std::path::PathBuf;
use thiserror::Error;

use crate::game_engine::models::{Indicator, RoundPhase};

/// The country table could not be loaded. Fatal: no round can start.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("could not read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("malformed dataset row at line {line}: {message}")]
    Malformed { line: u64, message: String },

    #[error("{column} of `{country}` is {value}, expected a value in [0.0, 1.0]")]
    OutOfRange {
        country: String,
        column: &'static str,
        value: f64,
    },

    #[error("country `{0}` appears more than once")]
    DuplicateCountry(String),

    #[error("dataset has no country rows")]
    Empty,
}

/// Contract violations by the caller driving a [`Game`](crate::Game).
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    InvalidDifficulty(String),

    #[error("{indicator} guess {value} is outside [0.0, 1.0]")]
    InvalidGuessRange { indicator: Indicator, value: f64 },

    #[error("cannot submit a guess while {phase}")]
    NotPlaying { phase: RoundPhase },

    #[error("country `{0}` is not in the dataset")]
    UnknownCountry(String),

    #[error("dataset has no countries to choose from")]
    NoCountries,
}

/// A visual element (flag, map, chart) could not be shown. Never fatal.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{element} unavailable: {reason}")]
pub struct PresentationUnavailable {
    pub element: &'static str,
    pub reason: String,
}

impl PresentationUnavailable {
    pub fn new(element: &'static str, reason: impl Into<String>) -> Self {
        PresentationUnavailable { element, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
