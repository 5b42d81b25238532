//! Scoring a single guess against the true value.

use crate::game_engine::{
    error::GameError,
    models::{Indicator, Verdict, TOLERANCE},
};

/// True when `guess` is strictly closer than [`TOLERANCE`] to `actual`.
/// A distance of exactly 0.03 is a miss.
pub fn is_correct(guess: f64, actual: f64) -> bool {
    (guess - actual).abs() < TOLERANCE
}

/// Classify one guess. A miss is `TooHigh` only when `guess > actual`;
/// everything else that misses reads as `TooLow`.
pub fn verdict(guess: f64, actual: f64) -> Verdict {
    if is_correct(guess, actual) {
        Verdict::Correct
    } else if guess > actual {
        Verdict::TooHigh
    } else {
        Verdict::TooLow
    }
}

/// Reject guesses outside the slider range. NaN is rejected too.
pub fn check_range(indicator: Indicator, value: f64) -> Result<f64, GameError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GameError::InvalidGuessRange { indicator, value })
    }
}
