//! Core game engine: dataset access, guess scoring and the round lifecycle.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: country rows, difficulty tiers, verdicts, phases |
//! | `error`     | Load failures, caller contract violations, degraded presentation |
//! | `dataset`   | CSV loading, process-wide cache, lookup and random choice |
//! | `evaluator` | Tolerance check, too-high/too-low classification, input range |
//! | `session`   | `GameSession` state and the `Game` driver |
//! | `report`    | Payloads for the display layer and the `Presenter` interface |

pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod report;
pub mod session;

pub use dataset::{load, Dataset};
pub use error::{DataLoadError, GameError, PresentationUnavailable};
pub use models::{
    CountryRecord, Difficulty, GuessOutcome, Indicator, RoundPhase, Verdict,
    GLOBAL_AVERAGES, TOLERANCE,
};
pub use report::{
    flag_url, present_view, GameView, GeoPoint, Presenter, RoundSummary, StatBar,
    StatsComparison, TurnPrompt,
};
pub use session::{Game, GameSession};
