//! # geodle
//!
//! A human geography guessing game: given a country, guess its **HDI** (Human
//! Development Index) and **GII** (Gender Inequality Index). A guess counts
//! when it lands within 0.03 of the real value.
//!
//! ## How a round works
//!
//! 1. Load the country table with [`load`] (cached for the process) or
//!    [`Dataset::from_path`].
//! 2. Create a [`Game`]; [`Game::initialize`] draws the target country.
//! 3. [`Game::select_difficulty`] sets the attempt budget: easy 5, medium 3,
//!    hard 1.
//! 4. Each [`Game::submit_guess`] reports `Correct`, `TooHigh` or `TooLow` per
//!    indicator. Both correct wins the round; otherwise an attempt is spent and
//!    the round ends when none are left.
//! 5. [`Game::view`] describes what to show; [`present_view`] pushes it to any
//!    [`Presenter`]. [`Game::reset`] starts over with a new country.
//!
//! ## Quick start
//!
//! ```rust
//! use geodle::{CountryRecord, Dataset, Difficulty, Game, Verdict};
//!
//! let dataset = Dataset::from_records(vec![CountryRecord {
//!     country: "Chile".into(),
//!     country_code: "CL".into(),
//!     hdi: 0.86,
//!     gii: 0.19,
//!     latitude: -35.7,
//!     longitude: -71.5,
//!     life_expectancy: 79.5,
//!     mean_years_schooling: 11.1,
//!     gni_per_capita: 24431.0,
//! }])?;
//!
//! let mut game = Game::new(&dataset, Some(42));
//! game.initialize()?;
//! game.select_difficulty(Difficulty::Medium)?;
//!
//! let outcome = game.submit_guess(0.95, 0.20)?;
//! assert_eq!(outcome.hdi, Verdict::TooHigh);
//! assert_eq!(outcome.gii, Verdict::Correct);
//! assert_eq!(outcome.attempts_left, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client_adapter;
pub mod game_engine;

// Convenience re-exports so callers can use `geodle::Game` directly without
// reaching into `game_engine::`.
pub use client_adapter::to_client_state;
pub use game_engine::{
    flag_url, load, present_view, CountryRecord, DataLoadError, Dataset, Difficulty,
    Game, GameError, GameSession, GameView, GeoPoint, GuessOutcome, Indicator,
    PresentationUnavailable, Presenter, RoundPhase, RoundSummary, StatBar,
    StatsComparison, TurnPrompt, Verdict, GLOBAL_AVERAGES, TOLERANCE,
};
