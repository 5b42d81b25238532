//! Round state and the rules that move it forward.
//!
//! A [`GameSession`] is one round: a target country, a difficulty, an attempt
//! counter and the revealed answers. [`Game`] owns the optional session plus
//! the dataset and RNG it needs, and exposes the player-facing operations:
//!
//! ```text
//! SelectingDifficulty --select_difficulty--> Playing --submit_guess--> RoundOver
//!          ^                                                              |
//!          +-------------------------------reset--------------------------+
//! ```

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game_engine::{
    dataset::Dataset,
    error::{GameError, Result},
    evaluator::{check_range, verdict},
    models::{CountryRecord, Difficulty, GuessOutcome, Indicator, RoundPhase},
    report::{flag_url, GameView, RoundSummary, TurnPrompt},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    current_country: String,
    difficulty: Option<Difficulty>,
    attempts_left: Option<u8>,
    game_over: bool,
    hdi_actual: Option<f64>,
    gii_actual: Option<f64>,
    last_outcome: Option<GuessOutcome>,
}

impl GameSession {
    /// Fresh round targeting `country`, waiting for a difficulty.
    pub fn new(country: impl Into<String>) -> Self {
        GameSession {
            current_country: country.into(),
            difficulty: None,
            attempts_left: None,
            game_over: false,
            hdi_actual: None,
            gii_actual: None,
            last_outcome: None,
        }
    }

    pub fn current_country(&self) -> &str {
        &self.current_country
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn difficulty_selected(&self) -> bool {
        self.difficulty.is_some()
    }

    /// `None` until a difficulty is chosen.
    pub fn attempts_left(&self) -> Option<u8> {
        self.attempts_left
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Revealed only once a guess has been submitted.
    pub fn hdi_actual(&self) -> Option<f64> {
        self.hdi_actual
    }

    pub fn gii_actual(&self) -> Option<f64> {
        self.gii_actual
    }

    pub fn last_outcome(&self) -> Option<GuessOutcome> {
        self.last_outcome
    }

    pub fn phase(&self) -> RoundPhase {
        if self.game_over {
            RoundPhase::RoundOver
        } else if self.difficulty_selected() {
            RoundPhase::Playing
        } else {
            RoundPhase::SelectingDifficulty
        }
    }

    /// Set the attempt budget. Returns `false` and changes nothing if a
    /// difficulty was already chosen.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.difficulty_selected() {
            return false;
        }
        self.difficulty = Some(difficulty);
        self.attempts_left = Some(difficulty.attempts());
        true
    }

    /// Score one guess against `target`, which must be this round's country.
    ///
    /// Rejected calls (wrong phase, out-of-range input) leave the session
    /// untouched.
    pub fn apply_guess(&mut self, target: &CountryRecord, hdi_guess: f64, gii_guess: f64) -> Result<GuessOutcome> {
        let phase = self.phase();
        if phase != RoundPhase::Playing {
            return Err(GameError::NotPlaying { phase });
        }
        if target.country != self.current_country {
            return Err(GameError::UnknownCountry(target.country.clone()));
        }
        let Some(mut attempts_left) = self.attempts_left else {
            return Err(GameError::NotPlaying { phase: RoundPhase::SelectingDifficulty });
        };
        let hdi_guess = check_range(Indicator::Hdi, hdi_guess)?;
        let gii_guess = check_range(Indicator::Gii, gii_guess)?;

        self.hdi_actual = Some(target.hdi);
        self.gii_actual = Some(target.gii);

        let hdi = verdict(hdi_guess, target.hdi);
        let gii = verdict(gii_guess, target.gii);
        let won = hdi.is_correct() && gii.is_correct();

        if won {
            self.game_over = true;
        } else {
            attempts_left = attempts_left.saturating_sub(1);
            self.attempts_left = Some(attempts_left);
            if attempts_left == 0 {
                self.game_over = true;
            }
        }

        let outcome = GuessOutcome {
            hdi,
            gii,
            attempts_left,
            game_over: self.game_over,
            won,
        };
        self.last_outcome = Some(outcome);
        Ok(outcome)
    }
}

/// Drives one player's sessions against a shared dataset.
#[derive(Debug)]
pub struct Game<'d> {
    dataset: &'d Dataset,
    rng: StdRng,
    session: Option<GameSession>,
}

impl<'d> Game<'d> {
    /// `rng_seed: Some(_)` makes country selection reproducible.
    pub fn new(dataset: &'d Dataset, rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Game { dataset, rng, session: None }
    }

    pub fn dataset(&self) -> &'d Dataset {
        self.dataset
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> RoundPhase {
        self.session
            .as_ref()
            .map_or(RoundPhase::SelectingDifficulty, GameSession::phase)
    }

    /// Start a round if none exists. Calling it again keeps the current round.
    pub fn initialize(&mut self) -> Result<&GameSession> {
        if self.session.is_none() {
            let target = self
                .dataset
                .choose(&mut self.rng)
                .ok_or(GameError::NoCountries)?;
            info!(country = %target.country, "new round");
            self.session = Some(GameSession::new(target.country.clone()));
        }
        self.session.as_ref().ok_or(GameError::NoCountries)
    }

    /// Choose the tier and return the attempt budget. A second call keeps
    /// the first choice.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<u8> {
        self.initialize()?;
        let session = self.session.as_mut().ok_or(GameError::NoCountries)?;
        if session.select_difficulty(difficulty) {
            debug!(%difficulty, attempts = difficulty.attempts(), "difficulty selected");
        } else {
            debug!("difficulty already selected, ignoring");
        }
        session
            .attempts_left()
            .ok_or(GameError::NotPlaying { phase: RoundPhase::SelectingDifficulty })
    }

    pub fn submit_guess(&mut self, hdi_guess: f64, gii_guess: f64) -> Result<GuessOutcome> {
        let dataset = self.dataset;
        let session = self
            .session
            .as_mut()
            .ok_or(GameError::NotPlaying { phase: RoundPhase::SelectingDifficulty })?;
        let target = dataset
            .lookup(session.current_country())
            .ok_or_else(|| GameError::UnknownCountry(session.current_country().to_string()))?;

        let outcome = session.apply_guess(target, hdi_guess, gii_guess)?;
        debug!(
            hdi_guess, gii_guess,
            hdi = %outcome.hdi, gii = %outcome.gii,
            attempts_left = outcome.attempts_left,
            "guess scored"
        );
        if outcome.game_over {
            info!(country = %target.country, won = outcome.won, "round over");
        }
        Ok(outcome)
    }

    /// Throw the current round away and start a new one with a freshly
    /// drawn country.
    pub fn reset(&mut self) -> Result<&GameSession> {
        self.session = None;
        self.initialize()
    }

    /// The record behind the current round.
    pub fn target(&self) -> Result<&'d CountryRecord> {
        let session = self
            .session
            .as_ref()
            .ok_or(GameError::NotPlaying { phase: RoundPhase::SelectingDifficulty })?;
        self.dataset
            .lookup(session.current_country())
            .ok_or_else(|| GameError::UnknownCountry(session.current_country().to_string()))
    }

    /// What the presentation layer should show right now.
    pub fn view(&self) -> Result<GameView> {
        let Some(session) = self.session.as_ref() else {
            return Ok(GameView::SelectingDifficulty { options: Difficulty::ALL.to_vec() });
        };
        let target = self.target()?;
        Ok(match session.phase() {
            RoundPhase::SelectingDifficulty => GameView::SelectingDifficulty {
                options: Difficulty::ALL.to_vec(),
            },
            RoundPhase::Playing => {
                let (Some(difficulty), Some(attempts_left)) = (session.difficulty(), session.attempts_left()) else {
                    return Err(GameError::NotPlaying { phase: RoundPhase::SelectingDifficulty });
                };
                GameView::Playing {
                    prompt: TurnPrompt {
                        country: target.country.clone(),
                        flag_url: flag_url(&target.country_code).ok(),
                        attempts_left,
                        difficulty,
                    },
                    last_outcome: session.last_outcome(),
                }
            }
            RoundPhase::RoundOver => GameView::RoundOver {
                outcome: session.last_outcome(),
                summary: RoundSummary::new(
                    target,
                    session.hdi_actual().unwrap_or(target.hdi),
                    session.gii_actual().unwrap_or(target.gii),
                    session.last_outcome().is_some_and(|o| o.won),
                ),
            },
        })
    }
}
