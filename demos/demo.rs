//! Scripted walkthrough of a few seeded rounds.
//!
//! Run with: `cargo run --example demo`
//!
//! Each round uses a fixed seed, so the same country comes up every run. The
//! demo plays a deliberately bad first guess, then the right answer, and
//! prints the client JSON state after every step.
//!
//! ## Key concepts demonstrated
//!
//! - `Game::new(&dataset, Some(seed))` makes country selection reproducible.
//! - `select_difficulty` fixes the attempt budget once per round.
//! - `submit_guess` reports `Correct` / `TooHigh` / `TooLow` per indicator.
//! - `to_client_state` hides the true values until the round is over.

use geodle::{to_client_state, Dataset, Difficulty, Game};

fn play_round(dataset: &Dataset, seed: u64, difficulty: Difficulty) -> Result<(), Box<dyn std::error::Error>> {
    let mut game = Game::new(dataset, Some(seed));
    game.initialize()?;
    game.select_difficulty(difficulty)?;
    let target = game.target()?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Seed {seed}  Difficulty: {difficulty}  Country: {}", target.country);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for (hdi, gii) in [(1.0 - target.hdi, 1.0 - target.gii), (target.hdi, target.gii)] {
        let outcome = game.submit_guess(hdi, gii)?;
        println!("  guess HDI {hdi:.2}  GII {gii:.2}  ->  HDI {}  GII {}  ({} left)",
            outcome.hdi, outcome.gii, outcome.attempts_left);
        println!("{}", serde_json::to_string_pretty(&to_client_state(&game.view()?))?);
        if outcome.game_over {
            break;
        }
    }
    println!();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = geodle::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/final_data.csv"))?;
    play_round(dataset, 7, Difficulty::Easy)?;
    play_round(dataset, 42, Difficulty::Medium)?;
    play_round(dataset, 1234, Difficulty::Hard)?;
    Ok(())
}
