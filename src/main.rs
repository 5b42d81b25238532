//! geodle CLI - play the HDI/GII guessing game in a terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geodle::{
    present_view, to_client_state, Dataset, Difficulty, Game, GameError, GeoPoint,
    PresentationUnavailable, Presenter, RoundPhase, StatsComparison,
};

/// geodle - a human geography guessing game
#[derive(Parser, Debug)]
#[command(name = "geodle")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file with the country table
    #[arg(long, global = true, env = "GEODLE_DATA", default_value = "data/final_data.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play rounds interactively on stdin
    Play {
        /// easy, medium or hard (asked for each round when omitted)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Random seed for country selection (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the client JSON state instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the countries in the table
    Countries,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("geodle=warn".parse()?))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let dataset = geodle::load(&args.data)
        .with_context(|| format!("cannot start without a dataset ({})", args.data.display()))?;

    match args.command.unwrap_or(Commands::Play { difficulty: None, seed: None, json: false }) {
        Commands::Play { difficulty, seed, json } => play(dataset, difficulty, seed, json),
        Commands::Countries => {
            for name in dataset.names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn play(dataset: &Dataset, difficulty: Option<Difficulty>, seed: Option<u64>, json: bool) -> Result<()> {
    println!("🌍 geodle: a human geography guessing game");
    println!("guess a country's HDI and GII, within 0.03 of the actual values\n");

    let mut game = Game::new(dataset, seed);
    let mut input = io::stdin().lock().lines();
    let mut presenter = Terminal;
    game.initialize()?;

    loop {
        let view = game.view()?;
        if json {
            println!("{}", serde_json::to_string_pretty(&to_client_state(&view))?);
        } else {
            present_view(&mut presenter, &view);
        }

        match game.phase() {
            RoundPhase::SelectingDifficulty => {
                let chosen = match difficulty {
                    Some(d) => d,
                    None => {
                        let Some(line) = prompt(&mut input, "difficulty (easy/medium/hard)> ")? else {
                            return Ok(());
                        };
                        match line.parse::<Difficulty>() {
                            Ok(d) => d,
                            Err(e) => {
                                eprintln!("{e}");
                                continue;
                            }
                        }
                    }
                };
                game.select_difficulty(chosen)?;
            }
            RoundPhase::Playing => {
                let Some(line) = prompt(&mut input, "guess HDI GII> ")? else {
                    return Ok(());
                };
                let Some((hdi, gii)) = parse_guess(&line) else {
                    eprintln!("enter two numbers between 0 and 1, e.g. `0.75 0.30`");
                    continue;
                };
                match game.submit_guess(hdi, gii) {
                    Ok(_) => {}
                    Err(e @ GameError::InvalidGuessRange { .. }) => eprintln!("{e}"),
                    Err(e) => return Err(e.into()),
                }
            }
            RoundPhase::RoundOver => {
                let Some(line) = prompt(&mut input, "🔁 play again? [y/N]> ")? else {
                    return Ok(());
                };
                if !line.trim().eq_ignore_ascii_case("y") {
                    return Ok(());
                }
                game.reset()?;
            }
        }
    }
}

/// Print `text` and read one line. `None` on end of input.
fn prompt<I>(input: &mut I, text: &str) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{text}");
    io::stdout().flush()?;
    input.next().transpose().map_err(Into::into)
}

/// Two numbers separated by whitespace or a comma.
fn parse_guess(line: &str) -> Option<(f64, f64)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(hdi)), Some(Ok(gii)), None) => Some((hdi, gii)),
        _ => None,
    }
}

/// Plain-text presenter. Images cannot be drawn in a terminal, so the flag
/// is shown as its URL.
struct Terminal;

impl Presenter for Terminal {
    fn render_value(&mut self, label: &str, value: &str) -> Result<(), PresentationUnavailable> {
        println!("{label}: {value}");
        Ok(())
    }

    fn render_image(&mut self, url: &str, _width: u32) -> Result<(), PresentationUnavailable> {
        println!("flag: {url}");
        Ok(())
    }

    fn render_map(&mut self, marker: GeoPoint, _zoom: u8, _radius: u32) -> Result<(), PresentationUnavailable> {
        if !(marker.latitude.is_finite() && marker.longitude.is_finite()) {
            return Err(PresentationUnavailable::new("map", "coordinates are not finite"));
        }
        println!("📍 location: {:.2}, {:.2}", marker.latitude, marker.longitude);
        Ok(())
    }

    fn render_chart(&mut self, chart: &StatsComparison) -> Result<(), PresentationUnavailable> {
        println!("📊 {}", chart.title);
        let widest = chart
            .bars
            .iter()
            .flat_map(|b| [b.country_value, b.global_average])
            .fold(0.0_f64, f64::max);
        if widest <= 0.0 {
            return Err(PresentationUnavailable::new("chart", "nothing to plot"));
        }
        for bar in &chart.bars {
            println!("  {}", bar.label);
            println!("    {:<16} {} {:.1}", chart.country, bar_of(bar.country_value, widest), bar.country_value);
            println!("    {:<16} {} {:.1}", "Global Average", bar_of(bar.global_average, widest), bar.global_average);
        }
        Ok(())
    }
}

fn bar_of(value: f64, widest: f64) -> String {
    let len = ((value / widest) * 30.0).round().clamp(0.0, 30.0) as usize;
    "█".repeat(len)
}
