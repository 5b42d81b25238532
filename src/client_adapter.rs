//! JSON documents for the browser client, built from a [`GameView`].

use serde_json::{json, Value};
use crate::game_engine::{
    models::{Difficulty, GuessOutcome, Verdict},
    report::{GameView, RoundSummary, StatsComparison, TurnPrompt, MAP_MARKER_RADIUS, MAP_ZOOM},
};

/// Verdict in the form the browser client switches on.
fn verdict_str(v: Verdict) -> &'static str {
    match v {
        Verdict::Correct => "Correct",
        Verdict::TooHigh => "TooHigh",
        Verdict::TooLow  => "TooLow",
    }
}

/// One entry of the difficulty dropdown.
fn difficulty_option(d: Difficulty) -> Value {
    json!({
        "id": d.to_string(),
        "label": d.label(),
        "attempts": d.attempts()
    })
}

fn outcome_block(outcome: Option<&GuessOutcome>) -> Value {
    match outcome {
        Some(o) => json!({
            "hdi": verdict_str(o.hdi),
            "gii": verdict_str(o.gii),
            "attempts_left": o.attempts_left,
            "game_over": o.game_over,
            "won": o.won
        }),
        None => Value::Null,
    }
}

fn prompt_block(prompt: &TurnPrompt) -> Value {
    json!({
        "country": prompt.country,
        "flag": prompt.flag_url,
        "attempts_left": prompt.attempts_left,
        "difficulty": prompt.difficulty.to_string(),
        "sliders": [
            { "id": "HDI_guess", "min": 0.0, "max": 1.0, "step": 0.01 },
            { "id": "GII_guess", "min": 0.0, "max": 1.0, "step": 0.01 }
        ]
    })
}

/// Grouped bar chart with the country series first, reference series second.
fn chart_block(stats: &StatsComparison) -> Value {
    let labels: Vec<&str> = stats.bars.iter().map(|b| b.label.as_str()).collect();
    let country: Vec<f64> = stats.bars.iter().map(|b| b.country_value).collect();
    let average: Vec<f64> = stats.bars.iter().map(|b| b.global_average).collect();
    json!({
        "title": stats.title,
        "barmode": "group",
        "x": labels,
        "series": [
            { "name": stats.country, "y": country, "color": "royalblue" },
            { "name": "Global Average", "y": average, "color": "lightgray" }
        ]
    })
}

fn summary_block(summary: &RoundSummary) -> Value {
    json!({
        "country": summary.country,
        "won": summary.won,
        "hdi_actual": summary.hdi_display(),
        "gii_actual": summary.gii_display(),
        "map": {
            "lat": summary.location.latitude,
            "lon": summary.location.longitude,
            "zoom": MAP_ZOOM,
            "radius": MAP_MARKER_RADIUS,
            "color": [255, 0, 0]
        },
        "chart": chart_block(&summary.stats)
    })
}

/// Map a [`GameView`] to the JSON document the browser client renders.
///
/// The true HDI/GII only appear in the `round_over` shape.
pub fn to_client_state(view: &GameView) -> Value {
    match view {
        GameView::SelectingDifficulty { options } => json!({
            "phase": "selecting_difficulty",
            "difficulties": options.iter().copied().map(difficulty_option).collect::<Vec<_>>()
        }),
        GameView::Playing { prompt, last_outcome } => json!({
            "phase": "playing",
            "prompt": prompt_block(prompt),
            "last_result": outcome_block(last_outcome.as_ref())
        }),
        GameView::RoundOver { outcome, summary } => json!({
            "phase": "round_over",
            "last_result": outcome_block(outcome.as_ref()),
            "summary": summary_block(summary)
        }),
    }
}
