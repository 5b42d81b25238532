//! Presentation payloads and the narrow rendering interface.
//!
//! The engine never draws anything itself. It hands a [`Presenter`] plain
//! values, an image URL, a map marker and a bar chart. A presenter that cannot
//! show one of them returns [`PresentationUnavailable`]; the `present_*`
//! functions log that element as skipped and carry on with the rest.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game_engine::{
    error::PresentationUnavailable,
    models::{CountryRecord, Difficulty, GuessOutcome, GLOBAL_AVERAGES},
};

pub const FLAG_WIDTH: u32 = 200;
pub const MAP_ZOOM: u8 = 3;
/// Marker radius in metres.
pub const MAP_MARKER_RADIUS: u32 = 50_000;

const STAT_LABELS: [&str; 3] = [
    "Life Expectancy",
    "Mean Years of Schooling",
    "GNI per Capita (×1000)",
];

/// Flag image for a two-letter country code.
pub fn flag_url(country_code: &str) -> Result<String, PresentationUnavailable> {
    let code = country_code.trim().to_lowercase();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PresentationUnavailable::new(
            "flag",
            format!("no usable country code in {country_code:?}"),
        ));
    }
    Ok(format!("https://flagcdn.com/w320/{code}.png"))
}

// ---------------------------------------------------------------------------
// Payload types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBar {
    pub label: String,
    pub country_value: f64,
    pub global_average: f64,
}

/// Grouped bar chart: the country against the global reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsComparison {
    pub title: String,
    pub country: String,
    pub bars: Vec<StatBar>,
}

impl StatsComparison {
    pub fn for_country(record: &CountryRecord) -> Self {
        let values = [
            record.life_expectancy,
            record.mean_years_schooling,
            record.gni_per_capita / 1000.0,
        ];
        let bars = STAT_LABELS
            .iter()
            .zip(values)
            .zip(GLOBAL_AVERAGES)
            .map(|((label, country_value), global_average)| StatBar {
                label: label.to_string(),
                country_value,
                global_average,
            })
            .collect();
        StatsComparison {
            title: format!("{} vs Global Average", record.country),
            country: record.country.clone(),
            bars,
        }
    }
}

/// Shown while a round is being played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnPrompt {
    pub country: String,
    pub flag_url: Option<String>,
    pub attempts_left: u8,
    pub difficulty: Difficulty,
}

/// Revealed once the round is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub country: String,
    pub hdi_actual: f64,
    pub gii_actual: f64,
    pub location: GeoPoint,
    pub stats: StatsComparison,
    pub won: bool,
}

impl RoundSummary {
    pub fn new(record: &CountryRecord, hdi_actual: f64, gii_actual: f64, won: bool) -> Self {
        RoundSummary {
            country: record.country.clone(),
            hdi_actual,
            gii_actual,
            location: GeoPoint { latitude: record.latitude, longitude: record.longitude },
            stats: StatsComparison::for_country(record),
            won,
        }
    }

    /// Actual HDI at display precision.
    pub fn hdi_display(&self) -> String {
        format!("{:.2}", self.hdi_actual)
    }

    pub fn gii_display(&self) -> String {
        format!("{:.2}", self.gii_actual)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GameView {
    SelectingDifficulty {
        options: Vec<Difficulty>,
    },
    Playing {
        prompt: TurnPrompt,
        last_outcome: Option<GuessOutcome>,
    },
    RoundOver {
        outcome: Option<GuessOutcome>,
        summary: RoundSummary,
    },
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// The display library the game talks to.
pub trait Presenter {
    fn render_value(&mut self, label: &str, value: &str) -> Result<(), PresentationUnavailable>;
    fn render_image(&mut self, url: &str, width: u32) -> Result<(), PresentationUnavailable>;
    fn render_map(&mut self, marker: GeoPoint, zoom: u8, radius: u32) -> Result<(), PresentationUnavailable>;
    fn render_chart(&mut self, chart: &StatsComparison) -> Result<(), PresentationUnavailable>;
}

/// Collects the elements a presenter could not show.
#[derive(Debug, Default)]
struct Degraded(Vec<PresentationUnavailable>);

impl Degraded {
    fn note(&mut self, result: Result<(), PresentationUnavailable>) {
        if let Err(e) = result {
            warn!(element = e.element, reason = %e.reason, "skipping element");
            self.0.push(e);
        }
    }
}

/// Render whatever `view` holds. Returns the elements that were skipped.
pub fn present_view<P: Presenter + ?Sized>(presenter: &mut P, view: &GameView) -> Vec<PresentationUnavailable> {
    let mut degraded = Degraded::default();
    match view {
        GameView::SelectingDifficulty { options } => {
            let labels: Vec<&str> = options.iter().map(|d| d.label()).collect();
            degraded.note(presenter.render_value("choose your difficulty", &labels.join(" | ")));
        }
        GameView::Playing { prompt, last_outcome } => {
            if let Some(outcome) = last_outcome {
                present_outcome(presenter, outcome, &mut degraded);
            }
            present_prompt(presenter, prompt, &mut degraded);
        }
        GameView::RoundOver { outcome, summary } => {
            if let Some(outcome) = outcome {
                present_outcome(presenter, outcome, &mut degraded);
            }
            present_summary(presenter, summary, &mut degraded);
        }
    }
    degraded.0
}

fn present_prompt<P: Presenter + ?Sized>(presenter: &mut P, prompt: &TurnPrompt, degraded: &mut Degraded) {
    degraded.note(presenter.render_value("country to guess", &prompt.country));
    match &prompt.flag_url {
        Some(url) => degraded.note(presenter.render_image(url, FLAG_WIDTH)),
        None => degraded.note(Err(PresentationUnavailable::new("flag", "no flag for this country"))),
    }
    degraded.note(presenter.render_value("attempts left", &prompt.attempts_left.to_string()));
}

fn present_outcome<P: Presenter + ?Sized>(presenter: &mut P, outcome: &GuessOutcome, degraded: &mut Degraded) {
    degraded.note(presenter.render_value("HDI", &outcome.hdi.to_string()));
    degraded.note(presenter.render_value("GII", &outcome.gii.to_string()));
    if outcome.won {
        degraded.note(presenter.render_value("result", "you guessed both correctly!"));
    } else if outcome.game_over {
        degraded.note(presenter.render_value("result", "out of guesses! game over."));
    }
}

fn present_summary<P: Presenter + ?Sized>(presenter: &mut P, summary: &RoundSummary, degraded: &mut Degraded) {
    degraded.note(presenter.render_value("country", &summary.country));
    degraded.note(presenter.render_value("correct HDI", &summary.hdi_display()));
    degraded.note(presenter.render_value("correct GII", &summary.gii_display()));
    degraded.note(presenter.render_map(summary.location, MAP_ZOOM, MAP_MARKER_RADIUS));
    degraded.note(presenter.render_chart(&summary.stats));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_engine::models::Verdict;

    /// Records every call; fails the element kinds listed in `broken`.
    #[derive(Default)]
    struct Recorder {
        broken: Vec<&'static str>,
        calls: Vec<String>,
    }

    impl Recorder {
        fn check(&mut self, kind: &'static str, call: String) -> Result<(), PresentationUnavailable> {
            if self.broken.contains(&kind) {
                return Err(PresentationUnavailable::new(kind, "offline"));
            }
            self.calls.push(call);
            Ok(())
        }
    }

    impl Presenter for Recorder {
        fn render_value(&mut self, label: &str, value: &str) -> Result<(), PresentationUnavailable> {
            self.check("value", format!("{label}={value}"))
        }
        fn render_image(&mut self, url: &str, _width: u32) -> Result<(), PresentationUnavailable> {
            self.check("image", format!("image:{url}"))
        }
        fn render_map(&mut self, marker: GeoPoint, _zoom: u8, _radius: u32) -> Result<(), PresentationUnavailable> {
            self.check("map", format!("map:{},{}", marker.latitude, marker.longitude))
        }
        fn render_chart(&mut self, chart: &StatsComparison) -> Result<(), PresentationUnavailable> {
            self.check("chart", format!("chart:{}", chart.title))
        }
    }

    fn chile() -> CountryRecord {
        CountryRecord {
            country: "Chile".into(),
            country_code: "cl".into(),
            hdi: 0.8604,
            gii: 0.19,
            latitude: -35.5,
            longitude: -71.5,
            life_expectancy: 79.5,
            mean_years_schooling: 11.1,
            gni_per_capita: 24431.0,
        }
    }

    #[test]
    fn flag_url_uses_lowercase_code() {
        assert_eq!(flag_url(" CL ").unwrap(), "https://flagcdn.com/w320/cl.png");
        assert!(flag_url("").is_err());
        assert!(flag_url("c/l").is_err());
    }

    #[test]
    fn stats_scale_gni_and_pair_with_averages() {
        let stats = StatsComparison::for_country(&chile());
        assert_eq!(stats.title, "Chile vs Global Average");
        assert_eq!(stats.bars.len(), 3);
        assert_eq!(stats.bars[2].label, "GNI per Capita (×1000)");
        assert!((stats.bars[2].country_value - 24.431).abs() < 1e-9);
        let averages: Vec<f64> = stats.bars.iter().map(|b| b.global_average).collect();
        assert_eq!(averages, vec![73.6, 8.7, 12.8]);
    }

    #[test]
    fn summary_displays_two_decimals() {
        let s = RoundSummary::new(&chile(), 0.8604, 0.19, false);
        assert_eq!(s.hdi_display(), "0.86");
        assert_eq!(s.gii_display(), "0.19");
    }

    #[test]
    fn broken_map_and_chart_do_not_stop_the_summary() {
        let view = GameView::RoundOver {
            outcome: Some(GuessOutcome {
                hdi: Verdict::TooLow,
                gii: Verdict::Correct,
                attempts_left: 0,
                game_over: true,
                won: false,
            }),
            summary: RoundSummary::new(&chile(), 0.8604, 0.19, false),
        };
        let mut rec = Recorder { broken: vec!["map", "chart"], ..Default::default() };
        let skipped = present_view(&mut rec, &view);
        assert_eq!(skipped.len(), 2);
        assert!(rec.calls.contains(&"correct HDI=0.86".to_string()));
        assert!(rec.calls.contains(&"result=out of guesses! game over.".to_string()));
    }

    #[test]
    fn missing_flag_is_skipped_but_prompt_still_shown() {
        let view = GameView::Playing {
            prompt: TurnPrompt {
                country: "Chile".into(),
                flag_url: None,
                attempts_left: 3,
                difficulty: Difficulty::Medium,
            },
            last_outcome: None,
        };
        let mut rec = Recorder::default();
        let skipped = present_view(&mut rec, &view);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].element, "flag");
        assert_eq!(rec.calls, vec!["country to guess=Chile", "attempts left=3"]);
    }
}
