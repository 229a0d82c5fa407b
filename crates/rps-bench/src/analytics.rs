use std::fs;
use std::path::Path;

use rps_bot::StrategyKind;
use rps_core::game::{Advice, RoundReport};
use rps_core::model::Winner;
use rps_core::network::NetworkVariant;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::SessionConfig;
use crate::score::ScoreBoard;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI
const CHANCE_SHARE: f64 = 1.0 / 3.0;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("statistics error: {0}")]
    Stats(String),
}

/// Accumulates per-round outcomes into a [`SessionReport`].
pub struct AnalyticsCollector {
    run_id: String,
    strategy: StrategyKind,
    network: NetworkVariant,
    feedback: bool,
    scores: ScoreBoard,
    advised_rounds: u32,
    prediction_hits: u32,
    followed_rounds: u32,
    followed_wins: u32,
    confidence_sum: f64,
    training_size: usize,
}

impl AnalyticsCollector {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            run_id: config.run_id.clone(),
            strategy: config.session.strategy,
            network: config.session.network,
            feedback: config.session.feedback,
            scores: ScoreBoard::new(),
            advised_rounds: 0,
            prediction_hits: 0,
            followed_rounds: 0,
            followed_wins: 0,
            confidence_sum: 0.0,
            training_size: 0,
        }
    }

    /// `advice` is the recommendation that was available before the round was played.
    pub fn record_round(
        &mut self,
        report: &RoundReport,
        advice: Option<&Advice>,
        training_size: usize,
    ) {
        self.scores.record(report.winner);
        self.training_size = training_size;

        let Some(advice) = advice else {
            return;
        };
        self.advised_rounds += 1;
        self.confidence_sum += advice.confidence;
        if advice.predicted == report.round.computer {
            self.prediction_hits += 1;
        }
        if advice.recommended == report.round.human {
            self.followed_rounds += 1;
            if report.winner == Winner::Human {
                self.followed_wins += 1;
            }
        }
    }

    pub fn finalize(self) -> Result<SessionReport, AnalyticsError> {
        let rounds = self.scores.rounds();
        let human_share = ratio(self.scores.human(), rounds).unwrap_or(0.0);
        let p_value = one_sided_p_value(self.scores.human(), rounds, CHANCE_SHARE)?;

        Ok(SessionReport {
            run_id: self.run_id,
            strategy: self.strategy,
            network: self.network,
            feedback: self.feedback,
            rounds,
            human_wins: self.scores.human(),
            computer_wins: self.scores.computer(),
            ties: self.scores.ties(),
            series_winner: self.scores.leader(),
            human_share,
            human_share_ci95: share_interval(human_share, rounds),
            p_value_above_chance: p_value,
            advised_rounds: self.advised_rounds,
            prediction_hit_rate: ratio(self.prediction_hits, self.advised_rounds),
            mean_confidence: (self.advised_rounds > 0)
                .then(|| self.confidence_sum / self.advised_rounds as f64),
            followed_rounds: self.followed_rounds,
            followed_win_rate: ratio(self.followed_wins, self.followed_rounds),
            final_training_size: self.training_size,
        })
    }
}

fn ratio(part: u32, whole: u32) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64)
}

fn share_interval(share: f64, trials: u32) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 0.0);
    }
    let half_width = CONFIDENCE_Z * (share * (1.0 - share) / trials as f64).sqrt();
    ((share - half_width).max(0.0), (share + half_width).min(1.0))
}

/// Normal-approximation p-value for the observed share exceeding `null_share`.
fn one_sided_p_value(successes: u32, trials: u32, null_share: f64) -> Result<f64, AnalyticsError> {
    if trials == 0 {
        return Ok(1.0);
    }
    let n = trials as f64;
    let standard_error = (null_share * (1.0 - null_share) / n).sqrt();
    let z = (successes as f64 / n - null_share) / standard_error;
    let normal = Normal::new(0.0, 1.0).map_err(|err| AnalyticsError::Stats(err.to_string()))?;
    Ok((1.0 - normal.cdf(z)).clamp(0.0, 1.0))
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub run_id: String,
    pub strategy: StrategyKind,
    pub network: NetworkVariant,
    pub feedback: bool,
    pub rounds: u32,
    pub human_wins: u32,
    pub computer_wins: u32,
    pub ties: u32,
    pub series_winner: Winner,
    pub human_share: f64,
    pub human_share_ci95: (f64, f64),
    pub p_value_above_chance: f64,
    pub advised_rounds: u32,
    pub prediction_hit_rate: Option<f64>,
    pub mean_confidence: Option<f64>,
    pub followed_rounds: u32,
    pub followed_win_rate: Option<f64>,
    pub final_training_size: usize,
}

impl SessionReport {
    pub fn verdict(&self) -> &'static str {
        match self.series_winner {
            Winner::Human => "Human wins the series",
            Winner::Computer => "Computer wins the series",
            Winner::Tie => "Series tied",
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Session Summary\n\n");
        out.push_str(&format!(
            "Run `{}`: {} rounds against `{}` using the `{}` network (feedback {}).\n\n",
            self.run_id,
            self.rounds,
            self.strategy,
            self.network,
            if self.feedback { "on" } else { "off" }
        ));

        out.push_str("| Human | Computer | Ties | Human % | 95% CI | p (human > 1/3) |\n");
        out.push_str("|-------|----------|------|---------|--------|-----------------|\n");
        out.push_str(&format!(
            "| {human} | {computer} | {ties} | {share:.1}% | [{low:.3}, {high:.3}] | {p:.4} |\n\n",
            human = self.human_wins,
            computer = self.computer_wins,
            ties = self.ties,
            share = self.human_share * 100.0,
            low = self.human_share_ci95.0,
            high = self.human_share_ci95.1,
            p = self.p_value_above_chance,
        ));

        out.push_str(&format!("**{}**\n\n", self.verdict()));

        out.push_str("## Adviser\n\n");
        out.push_str("| Advised rounds | Prediction hit rate | Mean confidence | Followed | Win % when followed |\n");
        out.push_str("|----------------|---------------------|-----------------|----------|---------------------|\n");
        out.push_str(&format!(
            "| {advised} | {hits} | {confidence} | {followed} | {followed_wins} |\n\n",
            advised = self.advised_rounds,
            hits = percent(self.prediction_hit_rate),
            confidence = self
                .mean_confidence
                .map(|c| format!("{c:.3}"))
                .unwrap_or_else(|| "n/a".to_string()),
            followed = self.followed_rounds,
            followed_wins = percent(self.followed_win_rate),
        ));

        out.push_str(&format!(
            "Final training set: {} samples\n",
            self.final_training_size
        ));
        out
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.to_markdown()).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }
}

fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}
