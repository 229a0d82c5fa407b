use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::{RngCore, SeedableRng, rngs::StdRng};
use rps_bot::{AdaptiveOpponent, AdvisedPlayer, Player, PlayerContext, ScriptedPlayer};
use rps_core::game::{Advice, MatchSession, RoundReport};
use rps_core::model::{Move, Winner};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError, SessionReport};
use crate::config::{HumanConfig, HumanKind, ResolvedOutputs, SessionConfig};
use crate::dataset::{Dataset, DatasetError};
use crate::score::ScoreBoard;

/// Plays one configured match and writes its artifacts.
pub struct SessionRunner {
    config: SessionConfig,
    outputs: ResolvedOutputs,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub rounds_played: usize,
    pub rows_written: usize,
    pub scores: ScoreBoard,
    pub report: SessionReport,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub dataset_path: Option<PathBuf>,
    pub telemetry_path: Option<PathBuf>,
}

/// One line of the per-round JSONL log.
#[derive(Debug, Serialize)]
struct RoundLogRow<'a> {
    run_id: &'a str,
    round_index: usize,
    human: Move,
    computer: Move,
    winner: Winner,
    human_score: u32,
    computer_score: u32,
    ties: u32,
    predicted: Option<Move>,
    recommended: Option<Move>,
    confidence: Option<f64>,
    prediction_hit: Option<bool>,
    training_size: usize,
}

impl SessionRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SessionConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.human.kind == HumanKind::Scripted && config.human.script.is_empty() {
            return Err(RunnerError::EmptyScript);
        }

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
        })
    }

    /// Execute the match, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let training = match &self.config.training.dataset {
            Some(path) => Dataset::load(path)?.training_samples(),
            None => Vec::new(),
        };
        let session_cfg = &self.config.session;
        let mut session =
            MatchSession::with_training(session_cfg.network, session_cfg.feedback, training);

        let mut rng = StdRng::seed_from_u64(session_cfg.seed.unwrap_or(0));
        let mut computer = AdaptiveOpponent::new(session_cfg.strategy, rng.next_u64());
        let mut human = build_human(&self.config.human, rng.next_u64())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut analytics = AnalyticsCollector::new(&self.config);
        let mut scores = ScoreBoard::new();
        let mut advice: Option<Advice> = None;
        let mut rows_written = 0usize;

        for round_index in 0..session_cfg.rounds {
            let (human_move, computer_move) = {
                let ctx = PlayerContext::new(session.rounds(), advice.as_ref());
                (human.choose(&ctx), computer.choose(&ctx))
            };

            let report = session.play_round(human_move, computer_move);
            scores.record(report.winner);
            human.observe(&report.round);
            computer.observe(&report.round);

            let training_size = session.training().len();
            analytics.record_round(&report, advice.as_ref(), training_size);
            self.log_round(round_index, &report, &scores, training_size);

            let row = RoundLogRow {
                run_id: &self.config.run_id,
                round_index,
                human: report.round.human,
                computer: report.round.computer,
                winner: report.winner,
                human_score: scores.human(),
                computer_score: scores.computer(),
                ties: scores.ties(),
                predicted: advice.map(|a| a.predicted),
                recommended: advice.map(|a| a.recommended),
                confidence: advice.map(|a| a.confidence),
                prediction_hit: advice.map(|a| a.predicted == report.round.computer),
                training_size,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            advice = report.advice;
        }

        writer.flush()?;

        let report = analytics.finalize()?;
        report.write_markdown(&self.outputs.summary_md)?;

        let dataset_path = match &self.outputs.dataset_out {
            Some(path) => {
                Dataset::from_rounds(session.rounds()).save(path)?;
                Some(path.clone())
            }
            None => None,
        };

        let telemetry_path = self
            .logging_enabled
            .then(|| self.outputs.summary_dir().join("telemetry.jsonl"));

        Ok(RunSummary {
            rounds_played: session.rounds().len(),
            rows_written,
            scores,
            report,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            dataset_path,
            telemetry_path,
        })
    }

    fn log_round(
        &self,
        round_index: usize,
        report: &RoundReport,
        scores: &ScoreBoard,
        training_size: usize,
    ) {
        if !self.logging_enabled || !tracing::enabled!(target: "rps_bench::round", Level::INFO) {
            return;
        }

        let next = report.advice.map(|a| a.recommended);
        event!(
            target: "rps_bench::round",
            Level::INFO,
            run_id = %self.config.run_id,
            round_index = round_index as u32,
            human = %report.round.human,
            computer = %report.round.computer,
            winner = %report.winner,
            human_score = scores.human(),
            computer_score = scores.computer(),
            training_size = training_size as u64,
            next_recommended = ?next,
        );
    }
}

fn build_human(config: &HumanConfig, seed: u64) -> Result<Box<dyn Player>, RunnerError> {
    match config.kind {
        HumanKind::Advised => Ok(Box::new(AdvisedPlayer::with_compliance(
            seed,
            config.compliance,
        ))),
        HumanKind::Scripted => ScriptedPlayer::new(config.script.clone())
            .map(|player| Box::new(player) as Box<dyn Player>)
            .ok_or(RunnerError::EmptyScript),
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
    #[error("scripted human configured without any moves")]
    EmptyScript,
}
