use rps_bot::StrategyKind;
use rps_core::model::Move;
use rps_core::network::NetworkVariant;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root harness configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub run_id: String,
    pub session: MatchConfig,
    #[serde(default)]
    pub human: HumanConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SessionConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SessionConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.session.validate()?;
        self.human.validate()?;
        self.training.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
            dataset_out: self
                .outputs
                .dataset_out
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
        }
    }
}

/// Match parameters: length, seed and the two selectors.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MatchConfig {
    pub rounds: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default = "default_network")]
    pub network: NetworkVariant,
    /// Real-time model update: played rounds join the training set.
    #[serde(default = "default_feedback")]
    pub feedback: bool,
}

impl MatchConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.rounds == 0 {
            return Err(ValidationError::InvalidField {
                field: "session.rounds".to_string(),
                message: "number of rounds must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_network() -> NetworkVariant {
    NetworkVariant::Direct
}

fn default_feedback() -> bool {
    true
}

/// How the human side of the match is simulated.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HumanConfig {
    #[serde(default)]
    pub kind: HumanKind,
    #[serde(default = "default_compliance")]
    pub compliance: f64,
    #[serde(default)]
    pub script: Vec<Move>,
}

impl Default for HumanConfig {
    fn default() -> Self {
        Self {
            kind: HumanKind::default(),
            compliance: default_compliance(),
            script: Vec::new(),
        }
    }
}

impl HumanConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.compliance) {
            return Err(ValidationError::InvalidField {
                field: "human.compliance".to_string(),
                message: format!("compliance {} must be within [0, 1]", self.compliance),
            });
        }

        if self.kind == HumanKind::Scripted && self.script.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "human.script".to_string(),
                message: "scripted player needs at least one move".to_string(),
            });
        }

        Ok(())
    }
}

fn default_compliance() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HumanKind {
    #[default]
    Advised,
    Scripted,
}

/// Historical rounds to seed the network with before play starts.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TrainingConfig {
    #[serde(default)]
    pub dataset: Option<PathBuf>,
}

impl TrainingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.dataset {
            Some(path) if path.as_os_str().is_empty() => Err(ValidationError::InvalidField {
                field: "training.dataset".to_string(),
                message: "path must not be empty".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
    #[serde(default)]
    pub dataset_out: Option<String>,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let paths = [
            ("outputs.jsonl", Some(&self.jsonl)),
            ("outputs.summary_md", Some(&self.summary_md)),
            ("outputs.dataset_out", self.dataset_out.as_ref()),
        ];
        for (label, value) in paths {
            let Some(value) = value else {
                continue;
            };

            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
    pub dataset_out: Option<PathBuf>,
}

impl ResolvedOutputs {
    /// Directory that holds the summary and, when enabled, `telemetry.jsonl`.
    pub fn summary_dir(&self) -> PathBuf {
        self.summary_md
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "wsls_direct"
session:
  rounds: 50
  seed: 42
  strategy: "win-stay_lose-shift"
  network: "direct"
human:
  kind: "advised"
  compliance: 0.8
outputs:
  jsonl: "bench/out/{run_id}/rounds.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
  dataset_out: "bench/out/{run_id}/rounds.json"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: SessionConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.session.strategy, StrategyKind::WinStayLoseShift);
        assert_eq!(cfg.session.network, NetworkVariant::Direct);
        assert!(cfg.session.feedback);
        assert_eq!(cfg.human.kind, HumanKind::Advised);
        assert_eq!(cfg.training.dataset, None);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("bench/out/wsls_direct/rounds.jsonl")
        );
        assert_eq!(
            outputs.dataset_out,
            Some(PathBuf::from("bench/out/wsls_direct/rounds.json"))
        );
        assert_eq!(outputs.summary_dir(), PathBuf::from("bench/out/wsls_direct"));
    }

    #[test]
    fn minimal_config_falls_back_to_defaults() {
        let yaml = r#"
run_id: "minimal"
session:
  rounds: 3
outputs:
  jsonl: "rounds.jsonl"
  summary_md: "summary.md"
"#;
        let mut cfg: SessionConfig = serde_yaml::from_str(yaml).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg.session.seed, None);
        assert_eq!(cfg.session.strategy, StrategyKind::Random);
        assert_eq!(cfg.human, HumanConfig::default());
        assert!(!cfg.logging.enable_structured);
        assert_eq!(cfg.resolved_outputs().summary_dir(), PathBuf::from("."));
    }

    #[test]
    fn rejects_zero_rounds() {
        let yaml = BASIC_YAML.replace("rounds: 50", "rounds: 0");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("zero rounds");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "session.rounds"
        ));
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("run_id: \"wsls_direct\"", "run_id: \"wsls direct\"");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("invalid run id");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));

        let yaml = BASIC_YAML.replace("run_id: \"wsls_direct\"", "run_id: \"  \"");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unknown_strategy_at_parse_time() {
        let yaml = BASIC_YAML.replace("win-stay_lose-shift", "tit-for-tat");
        let err = serde_yaml::from_str::<SessionConfig>(&yaml).expect_err("unknown strategy");
        assert!(err.to_string().contains("tit-for-tat"));
    }

    #[test]
    fn accepts_network_aliases() {
        let yaml = BASIC_YAML.replace("network: \"direct\"", "network: \"inv(v-dag)\"");
        let cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("alias parses");
        assert_eq!(cfg.session.network, NetworkVariant::Inverted);
    }

    #[test]
    fn scripted_human_requires_moves() {
        let yaml = BASIC_YAML.replace("kind: \"advised\"", "kind: \"scripted\"");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("empty script");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "human.script"
        ));

        let yaml = yaml.replace(
            "compliance: 0.8",
            "compliance: 0.8\n  script: [\"rock\", \"paper\"]",
        );
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("script present");
        assert_eq!(cfg.human.script, vec![Move::Rock, Move::Paper]);
    }

    #[test]
    fn rejects_out_of_range_compliance() {
        let yaml = BASIC_YAML.replace("compliance: 0.8", "compliance: 1.5");
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("compliance above one");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "human.compliance"
        ));
    }

    #[test]
    fn outputs_resolve_template_multiple_occurrences() {
        let yaml = BASIC_YAML.replace(
            "bench/out/{run_id}/summary.md",
            "bench/out/{run_id}/{run_id}/summary.md",
        );
        let mut cfg: SessionConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(
            cfg.resolved_outputs().summary_md,
            PathBuf::from("bench/out/wsls_direct/wsls_direct/summary.md")
        );
    }
}
