use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rps_core::model::{Round, Sample};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Historical play stored as JSON.
///
/// `rounds` are consecutive rounds and are turned into samples pairwise. `samples` are
/// taken as-is, for data that was already collected in sample form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn from_rounds(rounds: &[Round]) -> Self {
        Self {
            rounds: rounds.to_vec(),
            samples: Vec::new(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        let write_err = |source| DatasetError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| {
            DatasetError::Encode {
                path: path.to_path_buf(),
                source,
            }
        })?;
        writer.write_all(b"\n").map_err(write_err)?;
        writer.flush().map_err(write_err)
    }

    /// Explicit samples followed by those derived from consecutive rounds.
    pub fn training_samples(&self) -> Vec<Sample> {
        let mut samples = self.samples.clone();
        samples.extend(Sample::from_rounds(&self.rounds));
        samples
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write dataset {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode dataset {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
