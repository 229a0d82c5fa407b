use super::session::MatchSession;
use crate::model::{Round, Sample};
use crate::network::NetworkVariant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub variant: NetworkVariant,
    pub feedback: bool,
    /// Samples the session was seeded with; samples from `rounds` are rebuilt on restore.
    #[serde(default)]
    pub training: Vec<Sample>,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl SessionSnapshot {
    pub fn capture(session: &MatchSession) -> Self {
        SessionSnapshot {
            variant: session.variant(),
            feedback: session.feedback(),
            training: session.historical_training().to_vec(),
            rounds: session.rounds().to_vec(),
        }
    }

    /// Replays the recorded rounds on a fresh session and refits once at the end.
    pub fn restore(self) -> MatchSession {
        let mut session = MatchSession::with_training(self.variant, self.feedback, self.training);
        for round in &self.rounds {
            session.record_round(round.human, round.computer);
        }
        session.refit_current();
        session
    }

    pub fn to_json(session: &MatchSession) -> serde_json::Result<String> {
        let snapshot = Self::capture(session);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
