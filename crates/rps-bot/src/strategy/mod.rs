mod adaptive;

pub use adaptive::next_adaptive_move;

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rule the simulated computer uses to pick its next throw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    #[default]
    #[serde(rename = "random")]
    Random,
    /// Repeat a winning throw; after a loss play the throw after the human's.
    #[serde(rename = "win-stay_lose-shift", alias = "win_stay_lose_shift", alias = "wsls")]
    WinStayLoseShift,
    /// Copy the human's losing throw after a win; after a loss play the throw after the
    /// human's.
    #[serde(rename = "win-shift_lose-shift", alias = "win_shift_lose_shift", alias = "wshls")]
    WinShiftLoseShift,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Random,
        StrategyKind::WinStayLoseShift,
        StrategyKind::WinShiftLoseShift,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::WinStayLoseShift => "win-stay_lose-shift",
            StrategyKind::WinShiftLoseShift => "win-shift_lose-shift",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown strategy '{0}' (expected random, win-stay_lose-shift or win-shift_lose-shift)"
)]
pub struct ParseStrategyError(pub String);

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "random" => Ok(StrategyKind::Random),
            "win-stay-lose-shift" | "wsls" => Ok(StrategyKind::WinStayLoseShift),
            "win-shift-lose-shift" | "wshls" => Ok(StrategyKind::WinShiftLoseShift),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
