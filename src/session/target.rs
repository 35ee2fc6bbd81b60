//! Which bout of a session commands apply to.

use std::str::FromStr;

/// The active bout of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Zero-based index into the position bouts.
    Position(usize),
    /// The daihyosha deciding bout.
    Representative,
}

impl Default for Target {
    fn default() -> Self {
        Target::Position(0)
    }
}

impl std::fmt::Display for Target {
    /// Positions display one-based, as on the board.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Position(index) => write!(f, "{}", index.saturating_add(1)),
            Target::Representative => f.write_str("rep"),
        }
    }
}

/// Error for target text that is neither a position number nor `rep`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid target '{0}' (expected a position number from 1 or 'rep')")]
pub struct ParseTargetError(pub String);

impl FromStr for Target {
    type Err = ParseTargetError;

    /// Accepts one-based position numbers and `rep` / `representative` /
    /// `daihyosha`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        match text.as_str() {
            "rep" | "representative" | "daihyosha" => Ok(Target::Representative),
            _ => text
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Target::Position)
                .ok_or_else(|| ParseTargetError(s.to_string())),
        }
    }
}
