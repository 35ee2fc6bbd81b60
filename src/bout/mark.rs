//! Competitors, score marks and per-side score state.

use std::str::FromStr;

/// Maximum number of ippons a side can hold in one bout.
pub const MAX_IPPONS: usize = 2;

/// One of the two competitors in a bout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Competitor {
    Red,
    White,
}

impl Competitor {
    pub const BOTH: [Competitor; 2] = [Competitor::Red, Competitor::White];

    pub fn opponent(self) -> Self {
        match self {
            Competitor::Red => Competitor::White,
            Competitor::White => Competitor::Red,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Competitor::Red => "red",
            Competitor::White => "white",
        }
    }
}

impl std::fmt::Display for Competitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Competitor {
    type Err = ParseMarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "aka" | "r" => Ok(Competitor::Red),
            "white" | "shiro" | "w" => Ok(Competitor::White),
            _ => Err(ParseMarkError(s.to_string())),
        }
    }
}

/// A valid strike that scores an ippon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strike {
    /// Head.
    Men,
    /// Wrist.
    Kote,
    /// Torso.
    Do,
    /// Throat thrust.
    Tsuki,
}

impl Strike {
    pub fn label(self) -> &'static str {
        match self {
            Strike::Men => "M",
            Strike::Kote => "K",
            Strike::Do => "D",
            Strike::Tsuki => "T",
        }
    }
}

impl FromStr for Strike {
    type Err = ParseMarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "men" | "head" => Ok(Strike::Men),
            "k" | "kote" | "wrist" => Ok(Strike::Kote),
            "d" | "do" | "torso" => Ok(Strike::Do),
            "t" | "tsuki" | "thrust" => Ok(Strike::Tsuki),
            _ => Err(ParseMarkError(s.to_string())),
        }
    }
}

/// A single entry in a side's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreMark {
    Strike(Strike),
    /// Point awarded because the opponent collected two hansoku.
    Hansoku,
    /// Forfeit marker; a forfeit win is recorded as two of these.
    Fusen,
}

impl ScoreMark {
    /// Short label used on the board, in records and in exports.
    pub fn label(self) -> &'static str {
        match self {
            ScoreMark::Strike(strike) => strike.label(),
            ScoreMark::Hansoku => "H",
            ScoreMark::Fusen => "F",
        }
    }

    /// Inverse of [`ScoreMark::label`]. Only exact labels are accepted.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "M" => Some(ScoreMark::Strike(Strike::Men)),
            "K" => Some(ScoreMark::Strike(Strike::Kote)),
            "D" => Some(ScoreMark::Strike(Strike::Do)),
            "T" => Some(ScoreMark::Strike(Strike::Tsuki)),
            "H" => Some(ScoreMark::Hansoku),
            "F" => Some(ScoreMark::Fusen),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScoreMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The two forfeit markers that make up a fusen-gachi.
pub const FORFEIT_PAIR: [ScoreMark; 2] = [ScoreMark::Fusen, ScoreMark::Fusen];

/// Score state for one competitor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Side {
    ippons: Vec<ScoreMark>,
    penalties: u32,
}

impl Side {
    /// Build a side from stored parts. Returns `None` when the parts break
    /// the two-ippon limit.
    pub fn from_parts(ippons: Vec<ScoreMark>, penalties: u32) -> Option<Self> {
        if ippons.len() > MAX_IPPONS {
            return None;
        }
        Some(Self { ippons, penalties })
    }

    pub fn ippons(&self) -> &[ScoreMark] {
        &self.ippons
    }

    pub fn points(&self) -> usize {
        self.ippons.len()
    }

    pub fn penalties(&self) -> u32 {
        self.penalties
    }

    pub fn is_full(&self) -> bool {
        self.ippons.len() >= MAX_IPPONS
    }

    pub fn has_forfeit_pair(&self) -> bool {
        self.ippons == FORFEIT_PAIR
    }

    /// Space-joined mark labels, e.g. `"M K"`.
    pub fn marks_label(&self) -> String {
        self.ippons
            .iter()
            .map(|mark| mark.label())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Append a mark unless the side is full. Returns whether it was added.
    pub(crate) fn push(&mut self, mark: ScoreMark) -> bool {
        if self.is_full() {
            return false;
        }
        self.ippons.push(mark);
        true
    }

    /// Count one more hansoku and return the new total.
    pub(crate) fn add_penalty(&mut self) -> u32 {
        self.penalties = self.penalties.saturating_add(1);
        self.penalties
    }

    pub(crate) fn set_forfeit_pair(&mut self) {
        self.ippons = FORFEIT_PAIR.to_vec();
    }
}

/// Error for unrecognised competitor, strike or mark text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised value: '{0}'")]
pub struct ParseMarkError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for mark in [
            ScoreMark::Strike(Strike::Men),
            ScoreMark::Strike(Strike::Kote),
            ScoreMark::Strike(Strike::Do),
            ScoreMark::Strike(Strike::Tsuki),
            ScoreMark::Hansoku,
            ScoreMark::Fusen,
        ] {
            assert_eq!(ScoreMark::from_label(mark.label()), Some(mark));
        }
        assert_eq!(ScoreMark::from_label("X"), None);
    }

    #[test]
    fn test_side_caps_at_two() {
        let mut side = Side::default();
        assert!(side.push(ScoreMark::Strike(Strike::Men)));
        assert!(side.push(ScoreMark::Hansoku));
        assert!(!side.push(ScoreMark::Strike(Strike::Do)));
        assert_eq!(side.marks_label(), "M H");
    }

    #[test]
    fn test_from_parts_rejects_three_marks() {
        let marks = vec![ScoreMark::Hansoku; 3];
        assert!(Side::from_parts(marks, 0).is_none());
    }

    #[test]
    fn test_parse_competitor_and_strike() {
        assert_eq!("AKA".parse::<Competitor>(), Ok(Competitor::Red));
        assert_eq!("shiro".parse::<Competitor>(), Ok(Competitor::White));
        assert_eq!("kote".parse::<Strike>(), Ok(Strike::Kote));
        assert!("hiza".parse::<Strike>().is_err());
    }
}
