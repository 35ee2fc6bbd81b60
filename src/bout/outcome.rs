//! Bout outcome and its derived winner / win-type views.

use super::mark::Competitor;

/// How a decided bout was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Victory {
    /// One point to nothing (ippon-gachi).
    Ippon,
    /// Two points (nihon-gachi).
    Nihon,
    /// Forfeit (fusen-gachi).
    Fusen,
}

/// Result of a bout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    #[default]
    Pending,
    Win {
        side: Competitor,
        by: Victory,
    },
    /// Hikiwaki.
    Draw,
}

/// Flat winner view of an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Red,
    White,
    Draw,
    Pending,
}

/// Flat win-type view of an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinType {
    None,
    IpponWin,
    DoubleWin,
    ForfeitWin,
    Draw,
}

impl Outcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }

    pub fn winner(&self) -> Winner {
        match self {
            Outcome::Pending => Winner::Pending,
            Outcome::Draw => Winner::Draw,
            Outcome::Win { side, .. } => Winner::from(*side),
        }
    }

    pub fn win_type(&self) -> WinType {
        match self {
            Outcome::Pending => WinType::None,
            Outcome::Draw => WinType::Draw,
            Outcome::Win { by: Victory::Ippon, .. } => WinType::IpponWin,
            Outcome::Win { by: Victory::Nihon, .. } => WinType::DoubleWin,
            Outcome::Win { by: Victory::Fusen, .. } => WinType::ForfeitWin,
        }
    }

    /// Rebuild an outcome from its flat views. Inconsistent pairs yield `None`.
    pub fn from_parts(winner: Winner, win_type: WinType) -> Option<Self> {
        let side = match winner {
            Winner::Pending => {
                return matches!(win_type, WinType::None).then_some(Outcome::Pending);
            }
            Winner::Draw => return matches!(win_type, WinType::Draw).then_some(Outcome::Draw),
            Winner::Red => Competitor::Red,
            Winner::White => Competitor::White,
        };
        let by = match win_type {
            WinType::IpponWin => Victory::Ippon,
            WinType::DoubleWin => Victory::Nihon,
            WinType::ForfeitWin => Victory::Fusen,
            WinType::None | WinType::Draw => return None,
        };
        Some(Outcome::Win { side, by })
    }
}

impl From<Competitor> for Winner {
    fn from(side: Competitor) -> Self {
        match side {
            Competitor::Red => Winner::Red,
            Competitor::White => Winner::White,
        }
    }
}

impl Winner {
    /// Record/export label; pending bouts read `Pending`.
    pub fn label(self) -> &'static str {
        match self {
            Winner::Red => "red",
            Winner::White => "white",
            Winner::Draw => "draw",
            Winner::Pending => "Pending",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "red" => Some(Winner::Red),
            "white" => Some(Winner::White),
            "draw" => Some(Winner::Draw),
            "Pending" | "pending" => Some(Winner::Pending),
            _ => None,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl WinType {
    /// Record/export label; `None` is the empty string.
    pub fn label(self) -> &'static str {
        match self {
            WinType::None => "",
            WinType::IpponWin => "ippon-gachi",
            WinType::DoubleWin => "nihon-gachi",
            WinType::ForfeitWin => "fusen-gachi",
            WinType::Draw => "hikiwaki",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "" => Some(WinType::None),
            "ippon-gachi" => Some(WinType::IpponWin),
            "nihon-gachi" => Some(WinType::DoubleWin),
            "fusen-gachi" => Some(WinType::ForfeitWin),
            "hikiwaki" => Some(WinType::Draw),
            _ => None,
        }
    }
}

impl std::fmt::Display for WinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views() {
        let outcome = Outcome::Win {
            side: Competitor::White,
            by: Victory::Nihon,
        };
        assert_eq!(outcome.winner(), Winner::White);
        assert_eq!(outcome.win_type(), WinType::DoubleWin);
        assert_eq!(Outcome::Pending.win_type(), WinType::None);
        assert_eq!(Outcome::Draw.winner(), Winner::Draw);
    }

    #[test]
    fn test_from_parts_rejects_inconsistent_pairs() {
        assert_eq!(Outcome::from_parts(Winner::Red, WinType::Draw), None);
        assert_eq!(Outcome::from_parts(Winner::Draw, WinType::IpponWin), None);
        assert_eq!(Outcome::from_parts(Winner::Pending, WinType::None), Some(Outcome::Pending));
        assert_eq!(
            Outcome::from_parts(Winner::Red, WinType::ForfeitWin),
            Some(Outcome::Win {
                side: Competitor::Red,
                by: Victory::Fusen
            })
        );
    }
}
