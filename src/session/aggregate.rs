//! Team-level roll-up of position bout results.

use std::cmp::Ordering;

use crate::bout::{Bout, Competitor, Winner};

/// Wins and points collected by one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideTally {
    pub wins: usize,
    pub points: usize,
}

/// How the overall team winner was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Wins,
    Points,
    /// Level on both; the team result is a draw.
    Level,
}

/// Aggregate over the position bouts. The representative bout never counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamSummary {
    pub red: SideTally,
    pub white: SideTally,
    /// `Red`, `White` or `Draw`; never `Pending`.
    pub winner: Winner,
    pub decision: Decision,
    /// Every position bout has an outcome.
    pub complete: bool,
}

impl TeamSummary {
    pub fn tally(&self, side: Competitor) -> SideTally {
        match side {
            Competitor::Red => self.red,
            Competitor::White => self.white,
        }
    }

    pub(crate) fn from_bouts<'a>(bouts: impl IntoIterator<Item = &'a Bout>) -> Self {
        let mut red = SideTally::default();
        let mut white = SideTally::default();
        let mut complete = true;

        for bout in bouts {
            red.points += bout.red().points();
            white.points += bout.white().points();
            match bout.outcome().winner() {
                Winner::Red => red.wins += 1,
                Winner::White => white.wins += 1,
                Winner::Draw => {}
                Winner::Pending => complete = false,
            }
        }

        let (winner, decision) = match (red.wins.cmp(&white.wins), red.points.cmp(&white.points)) {
            (Ordering::Greater, _) => (Winner::Red, Decision::Wins),
            (Ordering::Less, _) => (Winner::White, Decision::Wins),
            (Ordering::Equal, Ordering::Greater) => (Winner::Red, Decision::Points),
            (Ordering::Equal, Ordering::Less) => (Winner::White, Decision::Points),
            (Ordering::Equal, Ordering::Equal) => (Winner::Draw, Decision::Level),
        };

        Self {
            red,
            white,
            winner,
            decision,
            complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bout::Strike;

    fn won(side: Competitor, points: usize) -> Bout {
        let mut bout = Bout::default();
        for _ in 0..points {
            let _ = bout.add_point(side, Strike::Men);
        }
        let _ = bout.end_bout();
        bout
    }

    #[test]
    fn test_points_break_level_wins() {
        let bouts = [won(Competitor::Red, 1), won(Competitor::White, 2), won(Competitor::Red, 0)];
        let summary = TeamSummary::from_bouts(&bouts);
        assert_eq!(summary.red, SideTally { wins: 1, points: 1 });
        assert_eq!(summary.white, SideTally { wins: 1, points: 2 });
        assert_eq!(summary.winner, Winner::White);
        assert_eq!(summary.decision, Decision::Points);
        assert!(summary.complete);
    }

    #[test]
    fn test_pending_bout_marks_incomplete() {
        let bouts = [won(Competitor::Red, 1), Bout::default()];
        let summary = TeamSummary::from_bouts(&bouts);
        assert_eq!(summary.winner, Winner::Red);
        assert_eq!(summary.decision, Decision::Wins);
        assert!(!summary.complete);
    }

    #[test]
    fn test_all_level_is_draw() {
        let summary = TeamSummary::from_bouts(&[Bout::default(), Bout::default()]);
        assert_eq!(summary.winner, Winner::Draw);
        assert_eq!(summary.decision, Decision::Level);
    }
}
