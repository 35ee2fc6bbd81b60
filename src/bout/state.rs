//! The bout scoring engine.

use crate::logging::{debug, info};

use super::applied::{Applied, Ignored};
use super::clock::{Clock, ClockReading, OVERTIME_CEILING};
use super::history::{History, Snapshot};
use super::mark::{Competitor, ScoreMark, Side, Strike};
use super::outcome::{Outcome, Victory};

/// A single bout between a red and a white competitor.
///
/// Every scoring mutator refuses to run once the bout has an outcome, and
/// pushes a [`Snapshot`] before it changes anything so that [`Bout::undo`]
/// can step back. Clock commands are not part of the undo history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bout {
    clock: Clock,
    red: Side,
    white: Side,
    outcome: Outcome,
    history: History,
    overtime_active: bool,
    red_name: String,
    white_name: String,
}

impl Bout {
    /// A fresh bout whose clock shows `duration`.
    pub fn new(duration: ClockReading) -> Self {
        Self {
            clock: Clock::new(duration),
            ..Self::default()
        }
    }

    pub(crate) fn restore(
        clock: Clock,
        red: Side,
        white: Side,
        outcome: Outcome,
        overtime_active: bool,
    ) -> Self {
        Self {
            clock,
            red,
            white,
            outcome,
            history: History::default(),
            overtime_active,
            red_name: String::new(),
            white_name: String::new(),
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn side(&self, side: Competitor) -> &Side {
        match side {
            Competitor::Red => &self.red,
            Competitor::White => &self.white,
        }
    }

    fn side_mut(&mut self, side: Competitor) -> &mut Side {
        match side {
            Competitor::Red => &mut self.red,
            Competitor::White => &mut self.white,
        }
    }

    pub fn red(&self) -> &Side {
        &self.red
    }

    pub fn white(&self) -> &Side {
        &self.white
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_concluded(&self) -> bool {
        !self.outcome.is_pending()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn overtime_active(&self) -> bool {
        self.overtime_active
    }

    pub fn name(&self, side: Competitor) -> &str {
        match side {
            Competitor::Red => &self.red_name,
            Competitor::White => &self.white_name,
        }
    }

    /// Set a competitor's display name. Names are not part of undo history.
    pub fn rename(&mut self, side: Competitor, name: impl Into<String>) {
        match side {
            Competitor::Red => self.red_name = name.into(),
            Competitor::White => self.white_name = name.into(),
        }
    }

    /// Award `side` an ippon for `strike`.
    pub fn add_point(&mut self, side: Competitor, strike: Strike) -> Applied {
        if self.is_concluded() {
            return Applied::No(Ignored::Concluded);
        }
        if self.side(side).is_full() {
            return Applied::No(Ignored::SideFull);
        }

        self.save_snapshot(None);
        let target = self.side_mut(side);
        target.push(ScoreMark::Strike(strike));
        let full = target.is_full();
        if full {
            self.clock.halt();
        }
        debug!(side = %side, strike = strike.label(), full, "point added");
        Applied::Yes
    }

    /// Give `side` a hansoku. Every second one awards the opponent a point.
    pub fn add_penalty(&mut self, side: Competitor) -> Applied {
        if self.is_concluded() {
            return Applied::No(Ignored::Concluded);
        }

        self.save_snapshot(None);
        let count = self.side_mut(side).add_penalty();
        if count % 2 == 0 {
            let opponent = self.side_mut(side.opponent());
            if opponent.push(ScoreMark::Hansoku) && opponent.is_full() {
                self.clock.halt();
            }
        }
        debug!(side = %side, count, "penalty added");
        Applied::Yes
    }

    /// Record a fusen-gachi for `side`: its score becomes the forfeit pair.
    pub fn add_forfeit(&mut self, side: Competitor) -> Applied {
        if self.is_concluded() {
            return Applied::No(Ignored::Concluded);
        }
        if self.side(side.opponent()).has_forfeit_pair() {
            return Applied::No(Ignored::ForfeitTaken);
        }

        self.save_snapshot(None);
        self.side_mut(side).set_forfeit_pair();
        self.clock.halt();
        debug!(side = %side, "forfeit recorded");
        Applied::Yes
    }

    /// Start encho: the clock jumps to its ceiling and runs immediately.
    pub fn start_overtime(&mut self) -> Applied {
        if self.is_concluded() {
            return Applied::No(Ignored::Concluded);
        }
        if self.overtime_active {
            return Applied::No(Ignored::OvertimeActive);
        }

        self.save_snapshot(Some(self.clock.reading()));
        self.overtime_active = true;
        self.clock.halt();
        self.clock.set_reading(OVERTIME_CEILING);
        let _ = self.clock.start();
        debug!("overtime started");
        Applied::Yes
    }

    /// Decide the bout from the current scores and lock it.
    pub fn end_bout(&mut self) -> Applied {
        if self.is_concluded() {
            return Applied::No(Ignored::Concluded);
        }

        self.save_snapshot(None);
        self.clock.halt();
        self.outcome = self.decide();
        info!(
            winner = %self.outcome.winner(),
            win_type = %self.outcome.win_type(),
            "bout concluded"
        );
        Applied::Yes
    }

    fn decide(&self) -> Outcome {
        let red = self.red.points();
        let white = self.white.points();
        let (side, points) = match red.cmp(&white) {
            std::cmp::Ordering::Equal => return Outcome::Draw,
            std::cmp::Ordering::Greater => (Competitor::Red, red),
            std::cmp::Ordering::Less => (Competitor::White, white),
        };
        let by = if self.side(side).has_forfeit_pair() {
            Victory::Fusen
        } else if points == 1 {
            Victory::Ippon
        } else {
            Victory::Nihon
        };
        Outcome::Win { side, by }
    }

    /// Step back to the state before the last scoring mutation.
    pub fn undo(&mut self) -> Applied {
        let Some(snapshot) = self.history.pop() else {
            return Applied::No(Ignored::HistoryEmpty);
        };

        self.red = snapshot.red;
        self.white = snapshot.white;
        self.outcome = snapshot.outcome;
        self.overtime_active = snapshot.overtime_active;
        if let Some(reading) = snapshot.clock {
            self.clock.halt();
            self.clock.set_reading(reading);
        }
        debug!(remaining = self.history.len(), "undo");
        Applied::Yes
    }

    /// Back to a fresh bout with the clock at its baseline. Names survive.
    pub fn reset(&mut self) {
        self.clock.halt();
        self.clock.reset_to_baseline();
        self.red = Side::default();
        self.white = Side::default();
        self.outcome = Outcome::Pending;
        self.overtime_active = false;
        self.history.clear();
        debug!("bout reset");
    }

    fn save_snapshot(&mut self, clock: Option<ClockReading>) {
        self.history.push(Snapshot {
            red: self.red.clone(),
            white: self.white.clone(),
            outcome: self.outcome,
            overtime_active: self.overtime_active,
            clock,
        });
    }
}
