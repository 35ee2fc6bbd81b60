//! A scoring session: ordered position bouts, an optional representative
//! bout, the active-bout selection and team aggregation.
//!
//! A [`Session`] is plain data. It never schedules anything itself; hosts
//! deliver [`Session::tick`] once per second while
//! [`Session::is_clock_running`] holds.
//!
//! ```
//! use shiai::bout::{Competitor, Strike, Winner};
//! use shiai::session::{Format, Session};
//!
//! let mut session = Session::new(Format::ThreeMan);
//! let _ = session.active_bout_mut().map(|b| b.add_point(Competitor::Red, Strike::Men));
//! let _ = session.end_bout();
//! assert_eq!(session.aggregate().winner, Winner::Red);
//! // Two positions are still open, so nothing is announced yet.
//! assert_eq!(session.announced_winner(), None);
//! ```

mod aggregate;
mod command;
mod format;
mod target;

pub use aggregate::{Decision, SideTally, TeamSummary};
pub use command::Command;
pub use format::{Format, ParseFormatError};
pub use target::{ParseTargetError, Target};

use crate::bout::{Applied, Bout, ClockReading, Competitor, Ignored, Outcome, Winner};
use crate::logging::{debug, info};

/// Label used for the representative bout in reports.
pub const REPRESENTATIVE_LABEL: &str = "Daihyosha";

/// Default display names given to a freshly created representative bout.
pub const RED_REPRESENTATIVE: &str = "Red Representative";
pub const WHITE_REPRESENTATIVE: &str = "White Representative";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    format: Format,
    labels: Vec<String>,
    bouts: Vec<Bout>,
    representative: Option<Bout>,
    active: Target,
    red_team: String,
    white_team: String,
    duration: ClockReading,
}

impl Session {
    /// A fresh session with the preset's positions and 5:00 bouts.
    pub fn new(format: Format) -> Self {
        Self::with_positions(format, Vec::new(), ClockReading::default())
    }

    /// A fresh session with custom position labels and bout duration.
    /// An empty label list falls back to the preset's positions.
    pub fn with_positions(format: Format, labels: Vec<String>, duration: ClockReading) -> Self {
        let labels = if labels.is_empty() {
            format.positions().iter().map(|l| (*l).to_string()).collect()
        } else {
            labels
        };
        let bouts = labels.iter().map(|_| Bout::new(duration)).collect();
        Self {
            format,
            labels,
            bouts,
            representative: None,
            active: Target::default(),
            red_team: String::new(),
            white_team: String::new(),
            duration,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Report label for a target: the position name or `Daihyosha`.
    pub fn label(&self, target: Target) -> Option<&str> {
        match target {
            Target::Position(index) => self.labels.get(index).map(String::as_str),
            Target::Representative => self.representative.as_ref().map(|_| REPRESENTATIVE_LABEL),
        }
    }

    /// Configured duration for new bouts.
    pub fn duration(&self) -> ClockReading {
        self.duration
    }

    pub fn bouts(&self) -> &[Bout] {
        &self.bouts
    }

    pub fn representative(&self) -> Option<&Bout> {
        self.representative.as_ref()
    }

    pub fn bout(&self, target: Target) -> Option<&Bout> {
        match target {
            Target::Position(index) => self.bouts.get(index),
            Target::Representative => self.representative.as_ref(),
        }
    }

    fn bout_mut(&mut self, target: Target) -> Option<&mut Bout> {
        match target {
            Target::Position(index) => self.bouts.get_mut(index),
            Target::Representative => self.representative.as_mut(),
        }
    }

    pub fn active(&self) -> Target {
        self.active
    }

    pub fn active_bout(&self) -> Option<&Bout> {
        self.bout(self.active)
    }

    pub fn active_bout_mut(&mut self) -> Option<&mut Bout> {
        self.bout_mut(self.active)
    }

    pub fn is_valid_target(&self, target: Target) -> bool {
        self.bout(target).is_some()
    }

    /// Whether the active bout's clock is counting down.
    pub fn is_clock_running(&self) -> bool {
        self.active_bout().is_some_and(|b| b.clock().is_running())
    }

    pub fn team_name(&self, side: Competitor) -> &str {
        match side {
            Competitor::Red => &self.red_team,
            Competitor::White => &self.white_team,
        }
    }

    pub fn set_team_name(&mut self, side: Competitor, name: impl Into<String>) {
        match side {
            Competitor::Red => self.red_team = name.into(),
            Competitor::White => self.white_team = name.into(),
        }
    }

    /// Set a competitor's display name on any bout, active or not.
    pub fn rename(&mut self, target: Target, side: Competitor, name: impl Into<String>) -> Applied {
        match self.bout_mut(target) {
            Some(bout) => {
                bout.rename(side, name);
                Applied::Yes
            }
            None => Applied::No(Ignored::NoSuchTarget),
        }
    }

    /// Make `target` the active bout. The previous clock is stopped and the
    /// new one is left stopped.
    pub fn select(&mut self, target: Target) -> Applied {
        if target == self.active {
            return Applied::No(Ignored::SameTarget);
        }
        if !self.is_valid_target(target) {
            return Applied::No(Ignored::NoSuchTarget);
        }
        self.switch_to(target);
        Applied::Yes
    }

    fn switch_to(&mut self, target: Target) {
        if let Some(bout) = self.active_bout_mut() {
            bout.clock_mut().halt();
        }
        info!(from = %self.active, to = %target, "active bout changed");
        self.active = target;
    }

    /// Create the daihyosha bout if needed and make it active.
    pub fn activate_representative(&mut self) -> Applied {
        if !self.format.allows_representative() {
            return Applied::No(Ignored::RepresentativeUnavailable);
        }
        if self.active == Target::Representative {
            return Applied::No(Ignored::SameTarget);
        }
        if self.representative.is_none() {
            let mut bout = Bout::new(self.duration);
            bout.rename(Competitor::Red, RED_REPRESENTATIVE);
            bout.rename(Competitor::White, WHITE_REPRESENTATIVE);
            self.representative = Some(bout);
        }
        self.switch_to(Target::Representative);
        Applied::Yes
    }

    /// Roll up wins and points over the position bouts.
    pub fn aggregate(&self) -> TeamSummary {
        TeamSummary::from_bouts(&self.bouts)
    }

    /// The team winner, announced only once every position bout is decided.
    pub fn announced_winner(&self) -> Option<Winner> {
        let summary = self.aggregate();
        summary.complete.then_some(summary.winner)
    }

    pub fn representative_result(&self) -> Option<Outcome> {
        self.representative.as_ref().map(Bout::outcome)
    }

    /// Conclude the active bout. A concluded position bout hands over to the
    /// next position, if there is one.
    pub fn end_bout(&mut self) -> Applied {
        let Some(bout) = self.active_bout_mut() else {
            return Applied::No(Ignored::NoSuchTarget);
        };
        let applied = bout.end_bout();
        if applied.is_applied()
            && let Target::Position(index) = self.active
        {
            let next = Target::Position(index.saturating_add(1));
            if self.is_valid_target(next) {
                self.switch_to(next);
            }
        }
        applied
    }

    /// Reset every bout and drop the representative bout. Names are kept.
    pub fn reset_all(&mut self, confirmed: bool) -> Applied {
        if !confirmed {
            return Applied::No(Ignored::NotConfirmed);
        }
        for bout in &mut self.bouts {
            bout.reset();
        }
        self.representative = None;
        self.active = Target::default();
        info!(format = %self.format, "session reset");
        Applied::Yes
    }

    /// Advance the active clock by one second. Returns `true` when it ran out.
    pub fn tick(&mut self) -> bool {
        self.active_bout_mut()
            .is_some_and(|bout| bout.clock_mut().tick())
    }

    /// Dispatch a command to the session or its active bout.
    pub fn apply(&mut self, command: Command) -> Applied {
        debug!(command = command.name(), active = %self.active, "apply");
        match command {
            Command::Select(target) => self.select(target),
            Command::EndBout => self.end_bout(),
            Command::ResetAll { confirmed } => self.reset_all(confirmed),
            Command::ActivateRepresentative => self.activate_representative(),
            Command::Rename { target, side, name } => self.rename(target, side, name),
            Command::SetTeamName { side, name } => {
                self.set_team_name(side, name);
                Applied::Yes
            }
            other => match self.active_bout_mut() {
                Some(bout) => apply_to_bout(bout, other),
                None => Applied::No(Ignored::NoSuchTarget),
            },
        }
    }

    pub(crate) fn restore(
        &mut self,
        bouts: Vec<Bout>,
        representative: Option<Bout>,
        active: Target,
        red_team: String,
        white_team: String,
    ) {
        self.bouts = bouts;
        self.representative = representative;
        self.red_team = red_team;
        self.white_team = white_team;
        self.active = if self.is_valid_target(active) {
            active
        } else {
            Target::default()
        };
    }
}

fn apply_to_bout(bout: &mut Bout, command: Command) -> Applied {
    match command {
        Command::StartClock => bout.clock_mut().start(),
        Command::StopClock => bout.clock_mut().stop(),
        Command::ToggleClock => {
            if bout.clock().is_running() {
                bout.clock_mut().stop()
            } else {
                bout.clock_mut().start()
            }
        }
        Command::EditClock { minutes, seconds } => {
            bout.clock_mut().set_baseline(minutes, seconds);
            Applied::Yes
        }
        Command::AddPoint { side, strike } => bout.add_point(side, strike),
        Command::AddPenalty(side) => bout.add_penalty(side),
        Command::AddForfeit(side) => bout.add_forfeit(side),
        Command::StartOvertime => bout.start_overtime(),
        Command::Undo => bout.undo(),
        Command::ResetBout => {
            bout.reset();
            Applied::Yes
        }
        // Session-level commands are handled by `Session::apply`.
        Command::Select(_)
        | Command::EndBout
        | Command::ResetAll { .. }
        | Command::ActivateRepresentative
        | Command::Rename { .. }
        | Command::SetTeamName { .. } => Applied::No(Ignored::NoSuchTarget),
    }
}
