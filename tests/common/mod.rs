//! Common test utilities and fixtures.
//!
//! Shared builders and proptest strategies for the integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use shiai::bout::{Bout, Competitor, Strike};
use shiai::session::{Command, Format, Session, Target};

// =============================================================================
// Command helpers
// =============================================================================

pub fn point(side: Competitor, strike: Strike) -> Command {
    Command::AddPoint { side, strike }
}

/// Run every command against `session`, ignoring no-ops.
pub fn apply_all(session: &mut Session, commands: impl IntoIterator<Item = Command>) {
    for command in commands {
        let _ = session.apply(command);
    }
}

/// A concluded bout where `side` scored `points` strikes against nothing.
pub fn won_bout(session: &mut Session, side: Competitor, points: usize) {
    for _ in 0..points {
        let _ = session.apply(point(side, Strike::Men));
    }
    let _ = session.apply(Command::EndBout);
}

// =============================================================================
// Bout operations for property tests
// =============================================================================

/// A scoring operation on a single bout.
#[derive(Debug, Clone, Copy)]
pub enum Op {
    Point(Competitor, Strike),
    Penalty(Competitor),
    Forfeit(Competitor),
    Overtime,
    End,
}

impl Op {
    pub fn apply(self, bout: &mut Bout) -> bool {
        match self {
            Op::Point(side, strike) => bout.add_point(side, strike),
            Op::Penalty(side) => bout.add_penalty(side),
            Op::Forfeit(side) => bout.add_forfeit(side),
            Op::Overtime => bout.start_overtime(),
            Op::End => bout.end_bout(),
        }
        .is_applied()
    }
}

pub fn competitor() -> impl Strategy<Value = Competitor> {
    prop_oneof![Just(Competitor::Red), Just(Competitor::White)]
}

pub fn strike() -> impl Strategy<Value = Strike> {
    prop_oneof![
        Just(Strike::Men),
        Just(Strike::Kote),
        Just(Strike::Do),
        Just(Strike::Tsuki),
    ]
}

/// Scoring ops weighted towards points and penalties.
pub fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (competitor(), strike()).prop_map(|(side, strike)| Op::Point(side, strike)),
        4 => competitor().prop_map(Op::Penalty),
        1 => competitor().prop_map(Op::Forfeit),
        1 => Just(Op::Overtime),
        1 => Just(Op::End),
    ]
}

/// Like [`op`] but never concludes the bout.
pub fn open_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (competitor(), strike()).prop_map(|(side, strike)| Op::Point(side, strike)),
        4 => competitor().prop_map(Op::Penalty),
        1 => competitor().prop_map(Op::Forfeit),
        1 => Just(Op::Overtime),
    ]
}

// =============================================================================
// Session commands for property tests
// =============================================================================

pub fn format() -> impl Strategy<Value = Format> {
    prop_oneof![
        Just(Format::Individual),
        Just(Format::Bank),
        Just(Format::ThreeMan),
        Just(Format::FiveMan),
    ]
}

pub fn target() -> impl Strategy<Value = Target> {
    prop_oneof![
        4 => (0usize..9).prop_map(Target::Position),
        1 => Just(Target::Representative),
    ]
}

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z \"]{0,10}"
}

/// Any command, weighted towards scoring on the active bout.
pub fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        6 => (competitor(), strike()).prop_map(|(side, strike)| point(side, strike)),
        3 => competitor().prop_map(Command::AddPenalty),
        1 => competitor().prop_map(Command::AddForfeit),
        2 => target().prop_map(Command::Select),
        1 => Just(Command::StartClock),
        1 => Just(Command::StopClock),
        1 => Just(Command::ToggleClock),
        1 => (-3i64..12, -5i64..70)
            .prop_map(|(minutes, seconds)| Command::EditClock { minutes, seconds }),
        1 => Just(Command::StartOvertime),
        2 => Just(Command::Undo),
        2 => Just(Command::EndBout),
        1 => Just(Command::ResetBout),
        1 => any::<bool>().prop_map(|confirmed| Command::ResetAll { confirmed }),
        1 => Just(Command::ActivateRepresentative),
        1 => (target(), competitor(), name())
            .prop_map(|(target, side, name)| Command::Rename { target, side, name }),
        1 => (competitor(), name()).prop_map(|(side, name)| Command::SetTeamName { side, name }),
    ]
}
