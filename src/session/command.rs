//! The command surface shared by every host.

use crate::bout::{Competitor, Strike};

use super::Target;

/// A state-changing request against a session.
///
/// Scoring and clock commands apply to the active bout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Target),
    StartClock,
    StopClock,
    ToggleClock,
    /// Set the active bout's duration. Values are clamped, not rejected.
    EditClock {
        minutes: i64,
        seconds: i64,
    },
    AddPoint {
        side: Competitor,
        strike: Strike,
    },
    AddPenalty(Competitor),
    /// Award the given competitor a fusen-gachi (forfeit win).
    AddForfeit(Competitor),
    StartOvertime,
    Undo,
    EndBout,
    ResetBout,
    ResetAll {
        confirmed: bool,
    },
    ActivateRepresentative,
    Rename {
        target: Target,
        side: Competitor,
        name: String,
    },
    SetTeamName {
        side: Competitor,
        name: String,
    },
}

impl Command {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Select(_) => "select",
            Command::StartClock => "start_clock",
            Command::StopClock => "stop_clock",
            Command::ToggleClock => "toggle_clock",
            Command::EditClock { .. } => "edit_clock",
            Command::AddPoint { .. } => "add_point",
            Command::AddPenalty(_) => "add_penalty",
            Command::AddForfeit(_) => "add_forfeit",
            Command::StartOvertime => "start_overtime",
            Command::Undo => "undo",
            Command::EndBout => "end_bout",
            Command::ResetBout => "reset_bout",
            Command::ResetAll { .. } => "reset_all",
            Command::ActivateRepresentative => "activate_representative",
            Command::Rename { .. } => "rename",
            Command::SetTeamName { .. } => "set_team_name",
        }
    }
}
