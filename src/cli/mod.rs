//! Command-line surface: scoring subcommands and the text board.

pub mod logging;

use std::fmt::Write as _;

use clap::Subcommand;
use shiai::bout::{Bout, Competitor, Strike, Winner};
use shiai::session::{Command, Decision, Session, Target};

/// Scoring commands, shared by one-shot invocations and `live` mode.
#[derive(Debug, Subcommand)]
pub enum ScoreCommand {
    /// Make a bout active (position number from 1, or `rep`)
    Select { target: Target },

    /// Start the active clock
    Start,

    /// Stop the active clock
    Stop,

    /// Start or stop the active clock
    Toggle,

    /// Set the active bout's duration
    EditClock {
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
        #[arg(allow_negative_numbers = true, default_value_t = 0)]
        seconds: i64,
    },

    /// Award an ippon (strike: men, kote, do, tsuki)
    Point { side: Competitor, strike: Strike },

    /// Give a hansoku; every second one awards the opponent a point
    Penalty { side: Competitor },

    /// Award a fusen-gachi (forfeit win) to a side
    Forfeit { side: Competitor },

    /// Start encho (overtime)
    Overtime,

    /// Undo the last scoring change of the active bout
    Undo,

    /// Conclude the active bout
    End,

    /// Reset the active bout
    Reset,

    /// Reset every bout and delete the stored record
    ResetAll {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Start (or return to) the daihyosha representative bout
    Representative,

    /// Set a competitor's name on any bout
    Name {
        target: Target,
        side: Competitor,
        #[arg(num_args = 0.., trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// Set a team name
    Team {
        side: Competitor,
        #[arg(num_args = 0.., trailing_var_arg = true)]
        name: Vec<String>,
    },
}

impl From<ScoreCommand> for Command {
    fn from(command: ScoreCommand) -> Self {
        match command {
            ScoreCommand::Select { target } => Command::Select(target),
            ScoreCommand::Start => Command::StartClock,
            ScoreCommand::Stop => Command::StopClock,
            ScoreCommand::Toggle => Command::ToggleClock,
            ScoreCommand::EditClock { minutes, seconds } => Command::EditClock { minutes, seconds },
            ScoreCommand::Point { side, strike } => Command::AddPoint { side, strike },
            ScoreCommand::Penalty { side } => Command::AddPenalty(side),
            ScoreCommand::Forfeit { side } => Command::AddForfeit(side),
            ScoreCommand::Overtime => Command::StartOvertime,
            ScoreCommand::Undo => Command::Undo,
            ScoreCommand::End => Command::EndBout,
            ScoreCommand::Reset => Command::ResetBout,
            ScoreCommand::ResetAll { yes } => Command::ResetAll { confirmed: yes },
            ScoreCommand::Representative => Command::ActivateRepresentative,
            ScoreCommand::Name { target, side, name } => Command::Rename {
                target,
                side,
                name: name.join(" "),
            },
            ScoreCommand::Team { side, name } => Command::SetTeamName {
                side,
                name: name.join(" "),
            },
        }
    }
}

/// Plain-text board: one line per bout plus the team summary.
pub fn render(session: &Session) -> String {
    let mut out = String::new();
    let red_team = non_empty(session.team_name(Competitor::Red), "RED");
    let white_team = non_empty(session.team_name(Competitor::White), "WHITE");
    let _ = writeln!(out, "{} | {} (red) vs {} (white)", session.format(), red_team, white_team);

    for (index, (label, bout)) in session.labels().iter().zip(session.bouts()).enumerate() {
        let target = Target::Position(index);
        render_bout(&mut out, session.active() == target, &target.to_string(), label, bout);
    }
    if let Some(bout) = session.representative() {
        let active = session.active() == Target::Representative;
        render_bout(&mut out, active, "rep", "Daihyosha", bout);
    }

    if session.bouts().len() > 1 {
        let summary = session.aggregate();
        let verdict = match session.announced_winner() {
            None => "in progress".to_string(),
            Some(Winner::Draw) => "draw".to_string(),
            Some(winner) if summary.decision == Decision::Points => format!("{winner} on points"),
            Some(winner) => format!("{winner} wins"),
        };
        let _ = writeln!(
            out,
            "red {} wins / {} pts, white {} wins / {} pts: {}",
            summary.red.wins, summary.red.points, summary.white.wins, summary.white.points, verdict
        );
    }
    out
}

fn render_bout(out: &mut String, active: bool, number: &str, label: &str, bout: &Bout) {
    let marker = if active { '>' } else { ' ' };
    let clock = bout.clock();
    let running = if clock.is_running() { "*" } else { " " };
    let overtime = if bout.overtime_active() { " encho" } else { "" };
    let outcome = bout.outcome();
    let result = if outcome.is_pending() {
        String::new()
    } else {
        format!(" {} {}", outcome.winner(), outcome.win_type())
    };
    let _ = writeln!(
        out,
        "{marker}{number:>3} {label:<10} {red_name:<16} {red:>5} {rp} - {wp} {white:<5} {white_name:<16} {reading}{running}{overtime}{result}",
        red_name = bout.name(Competitor::Red),
        red = bout.red().marks_label(),
        rp = penalty_marks(bout.red().penalties()),
        wp = penalty_marks(bout.white().penalties()),
        white = bout.white().marks_label(),
        white_name = bout.name(Competitor::White),
        reading = clock.reading(),
    );
}

/// Pending hansoku shown as a triangle, as on paper score sheets.
fn penalty_marks(penalties: u32) -> &'static str {
    if penalties % 2 == 1 { "▲" } else { " " }
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
