//! CSV result report for a session.

use chrono::NaiveDateTime;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::bout::{Bout, Competitor, Winner};
use crate::session::{
    Decision, RED_REPRESENTATIVE, REPRESENTATIVE_LABEL, Session, WHITE_REPRESENTATIVE,
};

pub const HEADER: [&str; 14] = [
    "Date",
    "Time",
    "Match Type",
    "White Team",
    "Red Team",
    "Position",
    "White Player",
    "White Points",
    "White Score",
    "Red Score",
    "Red Points",
    "Red Player",
    "Result",
    "Win Type",
];

const WHITE_TEAM_FALLBACK: &str = "WHITE TEAM";
const RED_TEAM_FALLBACK: &str = "RED TEAM";

const DATE_FORMAT: &str = "%m/%d/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Errors rendering a report.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A rendered report and the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub csv: String,
}

impl Report {
    /// Render `session` as of `at`.
    ///
    /// Text fields are always quoted and scores left bare. The header is
    /// written plain and a blank line separates the summary row.
    pub fn new(session: &Session, at: NaiveDateTime) -> Result<Self, ExportError> {
        let date = at.format(DATE_FORMAT).to_string();
        let time = at.format(TIME_FORMAT).to_string();
        let white_team = team_name(session, Competitor::White);
        let red_team = team_name(session, Competitor::Red);

        let row = RowContext {
            date: &date,
            time: &time,
            match_type: session.format().match_type(),
            white_team,
            red_team,
        };

        let mut rows: Vec<Vec<String>> = session
            .labels()
            .iter()
            .zip(session.bouts())
            .enumerate()
            .map(|(index, (label, bout))| {
                let fallback = format!("Player {}", index.saturating_add(1));
                row.record(label, bout, &fallback, &fallback)
            })
            .collect();
        if let Some(bout) = session.representative() {
            rows.push(row.record(
                REPRESENTATIVE_LABEL,
                bout,
                WHITE_REPRESENTATIVE,
                RED_REPRESENTATIVE,
            ));
        }

        let summary = session.aggregate();
        let winner = match (summary.winner, summary.decision) {
            (Winner::White, Decision::Wins) => white_team.to_string(),
            (Winner::Red, Decision::Wins) => red_team.to_string(),
            (Winner::White, _) => format!("{white_team} (Points)"),
            (Winner::Red, _) => format!("{red_team} (Points)"),
            _ => "Draw".to_string(),
        };
        let summary_row = vec![
            "SUMMARY".to_string(),
            String::new(),
            String::new(),
            format!("{} Wins / {} Pts", summary.white.wins, summary.white.points),
            String::new(),
            format!("{} Wins / {} Pts", summary.red.wins, summary.red.points),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            format!("Winner: {winner}"),
        ];

        let mut out = Vec::with_capacity(512);
        write_records(&mut out, QuoteStyle::Necessary, [HEADER])?;
        write_records(&mut out, QuoteStyle::NonNumeric, rows)?;
        out.push(b'\n');
        write_records(&mut out, QuoteStyle::NonNumeric, [summary_row])?;

        Ok(Self {
            file_name: file_name(session.format().export_prefix(), &date, &time),
            csv: String::from_utf8(out)?,
        })
    }
}

/// Append `records` to `out`, flushing before the writer is dropped.
fn write_records<R, F>(out: &mut Vec<u8>, style: QuoteStyle, records: R) -> Result<(), ExportError>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

struct RowContext<'a> {
    date: &'a str,
    time: &'a str,
    match_type: &'a str,
    white_team: &'a str,
    red_team: &'a str,
}

impl RowContext<'_> {
    fn record(
        &self,
        position: &str,
        bout: &Bout,
        white_fallback: &str,
        red_fallback: &str,
    ) -> Vec<String> {
        let outcome = bout.outcome();
        vec![
            self.date.to_string(),
            self.time.to_string(),
            self.match_type.to_string(),
            self.white_team.to_string(),
            self.red_team.to_string(),
            position.to_string(),
            non_empty(bout.name(Competitor::White), white_fallback).to_string(),
            bout.white().marks_label(),
            bout.white().points().to_string(),
            bout.red().points().to_string(),
            bout.red().marks_label(),
            non_empty(bout.name(Competitor::Red), red_fallback).to_string(),
            outcome.winner().label().to_string(),
            outcome.win_type().label().to_string(),
        ]
    }
}

fn team_name(session: &Session, side: Competitor) -> &str {
    let fallback = match side {
        Competitor::White => WHITE_TEAM_FALLBACK,
        Competitor::Red => RED_TEAM_FALLBACK,
    };
    non_empty(session.team_name(side), fallback)
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// `{prefix}-{date}-{time}.csv` with path-unsafe characters replaced by `-`.
pub fn file_name(prefix: &str, date: &str, time: &str) -> String {
    let stem: String = format!("{prefix}-{date}-{time}")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_whitespace() => '-',
            c => c,
        })
        .collect();
    format!("{stem}.csv")
}
