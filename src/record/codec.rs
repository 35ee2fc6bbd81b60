//! Session <-> persisted JSON record.
//!
//! Decoding is lenient field by field: a missing or malformed field falls back
//! to its default while the rest of the record is kept. Only two things throw
//! a record away: input that is not a JSON object, and a bout count that does
//! not match the session's positions.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::bout::{
    Bout, Clock, ClockReading, Competitor, MAX_IPPONS, Outcome, ScoreMark, Side, WinType, Winner,
};
use crate::logging::debug;
use crate::session::{Format, Session, Target};

/// Errors that make a stored record unusable.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("record holds {found} bouts but the session has {expected}")]
    BoutCountMismatch { expected: usize, found: usize },
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SessionRecord {
    #[serde(deserialize_with = "lenient")]
    format: Option<Format>,
    #[serde(deserialize_with = "lenient")]
    red_team_name: String,
    #[serde(deserialize_with = "lenient")]
    white_team_name: String,
    #[serde(deserialize_with = "lenient")]
    active_match_index: Option<ActiveRecord>,
    #[serde(deserialize_with = "lenient_items")]
    matches: Vec<BoutRecord>,
    #[serde(deserialize_with = "lenient")]
    representative: Option<BoutRecord>,
}

/// Either a zero-based position index or the string `rep`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ActiveRecord {
    Index(usize),
    Label(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BoutRecord {
    #[serde(deserialize_with = "lenient")]
    timer: TimerRecord,
    #[serde(deserialize_with = "lenient")]
    red: SideRecord,
    #[serde(deserialize_with = "lenient")]
    white: SideRecord,
    #[serde(deserialize_with = "lenient")]
    red_name: String,
    #[serde(deserialize_with = "lenient")]
    white_name: String,
    #[serde(deserialize_with = "lenient")]
    result: Option<String>,
    #[serde(deserialize_with = "lenient")]
    win_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    overtime_active: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TimerRecord {
    #[serde(deserialize_with = "lenient")]
    minutes: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    seconds: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    baseline_minutes: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    baseline_seconds: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct SideRecord {
    #[serde(deserialize_with = "lenient_items")]
    ippons: Vec<String>,
    #[serde(alias = "hansoku", deserialize_with = "lenient")]
    penalties: u32,
}

/// Decode any JSON value as `T`, falling back to `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`lenient`], but per element: a bad entry becomes `T::default()`
/// instead of emptying the whole list.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items: Vec<serde_json::Value> = lenient(deserializer)?;
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

/// Serialize a session to its JSON record.
pub fn encode(session: &Session) -> Result<Vec<u8>, CodecError> {
    let record = SessionRecord {
        format: Some(session.format()),
        red_team_name: session.team_name(Competitor::Red).to_string(),
        white_team_name: session.team_name(Competitor::White).to_string(),
        active_match_index: Some(match session.active() {
            Target::Position(index) => ActiveRecord::Index(index),
            Target::Representative => ActiveRecord::Label("rep".to_string()),
        }),
        matches: session.bouts().iter().map(BoutRecord::from_bout).collect(),
        representative: session.representative().map(BoutRecord::from_bout),
    };
    Ok(serde_json::to_vec(&record)?)
}

/// Restore `session` from a stored record.
///
/// On error the session is left exactly as it was.
pub fn decode_into(session: &mut Session, bytes: &[u8]) -> Result<(), CodecError> {
    let record: SessionRecord = serde_json::from_slice(bytes)?;

    let expected = session.bouts().len();
    if record.matches.len() != expected {
        return Err(CodecError::BoutCountMismatch {
            expected,
            found: record.matches.len(),
        });
    }

    let duration = session.duration();
    let bouts = record
        .matches
        .iter()
        .map(|r| r.to_bout(duration))
        .collect();
    let representative = record
        .representative
        .filter(|_| session.format().allows_representative())
        .map(|r| r.to_bout(duration));
    let active = match record.active_match_index {
        Some(ActiveRecord::Index(index)) => Target::Position(index),
        Some(ActiveRecord::Label(label)) => label.parse().unwrap_or_default(),
        None => Target::default(),
    };

    session.restore(
        bouts,
        representative,
        active,
        record.red_team_name,
        record.white_team_name,
    );
    debug!(bouts = expected, active = %session.active(), "session record decoded");
    Ok(())
}

impl BoutRecord {
    fn from_bout(bout: &Bout) -> Self {
        let reading = bout.clock().reading();
        let baseline = bout.clock().baseline();
        let outcome = bout.outcome();
        Self {
            timer: TimerRecord {
                minutes: Some(reading.minutes.into()),
                seconds: Some(reading.seconds.into()),
                baseline_minutes: Some(baseline.minutes.into()),
                baseline_seconds: Some(baseline.seconds.into()),
            },
            red: SideRecord::from_side(bout.red()),
            white: SideRecord::from_side(bout.white()),
            red_name: bout.name(Competitor::Red).to_string(),
            white_name: bout.name(Competitor::White).to_string(),
            result: Some(outcome.winner().label().to_string()),
            win_type: Some(outcome.win_type().label().to_string()),
            overtime_active: bout.overtime_active(),
        }
    }

    fn to_bout(&self, duration: ClockReading) -> Bout {
        let reading = |minutes: Option<i64>, seconds: Option<i64>| {
            ClockReading::clamped(
                minutes.unwrap_or(duration.minutes.into()),
                seconds.unwrap_or(duration.seconds.into()),
            )
        };
        let clock = Clock::restore(
            reading(self.timer.minutes, self.timer.seconds),
            reading(self.timer.baseline_minutes, self.timer.baseline_seconds),
        );

        let winner = self
            .result
            .as_deref()
            .and_then(Winner::from_label)
            .unwrap_or(Winner::Pending);
        let win_type = self
            .win_type
            .as_deref()
            .and_then(WinType::from_label)
            .unwrap_or(WinType::None);
        let outcome = Outcome::from_parts(winner, win_type).unwrap_or_default();

        let mut bout = Bout::restore(
            clock,
            self.red.to_side(),
            self.white.to_side(),
            outcome,
            self.overtime_active,
        );
        bout.rename(Competitor::Red, self.red_name.clone());
        bout.rename(Competitor::White, self.white_name.clone());
        bout
    }
}

impl SideRecord {
    fn from_side(side: &Side) -> Self {
        Self {
            ippons: side.ippons().iter().map(|m| m.label().to_string()).collect(),
            penalties: side.penalties(),
        }
    }

    /// Unknown labels are skipped and anything past two marks is dropped.
    fn to_side(&self) -> Side {
        let marks: Vec<ScoreMark> = self
            .ippons
            .iter()
            .filter_map(|label| ScoreMark::from_label(label))
            .take(MAX_IPPONS)
            .collect();
        Side::from_parts(marks, self.penalties).unwrap_or_default()
    }
}
