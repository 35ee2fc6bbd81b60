//! A single kendo bout: clock, score marks, outcome and undo history.

mod applied;
mod clock;
mod history;
mod mark;
mod outcome;
mod state;

pub use applied::{Applied, Ignored};
pub use clock::{Clock, ClockReading, DEFAULT_MINUTES, OVERTIME_CEILING};
pub use history::{HISTORY_DEPTH, History, Snapshot};
pub use mark::{Competitor, FORFEIT_PAIR, MAX_IPPONS, ParseMarkError, ScoreMark, Side, Strike};
pub use outcome::{Outcome, Victory, WinType, Winner};
pub use state::Bout;
