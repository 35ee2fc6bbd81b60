//! Convenient re-exports for common usage patterns.
//!
//! # Example
//!
//! ```
//! use shiai::prelude::*;
//!
//! let mut session = Session::new(Format::Individual);
//! let _ = session.apply(Command::AddForfeit(Competitor::White));
//! let _ = session.apply(Command::EndBout);
//! assert_eq!(session.announced_winner(), Some(Winner::White));
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Scoring
pub use crate::bout::{
    Applied, Bout, Clock, ClockReading, Competitor, Ignored, Outcome, ScoreMark, Side, Strike,
    Victory, WinType, Winner,
};
pub use crate::session::{Command, Format, Session, SideTally, Target, TeamSummary};

// Records and stores
pub use crate::record::Report;
pub use crate::scoreboard::{LoadStatus, Scoreboard};
#[cfg(feature = "kv")]
pub use crate::store::KvStore;
pub use crate::store::{MemoryStore, RecordStore, StoreError};

// Clock driver (requires "runtime" feature)
#[cfg(feature = "runtime")]
pub use crate::runtime::{ScoreboardHandle, spawn};
