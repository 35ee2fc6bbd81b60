//! Kendo bout and team-match scoring engine.
//!
//! The engine scores a single bout, a three- or five-position team match
//! with an optional daihyosha (representative) decider, or a bank of
//! independent bouts. It tracks the countdown clock, ippons, hansoku and
//! fusen-gachi, derives each bout's outcome, keeps a bounded undo history and
//! rolls position results up into a team winner.
//!
//! # Quick Start
//!
//! ```
//! use shiai::prelude::*;
//!
//! let mut board = Scoreboard::open(Session::new(Format::FiveMan), MemoryStore::new(), "demo");
//! let _ = board.execute(Command::AddPoint { side: Competitor::Red, strike: Strike::Men });
//! let _ = board.execute(Command::EndBout);
//!
//! let senpo = board.session().bout(Target::Position(0));
//! assert_eq!(senpo.map(|b| b.outcome().win_type()), Some(WinType::IpponWin));
//! assert_eq!(board.session().active(), Target::Position(1));
//! ```
//!
//! # Modules
//!
//! - [`bout`] - Clock, score marks, outcome and the bout state machine
//! - [`session`] - Positions, active-bout selection, aggregation and commands
//! - [`record`] - JSON session records and CSV reports
//! - [`store`] - Record stores, including the fjall-backed [`KvStore`]
//! - [`scoreboard`] - Session + store controller with observers
//! - [`runtime`] - Tokio actor that drives the clock (requires `runtime` feature)
//!
//! # Feature Flags
//!
//! - `kv` - Enable the fjall record store (enabled by default)
//! - `runtime` - Enable the tokio clock driver
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features

pub mod bout;
#[cfg(feature = "cli")]
pub mod config;
mod logging;
pub mod prelude;
pub mod record;
#[cfg(feature = "runtime")]
pub mod runtime;
pub mod scoreboard;
pub mod session;
pub mod store;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

pub use bout::{Applied, Bout, Competitor, Ignored, Outcome, Strike, WinType, Winner};
pub use record::Report;
pub use scoreboard::{LoadStatus, Scoreboard};
pub use session::{Command, Format, Session, Target, TeamSummary};
#[cfg(feature = "kv")]
pub use store::KvStore;
pub use store::{MemoryStore, RecordStore, StoreError};
