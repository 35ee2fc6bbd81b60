//! Persisted session records and CSV reports.

pub mod codec;
pub mod export;

pub use codec::{CodecError, decode_into, encode};
pub use export::{ExportError, Report};
