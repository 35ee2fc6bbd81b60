//! Unified error type for the shiai library.
//!
//! Scoring itself never fails: rejected commands come back as
//! [`Applied::No`](crate::bout::Applied). Everything here is infrastructure.

use thiserror::Error;

use crate::record::ExportError;
#[cfg(feature = "runtime")]
use crate::runtime::RuntimeError;
use crate::store::StoreError;

/// Unified error type for all shiai operations.
///
/// # Example
///
/// ```ignore
/// use shiai::{Result, KvStore};
///
/// fn open() -> Result<KvStore> {
///     Ok(KvStore::open_or_init(".shiai".as_ref())?)
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from a record store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The CSV report could not be rendered.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// The scoreboard task is gone.
    #[cfg(feature = "runtime")]
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a record store error.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns `true` if the store at the requested path was never initialized.
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotInitialized(_)))
    }

    /// Returns `true` if the scoreboard task has stopped.
    #[cfg(feature = "runtime")]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Runtime(RuntimeError::Closed))
    }
}
