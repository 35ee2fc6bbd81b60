//! Scoreboard controller: a session bound to a record store.
//!
//! Every state change is persisted right away and pushed to observers.
//! Persistence is fire-and-forget: a failed save is logged, kept as
//! [`Scoreboard::last_store_error`] and never fails the command that caused
//! it. Commands are saved durably; clock ticks only buffer their write.

use chrono::NaiveDateTime;

use crate::bout::Applied;
use crate::logging::{info, warn};
use crate::record::{Report, decode_into, encode};
use crate::session::{Command, Session};
use crate::store::RecordStore;

/// Callback invoked with the session after every change.
pub type Observer = Box<dyn FnMut(&Session) + Send>;

/// Where the session state came from when the scoreboard was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No record was stored under the key.
    Fresh,
    Restored,
    /// A record existed but could not be used; the reason is kept for display.
    Discarded(String),
}

pub struct Scoreboard<S> {
    session: Session,
    store: S,
    key: String,
    observers: Vec<Observer>,
    load_status: LoadStatus,
    last_store_error: Option<String>,
}

/// How hard a save waits for the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Durability {
    Sync,
    Buffered,
}

impl<S: RecordStore> Scoreboard<S> {
    /// Bind `session` to `store` under `key`, restoring any stored record
    /// over it. Load failures of any kind leave `session` fresh.
    pub fn open(mut session: Session, store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let load_status = match store.load(&key) {
            Ok(None) => LoadStatus::Fresh,
            Ok(Some(bytes)) => match decode_into(&mut session, &bytes) {
                Ok(()) => {
                    info!(key = %key, "session restored");
                    LoadStatus::Restored
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "discarding stored session");
                    LoadStatus::Discarded(e.to_string())
                }
            },
            Err(e) => {
                warn!(key = %key, error = %e, "failed to load stored session");
                LoadStatus::Discarded(e.to_string())
            }
        };

        Self {
            session,
            store,
            key,
            observers: Vec::new(),
            load_status,
            last_store_error: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// The most recent persistence failure, cleared by the next good write.
    pub fn last_store_error(&self) -> Option<&str> {
        self.last_store_error.as_deref()
    }

    /// Register a callback that sees the session after every change.
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    /// Run a command. Applied commands are persisted and broadcast.
    pub fn execute(&mut self, command: Command) -> Applied {
        let purge = matches!(command, Command::ResetAll { confirmed: true });
        let applied = self.session.apply(command);
        if applied.is_applied() {
            if purge {
                self.purge();
            } else {
                self.persist(Durability::Sync);
            }
            self.notify();
        }
        applied
    }

    /// Deliver one clock second to the active bout.
    ///
    /// Returns `true` when the clock ran out on this tick.
    pub fn tick(&mut self) -> bool {
        if !self.session.is_clock_running() {
            return false;
        }
        let expired = self.session.tick();
        if expired {
            info!(active = %self.session.active(), "clock expired");
        }
        self.persist(Durability::Buffered);
        self.notify();
        expired
    }

    /// Render the CSV report as of `at`.
    pub fn export_report(&self, at: NaiveDateTime) -> crate::Result<Report> {
        Ok(Report::new(&self.session, at)?)
    }

    fn persist(&mut self, durability: Durability) {
        let result = encode(&self.session)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                match durability {
                    Durability::Sync => self.store.save(&self.key, &bytes),
                    Durability::Buffered => self.store.save_buffered(&self.key, &bytes),
                }
                .map_err(|e| e.to_string())
            });
        self.record_store_result(result, "save");
    }

    fn purge(&mut self) {
        let result = self.store.purge(&self.key).map_err(|e| e.to_string());
        self.record_store_result(result, "purge");
    }

    fn record_store_result(&mut self, result: Result<(), String>, action: &str) {
        self.last_store_error = result.err().map(|e| format!("{action} failed: {e}"));
        if self.last_store_error.is_some() {
            warn!(key = %self.key, error = ?self.last_store_error, "session store write failed");
        }
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer(&self.session);
        }
    }
}

impl<S> std::fmt::Debug for Scoreboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoreboard")
            .field("key", &self.key)
            .field("active", &self.session.active())
            .field("observers", &self.observers.len())
            .field("load_status", &self.load_status)
            .field("last_store_error", &self.last_store_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::bout::{Competitor, Ignored, Strike};
    use crate::session::{Format, Target};
    use crate::store::{MemoryStore, StoreError};

    fn point(side: Competitor) -> Command {
        Command::AddPoint {
            side,
            strike: Strike::Men,
        }
    }

    #[test]
    fn test_mutations_are_persisted_and_restored() {
        let mut board = Scoreboard::open(Session::new(Format::FiveMan), MemoryStore::new(), "k");
        assert_eq!(board.load_status(), &LoadStatus::Fresh);
        assert!(board.execute(point(Competitor::Red)).is_applied());
        assert!(board.execute(Command::Select(Target::Position(3))).is_applied());

        let Scoreboard { store, .. } = board;
        let board = Scoreboard::open(Session::new(Format::FiveMan), store, "k");
        assert_eq!(board.load_status(), &LoadStatus::Restored);
        assert_eq!(board.session().active(), Target::Position(3));
        assert_eq!(
            board.session().bout(Target::Position(0)).map(|b| b.red().points()),
            Some(1)
        );
    }

    #[test]
    fn test_ignored_commands_do_not_notify() {
        let seen = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&seen);
        let mut board = Scoreboard::open(Session::new(Format::Individual), MemoryStore::new(), "k");
        board.subscribe(Box::new(move |_| {
            if let Ok(mut n) = counter.lock() {
                *n += 1;
            }
        }));

        assert!(board.execute(point(Competitor::White)).is_applied());
        assert_eq!(board.execute(Command::Undo), Applied::Yes);
        assert_eq!(board.execute(Command::Undo), Applied::No(Ignored::HistoryEmpty));
        assert_eq!(*seen.lock().unwrap(), 2);
    }

    #[test]
    fn test_reset_all_purges_record() {
        let mut board = Scoreboard::open(Session::new(Format::ThreeMan), MemoryStore::new(), "k");
        let _ = board.execute(point(Competitor::Red));
        assert!(board.store().load("k").unwrap().is_some());

        let _ = board.execute(Command::ResetAll { confirmed: false });
        assert!(board.store().load("k").unwrap().is_some());

        assert!(board.execute(Command::ResetAll { confirmed: true }).is_applied());
        assert!(board.store().load("k").unwrap().is_none());
    }

    #[test]
    fn test_garbage_record_starts_fresh() {
        let store = MemoryStore::new();
        store.save("k", b"\x00\x01").unwrap();
        let board = Scoreboard::open(Session::new(Format::ThreeMan), store, "k");
        assert!(matches!(board.load_status(), LoadStatus::Discarded(_)));
        assert_eq!(board.session(), &Session::new(Format::ThreeMan));
    }

    struct FailingStore;

    impl RecordStore for FailingStore {
        fn load(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::Poisoned)
        }

        fn save(&self, _key: &str, _record: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }

        fn purge(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }

        fn keys(&self) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    #[test]
    fn test_store_failures_never_fail_commands() {
        let mut board = Scoreboard::open(Session::new(Format::Individual), FailingStore, "k");
        assert!(matches!(board.load_status(), LoadStatus::Discarded(_)));
        assert!(board.execute(point(Competitor::Red)).is_applied());
        assert_eq!(board.last_store_error(), Some("save failed: Store lock poisoned"));
        assert!(board.execute(Command::ResetAll { confirmed: true }).is_applied());
        assert_eq!(board.last_store_error(), Some("purge failed: Store lock poisoned"));
    }

    #[test]
    fn test_successful_write_clears_store_error() {
        let mut board = Scoreboard::open(Session::new(Format::Individual), MemoryStore::new(), "k");
        let _ = board.execute(point(Competitor::Red));
        assert_eq!(board.last_store_error(), None);
    }

    /// Counts durable and buffered saves.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        synced: Mutex<usize>,
        buffered: Mutex<usize>,
    }

    impl RecordStore for CountingStore {
        fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.load(key)
        }

        fn save(&self, key: &str, record: &[u8]) -> Result<(), StoreError> {
            *self.synced.lock().unwrap() += 1;
            self.inner.save(key, record)
        }

        fn save_buffered(&self, key: &str, record: &[u8]) -> Result<(), StoreError> {
            *self.buffered.lock().unwrap() += 1;
            self.inner.save(key, record)
        }

        fn purge(&self, key: &str) -> Result<(), StoreError> {
            self.inner.purge(key)
        }

        fn keys(&self) -> Result<Vec<String>, StoreError> {
            self.inner.keys()
        }
    }

    #[test]
    fn test_ticks_buffer_and_commands_sync() {
        let mut board = Scoreboard::open(Session::new(Format::Individual), CountingStore::default(), "k");
        let _ = board.execute(Command::StartClock);
        for _ in 0..3 {
            let _ = board.tick();
        }
        let _ = board.execute(Command::StopClock);

        assert_eq!(*board.store().synced.lock().unwrap(), 2);
        assert_eq!(*board.store().buffered.lock().unwrap(), 3);
        let stored = board.store().load("k").unwrap().unwrap();
        let mut restored = Session::new(Format::Individual);
        decode_into(&mut restored, &stored).unwrap();
        assert_eq!(
            restored.active_bout().map(|b| b.clock().reading()),
            Some(crate::bout::ClockReading::new(4, 57))
        );
    }

    #[test]
    fn test_export_report_renders_session() {
        let board = Scoreboard::open(Session::new(Format::ThreeMan), MemoryStore::new(), "k");
        let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        let report = board.export_report(at).unwrap();
        assert_eq!(report.file_name, "kendo-3man-match-01-02-2024-03-04-05.csv");
        assert_eq!(report.csv.lines().count(), 6);
    }

    #[test]
    fn test_tick_only_while_running() {
        let mut board = Scoreboard::open(Session::new(Format::Individual), MemoryStore::new(), "k");
        let _ = board.execute(Command::EditClock {
            minutes: 0,
            seconds: 2,
        });
        assert!(!board.tick());
        let _ = board.execute(Command::StartClock);
        assert!(!board.tick());
        assert!(board.tick());
        assert!(!board.session().is_clock_running());
    }
}
