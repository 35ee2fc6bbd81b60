//! Record persistence through the fjall-backed store.

#![cfg(feature = "kv")]

mod common;

use anyhow::Result;
use tempfile::TempDir;

use common::{point, won_bout};
use shiai::bout::{Competitor, Strike, Winner};
use shiai::session::{Command, Format, Session, Target};
use shiai::store::{KvStore, RecordStore, StoreError};
use shiai::{LoadStatus, Scoreboard};

fn temp_store() -> (TempDir, KvStore) {
    let dir = TempDir::new().unwrap();
    let store = KvStore::init(dir.path()).unwrap();
    (dir, store)
}

#[test]
fn open_requires_init() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nowhere");
    let err = KvStore::open(&missing).err().unwrap();
    assert!(matches!(err, StoreError::NotInitialized(_)));

    let err = shiai::Error::from(err);
    assert!(err.is_store());
    assert!(err.is_not_initialized());
}

#[test]
fn open_or_init_creates_then_reopens() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("store");
    {
        let store = KvStore::open_or_init(&path)?;
        store.save("kendo-team-3", b"{}")?;
    }
    let store = KvStore::open_or_init(&path)?;
    assert_eq!(store.load("kendo-team-3")?, Some(b"{}".to_vec()));
    Ok(())
}

#[test]
fn save_load_purge_and_keys() -> Result<()> {
    let (_dir, store) = temp_store();
    assert_eq!(store.load("kendo-team-5")?, None);

    store.save("kendo-team-5", b"five")?;
    store.save("kendo-individual", b"one")?;
    store.save("kendo-team-5", b"five again")?;

    assert_eq!(store.load("kendo-team-5")?, Some(b"five again".to_vec()));
    assert_eq!(store.keys()?, vec!["kendo-individual", "kendo-team-5"]);

    store.purge("kendo-team-5")?;
    store.purge("kendo-team-5")?;
    assert_eq!(store.load("kendo-team-5")?, None);
    assert_eq!(store.keys()?, vec!["kendo-individual"]);
    Ok(())
}

#[test]
fn buffered_saves_are_readable_after_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let store = KvStore::init(dir.path())?;
        store.save_buffered("k", b"tick")?;
        assert_eq!(store.load("k")?, Some(b"tick".to_vec()));
    }
    let store = KvStore::open(dir.path())?;
    assert_eq!(store.load("k")?, Some(b"tick".to_vec()));
    Ok(())
}

#[test]
fn scoreboard_survives_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let store = KvStore::init(dir.path())?;
        let mut board = Scoreboard::open(Session::new(Format::ThreeMan), store, "k");
        let _ = board.execute(Command::SetTeamName {
            side: Competitor::White,
            name: "Kyoto".into(),
        });
        let _ = board.execute(point(Competitor::Red, Strike::Tsuki));
        let _ = board.execute(Command::AddPenalty(Competitor::White));
        let _ = board.execute(Command::StartClock);
    }

    let store = KvStore::open(dir.path())?;
    let board = Scoreboard::open(Session::new(Format::ThreeMan), store, "k");
    assert_eq!(board.load_status(), &LoadStatus::Restored);

    let session = board.session();
    assert_eq!(session.team_name(Competitor::White), "Kyoto");
    let bout = session.bout(Target::Position(0)).unwrap();
    assert_eq!(bout.red().marks_label(), "T");
    assert_eq!(bout.white().penalties(), 1);
    // A running clock is never restored as running.
    assert!(!session.is_clock_running());
    Ok(())
}

#[test]
fn record_for_another_lineup_is_discarded() -> Result<()> {
    let (_dir, store) = temp_store();
    let mut three = Session::new(Format::ThreeMan);
    won_bout(&mut three, Competitor::Red, 2);
    store.save("shared", &shiai::record::encode(&three)?)?;

    let board = Scoreboard::open(Session::new(Format::FiveMan), store, "shared");
    assert!(matches!(board.load_status(), LoadStatus::Discarded(_)));
    assert_eq!(board.session(), &Session::new(Format::FiveMan));
    assert_eq!(board.session().announced_winner(), None);
    Ok(())
}

#[test]
fn reset_all_removes_the_record() -> Result<()> {
    let (_dir, store) = temp_store();
    let mut board = Scoreboard::open(Session::new(Format::Individual), store, "k");
    let _ = board.execute(point(Competitor::White, Strike::Men));
    let _ = board.execute(Command::EndBout);
    assert_eq!(board.session().announced_winner(), Some(Winner::White));
    assert_eq!(board.store().keys()?, vec!["k"]);

    let _ = board.execute(Command::ResetAll { confirmed: true });
    assert!(board.store().keys()?.is_empty());
    Ok(())
}
