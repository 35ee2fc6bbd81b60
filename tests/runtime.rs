//! The tokio scoreboard task, driven with paused time.

#![cfg(feature = "runtime")]

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

use shiai::bout::{Applied, ClockReading, Competitor, Ignored, Strike};
use shiai::runtime::{self, RuntimeError};
use shiai::session::{Command, Format, Session};
use shiai::{MemoryStore, RecordStore, Scoreboard};

fn board(format: Format) -> Scoreboard<MemoryStore> {
    Scoreboard::open(Session::new(format), MemoryStore::new(), "live")
}

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap()
}

fn reading(session: &Session) -> Option<ClockReading> {
    session.active_bout().map(|bout| bout.clock().reading())
}

#[tokio::test(start_paused = true)]
async fn running_clock_ticks_once_per_second() {
    let (handle, _task) = runtime::spawn(board(Format::Individual));

    assert_eq!(handle.execute(Command::StartClock).await.unwrap(), Applied::Yes);
    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(reading(&handle.snapshot()), Some(ClockReading::new(4, 57)));

    assert_eq!(handle.execute(Command::StopClock).await.unwrap(), Applied::Yes);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(reading(&handle.snapshot()), Some(ClockReading::new(4, 57)));
}

#[tokio::test(start_paused = true)]
async fn clock_stops_at_zero() {
    let (handle, _task) = runtime::spawn(board(Format::Individual));
    let _ = handle
        .execute(Command::EditClock {
            minutes: 0,
            seconds: 2,
        })
        .await
        .unwrap();
    let _ = handle.execute(Command::StartClock).await.unwrap();

    tokio::time::sleep(Duration::from_secs(5)).await;
    let session = handle.snapshot();
    assert_eq!(reading(&session), Some(ClockReading::new(0, 0)));
    assert!(!session.is_clock_running());
    assert_eq!(
        handle.execute(Command::StartClock).await.unwrap(),
        Applied::No(Ignored::ClockExpired)
    );
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_every_change() {
    let (handle, _task) = runtime::spawn(board(Format::ThreeMan));
    let mut state = handle.subscribe();

    let _ = handle
        .execute(Command::AddPoint {
            side: Competitor::Red,
            strike: Strike::Men,
        })
        .await
        .unwrap();
    state.changed().await.unwrap();
    let points = state
        .borrow_and_update()
        .active_bout()
        .map(|bout| bout.red().points());
    assert_eq!(points, Some(1));

    let _ = handle.execute(Command::StartClock).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(state.has_changed().unwrap());
    assert_eq!(
        reading(&state.borrow_and_update()),
        Some(ClockReading::new(4, 59))
    );
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_returns_the_board() {
    let (handle, task) = runtime::spawn(board(Format::FiveMan));
    let _ = handle.execute(Command::EndBout).await.unwrap();
    let clone = handle.clone();
    drop(handle);
    drop(clone);

    let board = task.await.unwrap();
    assert_eq!(board.session().active().to_string(), "2");
    assert!(board.store().load("live").unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn stopped_task_reports_closed() {
    let (handle, task) = runtime::spawn(board(Format::Individual));
    task.abort();
    let _ = task.await;
    assert!(matches!(
        handle.execute(Command::StartClock).await,
        Err(RuntimeError::Closed)
    ));
    let err = handle.export_report(at()).await.unwrap_err();
    assert!(err.is_closed());
}

#[tokio::test(start_paused = true)]
async fn report_is_rendered_by_the_task() {
    let (handle, _task) = runtime::spawn(board(Format::FiveMan));
    let _ = handle
        .execute(Command::AddForfeit(Competitor::White))
        .await
        .unwrap();
    let _ = handle.execute(Command::EndBout).await.unwrap();

    let report = handle.export_report(at()).await.unwrap();
    assert_eq!(report.file_name, "kendo-match-05-01-2025-09-30-00.csv");
    assert!(report.csv.contains(",\"F F\",2,0,"));
}
