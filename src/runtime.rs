//! Tokio driver for a [`Scoreboard`].
//!
//! One actor task owns the scoreboard. Commands arrive over an `mpsc`
//! channel and are answered on a `oneshot`; every state change is published
//! on a `watch` channel. The once-per-second clock tick is an [`Interval`]
//! that exists only while the active clock is running: stopping the clock
//! drops it, so no tick can fire for a stopped clock.

use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::bout::Applied;
use crate::logging::{debug, trace};
use crate::record::Report;
use crate::scoreboard::Scoreboard;
use crate::session::{Command, Session};
use crate::store::RecordStore;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const REQUEST_BUFFER: usize = 32;

/// Errors talking to the scoreboard task.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("scoreboard task has stopped")]
    Closed,
}

enum Request {
    Execute(Command, oneshot::Sender<Applied>),
    Export(NaiveDateTime, oneshot::Sender<crate::Result<Report>>),
}

/// Cloneable handle to a running scoreboard task.
#[derive(Debug, Clone)]
pub struct ScoreboardHandle {
    requests: mpsc::Sender<Request>,
    state: watch::Receiver<Session>,
}

impl ScoreboardHandle {
    /// Run a command and wait for its result.
    pub async fn execute(&self, command: Command) -> Result<Applied, RuntimeError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Execute(command, reply))
            .await
            .map_err(|_| RuntimeError::Closed)?;
        response.await.map_err(|_| RuntimeError::Closed)
    }

    /// Render the CSV report inside the task.
    pub async fn export_report(&self, at: NaiveDateTime) -> crate::Result<Report> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Export(at, reply))
            .await
            .map_err(|_| RuntimeError::Closed)?;
        response.await.map_err(|_| RuntimeError::Closed)?
    }

    /// Latest published session state.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every state change, ticks included.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.clone()
    }
}

/// Move `board` into a new task.
///
/// The task runs until every handle is dropped, then hands the scoreboard
/// back through the join handle.
pub fn spawn<S>(mut board: Scoreboard<S>) -> (ScoreboardHandle, JoinHandle<Scoreboard<S>>)
where
    S: RecordStore + Send + 'static,
{
    let (state_tx, state_rx) = watch::channel(board.session().clone());
    board.subscribe(Box::new(move |session| {
        state_tx.send_replace(session.clone());
    }));

    let (requests, inbox) = mpsc::channel(REQUEST_BUFFER);
    let task = tokio::spawn(run(board, inbox));
    let handle = ScoreboardHandle {
        requests,
        state: state_rx,
    };
    (handle, task)
}

async fn run<S: RecordStore>(mut board: Scoreboard<S>, mut inbox: mpsc::Receiver<Request>) -> Scoreboard<S> {
    let mut ticker: Option<Interval> = None;

    loop {
        sync_ticker(&mut ticker, board.session().is_clock_running());

        tokio::select! {
            request = inbox.recv() => match request {
                Some(Request::Execute(command, reply)) => {
                    let applied = board.execute(command);
                    let _ = reply.send(applied);
                }
                Some(Request::Export(at, reply)) => {
                    let _ = reply.send(board.export_report(at));
                }
                None => break,
            },
            () = next_tick(&mut ticker) => {
                trace!("clock tick");
                board.tick();
            }
        }
    }

    debug!(key = board.key(), "scoreboard task finished");
    board
}

/// Arm the interval when the clock starts running, drop it when it stops.
fn sync_ticker(ticker: &mut Option<Interval>, running: bool) {
    match (running, ticker.is_some()) {
        (true, false) => {
            let mut interval = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *ticker = Some(interval);
            debug!("clock tick armed");
        }
        (false, true) => {
            *ticker = None;
            debug!("clock tick cancelled");
        }
        _ => {}
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
