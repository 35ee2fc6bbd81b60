mod cli;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use shiai::config::{Config, ConfigError};
use shiai::record::Report;
use shiai::runtime::{self, RuntimeError};
use shiai::session::Format;
use shiai::store::{KvStore, RecordStore, StoreError};
use shiai::{Applied, LoadStatus, Scoreboard};

use cli::ScoreCommand;
use cli::logging::LoggingError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Shiai(#[from] shiai::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Parser)]
#[command(name = "shiai")]
#[command(about = "Kendo bout and team-match scoreboard with persistent records")]
struct Cli {
    /// Config file (defaults to ./shiai.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the record store
    #[arg(long, global = true, env = "SHIAI_PATH")]
    path: Option<PathBuf>,

    /// Session format: individual, bank, three-man or five-man
    #[arg(long, global = true)]
    format: Option<Format>,

    /// Record key (defaults to the format's storage key)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new record store
    Init,

    /// Print the scoreboard
    Show,

    /// List stored session keys
    Sessions,

    /// Write the CSV result report
    Export {
        /// Directory to write the report into
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// Score interactively: read commands from stdin while the clock runs
    Live,

    #[command(flatten)]
    Score(ScoreCommand),
}

/// One line of `live` input.
#[derive(Parser)]
#[command(name = "live", no_binary_name = true, disable_version_flag = true)]
struct LiveLine {
    #[command(subcommand)]
    command: LiveCommand,
}

#[derive(Subcommand)]
enum LiveCommand {
    /// Print the scoreboard
    Show,

    /// Write the CSV result report
    Export {
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// Leave live mode
    #[command(alias = "exit")]
    Quit,

    #[command(flatten)]
    Score(ScoreCommand),
}

fn main() -> Result<(), AppError> {
    let args = Cli::parse();

    let mut config = Config::discover(args.config.as_deref())?;
    if let Some(path) = args.path {
        config.store.path = path;
    }
    if let Some(format) = args.format {
        config.session.format = format;
        config.session.positions.clear();
    }
    if let Some(key) = args.key {
        config.store.key = Some(key);
    }
    cli::logging::init(&config.logging)?;

    match args.command {
        Commands::Init => {
            KvStore::init(&config.store.path)?;
            println!("Initialized record store at {}", config.store.path.display());
            Ok(())
        }
        Commands::Show => {
            let board = open_board(&config)?;
            print!("{}", cli::render(board.session()));
            Ok(())
        }
        Commands::Sessions => {
            let store = KvStore::open(&config.store.path)?;
            for key in store.keys()? {
                println!("{}", key);
            }
            Ok(())
        }
        Commands::Export { output } => {
            let board = open_board(&config)?;
            let path = write_report(&board.export_report(now())?, &output)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Commands::Live => {
            let board = open_board(&config)?;
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(live(board))
        }
        Commands::Score(command) => {
            let mut board = open_board(&config)?;
            let applied = board.execute(command.into());
            print_applied(applied);
            print!("{}", cli::render(board.session()));
            Ok(())
        }
    }
}

fn open_board(config: &Config) -> Result<Scoreboard<KvStore>, AppError> {
    let board = config.open_scoreboard()?;
    if let LoadStatus::Discarded(reason) = board.load_status() {
        eprintln!("Stored session discarded ({}); starting fresh", reason);
    }
    Ok(board)
}

async fn live(board: Scoreboard<KvStore>) -> Result<(), AppError> {
    let (handle, task) = runtime::spawn(board);
    let mut state = handle.subscribe();
    let mut was_running = false;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", cli::render(&handle.snapshot()));
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let words: Vec<&str> = line.split_whitespace().collect();
                if words.is_empty() {
                    continue;
                }
                match LiveLine::try_parse_from(words) {
                    Ok(LiveLine { command: LiveCommand::Quit }) => break,
                    Ok(LiveLine { command: LiveCommand::Show }) => {
                        print!("{}", cli::render(&handle.snapshot()));
                    }
                    Ok(LiveLine { command: LiveCommand::Export { output } }) => {
                        let report = handle.export_report(now()).await?;
                        let path = write_report(&report, &output)?;
                        println!("Wrote {}", path.display());
                    }
                    Ok(LiveLine { command: LiveCommand::Score(command) }) => {
                        let applied = handle.execute(command.into()).await?;
                        print_applied(applied);
                        print!("{}", cli::render(&handle.snapshot()));
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = state.borrow_and_update().clone();
                let running = session.is_clock_running();
                let expired = session
                    .active_bout()
                    .is_some_and(|bout| bout.clock().reading().is_zero());
                if was_running && !running && expired {
                    println!("Time! ({} stopped at 00:00)", session.active());
                }
                was_running = running;
            }
        }
    }

    drop(state);
    drop(handle);
    task.await.context("scoreboard task failed")?;
    Ok(())
}

fn write_report(report: &Report, dir: &Path) -> Result<PathBuf, AppError> {
    let path = dir.join(&report.file_name);
    std::fs::write(&path, &report.csv)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(path)
}

fn print_applied(applied: Applied) {
    if let Applied::No(reason) = applied {
        println!("Ignored: {}", reason);
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
