//! # EcoFinds Shell Library
//!
//! Core library for the EcoFinds application shell.
//! Wires configuration, the session file and the marketplace to the IPC loop.
//!
//! ## Module Organization
//! ```text
//! ecofinds_shell/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── ipc.rs          ◄─── JSON-lines request dispatcher
//! ├── image.rs        ◄─── Image files to data: URLs
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState and exports
//! │   ├── config.rs   ◄─── Configuration state
//! │   ├── market.rs   ◄─── Shared marketplace (Arc<Mutex>)
//! │   └── store.rs    ◄─── File-backed session store
//! ├── commands/       ◄─── One module per screen
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod image;
pub mod ipc;
pub mod state;

use std::path::PathBuf;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ShellError;
use state::{AppState, ConfigState, FileStore, MarketState};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ECOFINDS_CONFIG";

/// Runs the shell until stdin is closed.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • ecofinds.toml, then ECOFINDS_* overrides                          │
/// │                                                                         │
/// │  2. Determine Data Directory ─────────────────────────────────────────► │
/// │     • data_dir from config, else the platform data directory           │
/// │                                                                         │
/// │  3. Open Session Store ───────────────────────────────────────────────► │
/// │     • session.json (a corrupt file starts empty)                        │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • MarketState: demo catalog, restored session                       │
/// │     • ConfigState: read-only                                            │
/// │                                                                         │
/// │  5. Serve ────────────────────────────────────────────────────────────► │
/// │     • one JSON request per stdin line, one reply per stdout line        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), ShellError> {
    info!("Starting EcoFinds shell");

    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let config = ConfigState::load(config_path)?;

    let data_dir = config.resolve_data_dir()?;
    info!(?data_dir, "Data directory determined");

    let store = FileStore::open(&data_dir)?;
    info!(path = ?store.path(), "Session store opened");

    let market = MarketState::open(&config, Box::new(store))?;
    let state = AppState::new(market, config);
    info!("State initialized");

    let stdin = BufReader::new(tokio::io::stdin());
    ipc::serve(&state, stdin, tokio::io::stdout()).await?;

    info!("EcoFinds shell stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries IPC replies.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ecofinds=trace` - Show trace for ecofinds crates only
/// - Default: INFO, DEBUG for ecofinds crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ecofinds=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
