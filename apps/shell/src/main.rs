//! # EcoFinds Shell Entry Point
//!
//! Starts the shell process the frontend talks to over stdin/stdout.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, on stderr)
//! 2. Load configuration
//! 3. Open the session store in the app data directory
//! 4. Create state (MarketState, ConfigState)
//! 5. Serve IPC requests until stdin closes

use tracing::error;

#[tokio::main]
async fn main() {
    ecofinds_shell::init_tracing();

    if let Err(e) = ecofinds_shell::run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}
