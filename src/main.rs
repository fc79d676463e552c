//! RAX Gate - Entry Point
//!
//! Serves the jump host user console over TCP.

use log::info;

use rax_gate::Server;
use rax_gate::config::GateConfig;
use rax_gate::error::ServerError;
use rax_gate::error::handlers::handle_error;
use rax_gate::users::UserRegistry;
use rax_gate::utils::logging::setup_logging;

#[tokio::main]
async fn main() {
    // env_logger picks up RUST_LOG, defaulting to info
    setup_logging();

    info!("Launching RAX Gate...");

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = GateConfig::load()?;

    let registry = match config.users_path() {
        Some(path) => UserRegistry::open(path)?,
        None => {
            info!("No users file configured, users are kept in memory");
            UserRegistry::new()
        }
    };

    let server = Server::bind(config, registry).await?;
    server.start().await;
    Ok(())
}
