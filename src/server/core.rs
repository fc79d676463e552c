use log::{error, info, warn};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::config::GateConfig;
use crate::error::{CancelReason, ServerError, UserError};
use crate::server::console::run_console;
use crate::session::Session;
use crate::users::UserRegistry;

/// Active sessions by peer address, with their start time.
type SessionRegistry = Arc<Mutex<HashMap<SocketAddr, Instant>>>;

pub struct Server {
    sessions: SessionRegistry,
    registry: UserRegistry,
    listener: TcpListener,
    config: Arc<GateConfig>,
}

impl Server {
    /// Binds the console listener described by `config`.
    pub async fn bind(config: GateConfig, registry: UserRegistry) -> Result<Self, ServerError> {
        let socket = config.socket_addr();
        let listener = TcpListener::bind(&socket).await.map_err(|e| {
            error!("Failed to bind to {}: {}", socket, e);
            ServerError::IoError(e)
        })?;
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            registry,
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(&self) {
        info!(
            "Starting RAX Gate console (max {} sessions, {} users)",
            self.config.max_sessions,
            self.registry.len()
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let sessions = Arc::clone(&self.sessions);
                    let registry = self.registry.clone();
                    let config = Arc::clone(&self.config);

                    // Spawn a task for each session so accept loop doesn't block
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_new_session(stream, addr, sessions, registry, config).await
                        {
                            warn!("Session {} ended with error: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

/// Registers a new session, runs the console on it and unregisters it.
async fn handle_new_session(
    stream: TcpStream,
    addr: SocketAddr,
    sessions: SessionRegistry,
    registry: UserRegistry,
    config: Arc<GateConfig>,
) -> Result<(), UserError> {
    let mut session = Session::from_tcp(stream)?
        .with_prompt_timeout(config.prompt_timeout())
        .with_max_line_length(config.max_line_length);

    let accepted = {
        let mut active = sessions.lock().await;
        if active.len() >= config.max_sessions {
            false
        } else {
            active.insert(addr, Instant::now());
            info!(
                "Session opened: {} ({}/{} sessions)",
                addr,
                active.len(),
                config.max_sessions
            );
            true
        }
    };

    if !accepted {
        warn!("Rejecting {}: too many sessions", addr);
        session
            .write_str("Too many sessions. Try again later.\r\n")
            .await?;
        return Ok(());
    }

    let result = run_console(&mut session, &registry).await;

    if let Some(started) = sessions.lock().await.remove(&addr) {
        info!("Session {} closed after {:?}", addr, started.elapsed());
    }

    match result {
        Err(UserError::SessionCancelled(CancelReason::LineTooLong)) => {
            warn!("Session {} sent a line over {} bytes", addr, config.max_line_length);
            session.write_str("Line too long, closing session.\r\n").await
        }
        Err(UserError::SessionCancelled(reason)) => {
            info!("Session {} cancelled: {}", addr, reason);
            Ok(())
        }
        other => other,
    }
}
