//! Connection handler
//!
//! Runs the per-connection command loop and the teardown path. The session
//! state is owned by this task, so commands and the disconnect
//! reconciliation for one connection are naturally sequential while other
//! connections proceed independently; in particular, key derivation never
//! runs under a lock shared across connections.

use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::account::SharedAccountStore;
use crate::client::ConnectionRegistry;
use crate::middleware::{LoginThrottle, logging};
use crate::protocol::{Command, CommandStatus, handle_command, parse_command, responses};
use crate::server::ServerConfig;
use crate::session::{SessionState, reconcile_disconnect};

/// Handles one connection from accept to teardown.
///
/// - Registers an outbound channel so announcements reach this connection.
/// - Reads command lines, dispatches them, and sends responses.
/// - Runs disconnect reconciliation exactly once, after the loop exits and
///   no further command can be dispatched.
pub async fn handle_client(
    stream: TcpStream,
    addr: SocketAddr,
    registry: Arc<Mutex<ConnectionRegistry>>,
    store: SharedAccountStore,
    config: Arc<ServerConfig>,
) {
    let (read_half, write_half) = stream.into_split();
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(write_outbound(write_half, rx));

    {
        let mut registry = registry.lock().await;
        if registry.len() >= config.max_clients {
            info!("Rejecting {}: server full", addr);
            let _ = tx.send(responses::SERVER_FULL.to_string());
            return;
        }
        registry.insert(addr, tx.clone());
    }

    let _ = tx.send(responses::GREETING.to_string());

    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    let mut session = SessionState::new();
    let mut throttle = LoginThrottle::new(
        config.login_attempt_limit,
        config.login_attempt_window(),
    );

    let disconnect_reason;

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                disconnect_reason = "client closed connection".to_string();
                break;
            }
            Ok(_) => {
                if line.len() > config.max_command_length {
                    let _ = tx.send(responses::COMMAND_TOO_LONG.to_string());
                    continue;
                }

                let command = parse_command(&line);
                logging::log_command(&addr, &command);

                let result =
                    handle_command(&mut session, &command, store.as_ref(), &config, &mut throttle);

                if matches!(command, Command::HELLO(_)) {
                    if let Some(name) = session.display_name() {
                        registry.lock().await.set_display_name(&addr, name.to_string());
                    }
                }

                if let Some(announcement) = &result.announcement {
                    registry.lock().await.broadcast(announcement);
                }

                if let Some(message) = result.message {
                    let _ = tx.send(message);
                }

                if matches!(result.status, CommandStatus::CloseConnection) {
                    disconnect_reason = "client quit".to_string();
                    break;
                }
            }
            Err(e) => {
                disconnect_reason = format!("read error: {}", e);
                break;
            }
        }
    }

    logging::log_disconnect(&addr, &disconnect_reason);

    // Reconciliation failure is logged, never fatal; teardown proceeds.
    match reconcile_disconnect(store.as_ref(), &session) {
        Ok(outcome) if outcome.wrote_any() => {
            info!(
                "Persisted session attributes for {}",
                session.display_name().unwrap_or("<unidentified>")
            );
        }
        Ok(_) => {}
        Err(e) => {
            error!("Session write-back failed for {}: {}", addr, e);
        }
    }

    registry.lock().await.remove(&addr);
}

/// Drains the outbound channel onto the socket. Ends when the channel
/// closes (teardown) or the peer stops accepting writes.
async fn write_outbound(mut write_half: OwnedWriteHalf, mut rx: UnboundedReceiver<String>) {
    while let Some(message) = rx.recv().await {
        if write_half.write_all(message.as_bytes()).await.is_err() {
            break;
        }
        if write_half.write_all(b"\r\n").await.is_err() {
            break;
        }
    }
}
