//! Session loop
//!
//! Handles one chat session using the Tokio async runtime.
//!
//! - Uses BufReader to read command lines from the client.
//! - Dispatches commands using `handle_command`.
//! - Manages session state from the shared session registry.

use log::{error, info};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::catalog::FileCatalog;
use crate::config::ServerConfig;
use crate::directory::UserDirectory;
use crate::protocol::{CommandStatus, handle_command, parse_command};
use crate::protocol::responses;
use crate::session::Session;

pub async fn handle_session(
    stream: TcpStream,
    client_addr: SocketAddr,
    sessions: Arc<Mutex<HashMap<SocketAddr, Session>>>,
    directory: Arc<Mutex<UserDirectory>>,
    catalog: Arc<Mutex<FileCatalog>>,
    config: Arc<ServerConfig>,
) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();

    let _ = write_half.write_all(responses::greeting().as_bytes()).await;

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                // Client closed the connection
                info!("Connection closed by client {}", client_addr);
                break;
            }
            Ok(_) => {
                // Enforce command length limit
                if line.len() > config.max_command_length {
                    let _ = write_half.write_all(b"Command too long\r\n").await;
                    continue;
                }

                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let command = parse_command(trimmed);
                info!("Received from {}: {:?}", client_addr, &command);

                let result = {
                    let mut sessions_guard = sessions.lock().await;
                    let mut directory_guard = directory.lock().await;
                    let mut catalog_guard = catalog.lock().await;

                    match sessions_guard.get_mut(&client_addr) {
                        Some(session) => handle_command(
                            session,
                            &command,
                            &mut directory_guard,
                            &mut catalog_guard,
                            &config,
                        ),
                        None => {
                            error!("Session {} not found in registry", client_addr);
                            let _ = write_half.write_all(b"Session not found\r\n").await;
                            break;
                        }
                    }
                };

                match result.status {
                    CommandStatus::CloseConnection => {
                        if let Some(msg) = result.message {
                            let _ = write_half.write_all(msg.as_bytes()).await;
                        }
                        info!("Client {} requested to quit", client_addr);
                        break;
                    }
                    CommandStatus::Success => {
                        if let Some(msg) = result.message {
                            let _ = write_half.write_all(msg.as_bytes()).await;
                        }
                    }
                    CommandStatus::Failure(reason) => {
                        info!("Command from {} failed: {}", client_addr, reason);
                        if let Some(msg) = result.message {
                            let _ = write_half.write_all(msg.as_bytes()).await;
                        }
                    }
                }
            }
            Err(e) => {
                error!("Failed to read from {}: {}", client_addr, e);
                break;
            }
        }
    }

    let mut sessions_guard = sessions.lock().await;
    sessions_guard.remove(&client_addr);
    info!("Client {} disconnected", client_addr);
}
