//! Server core
//!
//! Owns the shared state (session registry, user directory, file catalog)
//! and runs the accept loop, spawning one task per chat session.

use log::{error, info, warn};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::catalog::FileCatalog;
use crate::config::ServerConfig;
use crate::directory::UserDirectory;
use crate::session::{Session, handle_session};
use crate::storage;

pub struct Server {
    sessions: Arc<Mutex<HashMap<SocketAddr, Session>>>,
    directory: Arc<Mutex<UserDirectory>>,
    catalog: Arc<Mutex<FileCatalog>>,
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    pub async fn new(config: ServerConfig) -> Self {
        let socket = config.control_socket();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                panic!("Server startup failed on socket {}: {}", socket, e);
            }
        };

        if let Err(e) = storage::ensure_downloads_dir(&config.downloads_path()) {
            warn!("Failed to create downloads directory: {}", e);
        } else {
            info!("Downloads directory: {}", config.downloads_dir);
        }

        let directory = UserDirectory::open(&config.user_db_path);
        let catalog = FileCatalog::open(&config.file_db_path);
        info!(
            "Loaded {} user record(s) and {} file record(s)",
            directory.user_count(),
            catalog.file_count()
        );

        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            directory: Arc::new(Mutex::new(directory)),
            catalog: Arc::new(Mutex::new(catalog)),
            listener,
            config: Arc::new(config),
        }
    }

    pub async fn start(&self) {
        info!(
            "Starting cloudstash server on {} (max {} clients)",
            self.config.control_socket(),
            self.config.max_clients
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let mut sessions_guard = self.sessions.lock().await;
                    if sessions_guard.len() >= self.config.max_clients {
                        drop(sessions_guard);
                        warn!("Rejecting {}: server is full", addr);
                        let mut stream = stream;
                        let _ = stream.write_all(b"Server is full, try again later\r\n").await;
                        continue;
                    }
                    sessions_guard.insert(addr, Session::new(addr));
                    drop(sessions_guard);

                    let sessions = Arc::clone(&self.sessions);
                    let directory = Arc::clone(&self.directory);
                    let catalog = Arc::clone(&self.catalog);
                    let config = Arc::clone(&self.config);

                    // Spawn a task for each session so the accept loop doesn't block
                    tokio::spawn(async move {
                        handle_session(stream, addr, sessions, directory, catalog, config).await;
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
