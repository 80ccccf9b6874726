//! Cloudstash - Entry Point
//!
//! A chat-driven personal cloud storage server: files and notes behind
//! short secret codes, organized in per-user virtual folders.

use env_logger;
use log::info;

use cloudstash::Server;
use cloudstash::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching cloudstash server...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(config).await;
    server.start().await;
}
