//! Session management
//!
//! Defines per-connection session state and the line-oriented session
//! loop that reads commands, dispatches them, and writes replies.

pub mod handler;
pub mod state;

pub use handler::handle_session;
pub use state::Session;
