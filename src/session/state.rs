//! Module `state`
//!
//! Defines the `Session` struct and associated methods to manage one chat
//! connection's state: the peer address and the bound user identity.

use std::net::SocketAddr;

/// Represents the state of one connected chat session.
///
/// The user id is bound with IDENT and plays the role of a chat id; all
/// durable state (current folder, folder list) lives in the user directory,
/// not here.
pub struct Session {
    user_id: Option<String>,
    client_addr: SocketAddr,
}

impl Session {
    pub fn new(client_addr: SocketAddr) -> Self {
        Self {
            user_id: None,
            client_addr,
        }
    }

    /// Clears the bound identity, e.g. on QUIT.
    pub fn reset(&mut self) {
        self.user_id = None;
    }

    /// Returns the bound user id, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns whether the session has a bound identity.
    pub fn is_identified(&self) -> bool {
        self.user_id.is_some()
    }

    /// Returns the peer socket address.
    pub fn client_addr(&self) -> &SocketAddr {
        &self.client_addr
    }

    /// Binds or clears the session's user id.
    pub fn set_user_id(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
    }
}
