//! User record
//!
//! The persisted shape of one user in the directory store. Additive fields
//! deserialize with defaults so older documents keep loading.

use serde::{Deserialize, Serialize};

use crate::vpath;

/// One registered user, keyed in the store by the string form of the chat id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,

    /// Plaintext web login secret; unset until SETPASS
    #[serde(default)]
    pub web_password: Option<String>,

    #[serde(default)]
    pub is_admin: bool,

    #[serde(default = "default_current_folder")]
    pub current_folder: String,

    /// Insertion-ordered list of created folder paths; root is always present
    #[serde(default = "default_folders")]
    pub folders: Vec<String>,
}

impl UserRecord {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            web_password: None,
            is_admin: false,
            current_folder: vpath::ROOT.to_string(),
            folders: vec![vpath::ROOT.to_string()],
        }
    }
}

fn default_current_folder() -> String {
    vpath::ROOT.to_string()
}

fn default_folders() -> Vec<String> {
    vec![vpath::ROOT.to_string()]
}
