//! File record
//!
//! The persisted shape of one stored file or note, keyed in the catalog by
//! its secret code.

use serde::{Deserialize, Serialize};

use crate::vpath;

/// One cataloged file, keyed in the store by its secret code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// On-disk storage path under the flat downloads directory
    pub path: String,

    pub owner_id: String,

    /// User-editable display name
    pub name: String,

    /// Virtual folder the file lives in; unrelated to the disk layout
    #[serde(default = "default_folder")]
    pub folder: String,
}

fn default_folder() -> String {
    vpath::ROOT.to_string()
}
