//! Error handlers
//!
//! Provides error logging with severity appropriate to the error kind.

use crate::error::types::ServerError;
use log::{debug, error};

/// Log a server error.
///
/// Store and I/O failures are real problems; everything else is an expected
/// outcome of a user request (unknown code, duplicate folder) and only
/// logged at debug level.
pub fn log_error(err: &ServerError) {
    match err {
        ServerError::Store(_) | ServerError::Io(_) => error!("{}", err),
        ServerError::Directory(e) => {
            if matches!(e, crate::error::DirectoryError::Store(_)) {
                error!("{}", err);
            } else {
                debug!("{}", err);
            }
        }
        ServerError::Catalog(e) => {
            if matches!(e, crate::error::CatalogError::Store(_)) {
                error!("{}", err);
            } else {
                debug!("{}", err);
            }
        }
    }
}
