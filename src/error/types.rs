//! Error types
//!
//! Defines domain-specific error types for each module of the cloudstash server.

use std::fmt;
use std::io;

/// Record store errors
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Record store I/O error: {}", e),
            StoreError::Serialize(e) => write!(f, "Record store serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::Io(error)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Serialize(error)
    }
}

/// User directory errors
#[derive(Debug)]
pub enum DirectoryError {
    UnknownUser(String),
    AlreadyRegistered(String),
    FolderExists(String),
    FolderNotFound(String),
    InvalidFolderName(String),
    RootFolder,
    Store(StoreError),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::UnknownUser(id) => write!(f, "Unknown user: {}", id),
            DirectoryError::AlreadyRegistered(id) => write!(f, "Already registered: {}", id),
            DirectoryError::FolderExists(path) => write!(f, "Folder already exists: {}", path),
            DirectoryError::FolderNotFound(path) => write!(f, "Folder not found: {}", path),
            DirectoryError::InvalidFolderName(name) => write!(f, "Invalid folder name: {}", name),
            DirectoryError::RootFolder => write!(f, "The root folder cannot be deleted"),
            DirectoryError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DirectoryError {}

impl From<StoreError> for DirectoryError {
    fn from(error: StoreError) -> Self {
        DirectoryError::Store(error)
    }
}

/// File catalog errors
#[derive(Debug)]
pub enum CatalogError {
    UnknownCode(String),
    NotOwner(String),
    Store(StoreError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnknownCode(code) => write!(f, "Unknown code: {}", code),
            CatalogError::NotOwner(code) => write!(f, "Not the owner of file: {}", code),
            CatalogError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<StoreError> for CatalogError {
    fn from(error: StoreError) -> Self {
        CatalogError::Store(error)
    }
}

/// General server error that encompasses all error types
#[derive(Debug)]
pub enum ServerError {
    Directory(DirectoryError),
    Catalog(CatalogError),
    Store(StoreError),
    Io(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Directory(e) => write!(f, "{}", e),
            ServerError::Catalog(e) => write!(f, "{}", e),
            ServerError::Store(e) => write!(f, "{}", e),
            ServerError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

// Implement conversions from specific errors to ServerError
impl From<DirectoryError> for ServerError {
    fn from(error: DirectoryError) -> Self {
        ServerError::Directory(error)
    }
}

impl From<CatalogError> for ServerError {
    fn from(error: CatalogError) -> Self {
        ServerError::Catalog(error)
    }
}

impl From<StoreError> for ServerError {
    fn from(error: StoreError) -> Self {
        ServerError::Store(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::Io(error)
    }
}
