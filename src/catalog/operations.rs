//! File catalog operations
//!
//! Save, lookup, list, search, rename, and delete file records, persisted
//! through the JSON record store on every mutation. Disk bytes are removed
//! best-effort when records go away; a missing disk file is never an error.

use log::info;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::code::{self, CODE_LENGTH};
use crate::catalog::records::FileRecord;
use crate::catalog::results::{AdminFileSummary, FileSummary};
use crate::error::{CatalogError, StoreError};
use crate::storage;
use crate::store::JsonStore;

/// The file catalog: one record per secret code, mirrored in memory and
/// rewritten to its JSON document on every mutation.
pub struct FileCatalog {
    store: JsonStore<FileRecord>,
    files: BTreeMap<String, FileRecord>,
}

impl FileCatalog {
    /// Open the catalog backed by the document at `path`, loading any
    /// existing records.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let store = JsonStore::new(path);
        let files = store.load();
        Self { store, files }
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.files)
    }

    /// Number of cataloged files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Generate a fresh code, unique among stored records.
    pub fn generate_code(&self, length: usize) -> String {
        code::generate_code(&self.files, length)
    }

    /// Catalog a newly saved file and return its secret code.
    pub fn save_file_record(
        &mut self,
        path: &Path,
        owner_id: &str,
        name: &str,
        folder: &str,
    ) -> Result<String, CatalogError> {
        let code = self.generate_code(CODE_LENGTH);
        self.files.insert(
            code.clone(),
            FileRecord {
                path: path.to_string_lossy().into_owned(),
                owner_id: owner_id.to_string(),
                name: name.to_string(),
                folder: folder.to_string(),
            },
        );
        self.persist()?;
        info!(
            "Cataloged {} for user {} in {} as {}",
            name, owner_id, folder, code
        );
        Ok(code)
    }

    /// Look up a record by code, case-insensitively.
    pub fn lookup(&self, code: &str) -> Option<&FileRecord> {
        self.files.get(&code.to_uppercase())
    }

    /// On-disk path for a code, case-insensitively.
    pub fn file_path(&self, code: &str) -> Option<PathBuf> {
        self.lookup(code).map(|record| PathBuf::from(&record.path))
    }

    /// The user's files in exactly `folder`; sub-folder contents excluded.
    pub fn user_files(&self, owner_id: &str, folder: &str) -> Vec<FileSummary> {
        self.files
            .iter()
            .filter(|(_, record)| record.owner_id == owner_id && record.folder == folder)
            .map(|(code, record)| FileSummary {
                code: code.clone(),
                name: record.name.clone(),
            })
            .collect()
    }

    /// Every cataloged file with its owner, for administrative use.
    pub fn all_files(&self) -> Vec<AdminFileSummary> {
        self.files
            .iter()
            .map(|(code, record)| AdminFileSummary {
                code: code.clone(),
                name: record.name.clone(),
                owner_id: record.owner_id.clone(),
            })
            .collect()
    }

    /// Case-insensitive substring search over the user's display names.
    pub fn search_files(&self, owner_id: &str, query: &str) -> Vec<FileSummary> {
        let query = query.to_lowercase();
        self.files
            .iter()
            .filter(|(_, record)| {
                record.owner_id == owner_id && record.name.to_lowercase().contains(&query)
            })
            .map(|(code, record)| FileSummary {
                code: code.clone(),
                name: record.name.clone(),
            })
            .collect()
    }

    /// Case-insensitive substring search across all owners, for
    /// administrative use.
    pub fn search_all_files(&self, query: &str) -> Vec<AdminFileSummary> {
        let query = query.to_lowercase();
        self.files
            .iter()
            .filter(|(_, record)| record.name.to_lowercase().contains(&query))
            .map(|(code, record)| AdminFileSummary {
                code: code.clone(),
                name: record.name.clone(),
                owner_id: record.owner_id.clone(),
            })
            .collect()
    }

    /// Rename a file. Only the owner may rename; the code must exist.
    pub fn rename_file(
        &mut self,
        code: &str,
        new_name: &str,
        requester_id: &str,
    ) -> Result<(), CatalogError> {
        let code = code.to_uppercase();
        let record = self
            .files
            .get_mut(&code)
            .ok_or_else(|| CatalogError::UnknownCode(code.clone()))?;
        if record.owner_id != requester_id {
            return Err(CatalogError::NotOwner(code));
        }
        record.name = new_name.to_string();
        self.persist()?;
        info!("User {} renamed {} to {}", requester_id, code, new_name);
        Ok(())
    }

    /// Delete a file record and, best-effort, its disk bytes.
    ///
    /// Only the owner may delete. Once the ownership check passes the
    /// record is always removed, whether or not the disk file still exists.
    pub fn delete_file(&mut self, code: &str, requester_id: &str) -> Result<(), CatalogError> {
        let code = code.to_uppercase();
        let record = self
            .files
            .get(&code)
            .ok_or_else(|| CatalogError::UnknownCode(code.clone()))?;
        if record.owner_id != requester_id {
            return Err(CatalogError::NotOwner(code));
        }

        storage::remove_stored_file(Path::new(&record.path));
        self.files.remove(&code);
        self.persist()?;
        info!("User {} deleted file {}", requester_id, code);
        Ok(())
    }

    /// Remove every record owned by `owner_id` whose folder equals `folder`
    /// exactly, along with its disk bytes. Returns the number removed.
    ///
    /// Used when a folder is deleted; sub-folder contents are not touched.
    pub fn delete_files_in_folder(
        &mut self,
        owner_id: &str,
        folder: &str,
    ) -> Result<usize, CatalogError> {
        let doomed: Vec<String> = self
            .files
            .iter()
            .filter(|(_, record)| record.owner_id == owner_id && record.folder == folder)
            .map(|(code, _)| code.clone())
            .collect();

        for code in &doomed {
            if let Some(record) = self.files.remove(code) {
                storage::remove_stored_file(Path::new(&record.path));
            }
        }

        if !doomed.is_empty() {
            self.persist()?;
            info!(
                "Removed {} file record(s) from {} for user {}",
                doomed.len(),
                folder,
                owner_id
            );
        }
        Ok(doomed.len())
    }
}
