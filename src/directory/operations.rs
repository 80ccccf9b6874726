//! User directory operations
//!
//! Registration, folder management, navigation state, and the web password
//! pair, persisted through the JSON record store on every mutation.

use log::info;
use std::collections::BTreeMap;
use std::path::Path;

use crate::directory::records::UserRecord;
use crate::directory::results::UserSummary;
use crate::error::{DirectoryError, StoreError};
use crate::store::JsonStore;
use crate::vpath;

/// The user directory: one record per registered user, mirrored in memory
/// and rewritten to its JSON document on every mutation.
pub struct UserDirectory {
    store: JsonStore<UserRecord>,
    users: BTreeMap<String, UserRecord>,
}

impl UserDirectory {
    /// Open the directory backed by the document at `path`, loading any
    /// existing records.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let store = JsonStore::new(path);
        let users = store.load();
        Self { store, users }
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.users)
    }

    /// Number of registered users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Register a new user.
    ///
    /// The fresh record starts at root with only the root folder. Fails if
    /// the id is already registered.
    pub fn register(&mut self, user_id: &str, username: &str) -> Result<(), DirectoryError> {
        if self.users.contains_key(user_id) {
            return Err(DirectoryError::AlreadyRegistered(user_id.to_string()));
        }
        self.users
            .insert(user_id.to_string(), UserRecord::new(username));
        self.persist()?;
        info!("Registered user {} ({})", user_id, username);
        Ok(())
    }

    pub fn is_registered(&self, user_id: &str) -> bool {
        self.users.contains_key(user_id)
    }

    /// Whether the user has the admin flag; false for unknown or unset.
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.users.get(user_id).map(|u| u.is_admin).unwrap_or(false)
    }

    /// Set or clear the admin flag. Unknown ids are a no-op.
    pub fn set_admin(&mut self, user_id: &str, is_admin: bool) -> Result<(), DirectoryError> {
        let Some(user) = self.users.get_mut(user_id) else {
            return Ok(());
        };
        user.is_admin = is_admin;
        self.persist()?;
        info!("Admin flag for user {} set to {}", user_id, is_admin);
        Ok(())
    }

    /// The user's current working folder; root for unknown ids.
    pub fn current_folder(&self, user_id: &str) -> String {
        self.users
            .get(user_id)
            .map(|u| u.current_folder.clone())
            .unwrap_or_else(|| vpath::ROOT.to_string())
    }

    /// Move the user to `folder`.
    ///
    /// The path is not checked against the folder list; callers validate
    /// with `folder_exists` first. Unknown ids are a no-op.
    pub fn set_current_folder(&mut self, user_id: &str, folder: &str) -> Result<(), DirectoryError> {
        let Some(user) = self.users.get_mut(user_id) else {
            return Ok(());
        };
        user.current_folder = folder.to_string();
        self.persist()?;
        Ok(())
    }

    /// Whether `path` is in the user's folder list.
    pub fn folder_exists(&self, user_id: &str, path: &str) -> bool {
        self.users
            .get(user_id)
            .map(|u| u.folders.iter().any(|f| f == path))
            .unwrap_or(false)
    }

    /// Create a folder named `name` under the user's current folder and
    /// return its full path.
    pub fn create_folder(&mut self, user_id: &str, name: &str) -> Result<String, DirectoryError> {
        if !vpath::is_valid_folder_name(name) {
            return Err(DirectoryError::InvalidFolderName(name.to_string()));
        }
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| DirectoryError::UnknownUser(user_id.to_string()))?;

        let new_path = vpath::child_path(&user.current_folder, name);
        if user.folders.iter().any(|f| f == &new_path) {
            return Err(DirectoryError::FolderExists(new_path));
        }

        user.folders.push(new_path.clone());
        self.persist()?;
        info!("User {} created folder {}", user_id, new_path);
        Ok(new_path)
    }

    /// Every stored path that is a direct child of `folder`, in insertion
    /// order.
    pub fn subfolders(&self, user_id: &str, folder: &str) -> Vec<String> {
        let Some(user) = self.users.get(user_id) else {
            return Vec::new();
        };
        user.folders
            .iter()
            .filter(|f| vpath::is_direct_child(folder, f))
            .cloned()
            .collect()
    }

    /// Remove `folder` from the user's folder list.
    ///
    /// Resets the current folder to root if the deleted folder was current.
    /// The root folder itself can never be deleted. File records referencing
    /// the folder are the catalog's concern; callers cascade explicitly.
    pub fn delete_folder(&mut self, user_id: &str, folder: &str) -> Result<(), DirectoryError> {
        if vpath::is_root(folder) {
            return Err(DirectoryError::RootFolder);
        }
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| DirectoryError::UnknownUser(user_id.to_string()))?;

        let Some(idx) = user.folders.iter().position(|f| f == folder) else {
            return Err(DirectoryError::FolderNotFound(folder.to_string()));
        };
        user.folders.remove(idx);
        if user.current_folder == folder {
            user.current_folder = vpath::ROOT.to_string();
        }
        self.persist()?;
        info!("User {} deleted folder {}", user_id, folder);
        Ok(())
    }

    /// Set the user's web login password. Unknown ids are a no-op.
    pub fn set_web_password(
        &mut self,
        user_id: &str,
        password: &str,
    ) -> Result<(), DirectoryError> {
        let Some(user) = self.users.get_mut(user_id) else {
            return Ok(());
        };
        user.web_password = Some(password.to_string());
        self.persist()?;
        info!("User {} set a web password", user_id);
        Ok(())
    }

    /// Validate a web login by exact string equality.
    ///
    /// An unknown user or an unset password always fails.
    pub fn validate_web_login(&self, user_id: &str, password: &str) -> bool {
        self.users
            .get(user_id)
            .and_then(|u| u.web_password.as_deref())
            .map(|stored| stored == password)
            .unwrap_or(false)
    }

    /// All registered users, for administrative listings.
    pub fn all_users(&self) -> Vec<UserSummary> {
        self.users
            .iter()
            .map(|(user_id, user)| UserSummary {
                user_id: user_id.clone(),
                username: user.username.clone(),
            })
            .collect()
    }

    /// Case-insensitive substring search over user ids and names.
    pub fn search_users(&self, query: &str) -> Vec<UserSummary> {
        let query = query.to_lowercase();
        self.users
            .iter()
            .filter(|(user_id, user)| {
                user_id.to_lowercase().contains(&query)
                    || user.username.to_lowercase().contains(&query)
            })
            .map(|(user_id, user)| UserSummary {
                user_id: user_id.clone(),
                username: user.username.clone(),
            })
            .collect()
    }
}
