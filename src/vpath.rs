//! Virtual path model
//!
//! Pure logic for the shallow virtual folder tree: path construction,
//! parent/child derivation, and containment checks. Folders are path
//! strings a user has declared, not real filesystem directories.

/// The root folder every user starts in
pub const ROOT: &str = "/";

/// Maximum accepted length of a single folder name
pub const MAX_FOLDER_NAME_LENGTH: usize = 64;

/// Returns whether the given path is the root folder.
pub fn is_root(path: &str) -> bool {
    path == ROOT
}

/// Builds the path of a folder named `name` directly under `parent`.
pub fn child_path(parent: &str, name: &str) -> String {
    if is_root(parent) {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Returns the parent path of `path`; the parent of root is root.
pub fn parent_path(path: &str) -> String {
    if is_root(path) {
        return ROOT.to_string();
    }
    match path.rfind('/') {
        Some(0) | None => ROOT.to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// Returns the final segment of `path`, for display.
pub fn folder_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Returns whether `candidate` is a direct child of `parent`.
///
/// Containment is judged on segment boundaries: `/docs2` is not a child
/// of `/docs`, and `/docs/a/b` is below but not a direct child of `/docs`.
pub fn is_direct_child(parent: &str, candidate: &str) -> bool {
    if candidate == parent {
        return false;
    }
    let rest = match candidate.strip_prefix(parent) {
        Some(rest) => rest,
        None => return false,
    };
    let rest = if is_root(parent) {
        rest
    } else {
        match rest.strip_prefix('/') {
            Some(rest) => rest,
            None => return false,
        }
    };
    !rest.is_empty() && !rest.contains('/')
}

/// Checks a single folder name for validity.
///
/// Separators and control characters are rejected so a name can never
/// silently create a deeper nested path.
pub fn is_valid_folder_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name.len() <= MAX_FOLDER_NAME_LENGTH
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0', '\r', '\n'])
}
