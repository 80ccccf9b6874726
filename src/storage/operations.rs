//! Storage operations
//!
//! File system operations for the downloads directory: note file naming and
//! I/O, size queries, and best-effort removal of stored bytes.

use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::storage::validation::note_prefix;

// Monotonic suffix for note file names; the existence check below covers
// sequences restarting after a server restart.
static NOTE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Ensure the flat downloads directory exists.
pub fn ensure_downloads_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Allocate an unused path for a new note file.
///
/// Names look like `<prefix>_<seq>.txt` with the prefix derived from the
/// note text itself.
pub fn note_save_path(dir: &Path, text: &str) -> PathBuf {
    let prefix = note_prefix(text);
    loop {
        let seq = NOTE_SEQ.fetch_add(1, Ordering::Relaxed);
        let candidate = dir.join(format!("{}_{}.txt", prefix, seq));
        if !candidate.exists() {
            return candidate;
        }
    }
}

/// Write note text to disk.
pub fn write_note(path: &Path, text: &str) -> io::Result<()> {
    fs::write(path, text)
}

/// Read note text back from disk.
pub fn read_note(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Size in bytes of a stored file, if it exists.
pub fn file_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|meta| meta.len())
}

/// Best-effort removal of a stored file.
///
/// A file that is already gone is fine; any other failure is logged and
/// swallowed so the caller's record deletion still succeeds.
pub fn remove_stored_file(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => info!("Removed stored file {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove stored file {}: {}", path.display(), e),
    }
}
