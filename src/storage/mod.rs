//! Disk storage management
//!
//! Handles the flat downloads directory holding uploaded bytes and note
//! files; virtual folders never touch the disk layout.

pub mod operations;
pub mod validation;

pub use operations::{
    ensure_downloads_dir, file_size, note_save_path, read_note, remove_stored_file, write_note,
};
pub use validation::{is_text_note, note_prefix};
