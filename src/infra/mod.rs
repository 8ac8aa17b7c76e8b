//! Filename sanitization and export filesystem helpers

mod fs;
mod sanitize;

pub use fs::{FsError, create_dir, unique_path, write_atomic};
pub use sanitize::sanitize_filename;
