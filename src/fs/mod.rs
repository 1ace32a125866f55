// src/fs/mod.rs
//! Filesystem module - directory browsing and media-type detection.

pub mod browser;
pub mod detection;

// Re-export commonly used types
pub use browser::{Entry, load_entries, tail_path};
pub use detection::is_audio;
