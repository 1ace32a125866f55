// src/fs/browser.rs
//! Directory listing for the file browser pane.

use std::fs;
use std::path::Path;

use super::detection::is_audio;

/// One row in the file browser.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
    pub is_audio: bool,
}

/// Load the entries of `dir`, sorted alphabetically (case-insensitive).
/// An unreadable directory yields an empty listing.
pub fn load_entries(dir: &Path) -> Vec<Entry> {
    let Ok(read) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut list: Vec<Entry> = read
        .filter_map(Result::ok)
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            let path = e.path();
            let is_dir = path.is_dir();
            Entry {
                name,
                is_dir,
                is_audio: !is_dir && is_audio(&path),
            }
        })
        .collect();
    list.sort_by_key(|e| e.name.to_lowercase());
    list
}

/// Last `n` components of a path, for compact pane titles.
pub fn tail_path(path: &Path, n: usize) -> String {
    let components: Vec<String> = path
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let start = components.len().saturating_sub(n);
    components[start..].join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn tail_path_keeps_last_components() {
        let path = PathBuf::from("/home/user/music/ambient");
        assert_eq!(tail_path(&path, 2), "music/ambient");
        assert_eq!(tail_path(&path, 10), "home/user/music/ambient");
    }

    #[test]
    fn unreadable_directory_is_empty() {
        assert!(load_entries(Path::new("/no/such/directory")).is_empty());
    }
}
