// src/fs/detection.rs
//! Audio detection using magic numbers with extension-based fallback.

use std::path::Path;

use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// Returns true if the file's media type indicates audio. Any such file
/// is offered for playback; no format-specific handling happens here.
pub fn is_audio(path: &Path) -> bool {
    // 1. Magic-number sniffing
    if let Ok(Some(kind)) = Infer::new().get_from_path(path) {
        return kind.matcher_type() == MatcherType::Audio;
    }

    // 2. Fallback to extension-based lookup
    MimeGuess::from_path(path)
        .first()
        .map(|mime| mime.type_() == mime_guess::mime::AUDIO)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_fallback_recognizes_audio() {
        assert!(is_audio(&PathBuf::from("missing/track.mp3")));
        assert!(is_audio(&PathBuf::from("missing/track.flac")));
        assert!(!is_audio(&PathBuf::from("missing/notes.txt")));
        assert!(!is_audio(&PathBuf::from("missing/clip.mp4")));
    }
}
