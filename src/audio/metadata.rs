// src/audio/metadata.rs
//! Track metadata extraction using Lofty.

use std::path::PathBuf;

use anyhow::Result;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;

/// Metadata shown in the player panel for the current track.
#[derive(Debug, Clone)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Total track length in seconds.
    pub duration_secs: u64,
    pub sample_rate: Option<u32>,
    pub channels: Option<u8>,
}

/// Load metadata for a file path without touching player state.
/// Safe to call from a background thread.
pub fn load_metadata(path: PathBuf) -> Result<TrackMetadata> {
    let tagged_file = Probe::open(&path)?.read()?;

    let (title, artist, album) = match tagged_file.primary_tag() {
        Some(tag) => (
            tag.title().map(|s| s.to_string()),
            tag.artist().map(|s| s.to_string()),
            tag.album().map(|s| s.to_string()),
        ),
        None => (None, None, None),
    };

    let props = tagged_file.properties();

    Ok(TrackMetadata {
        title,
        artist,
        album,
        duration_secs: props.duration().as_secs(),
        sample_rate: props.sample_rate(),
        channels: props.channels(),
    })
}
