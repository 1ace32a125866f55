// src/audio/mod.rs
//! Audio module - playback, sample capture, metadata, and signal analysis.

pub mod error;
pub mod metadata;
pub mod player;
pub mod sample_capture;
pub mod sampler;

// Re-export commonly used types
pub use error::InitError;
pub use metadata::TrackMetadata;
pub use player::MusicPlayer;
pub use sample_capture::SampleCapture;
pub use sampler::{SampleBuffer, SampleTap, SignalSampler};
