// src/audio/error.rs
//! Errors raised while binding playback to an analysis session.

use thiserror::Error;

/// Failure to start analyzing a source. Non-retryable: the caller must
/// supply a fresh source.
#[derive(Debug, Error)]
pub enum InitError {
    /// The source file could not be opened.
    #[error("cannot open source: {0}")]
    Io(#[from] std::io::Error),
    /// The source contains no decodable audio stream.
    #[error("source has no decodable audio stream: {0}")]
    NoStream(#[from] rodio::decoder::DecoderError),
    /// A source is already bound to this analysis session.
    #[error("an analysis session is already bound to this sampler")]
    AlreadyBound,
}
