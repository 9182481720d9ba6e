//! Error types for the playback component.
//!
//! Every failure is recovered at the boundary of the call that detected it:
//! `open` reports `OpenFailed`/`AllocationFailed` and retains nothing, a
//! render tick reports `DecodeStalled`/`Decode`/`Draw` and leaves the player
//! state and last frame intact so the host can retry or tear down.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::BackgroundVideoPlayer`].
#[derive(Error, Debug)]
pub enum PlayerError {
    /// The decoder rejected the path, or the stream has no usable video
    /// dimensions. No resources are retained.
    #[error("failed to open video {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// The frame sink could not be created for the requested dimensions.
    #[error("failed to allocate {width}x{height} frame sink: {source}")]
    AllocationFailed {
        width: u32,
        height: u32,
        #[source]
        source: SinkError,
    },

    /// The end-of-stream retry loop exhausted its budget without producing a
    /// frame. The previous frame keeps being displayed.
    #[error("decoder produced no frame after {retries} end-of-stream restarts")]
    DecodeStalled { retries: u32 },

    /// The decoder reported an error distinct from end-of-stream.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The sink rejected a draw call.
    #[error("draw failed: {0}")]
    Draw(#[from] SinkError),
}

/// Error reported by a [`crate::VideoDecoder`] implementation.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct DecodeError(pub String);

impl DecodeError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Error reported by a [`crate::FrameSink`] or [`crate::SinkFactory`].
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct SinkError(pub String);

impl SinkError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}
