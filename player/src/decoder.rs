//! The decoder capability consumed by the player.
//!
//! The underlying demuxer/decoder is opaque: anything that can open a path,
//! report stream properties, and produce frames into a [`FrameBuffer`] works,
//! including test doubles. A GStreamer-backed implementation lives behind the
//! `gstreamer` feature.

use crate::buffer::FrameBuffer;
use crate::error::DecodeError;
use std::path::Path;

/// Outcome of a single decode request.
///
/// End-of-stream is a normal signal distinct from a decode error; the player
/// responds to it by restarting the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStep {
    /// A frame was written into the supplied buffer.
    Frame,
    /// No further frames exist at the current position.
    EndOfStream,
}

/// A synchronous frame-by-frame video decoder.
///
/// Calls are serialized by the player; implementations need no internal
/// locking. `width`/`height`/`frames_per_second`/`duration_secs` are only
/// meaningful after a successful `open`.
pub trait VideoDecoder {
    /// Open the stream at `path`. Failure must leave the decoder closed.
    fn open(&mut self, path: &Path) -> Result<(), DecodeError>;

    /// Release the stream. Must be safe to call when already closed.
    fn close(&mut self);

    /// Intrinsic decoded frame width in pixels.
    fn width(&self) -> u32;

    /// Intrinsic decoded frame height in pixels.
    fn height(&self) -> u32;

    /// Source frame rate; non-positive when unknown.
    fn frames_per_second(&self) -> f64;

    /// Stream duration in seconds; non-positive when unknown.
    fn duration_secs(&self) -> f64;

    /// Decode the next frame into `frame`.
    ///
    /// The buffer is sized to the working dimensions negotiated at open
    /// time; implementations must fill it completely when returning
    /// [`DecodeStep::Frame`].
    fn next_frame(&mut self, frame: &mut FrameBuffer) -> Result<DecodeStep, DecodeError>;

    /// Seek to an absolute position in seconds.
    fn seek(&mut self, position_secs: f64) -> Result<(), DecodeError>;

    /// Presentation timestamp of the most recently decoded frame, in seconds.
    fn last_frame_time(&self) -> f64;
}
