//! Looping background video playback.
//!
//! An embedded component for hosts that want a video looping behind their
//! UI: it decodes frame-by-frame, fits the stream into an arbitrary screen
//! rectangle preserving aspect ratio, paces frame consumption against
//! wall-clock time independently of the host's redraw rate, and restarts the
//! stream transparently at end-of-stream.
//!
//! # Architecture
//!
//! - [`compute_fit`] does the aspect-fit geometry once per open; its working
//!   dimensions size the frame buffer and sink so pixels are scaled once.
//! - [`BackgroundVideoPlayer`] owns the playback state machine: `open`
//!   allocates, `render_tick` paces/decodes/draws, `close` releases.
//! - [`VideoDecoder`] and [`FrameSink`]/[`SinkFactory`] are the seams to the
//!   actual codec and display; both are substitutable with test doubles.
//! - [`CanvasSink`] is a software sink, [`PatternDecoder`] a synthetic
//!   source; together they run the component with no codec installed. A
//!   GStreamer decoder is available behind the `gstreamer` feature.
//! - [`BackgroundVideoControl`] adds the widget-lifecycle glue (file name
//!   swapping, visibility-driven resource acquisition).
//!
//! # Example
//!
//! ```
//! use backdrop::{
//!     BackgroundVideoPlayer, CanvasSinkFactory, PatternDecoder, PlayerConfig, Region,
//! };
//! use std::time::Duration;
//!
//! let mut player = BackgroundVideoPlayer::new(
//!     0,
//!     PatternDecoder::new(320, 180, 25.0, 2.0),
//!     CanvasSinkFactory::new(1280, 720),
//!     PlayerConfig::default(),
//! );
//!
//! let region = Region::new(0, 0, 1280, 720);
//! player.open("pattern", region).unwrap();
//! for tick in 0..10 {
//!     player.render_tick(Duration::from_millis(tick * 16), region).unwrap();
//! }
//! assert!(player.is_playing());
//! player.close();
//! ```

mod buffer;
mod canvas;
mod clock;
mod config;
mod control;
mod decoder;
mod error;
mod geometry;
mod pattern;
mod player;
mod sink;
mod stats;

#[cfg(feature = "gstreamer")]
mod gst;

pub use buffer::{FrameBuffer, parse_tint};
pub use canvas::{CanvasSink, CanvasSinkFactory};
pub use clock::FrameClock;
pub use config::PlayerConfig;
pub use control::BackgroundVideoControl;
pub use decoder::{DecodeStep, VideoDecoder};
pub use error::{DecodeError, PlayerError, SinkError};
pub use geometry::{Fit, MediaGeometry, Region, compute_fit};
pub use pattern::PatternDecoder;
pub use player::{BackgroundVideoPlayer, PlaybackState};
pub use sink::{FrameSink, PixelFormat, SinkFactory};
pub use stats::PlaybackStats;

#[cfg(feature = "gstreamer")]
pub use gst::GstDecoder;
