//! The pixel sink capability consumed by the player.
//!
//! The sink stands in for a GPU texture and its draw primitive: it is
//! constructed once per open at the working media dimensions and receives one
//! draw per render tick. A software implementation is in [`crate::canvas`].

use crate::buffer::FrameBuffer;
use crate::error::SinkError;
use crate::geometry::Region;

/// Pixel layout accepted by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32-bit ARGB, BGRA byte order (the only format the component emits).
    Argb8888,
}

/// Something that can display a frame inside a destination rectangle.
pub trait FrameSink {
    /// Draw `frame` into `dest`, modulated by the packed ARGB `tint`
    /// (`0xFFFF_FFFF` leaves the pixels untouched).
    fn draw_quad(&mut self, dest: Region, tint: u32, frame: &FrameBuffer) -> Result<(), SinkError>;
}

/// Constructs sinks sized to the media being opened.
///
/// Held by the player for its whole lifetime so repeated opens can allocate
/// fresh sinks; creation failure surfaces from `open` as an allocation error.
pub trait SinkFactory {
    type Sink: FrameSink;

    fn create_sink(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self::Sink, SinkError>;
}
