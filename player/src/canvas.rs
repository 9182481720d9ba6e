//! Software frame sink compositing onto an in-memory ARGB canvas.
//!
//! Stands in for a GPU texture + draw-quad pair: the frame is scaled to the
//! destination rectangle with `fast_image_resize`, tint-modulated, and
//! blitted onto a screen-sized canvas that the host can read back.

use crate::buffer::FrameBuffer;
use crate::error::SinkError;
use crate::geometry::Region;
use crate::sink::{FrameSink, PixelFormat, SinkFactory};
use std::borrow::Cow;

const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;

/// Creates [`CanvasSink`]s that all share one output size.
pub struct CanvasSinkFactory {
    screen_width: u32,
    screen_height: u32,
}

impl CanvasSinkFactory {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
        }
    }
}

impl SinkFactory for CanvasSinkFactory {
    type Sink = CanvasSink;

    fn create_sink(
        &mut self,
        width: u32,
        height: u32,
        _format: PixelFormat,
    ) -> Result<CanvasSink, SinkError> {
        if width == 0 || height == 0 {
            return Err(SinkError::new(format!(
                "cannot allocate {width}x{height} sink"
            )));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(SinkError::new("canvas has no area"));
        }

        log::debug!(
            "Allocating {}x{} canvas sink for {}x{} frames",
            self.screen_width,
            self.screen_height,
            width,
            height
        );

        Ok(CanvasSink {
            canvas: vec![0; self.screen_width as usize * self.screen_height as usize * 4],
            canvas_width: self.screen_width,
            canvas_height: self.screen_height,
            frame_width: width,
            frame_height: height,
        })
    }
}

/// A screen-sized ARGB8888 canvas that frames are drawn onto.
pub struct CanvasSink {
    canvas: Vec<u8>,
    canvas_width: u32,
    canvas_height: u32,
    frame_width: u32,
    frame_height: u32,
}

impl CanvasSink {
    pub fn width(&self) -> u32 {
        self.canvas_width
    }

    pub fn height(&self) -> u32 {
        self.canvas_height
    }

    /// Current canvas contents in ARGB8888 format.
    pub fn canvas(&self) -> &[u8] {
        &self.canvas
    }

    /// Fill the whole canvas with one color.
    pub fn fill_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        let color = [b, g, r, a]; // ARGB8888 in native byte order
        for chunk in self.canvas.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    /// Scale `frame` to `width`x`height` using fast_image_resize.
    fn resize_frame(frame: &FrameBuffer, width: u32, height: u32) -> Result<Vec<u8>, SinkError> {
        use fast_image_resize as fr;

        let src = fr::images::Image::from_vec_u8(
            frame.width(),
            frame.height(),
            frame.as_slice().to_vec(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| SinkError::new(format!("failed to wrap source frame: {e}")))?;

        let mut dst = fr::images::Image::new(width, height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        resizer
            .resize(
                &src,
                &mut dst,
                &fr::ResizeOptions::new()
                    .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Bilinear)),
            )
            .map_err(|e| SinkError::new(format!("failed to resize frame: {e}")))?;

        Ok(dst.into_vec())
    }
}

impl FrameSink for CanvasSink {
    fn draw_quad(&mut self, dest: Region, tint: u32, frame: &FrameBuffer) -> Result<(), SinkError> {
        if frame.width() != self.frame_width || frame.height() != self.frame_height {
            return Err(SinkError::new(format!(
                "frame is {}x{}, sink was created for {}x{}",
                frame.width(),
                frame.height(),
                self.frame_width,
                self.frame_height
            )));
        }

        let dest_w = dest.width();
        let dest_h = dest.height();
        if dest_w <= 0 || dest_h <= 0 {
            return Ok(());
        }

        let scaled: Cow<[u8]> = if dest_w as u32 == frame.width() && dest_h as u32 == frame.height()
        {
            Cow::Borrowed(frame.as_slice())
        } else {
            Cow::Owned(Self::resize_frame(frame, dest_w as u32, dest_h as u32)?)
        };

        let pixels: Cow<[u8]> = if tint == OPAQUE_WHITE {
            scaled
        } else {
            Cow::Owned(apply_tint(&scaled, tint))
        };

        // Row-by-row blit, clipped to the canvas.
        let src_stride = dest_w as usize * 4;
        let dst_stride = self.canvas_width as usize * 4;

        for row in 0..dest_h {
            let cy = dest.top + row;
            if cy < 0 || cy >= self.canvas_height as i32 {
                continue;
            }

            let x0 = dest.left.max(0);
            let x1 = dest.right.min(self.canvas_width as i32);
            if x0 >= x1 {
                continue;
            }

            let src_off = row as usize * src_stride + (x0 - dest.left) as usize * 4;
            let src_len = (x1 - x0) as usize * 4;
            let dst_off = cy as usize * dst_stride + x0 as usize * 4;

            self.canvas[dst_off..dst_off + src_len]
                .copy_from_slice(&pixels[src_off..src_off + src_len]);
        }

        Ok(())
    }
}

/// Per-channel modulation by a packed ARGB tint.
fn apply_tint(pixels: &[u8], tint: u32) -> Vec<u8> {
    let [ta, tr, tg, tb] = tint.to_be_bytes();

    let mut out = Vec::with_capacity(pixels.len());
    for px in pixels.chunks_exact(4) {
        // BGRA byte order
        out.push((px[0] as u16 * tb as u16 / 255) as u8);
        out.push((px[1] as u16 * tg as u16 / 255) as u8);
        out.push((px[2] as u16 * tr as u16 / 255) as u8);
        out.push((px[3] as u16 * ta as u16 / 255) as u8);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink(screen_w: u32, screen_h: u32, frame_w: u32, frame_h: u32) -> CanvasSink {
        CanvasSinkFactory::new(screen_w, screen_h)
            .create_sink(frame_w, frame_h, PixelFormat::Argb8888)
            .unwrap()
    }

    #[test]
    fn test_unscaled_blit_at_offset() {
        let mut sink = sink(4, 4, 2, 2);
        let mut frame = FrameBuffer::new(2, 2);
        frame.fill_color(255, 0, 0, 255);

        sink.draw_quad(Region::new(1, 1, 3, 3), OPAQUE_WHITE, &frame)
            .unwrap();

        let canvas = sink.canvas();
        let px = |x: usize, y: usize| &canvas[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(px(0, 0), &[0, 0, 0, 0]); // untouched
        assert_eq!(px(1, 1), &[0, 0, 255, 255]); // red in BGRA
        assert_eq!(px(2, 2), &[0, 0, 255, 255]);
        assert_eq!(px(3, 3), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_tint_modulation() {
        let mut sink = sink(1, 1, 1, 1);
        let mut frame = FrameBuffer::new(1, 1);
        frame.fill_color(200, 100, 50, 255);

        // Half-intensity gray tint.
        sink.draw_quad(Region::new(0, 0, 1, 1), 0xFF80_8080, &frame)
            .unwrap();

        let px = &sink.canvas()[0..4];
        assert_eq!(px, &[25, 50, 100, 255]);
    }

    #[test]
    fn test_scaled_draw_fills_destination() {
        let mut sink = sink(4, 4, 2, 2);
        let mut frame = FrameBuffer::new(2, 2);
        frame.fill_color(0, 255, 0, 255);

        sink.draw_quad(Region::new(0, 0, 4, 4), OPAQUE_WHITE, &frame)
            .unwrap();

        for px in sink.canvas().chunks_exact(4) {
            assert_eq!(px, &[0, 255, 0, 255]);
        }
    }

    #[test]
    fn test_destination_clipped_to_canvas() {
        let mut sink = sink(2, 2, 4, 4);
        let mut frame = FrameBuffer::new(4, 4);
        frame.fill_color(255, 255, 255, 255);

        // Larger than the canvas and partially negative; must not panic.
        sink.draw_quad(Region::new(-1, -1, 3, 3), OPAQUE_WHITE, &frame)
            .unwrap();

        for px in sink.canvas().chunks_exact(4) {
            assert_eq!(px, &[255, 255, 255, 255]);
        }
    }

    #[test]
    fn test_rejects_mismatched_frame() {
        let mut sink = sink(4, 4, 2, 2);
        let frame = FrameBuffer::new(3, 3);

        assert!(
            sink.draw_quad(Region::new(0, 0, 3, 3), OPAQUE_WHITE, &frame)
                .is_err()
        );
    }

    #[test]
    fn test_zero_area_sink_rejected() {
        let mut factory = CanvasSinkFactory::new(4, 4);
        assert!(factory.create_sink(0, 2, PixelFormat::Argb8888).is_err());
    }
}
