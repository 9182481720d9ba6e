//! Synthetic procedural video source.
//!
//! A finite stream of animated-gradient frames with a fixed frame rate,
//! implementing the full decoder contract (end-of-stream, seeking). Lets the
//! demo binary and hosts exercise pacing and looping without any codec or
//! media file installed.

use crate::buffer::FrameBuffer;
use crate::decoder::{DecodeStep, VideoDecoder};
use crate::error::DecodeError;
use std::path::Path;

/// Procedural animated-gradient decoder.
pub struct PatternDecoder {
    width: u32,
    height: u32,
    fps: f64,
    frame_count: u64,
    next_index: u64,
    open: bool,
}

impl PatternDecoder {
    /// A stream of `duration_secs * fps` frames at the given size.
    pub fn new(width: u32, height: u32, fps: f64, duration_secs: f64) -> Self {
        let frame_count = (duration_secs * fps).max(1.0) as u64;
        Self {
            width,
            height,
            fps,
            frame_count,
            next_index: 0,
            open: false,
        }
    }

    fn write_frame(&self, index: u64, frame: &mut FrameBuffer) {
        let phase = (index % self.frame_count) as u32;
        let width = frame.width();
        let data = frame.as_mut_slice();

        for (i, px) in data.chunks_exact_mut(FrameBuffer::BYTES_PER_PIXEL).enumerate() {
            let x = i as u32 % width;
            let y = i as u32 / width;

            // Diagonal gradient sliding with the frame index.
            px[0] = ((x + phase * 3) % 256) as u8; // B
            px[1] = ((y + phase * 5) % 256) as u8; // G
            px[2] = ((x + y + phase * 7) % 256) as u8; // R
            px[3] = 0xFF;
        }
    }
}

impl VideoDecoder for PatternDecoder {
    fn open(&mut self, _path: &Path) -> Result<(), DecodeError> {
        self.open = true;
        self.next_index = 0;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn frames_per_second(&self) -> f64 {
        self.fps
    }

    fn duration_secs(&self) -> f64 {
        self.frame_count as f64 / self.fps
    }

    fn next_frame(&mut self, frame: &mut FrameBuffer) -> Result<DecodeStep, DecodeError> {
        if !self.open {
            return Err(DecodeError::new("pattern source is not open"));
        }
        if self.next_index >= self.frame_count {
            return Ok(DecodeStep::EndOfStream);
        }

        self.write_frame(self.next_index, frame);
        self.next_index += 1;
        Ok(DecodeStep::Frame)
    }

    fn seek(&mut self, position_secs: f64) -> Result<(), DecodeError> {
        if !self.open {
            return Err(DecodeError::new("pattern source is not open"));
        }

        let index = (position_secs.max(0.0) * self.fps) as u64;
        self.next_index = index.min(self.frame_count);
        Ok(())
    }

    fn last_frame_time(&self) -> f64 {
        self.next_index.saturating_sub(1) as f64 / self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_stream_then_eof() {
        let mut decoder = PatternDecoder::new(4, 4, 10.0, 0.5);
        decoder.open(Path::new("pattern")).unwrap();

        let mut frame = FrameBuffer::new(4, 4);
        for _ in 0..5 {
            assert_eq!(decoder.next_frame(&mut frame).unwrap(), DecodeStep::Frame);
        }
        assert_eq!(
            decoder.next_frame(&mut frame).unwrap(),
            DecodeStep::EndOfStream
        );
    }

    #[test]
    fn test_seek_to_start_restarts() {
        let mut decoder = PatternDecoder::new(4, 4, 10.0, 0.3);
        decoder.open(Path::new("pattern")).unwrap();

        let mut frame = FrameBuffer::new(4, 4);
        while decoder.next_frame(&mut frame).unwrap() == DecodeStep::Frame {}

        decoder.seek(0.0).unwrap();
        assert_eq!(decoder.next_frame(&mut frame).unwrap(), DecodeStep::Frame);
        assert_eq!(decoder.last_frame_time(), 0.0);
    }

    #[test]
    fn test_frames_differ_over_time() {
        let mut decoder = PatternDecoder::new(8, 8, 25.0, 1.0);
        decoder.open(Path::new("pattern")).unwrap();

        let mut a = FrameBuffer::new(8, 8);
        let mut b = FrameBuffer::new(8, 8);
        decoder.next_frame(&mut a).unwrap();
        decoder.next_frame(&mut b).unwrap();

        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_closed_source_errors() {
        let mut decoder = PatternDecoder::new(4, 4, 10.0, 1.0);
        let mut frame = FrameBuffer::new(4, 4);
        assert!(decoder.next_frame(&mut frame).is_err());
    }
}
