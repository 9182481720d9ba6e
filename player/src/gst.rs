//! GStreamer-backed [`VideoDecoder`].
//!
//! A pull-based wrapper over a `filesrc ! decodebin ! videoconvert !
//! videoscale ! appsink` pipeline emitting BGRA. The pipeline prerolls at
//! open time to report the native stream properties; output is renegotiated
//! to the frame-buffer size the player settles on, so `videoscale` does the
//! fit scaling in-pipeline.

use crate::buffer::FrameBuffer;
use crate::decoder::{DecodeStep, VideoDecoder};
use crate::error::DecodeError;
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use std::path::Path;

/// Samples tolerated at a stale size while the pipeline renegotiates caps.
const CAPS_SETTLE_PULLS: u32 = 8;

/// Synchronous frame-by-frame decoder over a GStreamer pipeline.
#[derive(Default)]
pub struct GstDecoder {
    pipeline: Option<gst::Pipeline>,
    app_sink: Option<gst_app::AppSink>,
    width: u32,
    height: u32,
    fps: f64,
    duration_secs: f64,
    last_frame_time: f64,
    /// Currently negotiated output size, updated from the buffer handed to
    /// `next_frame`.
    output_size: Option<(u32, u32)>,
}

impl GstDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn preroll(
        pipeline: &gst::Pipeline,
    ) -> Result<(gst_app::AppSink, gst_video::VideoInfo), DecodeError> {
        let app_sink = pipeline
            .by_name("sink")
            .ok_or_else(|| DecodeError::new("failed to get appsink from pipeline"))?
            .dynamic_cast::<gst_app::AppSink>()
            .map_err(|_| DecodeError::new("sink is not an AppSink"))?;

        // Pacing is the player's job; deliver frames as fast as requested.
        app_sink.set_property("sync", false);
        app_sink.set_property("max-buffers", 2u32);

        pipeline
            .set_state(gst::State::Paused)
            .map_err(|e| DecodeError::new(format!("failed to preroll pipeline: {e}")))?;

        let (result, _, _) = pipeline.state(Some(gst::ClockTime::from_seconds(5)));
        result.map_err(|e| DecodeError::new(format!("pipeline failed to preroll: {e:?}")))?;

        let caps = app_sink
            .static_pad("sink")
            .and_then(|pad| pad.current_caps())
            .ok_or_else(|| DecodeError::new("no caps negotiated on appsink"))?;

        let info = gst_video::VideoInfo::from_caps(&caps)
            .map_err(|e| DecodeError::new(format!("unsupported caps on appsink: {e}")))?;

        Ok((app_sink, info))
    }

    /// Renegotiate the capsfilter to emit `width`x`height` frames.
    fn set_output_caps(&mut self, width: u32, height: u32) -> Result<(), DecodeError> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| DecodeError::new("decoder is not open"))?;

        let filter = pipeline
            .by_name("filter")
            .ok_or_else(|| DecodeError::new("failed to get capsfilter from pipeline"))?;

        let caps = gst::Caps::builder("video/x-raw")
            .field("format", "BGRA")
            .field("width", width as i32)
            .field("height", height as i32)
            .build();

        log::debug!("GStreamer output renegotiated to {}x{}", width, height);
        filter.set_property("caps", &caps);
        self.output_size = Some((width, height));
        Ok(())
    }
}

impl VideoDecoder for GstDecoder {
    fn open(&mut self, path: &Path) -> Result<(), DecodeError> {
        self.close();

        gst::init().map_err(|e| DecodeError::new(format!("failed to initialize GStreamer: {e}")))?;

        log::info!("Creating GStreamer pipeline for: {}", path.display());
        let pipeline_str = format!(
            "filesrc location={} ! decodebin ! videoconvert ! videoscale ! capsfilter name=filter caps=video/x-raw,format=BGRA ! appsink name=sink",
            path.display()
        );
        log::debug!("GStreamer pipeline: {}", pipeline_str);

        let pipeline = gst::parse::launch(&pipeline_str)
            .map_err(|e| DecodeError::new(format!("failed to create pipeline: {e}")))?
            .dynamic_cast::<gst::Pipeline>()
            .map_err(|_| DecodeError::new("pipeline is not a gst::Pipeline"))?;

        let (app_sink, info) = match Self::preroll(&pipeline) {
            Ok(prerolled) => prerolled,
            Err(e) => {
                let _ = pipeline.set_state(gst::State::Null);
                return Err(e);
            }
        };

        self.width = info.width();
        self.height = info.height();

        let fps = info.fps();
        self.fps = if fps.denom() > 0 {
            fps.numer() as f64 / fps.denom() as f64
        } else {
            0.0
        };

        self.duration_secs = pipeline
            .query_duration::<gst::ClockTime>()
            .map(|d| d.nseconds() as f64 / 1e9)
            .unwrap_or(0.0);

        if let Err(e) = pipeline.set_state(gst::State::Playing) {
            let _ = pipeline.set_state(gst::State::Null);
            return Err(DecodeError::new(format!("failed to start pipeline: {e}")));
        }

        self.last_frame_time = 0.0;
        self.output_size = None;
        self.pipeline = Some(pipeline);
        self.app_sink = Some(app_sink);
        Ok(())
    }

    fn close(&mut self) {
        if let Some(pipeline) = self.pipeline.take() {
            if let Err(e) = pipeline.set_state(gst::State::Null) {
                log::warn!("Failed to set pipeline state to Null: {}", e);
            }

            // Drain pending messages so nothing leaks across opens.
            if let Some(bus) = pipeline.bus() {
                while bus.pop().is_some() {}
            }
        }

        self.app_sink = None;
        self.output_size = None;
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
        self.duration_secs
    }

    fn next_frame(&mut self, frame: &mut FrameBuffer) -> Result<DecodeStep, DecodeError> {
        if self.output_size != Some((frame.width(), frame.height())) {
            self.set_output_caps(frame.width(), frame.height())?;
        }

        let app_sink = self
            .app_sink
            .as_ref()
            .ok_or_else(|| DecodeError::new("decoder is not open"))?;

        for _ in 0..CAPS_SETTLE_PULLS {
            if app_sink.is_eos() {
                return Ok(DecodeStep::EndOfStream);
            }

            let sample = match app_sink.pull_sample() {
                Ok(sample) => sample,
                Err(_) if app_sink.is_eos() => return Ok(DecodeStep::EndOfStream),
                Err(e) => return Err(DecodeError::new(format!("failed to pull sample: {e}"))),
            };

            let buffer = sample
                .buffer()
                .ok_or_else(|| DecodeError::new("sample has no buffer"))?;
            let map = buffer
                .map_readable()
                .map_err(|_| DecodeError::new("failed to map sample buffer"))?;

            // Samples at the previous size can still arrive right after a
            // caps change; drop them until the new size comes through.
            if map.len() != frame.as_slice().len() {
                log::trace!(
                    "Dropping {}-byte sample while waiting for {}-byte frames",
                    map.len(),
                    frame.as_slice().len()
                );
                continue;
            }

            frame.as_mut_slice().copy_from_slice(map.as_slice());
            if let Some(pts) = buffer.pts() {
                self.last_frame_time = pts.nseconds() as f64 / 1e9;
            }
            return Ok(DecodeStep::Frame);
        }

        Err(DecodeError::new(
            "pipeline did not renegotiate to the requested frame size",
        ))
    }

    fn seek(&mut self, position_secs: f64) -> Result<(), DecodeError> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| DecodeError::new("decoder is not open"))?;

        let position = gst::ClockTime::from_nseconds((position_secs.max(0.0) * 1e9) as u64);
        pipeline
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, position)
            .map_err(|e| DecodeError::new(format!("seek failed: {e}")))
    }

    fn last_frame_time(&self) -> f64 {
        self.last_frame_time
    }
}

impl Drop for GstDecoder {
    fn drop(&mut self) {
        self.close();
    }
}
