//! The paced, looping background video player.
//!
//! Owns one decoder and, while a stream is open, one frame buffer and one
//! sink sized to the aspect-fit working dimensions. The host calls
//! [`BackgroundVideoPlayer::render_tick`] once per display refresh; the
//! player decides from wall-clock time whether to pull a new decoded frame,
//! transparently restarts the stream at end-of-stream, and draws the current
//! frame into the fit rectangle on every tick so nothing ever flickers blank.
//!
//! All calls on an instance must come from the host's single render/update
//! thread; no internal locking is provided or required.

use crate::buffer::{FrameBuffer, parse_tint};
use crate::clock::FrameClock;
use crate::config::PlayerConfig;
use crate::decoder::{DecodeStep, VideoDecoder};
use crate::error::PlayerError;
use crate::geometry::{Fit, MediaGeometry, Region, compute_fit};
use crate::sink::{FrameSink, PixelFormat, SinkFactory};
use crate::stats::PlaybackStats;
use std::path::Path;
use std::time::Duration;

/// Playback lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No stream. Initial state, and terminal after `close()`.
    Closed,
    /// A stream is decodable but no frame has been drawn yet.
    Open,
    /// Frames are being paced and drawn.
    Playing,
}

/// Everything that exists only while a stream is open, released as one unit.
struct OpenStream<S> {
    fit: Fit,
    region: Region,
    clock: FrameClock,
    buffer: FrameBuffer,
    sink: S,
    stats: PlaybackStats,
    /// Set when loop-on-end is disabled and the stream ran out.
    finished: bool,
}

/// Looping background video player driven by host render ticks.
pub struct BackgroundVideoPlayer<D: VideoDecoder, F: SinkFactory> {
    /// Host-assigned identifier, used only for diagnostics.
    id: u32,
    decoder: D,
    sink_factory: F,
    config: PlayerConfig,
    tint: u32,
    state: PlaybackState,
    stream: Option<OpenStream<F::Sink>>,
    /// Last-presented timestamp recorded on close. Never consumed by the
    /// player itself; a host may pass it to `seek` after a re-open.
    resume_hint: Option<f64>,
}

impl<D: VideoDecoder, F: SinkFactory> BackgroundVideoPlayer<D, F> {
    pub fn new(id: u32, decoder: D, sink_factory: F, config: PlayerConfig) -> Self {
        let tint = parse_tint(&config.tint).unwrap_or_else(|| {
            log::warn!(
                "player {}: invalid tint {:?}, using opaque white",
                id,
                config.tint
            );
            0xFFFF_FFFF
        });

        Self {
            id,
            decoder,
            sink_factory,
            config,
            tint,
            state: PlaybackState::Closed,
            stream: None,
            resume_hint: None,
        }
    }

    /// Open `path` for playback into `region`.
    ///
    /// Any previously open stream is released first. On failure nothing is
    /// retained and the player stays `Closed`. On success the first frame is
    /// due immediately on the next [`render_tick`](Self::render_tick).
    pub fn open(&mut self, path: impl AsRef<Path>, region: Region) -> Result<(), PlayerError> {
        let path = path.as_ref();
        self.close();

        self.decoder
            .open(path)
            .map_err(|e| PlayerError::OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let source = MediaGeometry {
            width: self.decoder.width(),
            height: self.decoder.height(),
        };
        if source.width == 0 || source.height == 0 {
            self.decoder.close();
            return Err(PlayerError::OpenFailed {
                path: path.to_path_buf(),
                reason: format!(
                    "stream has no video area ({}x{})",
                    source.width, source.height
                ),
            });
        }

        let mut fps = self.decoder.frames_per_second();
        if !fps.is_finite() || fps <= 0.0 {
            log::warn!(
                "player {}: could not determine frame rate for {}, assuming 30 fps",
                self.id,
                path.display()
            );
            fps = 30.0;
        }

        let fit = compute_fit(source, region);

        let sink = match self
            .sink_factory
            .create_sink(fit.width, fit.height, PixelFormat::Argb8888)
        {
            Ok(sink) => sink,
            Err(e) => {
                self.decoder.close();
                return Err(PlayerError::AllocationFailed {
                    width: fit.width,
                    height: fit.height,
                    source: e,
                });
            }
        };

        log::info!(
            "player {}: opened {} ({}x{}) length {:.1}s, shown as {}x{} at ({}, {} - {}, {})",
            self.id,
            path.display(),
            source.width,
            source.height,
            self.decoder.duration_secs(),
            fit.width,
            fit.height,
            fit.dest.left,
            fit.dest.top,
            fit.dest.right,
            fit.dest.bottom
        );

        self.resume_hint = None;
        self.stream = Some(OpenStream {
            fit,
            region,
            clock: FrameClock::new(fps),
            buffer: FrameBuffer::new(fit.width, fit.height),
            sink,
            stats: PlaybackStats::new(fps),
            finished: false,
        });
        self.state = PlaybackState::Open;
        Ok(())
    }

    /// Advance playback and draw the current frame.
    ///
    /// `now` is a timestamp from the host's monotonic clock; `region` is the
    /// current layout rectangle and may change between ticks (the frame is
    /// re-placed, not re-decoded). A no-op while closed.
    ///
    /// A [`PlayerError::DecodeStalled`] or decode failure leaves the player
    /// `Playing` with the previous frame still displayed; the host may keep
    /// ticking or close.
    pub fn render_tick(&mut self, now: Duration, region: Region) -> Result<(), PlayerError> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(());
        };

        if region != stream.region {
            // Re-derive placement for the already-scaled working dimensions.
            let placement = compute_fit(
                MediaGeometry {
                    width: stream.fit.width,
                    height: stream.fit.height,
                },
                region,
            );
            log::debug!(
                "player {}: region changed, now shown at ({}, {} - {}, {})",
                self.id,
                placement.dest.left,
                placement.dest.top,
                placement.dest.right,
                placement.dest.bottom
            );
            stream.fit.dest = placement.dest;
            stream.region = region;
        }

        let mut tick_error = None;

        if !stream.finished && stream.clock.due(now) {
            stream.clock.advance(now);

            let mut restarts = 0u32;
            loop {
                match self.decoder.next_frame(&mut stream.buffer) {
                    Ok(DecodeStep::Frame) => {
                        stream.stats.record_decoded();
                        self.state = PlaybackState::Playing;
                        break;
                    }
                    Ok(DecodeStep::EndOfStream) => {
                        if !self.config.loop_playback {
                            log::info!("player {}: playback finished", self.id);
                            stream.finished = true;
                            break;
                        }

                        restarts += 1;
                        if restarts > self.config.eof_retry_limit {
                            tick_error = Some(PlayerError::DecodeStalled {
                                retries: restarts - 1,
                            });
                            break;
                        }

                        log::debug!("player {}: end of stream, restarting", self.id);
                        if let Err(e) = self.decoder.seek(0.0) {
                            tick_error = Some(PlayerError::Decode(e));
                            break;
                        }
                        stream.clock.make_due_now();
                        stream.stats.record_loop();
                    }
                    Err(e) => {
                        tick_error = Some(PlayerError::Decode(e));
                        break;
                    }
                }
            }
        }

        // The current frame stays visible between frame boundaries and
        // across failed pulls. Nothing is drawn before the first frame has
        // been decoded.
        if self.state == PlaybackState::Playing {
            match stream.sink.draw_quad(stream.fit.dest, self.tint, &stream.buffer) {
                Ok(()) => {
                    stream.stats.record_rendered();
                    stream
                        .stats
                        .maybe_log_stats(Duration::from_secs(self.config.stats_interval_secs));
                }
                Err(e) => {
                    if tick_error.is_none() {
                        tick_error = Some(PlayerError::Draw(e));
                    }
                }
            }
        }

        match tick_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Release the sink and close the decoder. Idempotent.
    ///
    /// The last-presented timestamp is recorded as a resume hint for a host
    /// that wants to continue a later re-open near where playback stopped.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.resume_hint = Some(self.decoder.last_frame_time());
            self.decoder.close();
            log::debug!(
                "player {}: closed ({} decoded, {} drawn, {} loops)",
                self.id,
                stream.stats.frames_decoded(),
                stream.stats.frames_rendered(),
                stream.stats.loops_completed()
            );
        }
        self.state = PlaybackState::Closed;
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True only while frames are being paced and drawn.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// True whenever an open stream has positive frame dimensions. This
    /// player is video-only, so every open stream qualifies.
    pub fn has_video(&self) -> bool {
        self.stream.is_some()
    }

    /// Last-presented timestamp recorded by the most recent `close()`.
    pub fn resume_hint(&self) -> Option<f64> {
        self.resume_hint
    }

    /// Interval between decoded frames for the open stream.
    pub fn frame_period(&self) -> Option<Duration> {
        self.stream.as_ref().map(|s| s.clock.frame_period())
    }

    pub fn stats(&self) -> Option<&PlaybackStats> {
        self.stream.as_ref().map(|s| &s.stats)
    }

    /// The sink currently drawn into, for hosts that need readback.
    pub fn sink(&self) -> Option<&F::Sink> {
        self.stream.as_ref().map(|s| &s.sink)
    }
}

impl<D: VideoDecoder, F: SinkFactory> Drop for BackgroundVideoPlayer<D, F> {
    fn drop(&mut self) {
        self.close();
    }
}
