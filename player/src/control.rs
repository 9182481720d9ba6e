//! Host-side widget glue around the player.
//!
//! Mirrors the lifecycle a window manager drives: a file name that can be
//! swapped at any time, visibility that releases resources while hidden, a
//! per-frame `process` that lazily (re)acquires playback, and a `render`
//! that delegates one tick. Errors are logged here rather than propagated;
//! the control keeps retrying on later frames.

use crate::config::PlayerConfig;
use crate::decoder::VideoDecoder;
use crate::geometry::Region;
use crate::player::BackgroundVideoPlayer;
use crate::sink::SinkFactory;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A background video area owned by a host widget.
pub struct BackgroundVideoControl<D: VideoDecoder, F: SinkFactory> {
    id: u32,
    player: BackgroundVideoPlayer<D, F>,
    file_name: Option<PathBuf>,
    region: Region,
    visible: bool,
}

impl<D: VideoDecoder, F: SinkFactory> BackgroundVideoControl<D, F> {
    /// `id` identifies this control in diagnostics and is forwarded to the
    /// player; the host assigns it.
    pub fn new(id: u32, decoder: D, sink_factory: F, config: PlayerConfig, region: Region) -> Self {
        Self {
            id,
            player: BackgroundVideoPlayer::new(id, decoder, sink_factory, config),
            file_name: None,
            region,
            visible: true,
        }
    }

    /// Replace the file shown by this control.
    ///
    /// Setting the name already in use is a no-op; otherwise current playback
    /// is released and the next `process` opens the new file.
    pub fn set_file_name(&mut self, file_name: impl AsRef<Path>) {
        let file_name = file_name.as_ref();
        if self.file_name.as_deref() == Some(file_name) {
            return;
        }

        log::debug!(
            "control {}: file name set to {}",
            self.id,
            file_name.display()
        );
        self.free_resources();
        self.file_name = Some(file_name.to_path_buf());
    }

    /// Update the layout rectangle; takes effect on the next render.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Hiding the control releases the decoder and sink immediately.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible && !visible {
            self.free_resources();
        }
        self.visible = visible;
    }

    /// Per-frame upkeep: acquire playback when visible and not yet playing.
    pub fn process(&mut self) {
        if !self.visible || self.is_playing_video() {
            return;
        }

        let Some(file_name) = self.file_name.clone() else {
            return;
        };

        if let Err(e) = self.player.open(&file_name, self.region) {
            log::error!(
                "control {}: error starting playback of {}: {}",
                self.id,
                file_name.display(),
                e
            );
        }
    }

    /// Render one tick at the host's current timestamp.
    pub fn render(&mut self, now: Duration) {
        if !self.visible {
            return;
        }

        if let Err(e) = self.player.render_tick(now, self.region) {
            log::error!("control {}: render tick failed: {}", self.id, e);
        }
    }

    pub fn is_playing_video(&self) -> bool {
        self.player.is_playing() && self.player.has_video()
    }

    /// Release the decoder and sink, keeping the file name for a later
    /// re-acquire.
    pub fn free_resources(&mut self) {
        self.player.close();
    }

    pub fn player(&self) -> &BackgroundVideoPlayer<D, F> {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasSinkFactory;
    use crate::pattern::PatternDecoder;

    fn control() -> BackgroundVideoControl<PatternDecoder, CanvasSinkFactory> {
        BackgroundVideoControl::new(
            1,
            PatternDecoder::new(32, 32, 25.0, 1.0),
            CanvasSinkFactory::new(320, 240),
            PlayerConfig::default(),
            Region::new(0, 0, 320, 240),
        )
    }

    #[test]
    fn test_process_opens_once_visible_file_is_set() {
        let mut control = control();

        // Nothing to play yet.
        control.process();
        assert!(!control.is_playing_video());

        control.set_file_name("pattern");
        control.process();
        control.render(Duration::ZERO);
        assert!(control.is_playing_video());

        // Already playing; process must not re-open.
        control.process();
        assert!(control.is_playing_video());
    }

    #[test]
    fn test_hiding_releases_resources() {
        let mut control = control();
        control.set_file_name("pattern");
        control.process();
        control.render(Duration::ZERO);

        control.set_visible(false);
        assert!(!control.is_playing_video());
        assert!(!control.player().has_video());

        // Re-showing re-acquires on the next process.
        control.set_visible(true);
        control.process();
        control.render(Duration::ZERO);
        assert!(control.is_playing_video());
    }

    #[test]
    fn test_changing_file_restarts_playback() {
        let mut control = control();
        control.set_file_name("pattern");
        control.process();
        control.render(Duration::ZERO);

        control.set_file_name("pattern"); // same name, no-op
        assert!(control.is_playing_video());

        control.set_file_name("other");
        assert!(!control.is_playing_video());
        control.process();
        control.render(Duration::from_millis(1));
        assert!(control.is_playing_video());
    }
}
