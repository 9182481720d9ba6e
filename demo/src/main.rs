//! Demo host for the backdrop player.
//!
//! Runs a synthetic looping video into an off-screen canvas at a configurable
//! tick rate, logging playback statistics, and can write the final canvas out
//! as a PNG.

use anyhow::{Context, Result};
use backdrop::{BackgroundVideoPlayer, CanvasSinkFactory, PatternDecoder, PlayerConfig, Region};
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "backdrop-demo")]
#[command(about = "Loop a synthetic video into an off-screen canvas", long_about = None)]
#[command(version)]
struct Cli {
    /// Canvas width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Synthetic source width
    #[arg(long, default_value = "640")]
    source_width: u32,

    /// Synthetic source height
    #[arg(long, default_value = "360")]
    source_height: u32,

    /// Synthetic source frame rate
    #[arg(long, default_value = "25.0")]
    fps: f64,

    /// Seconds of synthetic video before it loops
    #[arg(long, default_value = "2.0")]
    duration: f64,

    /// Number of render ticks to run
    #[arg(long, default_value = "300")]
    ticks: u32,

    /// Milliseconds between render ticks (simulated display refresh)
    #[arg(long, default_value = "16")]
    tick_ms: u64,

    /// Player configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the final canvas to this PNG file
    #[arg(short, long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    };

    let mut player = BackgroundVideoPlayer::new(
        0,
        PatternDecoder::new(cli.source_width, cli.source_height, cli.fps, cli.duration),
        CanvasSinkFactory::new(cli.width, cli.height),
        config,
    );

    let region = Region::new(0, 0, cli.width as i32, cli.height as i32);
    player.open("pattern", region)?;

    log::info!(
        "Running {} ticks at {}ms into a {}x{} canvas",
        cli.ticks,
        cli.tick_ms,
        cli.width,
        cli.height
    );

    let start = Instant::now();
    for _ in 0..cli.ticks {
        if let Err(e) = player.render_tick(start.elapsed(), region) {
            log::error!("Render tick failed: {}", e);
        }
        std::thread::sleep(Duration::from_millis(cli.tick_ms));
    }

    if let Some(stats) = player.stats() {
        log::info!(
            "Finished: {} frames decoded, {} drawn, {} loops",
            stats.frames_decoded(),
            stats.frames_rendered(),
            stats.loops_completed()
        );
    }

    if let Some(path) = &cli.snapshot {
        let sink = player.sink().context("No sink to snapshot")?;
        let rgba = argb8888_to_rgba(sink.canvas());
        image::save_buffer(
            path,
            &rgba,
            sink.width(),
            sink.height(),
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        log::info!("Wrote snapshot to {}", path.display());
    }

    player.close();
    Ok(())
}

/// Convert ARGB8888 canvas data (BGRA byte order) to RGBA for the encoder.
fn argb8888_to_rgba(argb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(argb.len());
    for px in argb.chunks_exact(4) {
        rgba.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
    }
    rgba
}
