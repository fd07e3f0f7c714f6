//! Headless trace harness.
//!
//! Drives a full page view at a fixed frame rate without any rendering
//! surface and writes one JSON frame snapshot per line, with a metadata
//! header. Useful for eyeballing motion curves and diffing animation
//! changes without a browser or GPU in the loop.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::PageConfig;
use crate::page::PageDirector;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a page view and write frame snapshots as JSON lines
    Trace {
        /// Optional page config JSON; defaults apply otherwise
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file for the trace
        #[arg(long)]
        out: PathBuf,

        /// Simulated duration in seconds
        #[arg(long, default_value_t = 8.0)]
        duration: f32,

        /// Frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f32,

        /// Raw scroll offset ramped to linearly over the run
        #[arg(long, default_value_t = 1.0)]
        scroll_to: f32,
    },
}

/// Header line written before the frames.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceMetadata {
    started_at: DateTime<Utc>,
    fps: f32,
    duration_secs: f32,
    frame_count: usize,
    pages: f32,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Trace {
            config,
            out,
            duration,
            fps,
            scroll_to,
        } => trace(config, out, duration, fps, scroll_to),
    }
}

fn trace(
    config_path: Option<PathBuf>,
    out: PathBuf,
    duration: f32,
    fps: f32,
    scroll_to: f32,
) -> Result<()> {
    anyhow::ensure!(fps > 0.0, "fps must be positive");
    anyhow::ensure!(duration > 0.0, "duration must be positive");

    let config = match &config_path {
        Some(path) => PageConfig::from_path(path)?,
        None => PageConfig::default(),
    };

    let total_frames = (duration * fps).ceil() as usize;
    let dt = 1.0 / fps;

    let file = File::create(&out).with_context(|| format!("creating trace file {:?}", out))?;
    let mut writer = BufWriter::new(file);

    let metadata = TraceMetadata {
        started_at: Utc::now(),
        fps,
        duration_secs: duration,
        frame_count: total_frames,
        pages: config.pages,
    };
    serde_json::to_writer(&mut writer, &metadata)?;
    writer.write_all(b"\n")?;

    let mut director = PageDirector::new(config);

    println!("Tracing {} frames to {:?}...", total_frames, out);
    for i in 0..total_frames {
        // Ramp the raw scroll target over the run; the director ignores it
        // until the intro releases the content anyway.
        let progress = i as f32 / total_frames.max(1) as f32;
        director.set_scroll_target(scroll_to * progress);

        let snapshot = director.update(dt);
        serde_json::to_writer(&mut writer, &snapshot)?;
        writer.write_all(b"\n")?;

        if i % 60 == 0 {
            print!(".");
            std::io::stdout().flush()?;
        }
    }
    writer.flush()?;
    println!("\nDone.");

    Ok(())
}
