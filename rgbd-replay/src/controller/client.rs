//! Client role: replay the manifest into the engine in real time.

use crate::controller::{ClientConfig, RunError};
use crate::engine::TrackingEngine;
use crate::ingest::RgbdFrame;
use crate::pacing::{IdleWait, Pacer};
use crate::stats::{TrackingStats, TrackingSummary};
use rgbd_data::Manifest;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Feed every frame of `manifest` to `engine`, pacing dispatch to the
/// recorded timestamps, then shut the client side down and report latency.
///
/// A frame that fails to load aborts the run immediately. Frames are never
/// skipped.
pub fn run_client<E, W, O>(
    engine: &mut E,
    config: &ClientConfig,
    manifest: &Manifest,
    idle: &mut W,
    out: &mut O,
) -> Result<TrackingSummary, RunError>
where
    E: TrackingEngine,
    W: IdleWait,
    O: Write,
{
    if manifest.is_empty() {
        return Err(RunError::EmptyDataset);
    }

    writeln!(out)?;
    writeln!(out, "-------")?;
    writeln!(out, "Start processing sequence ...")?;
    writeln!(out, "Images in the sequence: {}", manifest.len())?;
    writeln!(out)?;

    let pacer = Pacer::new(manifest.timestamps());
    let mut stats = TrackingStats::with_capacity(manifest.len());
    let mut lost = 0usize;

    for (index, record) in manifest.iter().enumerate() {
        let frame = RgbdFrame::load(&config.sequence, record)?;

        let started = Instant::now();
        let pose = engine.track_rgbd(&frame.color, &frame.depth, frame.timestamp)?;
        let elapsed = started.elapsed();

        stats.record(elapsed);
        if pose.is_none() {
            lost += 1;
        }
        debug!(
            index,
            timestamp = frame.timestamp,
            tracked = pose.is_some(),
            "Frame processed in {:.4}s",
            elapsed.as_secs_f64()
        );

        let wait = pacer.idle_after(index, elapsed);
        if !wait.is_zero() {
            idle.idle(wait);
        }
    }

    if lost > 0 {
        warn!("Tracking unavailable for {} of {} frames", lost, manifest.len());
    }

    engine.shutdown_client()?;
    info!("Client shutdown complete");

    let summary = stats.finalize().ok_or(RunError::EmptyDataset)?;

    writeln!(out, "-------")?;
    writeln!(out)?;
    writeln!(out, "{summary}")?;

    Ok(summary)
}
