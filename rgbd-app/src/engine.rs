//! In-process stand-in for the tracking backend.
//!
//! Accepts frames, keeps one keyframe per tracked frame with an identity pose,
//! and writes those keyframes as a TUM trajectory. Useful for checking a
//! dataset and its pacing without the full tracker.

use glam::{Quat, Vec3};
use image::DynamicImage;
use rgbd_replay::{CameraPose, EngineConfig, EngineError, RunMode, TrackingEngine};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// A keyframe kept for trajectory export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub timestamp: f64,
    pub pose: CameraPose,
}

pub struct EchoEngine {
    mode: RunMode,
    keyframes: Vec<Keyframe>,
    running: bool,
    frames: u64,
}

impl EchoEngine {
    /// Validate the configuration and bring the engine up in `config.mode`.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        for (what, path) in [("vocabulary", &config.vocabulary), ("settings", &config.settings)] {
            if !path.is_file() {
                return Err(EngineError::Init(format!(
                    "{} file not found: {}",
                    what,
                    path.display()
                )));
            }
        }

        if config.use_viewer {
            debug!("Viewer requested; echo engine runs headless");
        }

        info!(
            "Echo engine started in {} mode ({:?} sensor)",
            config.mode, config.sensor
        );

        Ok(Self {
            mode: config.mode,
            keyframes: Vec::new(),
            running: true,
            frames: 0,
        })
    }

    #[cfg(test)]
    fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.running
    }

    fn shutdown(&mut self, role: RunMode) -> Result<(), EngineError> {
        if self.mode != role {
            return Err(EngineError::WrongMode(role));
        }
        if self.running {
            self.running = false;
            info!("Echo engine {} shutdown after {} frames", role, self.frames);
        }
        Ok(())
    }
}

impl TrackingEngine for EchoEngine {
    fn track_rgbd(
        &mut self,
        color: &DynamicImage,
        depth: &DynamicImage,
        timestamp: f64,
    ) -> Result<Option<CameraPose>, EngineError> {
        if self.mode != RunMode::Client {
            return Err(EngineError::WrongMode(RunMode::Client));
        }
        if !self.running {
            return Err(EngineError::ShutDown);
        }

        self.frames += 1;
        if same_size(color, depth) {
            let pose = CameraPose::new(Vec3::ZERO, Quat::IDENTITY);
            self.keyframes.push(Keyframe { timestamp, pose });
            Ok(Some(pose))
        } else {
            warn!(
                "Frame {:.6}: rgb {}x{} and depth {}x{} differ, not tracked",
                timestamp,
                color.width(),
                color.height(),
                depth.width(),
                depth.height()
            );
            Ok(None)
        }
    }

    fn shutdown_client(&mut self) -> Result<(), EngineError> {
        self.shutdown(RunMode::Client)
    }

    fn shutdown_server(&mut self) -> Result<(), EngineError> {
        self.shutdown(RunMode::Server)
    }

    fn save_keyframe_trajectory(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut writer = BufWriter::new(File::create(path)?);
        for keyframe in &self.keyframes {
            let t = keyframe.pose.position;
            let q = keyframe.pose.rotation;
            writeln!(
                writer,
                "{:.6} {:.7} {:.7} {:.7} {:.7} {:.7} {:.7} {:.7}",
                keyframe.timestamp, t.x, t.y, t.z, q.x, q.y, q.z, q.w
            )?;
        }
        writer.flush()?;

        info!("Saved {} keyframes to {}", self.keyframes.len(), path.display());
        Ok(())
    }
}

fn same_size(a: &DynamicImage, b: &DynamicImage) -> bool {
    a.width() == b.width() && a.height() == b.height()
}
