//! Tracking engine seam.
//!
//! The engine itself (feature extraction, pose estimation, mapping, transport
//! between client and server) lives outside this crate. The replay loop only
//! needs the handful of blocking calls described by [`TrackingEngine`].

use glam::{Quat, Vec3};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Role of this process in the split client/server pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Replays a dataset into the engine, then shuts down.
    Client,
    /// Runs until interrupted, then persists the keyframe trajectory.
    Server,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Client => "client",
            RunMode::Server => "server",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised run mode token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown run type '{0}' (expected client or server)")]
pub struct UnknownMode(pub String);

impl FromStr for RunMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" => Ok(RunMode::Client),
            "server" => Ok(RunMode::Server),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Input modality the engine is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorType {
    Monocular,
    Stereo,
    #[default]
    Rgbd,
}

/// Parameters an engine is constructed from.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub vocabulary: PathBuf,
    pub settings: PathBuf,
    pub mode: RunMode,
    pub sensor: SensorType,
    pub use_viewer: bool,
}

impl EngineConfig {
    pub fn new(
        vocabulary: impl Into<PathBuf>,
        settings: impl Into<PathBuf>,
        mode: RunMode,
    ) -> Self {
        Self {
            vocabulary: vocabulary.into(),
            settings: settings.into(),
            mode,
            sensor: SensorType::Rgbd,
            use_viewer: true,
        }
    }

    pub fn with_sensor(mut self, sensor: SensorType) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn with_viewer(mut self, use_viewer: bool) -> Self {
        self.use_viewer = use_viewer;
        self
    }
}

/// Camera pose estimated for a tracked frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Errors reported by a tracking engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine initialisation failed: {0}")]
    Init(String),

    #[error("Engine is not running in {0} mode")]
    WrongMode(RunMode),

    #[error("Engine has already been shut down")]
    ShutDown,

    #[error("Tracking failed: {0}")]
    Tracking(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The blocking operations the replay controller issues against an engine.
///
/// Every call is synchronous from the caller's point of view; an engine may
/// run its own worker threads internally.
pub trait TrackingEngine {
    /// Hand one RGB-D frame to the tracker. Returns the estimated pose, or
    /// `None` while tracking is not initialised or lost.
    fn track_rgbd(
        &mut self,
        color: &image::DynamicImage,
        depth: &image::DynamicImage,
        timestamp: f64,
    ) -> Result<Option<CameraPose>, EngineError>;

    /// Stop all activity owned by the client role.
    fn shutdown_client(&mut self) -> Result<(), EngineError>;

    /// Stop all activity owned by the server role.
    fn shutdown_server(&mut self) -> Result<(), EngineError>;

    /// Write the keyframe trajectory to `path`. Format is engine-defined.
    fn save_keyframe_trajectory(&mut self, path: &Path) -> Result<(), EngineError>;
}

impl<E: TrackingEngine + ?Sized> TrackingEngine for Box<E> {
    fn track_rgbd(
        &mut self,
        color: &image::DynamicImage,
        depth: &image::DynamicImage,
        timestamp: f64,
    ) -> Result<Option<CameraPose>, EngineError> {
        (**self).track_rgbd(color, depth, timestamp)
    }

    fn shutdown_client(&mut self) -> Result<(), EngineError> {
        (**self).shutdown_client()
    }

    fn shutdown_server(&mut self) -> Result<(), EngineError> {
        (**self).shutdown_server()
    }

    fn save_keyframe_trajectory(&mut self, path: &Path) -> Result<(), EngineError> {
        (**self).save_keyframe_trajectory(path)
    }
}
