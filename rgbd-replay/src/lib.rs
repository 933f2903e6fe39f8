//! RGB-D Replay Crate
//!
//! Feeds a recorded RGB-D sequence into a tracking engine at the cadence it
//! was captured, and drives the client/server lifecycle around that engine.
//!
//! ## Modules
//!
//! - [`ingest`]: Loading colour/depth image pairs named by the manifest
//! - [`engine`]: The tracking engine seam and its construction parameters
//! - [`pacing`]: Idle computation that keeps dispatch close to real time
//! - [`stats`]: Per-frame tracking latency statistics
//! - [`controller`]: Client replay loop, server wait, and shutdown sequences

pub mod controller;
pub mod engine;
pub mod ingest;
pub mod pacing;
pub mod stats;

pub use controller::{
    ClientConfig, DEFAULT_TRAJECTORY_PATH, InterruptSource, Role, RunError, RunOutcome, RunPlan,
    ServerConfig, run, run_client, run_server,
};
pub use engine::{
    CameraPose, EngineConfig, EngineError, RunMode, SensorType, TrackingEngine, UnknownMode,
};
pub use ingest::{FrameError, RgbdFrame};
pub use pacing::{IdleWait, Pacer, ThreadIdle, compute_idle};
pub use stats::{TrackingStats, TrackingSummary};
