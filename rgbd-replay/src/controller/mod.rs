//! Run controller
//!
//! Owns the lifecycle of one process: pick the role, construct exactly one
//! engine for it, drive the role's main phase, and run the role's shutdown
//! sequence. Nothing here exits the process; outcomes and errors are returned
//! to a single top-level caller.

mod client;
mod error;
mod server;

pub use client::run_client;
pub use error::RunError;
pub use server::{InterruptSource, run_server};

use crate::engine::{EngineConfig, EngineError, RunMode, TrackingEngine};
use crate::pacing::IdleWait;
use crate::stats::TrackingSummary;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Default location of the persisted keyframe trajectory.
pub const DEFAULT_TRAJECTORY_PATH: &str = "KeyFrameTrajectory.txt";

/// Dataset inputs for the client role.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Root directory the association paths are relative to.
    pub sequence: PathBuf,
    pub association: PathBuf,
}

impl ClientConfig {
    pub fn new(sequence: impl Into<PathBuf>, association: impl Into<PathBuf>) -> Self {
        Self {
            sequence: sequence.into(),
            association: association.into(),
        }
    }
}

/// Persistence settings for the server role.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub trajectory: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            trajectory: PathBuf::from(DEFAULT_TRAJECTORY_PATH),
        }
    }
}

/// Role-specific part of a validated invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    Client(ClientConfig),
    Server(ServerConfig),
}

impl Role {
    pub fn mode(&self) -> RunMode {
        match self {
            Role::Client(_) => RunMode::Client,
            Role::Server(_) => RunMode::Server,
        }
    }
}

/// A validated invocation: how to build the engine and which role to run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub engine: EngineConfig,
    pub role: Role,
}

impl RunPlan {
    pub fn client(
        vocabulary: impl Into<PathBuf>,
        settings: impl Into<PathBuf>,
        config: ClientConfig,
    ) -> Self {
        Self {
            engine: EngineConfig::new(vocabulary, settings, RunMode::Client),
            role: Role::Client(config),
        }
    }

    pub fn server(
        vocabulary: impl Into<PathBuf>,
        settings: impl Into<PathBuf>,
        config: ServerConfig,
    ) -> Self {
        Self {
            engine: EngineConfig::new(vocabulary, settings, RunMode::Server),
            role: Role::Server(config),
        }
    }

    pub fn mode(&self) -> RunMode {
        self.role.mode()
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// Client replayed the whole manifest.
    Completed(TrackingSummary),
    /// Server received an interrupt and persisted its trajectory.
    Interrupted { signal: i32 },
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Completed(_) => 0,
            RunOutcome::Interrupted { signal } => *signal,
        }
    }
}

/// Run one process lifetime.
///
/// `build_engine` is called at most once, only after the plan's inputs have
/// been validated. The engine is dropped before this returns on every path.
pub fn run<E, F, I, W, O>(
    plan: RunPlan,
    build_engine: F,
    idle: &mut W,
    interrupts: &mut I,
    out: &mut O,
) -> Result<RunOutcome, RunError>
where
    E: TrackingEngine,
    F: FnOnce(&EngineConfig) -> Result<E, EngineError>,
    I: InterruptSource,
    W: IdleWait,
    O: Write,
{
    info!("Starting {} run", plan.mode());

    match plan.role {
        Role::Client(config) => {
            let manifest = rgbd_data::load_associations(&config.association)
                .map_err(|source| RunError::Manifest {
                    path: config.association.clone(),
                    source,
                })?;
            if manifest.is_empty() {
                return Err(RunError::EmptyDataset);
            }

            let mut engine = build_engine(&plan.engine)?;
            let summary = run_client(&mut engine, &config, &manifest, idle, out)?;
            Ok(RunOutcome::Completed(summary))
        }
        Role::Server(config) => {
            let mut engine = build_engine(&plan.engine)?;
            let signal = run_server(&mut engine, &config, interrupts, out)?;
            Ok(RunOutcome::Interrupted { signal })
        }
    }
}
