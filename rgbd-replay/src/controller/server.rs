//! Server role: wait for an interrupt, then shut down and persist.

use crate::controller::{RunError, ServerConfig};
use crate::engine::TrackingEngine;
use std::io::Write;
use std::sync::mpsc::Receiver;
use tracing::info;

/// Something that blocks until the process is asked to terminate.
pub trait InterruptSource {
    /// Block until an interrupt arrives and return its signal number.
    /// `None` means no interrupt can ever arrive.
    fn wait_for_signal(&mut self) -> Option<i32>;
}

impl InterruptSource for Receiver<i32> {
    fn wait_for_signal(&mut self) -> Option<i32> {
        self.recv().ok()
    }
}

/// Block until interrupted, then run the server shutdown and persist the
/// keyframe trajectory. Returns the received signal number.
pub fn run_server<E, I, O>(
    engine: &mut E,
    config: &ServerConfig,
    interrupts: &mut I,
    out: &mut O,
) -> Result<i32, RunError>
where
    E: TrackingEngine,
    I: InterruptSource,
    O: Write,
{
    info!("Server running, waiting for interrupt");

    let signal = interrupts
        .wait_for_signal()
        .ok_or_else(|| RunError::Interrupt("interrupt source closed".to_string()))?;
    writeln!(out, "Caught signal {signal}")?;

    engine.shutdown_server()?;
    info!("Server shutdown complete");

    engine.save_keyframe_trajectory(&config.trajectory)?;
    info!("Keyframe trajectory saved to {}", config.trajectory.display());

    Ok(signal)
}
