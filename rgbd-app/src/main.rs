//! rgbd_tum
//!
//! Feeds a recorded TUM-style RGB-D sequence to the tracking backend at its
//! original cadence (client), or hosts the backend until interrupted and then
//! saves the keyframe trajectory (server).
//!
//! ```text
//! rgbd_tum VOC_PATH SETTINGS_PATH client SEQUENCE_PATH ASSOCIATION_PATH
//! rgbd_tum VOC_PATH SETTINGS_PATH server
//! ```

mod app;
mod cli;
mod engine;
mod signal;

use engine::EchoEngine;
use rgbd_replay::ThreadIdle;
use signal::CtrlcInterrupt;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let code = app::execute(
        std::env::args_os(),
        EchoEngine::new,
        &mut ThreadIdle,
        &mut CtrlcInterrupt::new(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );

    std::process::exit(code);
}
