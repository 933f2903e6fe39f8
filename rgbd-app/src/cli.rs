//! Positional command line parsing.

use clap::Parser;
use rgbd_replay::{ClientConfig, RunError, RunMode, RunPlan, ServerConfig};
use std::ffi::OsString;
use std::path::PathBuf;

/// Usage for both roles, shown on every invocation error.
pub const USAGE: &str = concat!(
    "Client Usage: ./rgbd_tum VOC_PATH SETTINGS_PATH RUN_TYPE(client|server) ",
    "SEQUENCE_PATH ASSOCIATION_PATH\n",
    "\n",
    "Server Usage: ./rgbd_tum VOC_PATH SETTINGS_PATH RUN_TYPE(client|server)",
);

/// Replay an RGB-D sequence (client) or host the tracking backend (server)
#[derive(Parser, Debug)]
#[command(name = "rgbd_tum")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// ORB vocabulary file
    #[arg(allow_hyphen_values = true)]
    vocabulary: PathBuf,

    /// Camera and tracker settings file
    #[arg(allow_hyphen_values = true)]
    settings: PathBuf,

    /// client or server (case-insensitive)
    run_type: String,

    /// Sequence root directory (client only)
    #[arg(allow_hyphen_values = true)]
    sequence: Option<PathBuf>,

    /// Association file (client only)
    #[arg(allow_hyphen_values = true)]
    association: Option<PathBuf>,
}

/// Turn the raw argument list (program name first) into a run plan.
pub fn parse_invocation<I, T>(args: I) -> Result<RunPlan, RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(args).map_err(|e| {
        let rendered = e.render().to_string();
        let message = rendered
            .lines()
            .next()
            .unwrap_or("invalid arguments")
            .to_string();
        RunError::InvalidInvocation(message)
    })?;

    let mode: RunMode = args
        .run_type
        .parse()
        .map_err(|e: rgbd_replay::UnknownMode| RunError::InvalidMode(e.to_string()))?;

    match (mode, args.sequence, args.association) {
        (RunMode::Client, Some(sequence), Some(association)) => Ok(RunPlan::client(
            args.vocabulary,
            args.settings,
            ClientConfig::new(sequence, association),
        )),
        (RunMode::Client, _, _) => Err(RunError::InvalidInvocation(
            "client mode expects SEQUENCE_PATH and ASSOCIATION_PATH".to_string(),
        )),
        (RunMode::Server, None, None) => Ok(RunPlan::server(
            args.vocabulary,
            args.settings,
            ServerConfig::default(),
        )),
        (RunMode::Server, _, _) => Err(RunError::InvalidInvocation(
            "server mode takes no dataset arguments".to_string(),
        )),
    }
}
