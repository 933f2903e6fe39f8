//! Top-level run: parse, dispatch, report.

use crate::cli::{USAGE, parse_invocation};
use rgbd_replay::{
    EngineConfig, EngineError, IdleWait, InterruptSource, RunError, TrackingEngine, run,
};
use std::ffi::OsString;
use std::io::Write;
use tracing::{error, info};

/// Run one invocation and return the process exit status.
///
/// `build_engine` is never called when the arguments are invalid.
pub fn execute<A, T, E, F, W, I, O, R>(
    args: A,
    build_engine: F,
    idle: &mut W,
    interrupts: &mut I,
    out: &mut O,
    err: &mut R,
) -> i32
where
    A: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    E: TrackingEngine,
    F: FnOnce(&EngineConfig) -> Result<E, EngineError>,
    W: IdleWait,
    I: InterruptSource,
    O: Write,
    R: Write,
{
    let plan = match parse_invocation(args) {
        Ok(plan) => plan,
        Err(e) => return report_failure(&e, err),
    };

    match run(plan, build_engine, idle, interrupts, out) {
        Ok(outcome) => {
            info!("Run finished with status {}", outcome.exit_code());
            outcome.exit_code()
        }
        Err(e) => report_failure(&e, err),
    }
}

/// Write `failure` (and the usage text, where it applies) to `err`.
pub fn report_failure<R: Write>(failure: &RunError, err: &mut R) -> i32 {
    error!("{}", failure);

    // Reporting is best effort; the exit status is what matters.
    let _ = writeln!(err);
    let _ = writeln!(err, "{failure}");
    if failure.wants_usage() {
        let _ = writeln!(err);
        let _ = writeln!(err, "{USAGE}");
    }
    let _ = err.flush();

    failure.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EchoEngine;
    use image::{ImageBuffer, Luma, RgbImage};
    use std::path::Path;
    use std::sync::mpsc;
    use std::time::Duration;

    fn closed_interrupts() -> mpsc::Receiver<i32> {
        let (_tx, rx) = mpsc::channel();
        rx
    }

    fn write_dataset(root: &Path) {
        std::fs::write(root.join("ORBvoc.txt"), "").unwrap();
        std::fs::write(root.join("TUM1.yaml"), "").unwrap();
        std::fs::create_dir_all(root.join("rgb")).unwrap();
        std::fs::create_dir_all(root.join("depth")).unwrap();
        let mut text = String::new();
        for (i, t) in [0.0, 0.5, 1.2].iter().enumerate() {
            RgbImage::new(2, 2).save(root.join(format!("rgb/{i}.png"))).unwrap();
            ImageBuffer::<Luma<u16>, Vec<u16>>::new(2, 2)
                .save(root.join(format!("depth/{i}.png")))
                .unwrap();
            text.push_str(&format!("{t} rgb/{i}.png {t} depth/{i}.png\n"));
        }
        std::fs::write(root.join("associations.txt"), text).unwrap();
    }

    fn client_args(root: &Path, mode: &str) -> Vec<String> {
        vec![
            "rgbd_tum".to_string(),
            root.join("ORBvoc.txt").display().to_string(),
            root.join("TUM1.yaml").display().to_string(),
            mode.to_string(),
            root.display().to_string(),
            root.join("associations.txt").display().to_string(),
        ]
    }

    #[test]
    fn test_missing_path_prints_usage_and_builds_nothing() {
        let mut builds = 0;
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = execute(
            ["rgbd_tum", "voc.txt", "tum1.yaml", "client", "seq"],
            |config: &EngineConfig| {
                builds += 1;
                EchoEngine::new(config)
            },
            &mut |_: Duration| {},
            &mut closed_interrupts(),
            &mut out,
            &mut err,
        );

        assert_eq!(code, 1);
        assert_eq!(builds, 0);
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.contains("Client Usage: ./rgbd_tum"));
        assert!(stderr.contains("Server Usage: ./rgbd_tum"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_mode_prints_usage() {
        let mut err = Vec::new();
        let code = execute(
            ["rgbd_tum", "voc.txt", "tum1.yaml", "mono"],
            EchoEngine::new,
            &mut |_: Duration| {},
            &mut closed_interrupts(),
            &mut Vec::new(),
            &mut err,
        );

        assert_eq!(code, 1);
        assert!(String::from_utf8(err).unwrap().contains("Server Usage"));
    }

    #[test]
    fn test_mixed_case_client_runs_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());

        let mut reports = Vec::new();
        for mode in ["client", "CLIENT"] {
            let mut out = Vec::new();
            let mut err = Vec::new();
            let mut idle_total = Duration::ZERO;

            let code = execute(
                client_args(dir.path(), mode),
                EchoEngine::new,
                &mut |d: Duration| idle_total += d,
                &mut closed_interrupts(),
                &mut out,
                &mut err,
            );

            assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
            assert!(idle_total > Duration::from_millis(1800));
            let text = String::from_utf8(out).unwrap();
            assert!(text.contains("Images in the sequence: 3"));
            assert!(text.contains("median tracking time:"));
            reports.push(text.lines().take(5).collect::<Vec<_>>().join("\n"));
        }
        assert_eq!(reports[0], reports[1]);
    }

    #[test]
    fn test_missing_image_exits_with_path() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        std::fs::remove_file(dir.path().join("rgb/1.png")).unwrap();

        let mut err = Vec::new();
        let code = execute(
            client_args(dir.path(), "client"),
            EchoEngine::new,
            &mut |_: Duration| {},
            &mut closed_interrupts(),
            &mut Vec::new(),
            &mut err,
        );

        assert_eq!(code, 1);
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.contains("Failed to load image at: "));
        assert!(stderr.contains("1.png"));
        assert!(!stderr.contains("Usage"));
    }

    #[test]
    fn test_server_exits_with_signal_number() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        let (tx, mut rx) = mpsc::channel();
        tx.send(crate::signal::SIGINT).unwrap();

        let args = vec![
            "rgbd_tum".to_string(),
            dir.path().join("ORBvoc.txt").display().to_string(),
            dir.path().join("TUM1.yaml").display().to_string(),
            "server".to_string(),
        ];

        // The trajectory lands in the working directory; point the test at a
        // plan with a temp output instead of touching the cwd.
        let plan = parse_invocation(args).unwrap();
        let plan = rgbd_replay::RunPlan {
            role: rgbd_replay::Role::Server(rgbd_replay::ServerConfig {
                trajectory: dir.path().join("KeyFrameTrajectory.txt"),
            }),
            ..plan
        };

        let mut out = Vec::new();
        let outcome = run(plan, EchoEngine::new, &mut |_: Duration| {}, &mut rx, &mut out).unwrap();

        assert_eq!(outcome.exit_code(), 2);
        assert_eq!(String::from_utf8(out).unwrap(), "Caught signal 2\n");
        assert!(dir.path().join("KeyFrameTrajectory.txt").is_file());
    }

    #[test]
    fn test_report_failure_without_usage() {
        let mut err = Vec::new();
        let code = report_failure(&RunError::EmptyDataset, &mut err);
        assert_eq!(code, 1);
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "\nNo images found in provided path.\n"
        );
    }
}
