//! Association file loading functions

use crate::association::{FrameRecord, Manifest};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors produced while reading an association file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed association line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Load an association file from disk.
///
/// The file handle is dropped before this returns, on success and on error.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_associations(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
    debug!("Loading associations from: {}", path.as_ref().display());
    let file = File::open(path.as_ref())?;
    let manifest = parse_associations(BufReader::new(file))?;

    info!("Association file parsed: {} frames", manifest.len());
    Ok(manifest)
}

/// Parse association lines of the form
/// `<timestamp> <rgb path> <depth timestamp> <depth path>`.
///
/// Blank lines are skipped; there is no header. The depth timestamp must be
/// numeric but is not kept. Any malformed line fails the whole parse.
pub fn parse_associations<R: BufRead>(reader: R) -> Result<Manifest, ManifestError> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        records.push(parse_line(trimmed, index + 1)?);
    }

    debug!("Parsed {} association records", records.len());
    Ok(Manifest::new(records))
}

fn parse_line(line: &str, line_number: usize) -> Result<FrameRecord, ManifestError> {
    let malformed = |reason: String| ManifestError::Malformed {
        line: line_number,
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(malformed(format!("expected 4 fields, found {}", fields.len())));
    }
    if fields.len() > 4 {
        warn!(
            "Ignoring {} trailing field(s) on association line {}",
            fields.len() - 4,
            line_number
        );
    }

    let timestamp = parse_timestamp(fields[0])
        .ok_or_else(|| malformed(format!("invalid timestamp '{}'", fields[0])))?;
    // Depth timestamp: validated, then dropped.
    parse_timestamp(fields[2])
        .ok_or_else(|| malformed(format!("invalid depth timestamp '{}'", fields[2])))?;

    Ok(FrameRecord::new(timestamp, fields[1], fields[3]))
}

fn parse_timestamp(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|t| t.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::path::PathBuf;

    const SAMPLE: &str = "\
1305031102.175304 rgb/1305031102.175304.png 1305031102.160407 depth/1305031102.160407.png
1305031102.211214 rgb/1305031102.211214.png 1305031102.226738 depth/1305031102.226738.png

1305031102.275326 rgb/1305031102.275326.png 1305031102.262886 depth/1305031102.262886.png
";

    #[test]
    fn test_parse_sample_sequence() {
        let manifest = parse_associations(Cursor::new(SAMPLE)).unwrap();

        assert_eq!(manifest.len(), 3);
        assert_eq!(manifest.timestamps().len(), 3);
        assert_eq!(manifest.color_paths().len(), 3);
        assert_eq!(manifest.depth_paths().len(), 3);

        let first = manifest.get(0).unwrap();
        assert_eq!(first.timestamp, 1305031102.175304);
        assert_eq!(first.color_path, PathBuf::from("rgb/1305031102.175304.png"));
        assert_eq!(first.depth_path, PathBuf::from("depth/1305031102.160407.png"));
    }

    #[test]
    fn test_depth_timestamp_is_discarded() {
        let manifest = parse_associations(Cursor::new("1.0 rgb/a.png 9.0 depth/a.png\n")).unwrap();
        assert_eq!(manifest.timestamps(), vec![1.0]);
    }

    #[test]
    fn test_count_matches_non_blank_lines() {
        let text = "\n0.0 a.png 0.0 b.png\n   \n0.1 c.png 0.1 d.png\n\n\n0.2 e.png 0.2 f.png";
        let manifest = parse_associations(Cursor::new(text)).unwrap();
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn test_hash_prefixed_line_is_malformed() {
        let text = "#0.0 a.png 0.0 b.png\n0.1 c.png 0.1 d.png\n";
        let err = parse_associations(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { line: 1, .. }));

        let text = "0.0 a.png 0.0 b.png\n# rgb depth\n";
        let err = parse_associations(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_empty_input_yields_empty_manifest() {
        let manifest = parse_associations(Cursor::new("\n\n")).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_short_line_fails_fast() {
        let text = "0.0 a.png 0.0 b.png\n0.1 c.png 0.1\n0.2 e.png 0.2 f.png\n";
        match parse_associations(Cursor::new(text)) {
            Err(ManifestError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed line error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_timestamp_fails() {
        let err = parse_associations(Cursor::new("abc a.png 0.0 b.png\n")).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { line: 1, .. }));

        let err = parse_associations(Cursor::new("0.0 a.png nan b.png\n")).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_trailing_fields_ignored() {
        let manifest = parse_associations(Cursor::new("0.0 a.png 0.0 b.png extra\n")).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get(0).unwrap().depth_path, PathBuf::from("b.png"));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let manifest = load_associations(file.path()).unwrap();
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_associations(dir.path().join("associations.txt")).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }
}
