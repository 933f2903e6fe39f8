//! Frame records and the ordered manifest built from them.

use std::path::{Path, PathBuf};

/// One line of an association file.
///
/// Paths are kept exactly as written, relative to the sequence directory.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    /// Capture timestamp of the colour frame, in seconds.
    pub timestamp: f64,
    /// Colour image path relative to the sequence root.
    pub color_path: PathBuf,
    /// Depth image path relative to the sequence root.
    pub depth_path: PathBuf,
}

impl FrameRecord {
    pub fn new(
        timestamp: f64,
        color_path: impl Into<PathBuf>,
        depth_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            timestamp,
            color_path: color_path.into(),
            depth_path: depth_path.into(),
        }
    }

    /// Colour image path resolved against `root`.
    pub fn color_in(&self, root: &Path) -> PathBuf {
        root.join(&self.color_path)
    }

    /// Depth image path resolved against `root`.
    pub fn depth_in(&self, root: &Path) -> PathBuf {
        root.join(&self.depth_path)
    }
}

/// Ordered, immutable list of frames in file order.
///
/// Every record carries its own timestamp, colour and depth path, so the
/// three views below always have the same length. Timestamps are expected to
/// be increasing but this is not enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    records: Vec<FrameRecord>,
}

impl Manifest {
    pub fn new(records: Vec<FrameRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FrameRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameRecord> {
        self.records.iter()
    }

    /// Timestamps in manifest order.
    pub fn timestamps(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.timestamp).collect()
    }

    pub fn color_paths(&self) -> Vec<&Path> {
        self.records.iter().map(|r| r.color_path.as_path()).collect()
    }

    pub fn depth_paths(&self) -> Vec<&Path> {
        self.records.iter().map(|r| r.depth_path.as_path()).collect()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a FrameRecord;
    type IntoIter = std::slice::Iter<'a, FrameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
