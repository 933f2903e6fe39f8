//! RGB-D frame loading from a recorded sequence directory.

use image::DynamicImage;
use rgbd_data::FrameRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a frame pair.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Failed to load image at: {}", path.display())]
    Color {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to load depth image at: {}", path.display())]
    Depth {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl FrameError {
    /// Path of the image that could not be decoded.
    pub fn path(&self) -> &Path {
        match self {
            FrameError::Color { path, .. } | FrameError::Depth { path, .. } => path,
        }
    }
}

/// A colour image and its registered depth map.
///
/// Images are kept in whatever pixel format the files decode to; depth maps
/// from TUM-style recordings decode as 16-bit luma.
#[derive(Debug, Clone)]
pub struct RgbdFrame {
    pub color: DynamicImage,
    pub depth: DynamicImage,
    /// Timestamp in seconds, taken from the manifest.
    pub timestamp: f64,
}

impl RgbdFrame {
    pub fn new(color: DynamicImage, depth: DynamicImage, timestamp: f64) -> Self {
        Self {
            color,
            depth,
            timestamp,
        }
    }

    /// Load the pair described by `record`, resolving paths against `root`.
    pub fn load(root: &Path, record: &FrameRecord) -> Result<Self, FrameError> {
        let color_path = record.color_in(root);
        let color = image::open(&color_path).map_err(|source| FrameError::Color {
            path: color_path.clone(),
            source,
        })?;

        let depth_path = record.depth_in(root);
        let depth = image::open(&depth_path).map_err(|source| FrameError::Depth {
            path: depth_path.clone(),
            source,
        })?;

        debug!(
            "Loaded frame {:.6}: {}x{} rgb, {}x{} depth",
            record.timestamp,
            color.width(),
            color.height(),
            depth.width(),
            depth.height()
        );

        Ok(Self::new(color, depth, record.timestamp))
    }
}
