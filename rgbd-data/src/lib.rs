//! RGB-D Data Crate
//!
//! Parsing utilities for recorded RGB-D sequences. The association file pairs
//! every colour frame with its depth frame and a capture timestamp; this crate
//! turns it into an ordered [`Manifest`] and knows nothing about engines or
//! image decoding.

pub mod association;

pub use association::{FrameRecord, Manifest, ManifestError, load_associations, parse_associations};
