//! Data ingestion module
//!
//! Loads the colour and depth images referenced by an association manifest.

pub mod frame;

pub use frame::{FrameError, RgbdFrame};
