//! Association file support

mod loader;
mod record;

pub use loader::{ManifestError, load_associations, parse_associations};
pub use record::{FrameRecord, Manifest};
