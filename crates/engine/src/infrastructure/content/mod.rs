//! Reference data catalogs.
//!
//! Both implementations satisfy the `ClassCatalog` port: the bundled SRD data
//! for zero-configuration use, and a JSON data directory for custom content.

pub mod json;
pub mod srd;

pub use json::{JsonClassCatalog, CLASSES_FILE, FEATS_FILE};
pub use srd::SrdClassCatalog;
