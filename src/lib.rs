//! Materializes a declared project layout onto the filesystem.
//!
//! A [`Manifest`] maps relative, `/`-separated paths to file contents. The
//! [`materialize`] function writes it under a base directory, creating every
//! missing parent directory and overwriting files that already exist, so
//! running it again reproduces the same tree.
//!
//! ```no_run
//! use sprout::{materialize, Manifest};
//!
//! let manifest = Manifest::new([("cfg/env.yml", "DEBUG=true\n"), ("cfg/sub/.keep", "")])?;
//! let report = materialize(&manifest, std::path::Path::new("out"))?;
//!
//! assert_eq!(report.created(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod api;
pub mod blueprint;
pub mod config;
pub mod errors;
pub mod manifest;
pub mod materialize;
pub mod preview;
pub mod prompt;

pub use manifest::{Manifest, ManifestEntry, ManifestError, ManifestPath, PathViolation};
pub use materialize::{
    materialize, materialize_table, MaterializationReport, MaterializeError, Outcome, ReportEntry,
};
