use crate::{
    errors::{FileOperation, IoError},
    manifest::{Manifest, ManifestError, ManifestPath},
};
use miette::Diagnostic;
use std::{
    fmt,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidManifest(#[from] ManifestError),

    #[error("permission denied while materializing {}", describe_entry(.entry))]
    #[diagnostic(
        code(sprout::materialize::permission),
        help("Entries written before this one remain on disk. Check the access rights of the base directory.")
    )]
    PermissionDenied {
        entry: Option<ManifestPath>,
        #[source]
        source: IoError,
    },

    #[error("I/O failure while materializing {}", describe_entry(.entry))]
    #[diagnostic(
        code(sprout::materialize::io),
        help("Entries written before this one remain on disk. Check free space and that no directory in the path is an existing file.")
    )]
    Io {
        entry: Option<ManifestPath>,
        #[source]
        source: IoError,
    },
}
impl MaterializeError {
    /// Classifies a low-level [`IoError`] raised while processing `entry`.
    ///
    /// `entry` is `None` when the failure happened while preparing the base
    /// directory, before any manifest entry was touched.
    pub fn from_io(entry: Option<&ManifestPath>, source: IoError) -> Self {
        let entry = entry.cloned();

        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { entry, source }
        } else {
            Self::Io { entry, source }
        }
    }

    /// The manifest path being processed when the run aborted, if any.
    pub fn entry(&self) -> Option<&ManifestPath> {
        match self {
            Self::InvalidManifest(_) => None,
            Self::PermissionDenied { entry, .. } | Self::Io { entry, .. } => entry.as_ref(),
        }
    }
}

fn describe_entry(entry: &Option<ManifestPath>) -> String {
    match entry {
        Some(path) => format!("entry '{path}'"),
        None => "the base directory".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Overwritten,
}
impl Outcome {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "create",
            Self::Overwritten => "overwrite",
        }
    }
}
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub path: ManifestPath,
    /// Absolute or base-relative location the content was written to.
    pub target: PathBuf,
    pub outcome: Outcome,
    pub bytes: usize,
}

/// Every file written by a [`materialize`] run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializationReport {
    entries: Vec<ReportEntry>,
}
impl MaterializationReport {
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn created(&self) -> usize {
        self.count(Outcome::Created)
    }

    pub fn overwritten(&self) -> usize {
        self.count(Outcome::Overwritten)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == outcome)
            .count()
    }
}

/// Writes every entry of `manifest` under `base`, in manifest order.
///
/// `base` is created first if it does not exist. For each entry the full
/// parent chain is created (existing directories are left alone), then the
/// content is written with create-or-truncate semantics.
///
/// # Errors
///
/// Aborts on the first failure with [`MaterializeError::PermissionDenied`] or
/// [`MaterializeError::Io`]. Files written before the failure stay on disk.
pub fn materialize(
    manifest: &Manifest,
    base: &Path,
) -> Result<MaterializationReport, MaterializeError> {
    create_directory(base).map_err(|error| MaterializeError::from_io(None, error))?;

    let mut report = MaterializationReport::default();

    for entry in manifest {
        let target = entry.path.resolve(base);

        let written = write_entry(&target, entry.content)
            .map_err(|error| MaterializeError::from_io(Some(entry.path), error))?;

        log::debug!("...{} {}", written, target.display());

        report.entries.push(ReportEntry {
            path: entry.path.clone(),
            target,
            outcome: written,
            bytes: entry.content.len(),
        });
    }

    log::info!(
        "materialized {} entries under {} ({} created, {} overwritten)",
        report.len(),
        base.display(),
        report.created(),
        report.overwritten()
    );

    Ok(report)
}

/// Validates `table` into a [`Manifest`] and materializes it under `base`.
///
/// An invalid path aborts before any filesystem access, including the
/// creation of `base`.
pub fn materialize_table<I, P, C>(
    table: I,
    base: &Path,
) -> Result<MaterializationReport, MaterializeError>
where
    I: IntoIterator<Item = (P, C)>,
    P: AsRef<str>,
    C: Into<String>,
{
    let manifest = Manifest::new(table)?;

    materialize(&manifest, base)
}

fn write_entry(target: &Path, content: &str) -> Result<Outcome, IoError> {
    if let Some(parent) = target.parent() {
        create_directory(parent)?;
    }

    let existed = target
        .try_exists()
        .map_err(|error| IoError::new(FileOperation::Inspect, target.to_path_buf(), error))?;

    write_file(target, content)?;

    if existed {
        Ok(Outcome::Overwritten)
    } else {
        Ok(Outcome::Created)
    }
}
/// Creates all directories in the specified path if they do not exist.
fn create_directory(path: &Path) -> Result<(), IoError> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }

    std::fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))?;

    log::debug!("...ensured dir: {}", path.display());

    Ok(())
}
/// Writes `contents` to `path`, creating the file or truncating it.
fn write_file(path: &Path, contents: &str) -> Result<(), IoError> {
    std::fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.to_path_buf(), error))
}
