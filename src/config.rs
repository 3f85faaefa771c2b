use crate::{
    errors::{FileFormat, FileOperation, IoError, ParseError},
    manifest::{Manifest, ManifestError},
};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error while loading a manifest file")]
    #[diagnostic(code(sprout::config::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] ManifestError),
}

/// A manifest stored as a TOML document: top-level keys are relative paths,
/// values are file contents. Document order is kept.
///
/// ```toml
/// "cfg/env.yml" = "DEBUG=true\n"
/// "cfg/sub/.keep" = ""
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct ManifestFile(pub IndexMap<String, String>);
impl ManifestFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        log::debug!("...loaded manifest file: {}", path.display());

        let parsed: ManifestFile = toml::from_str(&content)
            .map_err(|error| ParseError::new(FileFormat::Toml, path.to_path_buf(), error))?;

        Ok(parsed)
    }

    pub fn into_manifest(self) -> Result<Manifest, ConfigError> {
        Ok(Manifest::new(self.0)?)
    }
}
