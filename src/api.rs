use crate::{
    blueprint,
    config::{self, ManifestFile},
    manifest::{self, Manifest},
    materialize::{self, MaterializationReport},
    preview::preview_as_tree,
    prompt,
};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SproutError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] manifest::ManifestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Materialize(#[from] materialize::MaterializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] prompt::PromptError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Write straight away.
    #[default]
    Write,
    /// Print the tree, write nothing.
    Preview,
    /// Print the tree and ask before writing.
    Confirm,
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory every manifest path is resolved against.
    pub base: PathBuf,
    /// TOML manifest to use instead of the built-in blueprint.
    pub manifest_file: Option<PathBuf>,
    pub mode: Mode,
}
impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            base: PathBuf::from("."),
            manifest_file: None,
            mode: Mode::default(),
        }
    }
}

#[derive(Debug)]
pub enum Generated {
    Written(MaterializationReport),
    Previewed,
    Declined,
}

/// Loads the manifest selected by `options`: the TOML file when one is given,
/// the built-in blueprint otherwise.
///
/// # Errors
///
/// Returns a [`SproutError`] if the manifest file cannot be read or parsed, or
/// if any of its paths is invalid.
pub fn load_manifest(options: &GenerateOptions) -> Result<Manifest, SproutError> {
    let manifest = match &options.manifest_file {
        Some(path) => {
            log::debug!("Attempting to load manifest from: {}", path.display());

            ManifestFile::from_file(path)?.into_manifest()?
        }
        None => {
            log::debug!("Using built-in blueprint");

            blueprint::default_manifest()?
        }
    };

    Ok(manifest)
}

/// Materializes the selected manifest under `options.base`.
///
/// # Errors
///
/// Returns a [`SproutError`] if:
///
/// - The manifest file could not be read or parsed.
/// - A manifest path is absolute or escapes the base directory.
/// - The confirmation prompt fails or is cancelled.
/// - A directory or file cannot be created or written to.
pub fn generate(options: &GenerateOptions) -> Result<Generated, SproutError> {
    let manifest = load_manifest(options)?;

    match options.mode {
        Mode::Write => {}
        Mode::Preview => {
            preview_as_tree(&manifest, &options.base);

            return Ok(Generated::Previewed);
        }
        Mode::Confirm => {
            preview_as_tree(&manifest, &options.base);

            if !prompt::confirm_write(manifest.len(), &options.base)? {
                log::info!("materialization declined, nothing written");

                return Ok(Generated::Declined);
            }
        }
    }

    let report = materialize::materialize(&manifest, &options.base)?;

    Ok(Generated::Written(report))
}
