use inquire::{Confirm, InquireError};
use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("unable to read confirmation: {0}")]
    #[diagnostic(
        code(sprout::prompt::inquire),
        help("Run without --interactive when no terminal is attached")
    )]
    Inquire(#[from] InquireError),
}

/// Asks whether `count` files should be written under `destination`.
///
/// Defaults to "no". Cancelling the prompt (Esc / Ctrl-C) is an error.
pub fn confirm_write(count: usize, destination: &Path) -> Result<bool, PromptError> {
    let answer = Confirm::new(&confirmation_message(count, destination))
        .with_default(false)
        .with_help_message("Existing files at these paths will be overwritten")
        .prompt()?;

    Ok(answer)
}

fn confirmation_message(count: usize, destination: &Path) -> String {
    let noun = if count == 1 { "file" } else { "files" };

    format!("Write {} {} to {}?", count, noun, destination.display())
}
