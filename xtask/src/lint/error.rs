//! Error types for lint operations.

use thiserror::Error;

/// Result type alias for the lint module.
pub type Result<T> = std::result::Result<T, LintError>;

#[derive(Error, Debug)]
pub enum LintError {
    #[error("Required command '{command}' not found. {hint}")]
    MissingCommand { command: String, hint: String },

    #[error("One or more checks failed")]
    ChecksFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fail early when `command` is not on `PATH`.
pub fn require_command(command: &str, hint: &str) -> Result<()> {
    let found = std::env::var_os("PATH").is_some_and(|paths| {
        std::env::split_paths(&paths).any(|dir| {
            let candidate = dir.join(command);
            candidate.is_file() || candidate.with_extension("exe").is_file()
        })
    });

    if found {
        Ok(())
    } else {
        Err(LintError::MissingCommand {
            command: command.to_string(),
            hint: hint.to_string(),
        })
    }
}
