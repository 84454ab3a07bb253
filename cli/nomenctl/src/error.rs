//! Error handling and display for the CLI.

use colored::Colorize;
use nomen_codec::CodecError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid assignment '{0}': expected KEY=VALUE or KEY:=JSON")]
    InvalidAssignment(String),

    #[error("invalid output format '{0}': expected 'table' or 'json'")]
    InvalidFormat(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let codec_err = err
        .downcast_ref::<CodecError>()
        .or_else(|| match err.downcast_ref::<CliError>() {
            Some(CliError::Codec(inner)) => Some(inner),
            _ => None,
        });

    match codec_err {
        Some(CodecError::MissingComponents { .. }) => {
            eprintln!(
                "\n{}",
                "Hint: add the missing columns, pass them with --default (KEY:=null for nullable ones), or drop --skip-forced."
                    .yellow()
            );
        }
        Some(CodecError::Shape { .. }) => {
            eprintln!(
                "\n{}",
                "Hint: pass a name string or a JSON object of components.".yellow()
            );
        }
        Some(err) if err.is_validation() => {
            eprintln!(
                "\n{}",
                "Hint: run `nomen codecs` to see each codec's components.".yellow()
            );
        }
        _ => {}
    }
}
