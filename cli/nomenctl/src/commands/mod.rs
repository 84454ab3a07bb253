//! CLI commands.

mod batch;
mod codecs;
mod single;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use nomen_codec::{RawComponents, Value};

use crate::config::Config;
use crate::error::CliError;
use crate::output::OutputFormat;

/// nomen - parse, format and rename structured names.
#[derive(Debug, Parser)]
#[command(name = "nomen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json). Defaults to $NOMEN_FORMAT, then table.
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the available codecs.
    Codecs,

    /// Parse names into their components.
    Parse(single::ParseArgs),

    /// Format components into a name.
    Format(single::FormatArgs),

    /// Change components of an existing name.
    Rename(single::RenameArgs),

    /// Format every row of a JSON table into a name.
    FormatMany(batch::FormatManyArgs),

    /// Parse a list of names into a table.
    ParseMany(batch::ParseManyArgs),
}

/// The codecs the CLI can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodecKind {
    /// `<document_id>/<tabletype>/<tnum>`
    Dtid,
    /// `<status>_<client_slug>_<workspace>`
    Workspace,
    /// `^<prefix>|<fname>`
    File,
}

/// Runs `$body` with `$codec` bound to the codec type for `$kind`.
macro_rules! with_codec {
    ($kind:expr, $codec:ident => $body:expr) => {
        match $kind {
            $crate::commands::CodecKind::Dtid => {
                type $codec = ::nomen_codec::DocumentTableId;
                $body
            }
            $crate::commands::CodecKind::Workspace => {
                type $codec = ::nomen_codec::WorkspaceName;
                $body
            }
            $crate::commands::CodecKind::File => {
                type $codec = ::nomen_codec::PrefixedFileName;
                $body
            }
        }
    };
}
pub(crate) use with_codec;

impl Cli {
    pub fn run(self, config: &Config) -> Result<()> {
        let format = match self.format {
            Some(value) => value
                .parse::<OutputFormat>()
                .map_err(|_| CliError::InvalidFormat(value.clone()))?,
            None => config.format,
        };

        match self.command {
            Commands::Codecs => codecs::run(format),
            Commands::Parse(args) => args.run(format),
            Commands::Format(args) => args.run(format),
            Commands::Rename(args) => args.run(format),
            Commands::FormatMany(args) => args.run(format),
            Commands::ParseMany(args) => args.run(format),
        }
    }
}

/// Parses `KEY=VALUE` (string value) or `KEY:=JSON` (typed value).
pub fn parse_assignment(input: &str) -> Result<(String, Value), CliError> {
    let invalid = || CliError::InvalidAssignment(input.to_string());

    let (key, value) = input.split_once('=').ok_or_else(invalid)?;
    let (key, value) = match key.strip_suffix(':') {
        Some(key) => (key, serde_json::from_str(value).map_err(|_| invalid())?),
        None => (key, Value::String(value.to_string())),
    };
    if key.is_empty() {
        return Err(invalid());
    }
    Ok((key.to_string(), value))
}

/// Collects assignments into a component mapping; later ones win.
pub fn assignments(inputs: &[String]) -> Result<RawComponents, CliError> {
    inputs.iter().map(|s| parse_assignment(s)).collect()
}
