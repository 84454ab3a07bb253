//! Single-name commands: parse, format and rename.

use anyhow::Result;
use clap::Args;
use nomen_codec::{NameCodec, NameInput, Value};
use tracing::debug;

use crate::error::CliError;
use crate::output::{print_name, print_table, OutputFormat};

use super::{assignments, with_codec, CodecKind};

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Codec to parse with.
    #[arg(value_enum)]
    codec: CodecKind,

    /// Names to parse.
    #[arg(required = true)]
    names: Vec<String>,
}

impl ParseArgs {
    pub fn run(self, format: OutputFormat) -> Result<()> {
        let table = with_codec!(self.codec, C => C::parse_many(&self.names));
        print_table(&table, format);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Codec to format with.
    #[arg(value_enum)]
    codec: CodecKind,

    /// Component assignment, KEY=VALUE or KEY:=JSON (repeatable).
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// A JSON name string or component object instead of --set.
    #[arg(long, conflicts_with = "set")]
    json: Option<String>,

    /// Format without applying the codec's forced components.
    #[arg(long)]
    skip_forced: bool,
}

impl FormatArgs {
    pub fn run(self, format: OutputFormat) -> Result<()> {
        let input = match &self.json {
            Some(json) => {
                let value: Value = serde_json::from_str(json)
                    .map_err(|e| CliError::InvalidInput(format!("--json: {e}")))?;
                NameInput::try_from(value)?
            }
            None => NameInput::Components(assignments(&self.set)?),
        };
        debug!(codec = ?self.codec, skip_forced = self.skip_forced, "formatting name");

        let name = with_codec!(self.codec, C => C::format(input, self.skip_forced))?;
        print_name(&name, format);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Codec the name belongs to.
    #[arg(value_enum)]
    codec: CodecKind,

    /// Existing name.
    name: String,

    /// Component to change, KEY=VALUE or KEY:=JSON (repeatable).
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE", required = true)]
    set: Vec<String>,
}

impl RenameArgs {
    pub fn run(self, format: OutputFormat) -> Result<()> {
        let partial = assignments(&self.set)?;
        let name = with_codec!(self.codec, C => C::rename(&self.name, partial))?;
        print_name(&name, format);
        Ok(())
    }
}
