//! Batch commands over JSON tables and name lists.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;
use nomen_codec::{FormatManyOptions, NameCodec, RawComponents, Table};
use tracing::{debug, info};

use crate::error::CliError;
use crate::output::{print_series, print_table, OutputFormat};

use super::{assignments, with_codec, CodecKind};

#[derive(Debug, Args)]
pub struct FormatManyArgs {
    /// Codec to format with.
    #[arg(value_enum)]
    codec: CodecKind,

    /// JSON array of component objects; `-` reads stdin.
    #[arg(long, short = 'i', default_value = "-")]
    input: String,

    /// Component applied to every row unless the row has it (repeatable).
    #[arg(long = "default", short = 'd', value_name = "KEY=VALUE")]
    defaults: Vec<String>,

    /// Strip this prefix from input columns before matching keys.
    #[arg(long)]
    column_prefix: Option<String>,

    /// Format without applying the codec's forced components.
    #[arg(long)]
    skip_forced: bool,
}

impl FormatManyArgs {
    pub fn run(self, format: OutputFormat) -> Result<()> {
        let contents = read_input(&self.input)?;
        let table = parse_records(&contents)?;

        let mut options = FormatManyOptions::new().skip_forced(self.skip_forced);
        for (key, value) in assignments(&self.defaults)? {
            options = options.with_default(key, value);
        }
        if let Some(prefix) = self.column_prefix {
            options = options.with_column_prefix(prefix);
        }

        info!(codec = ?self.codec, rows = table.len(), "formatting names");
        let names = with_codec!(self.codec, C => C::format_many(&table, &options))?;
        print_series(&names, format);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ParseManyArgs {
    /// Codec to parse with.
    #[arg(value_enum)]
    codec: CodecKind,

    /// One name per line, or a JSON array of names; `-` reads stdin.
    #[arg(long, short = 'i', default_value = "-")]
    input: String,
}

impl ParseManyArgs {
    pub fn run(self, format: OutputFormat) -> Result<()> {
        let contents = read_input(&self.input)?;
        let names = parse_names(&contents)?;

        info!(codec = ?self.codec, names = names.len(), "parsing names");
        let table = with_codec!(self.codec, C => C::parse_many(&names));
        print_table(&table, format);
        Ok(())
    }
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read stdin")?;
        return Ok(contents);
    }
    debug!(path, "reading input file");
    std::fs::read_to_string(path).with_context(|| format!("Failed to read input from {:?}", path))
}

fn parse_records(contents: &str) -> Result<Table, CliError> {
    let records: Vec<RawComponents> = serde_json::from_str(contents).map_err(|e| {
        CliError::InvalidInput(format!("expected a JSON array of objects: {e}"))
    })?;
    Ok(Table::from_records(records))
}

fn parse_names(contents: &str) -> Result<Vec<String>, CliError> {
    if contents.trim_start().starts_with('[') {
        return serde_json::from_str(contents).map_err(|e| {
            CliError::InvalidInput(format!("expected a JSON array of strings: {e}"))
        });
    }
    Ok(contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
