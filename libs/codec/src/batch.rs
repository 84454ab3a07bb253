//! Batch formatting and parsing over tables and name sequences.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::codec::{NameCodec, NameInput};
use crate::error::CodecError;
use crate::table::{RowError, Series, Table};
use crate::value::{Components, RawComponents};

/// Options for [`format_many`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatManyOptions {
    /// Components used for every row; table cells win over them.
    pub default_components: RawComponents,

    /// Shared prefix on the table's component columns (e.g. `"src_"` for
    /// a `src_document_id` column).
    pub existing_column_prefix: Option<String>,

    /// Disable forced components for the whole batch.
    pub skip_forced: bool,
}

impl FormatManyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_components.insert(key.into(), value.into());
        self
    }

    pub fn with_column_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.existing_column_prefix = Some(prefix.into());
        self
    }

    pub fn skip_forced(mut self, skip: bool) -> Self {
        self.skip_forced = skip;
        self
    }
}

/// Formats every row of `table` into a name, index-aligned with the table.
///
/// Every declared key must come from a table column, the default
/// components or (unless skipped) the forced components; otherwise the
/// batch fails with [`CodecError::MissingComponents`] before any row is
/// formatted. Columns that are not declared keys are ignored. Identical
/// rows are formatted once. The first row that fails to format fails the
/// whole batch.
pub fn format_many<C: NameCodec>(
    table: &Table,
    options: &FormatManyOptions,
) -> Result<Series<String>, CodecError> {
    let renamed;
    let table = match &options.existing_column_prefix {
        Some(prefix) => {
            let mapping: BTreeMap<String, String> = C::KEYS
                .iter()
                .map(|key| (format!("{prefix}{key}"), key.to_string()))
                .collect();
            renamed = table.rename_columns(&mapping);
            &renamed
        }
        None => table,
    };

    let present: Vec<&str> = C::KEYS
        .iter()
        .copied()
        .filter(|key| table.has_column(key))
        .collect();

    let missing: Vec<String> = C::KEYS
        .iter()
        .copied()
        .filter(|key| {
            !present.contains(key)
                && !options.default_components.contains_key(*key)
                && (options.skip_forced || !C::FORCED.iter().any(|(k, _)| k == key))
        })
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(CodecError::MissingComponents { keys: missing });
    }

    debug!(
        codec = C::NAME,
        rows = table.len(),
        columns = ?present,
        "formatting names"
    );

    table
        .select(present.as_slice())?
        .apply_rows_unique(|row| {
            let mut components = options.default_components.clone();
            components.extend(row);
            C::format(NameInput::Components(components), options.skip_forced)
        })
        .map_err(|RowError { index, error }| CodecError::Row {
            index,
            source: Box::new(error),
        })
}

/// Parses each name into a row with one column per declared key, labelled
/// `0..n` in input order.
pub fn parse_many<C, I, S>(names: I) -> Table
where
    C: NameCodec,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rows: Vec<Vec<Value>> = names
        .into_iter()
        .map(|name| parsed_row::<C>(name.as_ref()))
        .collect();
    let columns = C::KEYS.iter().map(|key| key.to_string()).collect();
    let table = Table::from_rows(columns, rows);
    debug!(codec = C::NAME, rows = table.len(), "parsed names");
    table
}

/// Like [`parse_many`], keeping the index labels of `names`.
pub fn parse_series<C, S>(names: &Series<S>) -> Result<Table, CodecError>
where
    C: NameCodec,
    S: AsRef<str>,
{
    let table = parse_many::<C, _, &str>(names.values().iter().map(|name| name.as_ref()));
    Ok(table.with_index(names.index().to_vec())?)
}

/// One cell per declared key; keys the name did not produce are null.
fn parsed_row<C: NameCodec>(name: &str) -> Vec<Value> {
    let components: Components = C::parse_name(name);
    components
        .ordered(C::KEYS)
        .map(|v| v.map_or(Value::Null, |s| Value::String(s.to_string())))
        .collect()
}
