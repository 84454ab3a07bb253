//! A minimal labeled table.
//!
//! Rows are addressed by index label and columns by name. Every operation
//! preserves the index, so results can be lined up with the input rows.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value;

use crate::error::TableError;
use crate::value::RawComponents;

/// A failure raised by a row function, tagged with the row's index label.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError<E> {
    pub index: usize,
    pub error: E,
}

/// Ordered values with one index label each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series<T> {
    index: Vec<usize>,
    values: Vec<T>,
}

impl<T> Series<T> {
    /// Labels the values `0..n`.
    pub fn from_values(values: Vec<T>) -> Self {
        Self {
            index: (0..values.len()).collect(),
            values,
        }
    }

    pub fn with_index(index: Vec<usize>, values: Vec<T>) -> Result<Self, TableError> {
        if index.len() != values.len() {
            return Err(TableError::IndexLength {
                expected: values.len(),
                actual: index.len(),
            });
        }
        Ok(Self { index, values })
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value labelled `label`, if any.
    pub fn get(&self, label: usize) -> Option<&T> {
        self.index
            .iter()
            .position(|l| *l == label)
            .map(|pos| &self.values[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.index.iter().copied().zip(self.values.iter())
    }
}

/// Rows of JSON cells under named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    index: Vec<usize>,
    rows: Vec<Vec<Value>>,
    /// One past the largest label in `index`.
    #[serde(skip)]
    next_label: usize,
}

impl Table {
    /// An empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            index: Vec::new(),
            rows: Vec::new(),
            next_label: 0,
        }
    }

    /// A table labelled `0..n` from rows already laid out as `columns`.
    pub(crate) fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self {
            index: (0..rows.len()).collect(),
            next_label: rows.len(),
            columns,
            rows,
        }
    }

    /// Builds a table from row mappings.
    ///
    /// Columns appear in first-seen order; cells a record does not have are
    /// null.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawComponents>,
    {
        let records: Vec<RawComponents> = records.into_iter().collect();
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows: Vec<Vec<Value>> = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self::from_rows(columns, rows)
    }

    /// Appends a row labelled one past the largest existing label.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.index.push(self.next_label);
        self.next_label += 1;
        self.rows.push(row);
        Ok(())
    }

    /// Replaces the index labels.
    pub fn with_index(mut self, index: Vec<usize>) -> Result<Self, TableError> {
        if index.len() != self.rows.len() {
            return Err(TableError::IndexLength {
                expected: self.rows.len(),
                actual: index.len(),
            });
        }
        self.next_label = index.iter().max().map_or(0, |max| max + 1);
        self.index = index;
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// The cells of `column`, in row order.
    pub fn column(&self, column: &str) -> Option<Vec<&Value>> {
        let pos = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(|row| &row[pos]).collect())
    }

    /// The row at position `pos` as a column-to-cell mapping.
    pub fn row(&self, pos: usize) -> Option<RawComponents> {
        let row = self.rows.get(pos)?;
        Some(
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect(),
        )
    }

    /// Rows as mappings, paired with their index labels.
    pub fn records(&self) -> impl Iterator<Item = (usize, RawComponents)> + '_ {
        self.index
            .iter()
            .copied()
            .zip(0..self.rows.len())
            .filter_map(|(label, pos)| self.row(pos).map(|row| (label, row)))
    }

    /// Renames columns whose name exactly matches a key of `mapping`.
    pub fn rename_columns(&self, mapping: &BTreeMap<String, String>) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| mapping.get(c).cloned().unwrap_or_else(|| c.clone()))
                .collect(),
            index: self.index.clone(),
            rows: self.rows.clone(),
            next_label: self.next_label,
        }
    }

    /// Keeps only `columns`, in the given order.
    ///
    /// If several columns share a name, the first one is selected.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<Table, TableError> {
        let positions = columns
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.columns
                    .iter()
                    .position(|c| c == name)
                    .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Table {
            columns: positions.iter().map(|p| self.columns[*p].clone()).collect(),
            index: self.index.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| positions.iter().map(|p| row[*p].clone()).collect())
                .collect(),
            next_label: self.next_label,
        })
    }

    /// Applies `f` to every row, stopping at the first failure.
    pub fn apply_rows<T, E, F>(&self, mut f: F) -> Result<Series<T>, RowError<E>>
    where
        F: FnMut(RawComponents) -> Result<T, E>,
    {
        let mut values = Vec::with_capacity(self.rows.len());
        for (label, row) in self.records() {
            values.push(f(row).map_err(|error| RowError {
                index: label,
                error,
            })?);
        }
        Ok(Series {
            index: self.index.clone(),
            values,
        })
    }

    /// Like [`Self::apply_rows`], but calls `f` once per distinct row and
    /// reuses the result for rows with identical cells.
    pub fn apply_rows_unique<T, E, F>(&self, mut f: F) -> Result<Series<T>, RowError<E>>
    where
        T: Clone,
        F: FnMut(RawComponents) -> Result<T, E>,
    {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut values: Vec<T> = Vec::with_capacity(self.rows.len());

        for (pos, (label, cells)) in self.index.iter().zip(&self.rows).enumerate() {
            let key = Value::Array(cells.clone()).to_string();
            if let Some(first) = seen.get(&key) {
                let value = values[*first].clone();
                values.push(value);
                continue;
            }

            let row = self.columns.iter().cloned().zip(cells.iter().cloned()).collect();
            let value = f(row).map_err(|error| RowError {
                index: *label,
                error,
            })?;
            seen.insert(key, pos);
            values.push(value);
        }

        Ok(Series {
            index: self.index.clone(),
            values,
        })
    }
}
