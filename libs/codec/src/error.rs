//! Error types for name parsing, formatting and validation.

use thiserror::Error;

/// A single reason a component set failed schema validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A required component was not supplied.
    #[error("missing required component '{key}'")]
    Missing { key: String },

    /// The component value has the wrong type.
    #[error("component '{key}' must be {expected}, got {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The component's coercion function rejected the value.
    #[error("component '{key}' could not be coerced: {reason}")]
    Coercion { key: String, reason: String },

    /// The component is not declared by the schema.
    #[error("unknown component '{key}'")]
    Undeclared { key: String },
}

impl Violation {
    /// The component key this violation is about.
    pub fn key(&self) -> &str {
        match self {
            Violation::Missing { key }
            | Violation::WrongType { key, .. }
            | Violation::Coercion { key, .. }
            | Violation::Undeclared { key } => key,
        }
    }
}

/// A component set failed schema validation.
///
/// Carries every violation found, not just the first one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid name components: {}", render_violations(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Shorthand for a single missing-key violation.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::new(vec![Violation::Missing { key: key.into() }])
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Keys that have at least one violation, in the order they were found.
    pub fn keys(&self) -> Vec<&str> {
        self.violations.iter().map(Violation::key).collect()
    }

    /// Keys reported as undeclared.
    pub fn undeclared(&self) -> Vec<&str> {
        self.violations
            .iter()
            .filter_map(|v| match v {
                Violation::Undeclared { key } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns true if `key` was reported as missing.
    pub fn is_missing(&self, key: &str) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, Violation::Missing { key: k } if k == key))
    }
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by the labeled table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A selected column does not exist.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A row does not have one cell per column.
    #[error("row has {actual} cells, table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    /// An index does not have one label per row.
    #[error("index has {actual} labels, expected {expected}")]
    IndexLength { expected: usize, actual: usize },
}

/// Errors that can occur when constructing, updating or formatting names.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input is neither a name string nor a mapping of components.
    #[error("name input must be a string or a mapping of components, got {found}")]
    Shape { found: &'static str },

    /// The components failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A batch format cannot source every declared component.
    #[error(
        "the following components are not in the table columns, the default components, \
         nor the forced components: {}",
        .keys.join(", ")
    )]
    MissingComponents { keys: Vec<String> },

    /// A single row of a batch failed; the whole batch is rejected.
    #[error("row {index}: {source}")]
    Row {
        index: usize,
        source: Box<CodecError>,
    },

    /// The labeled table rejected an operation.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl CodecError {
    /// Returns true if this error (or the row error it wraps) is a validation failure.
    pub fn is_validation(&self) -> bool {
        match self {
            CodecError::Validation(_) => true,
            CodecError::Row { source, .. } => source.is_validation(),
            _ => false,
        }
    }

    /// The keys named by a [`CodecError::MissingComponents`] error.
    pub fn missing_components(&self) -> Option<&[String]> {
        match self {
            CodecError::MissingComponents { keys } => Some(keys),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = ValidationError::new(vec![
            Violation::Missing {
                key: "tnum".to_string(),
            },
            Violation::WrongType {
                key: "document_id".to_string(),
                expected: "a string",
                found: "number",
            },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("missing required component 'tnum'"));
        assert!(msg.contains("component 'document_id' must be a string, got number"));
        assert_eq!(err.keys(), vec!["tnum", "document_id"]);
        assert!(err.is_missing("tnum"));
        assert!(!err.is_missing("document_id"));
    }

    #[test]
    fn test_missing_components_message_names_all_keys() {
        let err = CodecError::MissingComponents {
            keys: vec!["tabletype".to_string(), "tnum".to_string()],
        };
        assert!(err.to_string().ends_with("tabletype, tnum"));
        assert_eq!(
            err.missing_components(),
            Some(&["tabletype".to_string(), "tnum".to_string()][..])
        );
    }

    #[test]
    fn test_row_error_is_validation() {
        let err = CodecError::Row {
            index: 3,
            source: Box::new(ValidationError::missing("fname").into()),
        };
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("row 3: "));
        assert!(!CodecError::Shape { found: "number" }.is_validation());
    }
}
