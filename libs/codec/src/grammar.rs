//! Delimited-name grammar.
//!
//! A [`Grammar`] is the pure parse/format pair derived from an ordered list
//! of component keys and a separator. It has no escaping: a component value
//! that contains the separator will not survive a round trip.
//!
//! Parsing is deliberately permissive. A name with fewer segments than keys
//! yields a component set missing its trailing keys, and extra segments are
//! dropped. Neither case is an error here; the schema reports it when the
//! components are next validated. For schemas whose trailing fields are
//! optional, a short name therefore validates without complaint.

use tracing::trace;

use crate::error::ValidationError;
use crate::schema::Schema;
use crate::value::{Components, RawComponents};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    keys: &'static [&'static str],
    separator: &'static str,
}

impl Grammar {
    /// # Panics
    ///
    /// Panics if `separator` is empty (at compile time when used in a const).
    pub const fn new(keys: &'static [&'static str], separator: &'static str) -> Self {
        assert!(!separator.is_empty(), "grammar separator must not be empty");
        Self { keys, separator }
    }

    pub const fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    pub const fn separator(&self) -> &'static str {
        self.separator
    }

    /// Splits `name` on the separator and zips the segments with the keys.
    pub fn parse(&self, name: &str) -> Components {
        let components: Components = self
            .keys
            .iter()
            .zip(name.split(self.separator))
            .map(|(key, segment)| (*key, Some(segment)))
            .collect();
        trace!(name, parsed = components.len(), "parsed name");
        components
    }

    /// Formats components into a name.
    ///
    /// `components`, then `overrides`, then `forced` are merged with
    /// increasing priority, so forced values always win. The merged set is
    /// validated against `schema` before the declared keys are joined. Null
    /// values format as empty segments.
    pub fn format(
        &self,
        schema: &Schema,
        components: &Components,
        overrides: &RawComponents,
        forced: &RawComponents,
    ) -> Result<String, ValidationError> {
        let mut merged = components.to_raw();
        merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged.extend(forced.iter().map(|(k, v)| (k.clone(), v.clone())));

        let validated = schema.validate(&merged)?;
        let name = validated
            .ordered(self.keys)
            .map(|v| v.unwrap_or_default())
            .collect::<Vec<_>>()
            .join(self.separator);
        trace!(name = %name, "formatted name");
        Ok(name)
    }
}
