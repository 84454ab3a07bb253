//! Concrete codec definitions.
//!
//! Each codec fixes a key order, a schema and a syntax. Plain delimited
//! names are generated with [`define_codec!`](crate::define_codec); the
//! prefixed file name has its own syntax and implements
//! [`NameCodec`] directly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::codec::NameCodec;
use crate::define_codec;
use crate::error::{CodecError, ValidationError, Violation};
use crate::random::random_alphanumeric_with;
use crate::schema::{coerce_to_string, Field, FieldKind, Schema};
use crate::value::{raw_components, Components, RawComponents};

// =============================================================================
// Document tables
// =============================================================================

static DOCUMENT_TABLE_ID_SCHEMA: Schema = Schema::new(&[
    Field::required("document_id", FieldKind::Str),
    Field::required("tabletype", FieldKind::Str),
    Field::required("tnum", FieldKind::Str).with_coercion(coerce_to_string),
]);

define_codec! {
    /// Unique identifier of a table within a document.
    ///
    /// Format: `<document_id>/<tabletype>/<tnum>`
    pub struct DocumentTableId {
        name: "dtid",
        keys: ["document_id", "tabletype", "tnum"],
        separator: "/",
        schema: DOCUMENT_TABLE_ID_SCHEMA,
        forced: [],
    }
}

/// Statically keyed components of a [`DocumentTableId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentTableIdParts {
    pub document_id: String,
    pub tabletype: String,
    pub tnum: String,
}

impl DocumentTableIdParts {
    /// Parses a `<document_id>/<tabletype>/<tnum>` name.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        Self::try_from(&DocumentTableId::parse_name(name))
    }

    /// Formats these parts as a name.
    pub fn to_name(&self) -> Result<String, CodecError> {
        DocumentTableId::format(RawComponents::from(self.clone()), false)
    }
}

impl TryFrom<&Components> for DocumentTableIdParts {
    type Error = ValidationError;

    fn try_from(components: &Components) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        let mut take = |key: &str| match components.get(key) {
            Some(value) => value.to_string(),
            None => {
                missing.push(Violation::Missing {
                    key: key.to_string(),
                });
                String::new()
            }
        };
        let parts = Self {
            document_id: take("document_id"),
            tabletype: take("tabletype"),
            tnum: take("tnum"),
        };

        if missing.is_empty() {
            Ok(parts)
        } else {
            Err(ValidationError::new(missing))
        }
    }
}

impl From<DocumentTableIdParts> for RawComponents {
    fn from(parts: DocumentTableIdParts) -> Self {
        raw_components([
            ("document_id", parts.document_id),
            ("tabletype", parts.tabletype),
            ("tnum", parts.tnum),
        ])
    }
}

// =============================================================================
// Workspaces
// =============================================================================

static WORKSPACE_NAME_SCHEMA: Schema = Schema::new(&[
    Field::required("status", FieldKind::Str),
    Field::required("client_slug", FieldKind::Str),
    Field::required("workspace", FieldKind::Str),
]);

define_codec! {
    /// Directory name of a client workspace.
    ///
    /// Format: `<status>_<client_slug>_<workspace>`. Formatting always
    /// writes the `active` status; a parsed name keeps whatever status it
    /// carried.
    pub struct WorkspaceName {
        name: "workspace",
        keys: ["status", "client_slug", "workspace"],
        separator: "_",
        schema: WORKSPACE_NAME_SCHEMA,
        forced: [("status", "active")],
    }
}

// =============================================================================
// Prefixed file names
// =============================================================================

/// Length of the collision-avoidance prefix.
pub const FILE_PREFIX_LEN: usize = 3;

static PREFIXED_FILE_NAME_SCHEMA: Schema = Schema::new(&[
    Field::optional("prefix"),
    Field::required("fname", FieldKind::Str),
]);

/// File name with a short random prefix, so that files uploaded under the
/// same name do not overwrite each other.
///
/// Format: `^<prefix>|<fname>`. A name that does not match exactly (a `^`,
/// three characters, then `|`) parses as an unprefixed `fname`. Formatting
/// without a prefix draws a fresh random one, so it is only idempotent once
/// a prefix is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrefixedFileName;

impl PrefixedFileName {
    /// Formats `components`, drawing a missing prefix from `rng`.
    pub fn format_with_rng<R: Rng + ?Sized>(
        rng: &mut R,
        components: &Components,
        forced: &RawComponents,
    ) -> Result<String, CodecError> {
        let mut merged = components.to_raw();
        merged.extend(forced.iter().map(|(k, v)| (k.clone(), v.clone())));
        let components = Self::schema().validate(&merged)?;

        let fname = components
            .get("fname")
            .ok_or_else(|| ValidationError::missing("fname"))?;
        let prefix = match components.get("prefix") {
            Some(prefix) => prefix.to_string(),
            None => random_alphanumeric_with(rng, FILE_PREFIX_LEN),
        };
        Ok(format!("^{prefix}|{fname}"))
    }
}

impl NameCodec for PrefixedFileName {
    const NAME: &'static str = "file";
    const KEYS: &'static [&'static str] = &["prefix", "fname"];

    fn schema() -> &'static Schema {
        &PREFIXED_FILE_NAME_SCHEMA
    }

    fn parse_name(name: &str) -> Components {
        match split_prefixed(name) {
            Some((prefix, fname)) => [("prefix", Some(prefix)), ("fname", Some(fname))]
                .into_iter()
                .collect(),
            None => [("prefix", None), ("fname", Some(name))].into_iter().collect(),
        }
    }

    fn format_name(components: &Components, forced: &RawComponents) -> Result<String, CodecError> {
        Self::format_with_rng(&mut rand::rng(), components, forced)
    }
}

/// Splits `^XXX|rest` into `("XXX", "rest")`.
fn split_prefixed(name: &str) -> Option<(&str, &str)> {
    let rest = name.strip_prefix('^')?;
    let (end, _) = rest.char_indices().nth(FILE_PREFIX_LEN)?;
    let fname = rest[end..].strip_prefix('|')?;
    Some((&rest[..end], fname))
}

// =============================================================================
// Tests
// =============================================================================
