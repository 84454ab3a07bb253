//! # nomen-codec
//!
//! Bidirectional mapping between delimited name strings and validated,
//! typed component sets, for single names and whole tables of them.
//!
//! ## Design Principles
//!
//! - A codec is a type implementing [`NameCodec`]: ordered keys, a schema,
//!   a parse function and a format function
//! - Names round-trip: parsing a formatted name yields the components it
//!   was formatted from (provided no value contains the separator)
//! - Every component mapping is validated on construction and on update;
//!   a failed update leaves the name unchanged
//! - Parsing is permissive and never validates; problems with a parsed
//!   name surface when it is next validated
//!
//! ## Forced components
//!
//! A codec may declare forced components. They are:
//! - overrides when formatting (they always win)
//! - defaults when constructing from a mapping (supplied keys win)
//! - ignored when parsing a string
//!
//! Each operation can opt out with `skip_forced`.
//!
//! ## Example
//!
//! ```
//! use nomen_codec::{raw_components, DocumentTableId, NameCodec};
//!
//! let name = DocumentTableId::format(
//!     raw_components([("document_id", "doc-1"), ("tabletype", "balance"), ("tnum", "3")]),
//!     false,
//! )?;
//! assert_eq!(name, "doc-1/balance/3");
//!
//! let renamed = DocumentTableId::rename(&name, raw_components([("tnum", "4")]))?;
//! assert_eq!(renamed, "doc-1/balance/4");
//! # Ok::<(), nomen_codec::CodecError>(())
//! ```

mod batch;
mod codec;
mod codecs;
mod error;
mod grammar;
mod macros;
mod random;
mod schema;
mod table;
mod value;

pub use batch::{format_many, parse_many, parse_series, FormatManyOptions};
pub use codec::{NameCodec, NameInput, StructuredName};
pub use codecs::*;
pub use error::{CodecError, TableError, ValidationError, Violation};
pub use grammar::Grammar;
pub use random::{random_alphanumeric, random_alphanumeric_with};
pub use schema::{coerce_to_string, Coercion, Field, FieldKind, Schema};
pub use table::{RowError, Series, Table};
pub use value::{raw_components, Components, RawComponents};

/// Re-export serde_json's value type; raw components and table cells use it.
pub use serde_json::Value;
