//! Macros for defining delimited name codecs.

/// Macro to define a codec for a plain delimited name.
///
/// This generates a unit struct implementing [`NameCodec`](crate::NameCodec) with:
/// - a `GRAMMAR` constant built from the keys and separator
/// - `KEYS`, `FORCED` and `NAME` constants
/// - `parse_name` / `format_name` delegating to the grammar and schema
///
/// # Example
///
/// ```
/// use nomen_codec::{define_codec, Field, FieldKind, NameCodec, Schema, raw_components};
///
/// static RELEASE_SCHEMA: Schema = Schema::new(&[
///     Field::required("app", FieldKind::Str),
///     Field::required("version", FieldKind::Str),
/// ]);
///
/// define_codec! {
///     /// `<app>@<version>`
///     pub struct ReleaseName {
///         name: "release",
///         keys: ["app", "version"],
///         separator: "@",
///         schema: RELEASE_SCHEMA,
///         forced: [],
///     }
/// }
///
/// let name = ReleaseName::format(raw_components([("app", "web"), ("version", "1.2")]), false)?;
/// assert_eq!(name, "web@1.2");
/// # Ok::<(), nomen_codec::CodecError>(())
/// ```
#[macro_export]
macro_rules! define_codec {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            name: $codec_name:literal,
            keys: [$($key:literal),+ $(,)?],
            separator: $separator:literal,
            schema: $schema:path,
            forced: [$(($forced_key:literal, $forced_value:literal)),* $(,)?] $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            /// The grammar for this codec's key order and separator.
            pub const GRAMMAR: $crate::Grammar = $crate::Grammar::new(&[$($key),+], $separator);
        }

        impl $crate::NameCodec for $name {
            const NAME: &'static str = $codec_name;
            const KEYS: &'static [&'static str] = &[$($key),+];
            const FORCED: &'static [(&'static str, &'static str)] =
                &[$(($forced_key, $forced_value)),*];

            fn schema() -> &'static $crate::Schema {
                &$schema
            }

            fn parse_name(name: &str) -> $crate::Components {
                Self::GRAMMAR.parse(name)
            }

            fn format_name(
                components: &$crate::Components,
                forced: &$crate::RawComponents,
            ) -> Result<String, $crate::CodecError> {
                Self::GRAMMAR
                    .format(
                        Self::schema(),
                        components,
                        &$crate::RawComponents::new(),
                        forced,
                    )
                    .map_err($crate::CodecError::from)
            }
        }
    };
}
