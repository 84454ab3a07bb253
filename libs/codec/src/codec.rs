//! The codec interface and live name instances.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde_json::Value;

use crate::batch::{self, FormatManyOptions};
use crate::error::CodecError;
use crate::schema::Schema;
use crate::table::{Series, Table};
use crate::value::{value_kind, Components, RawComponents};

/// Input accepted when constructing a [`StructuredName`].
#[derive(Debug, Clone, PartialEq)]
pub enum NameInput {
    /// A formatted name, parsed without validation.
    Name(String),
    /// A component mapping, validated on construction.
    Components(RawComponents),
}

impl From<&str> for NameInput {
    fn from(name: &str) -> Self {
        NameInput::Name(name.to_string())
    }
}

impl From<String> for NameInput {
    fn from(name: String) -> Self {
        NameInput::Name(name)
    }
}

impl From<RawComponents> for NameInput {
    fn from(components: RawComponents) -> Self {
        NameInput::Components(components)
    }
}

impl TryFrom<Value> for NameInput {
    type Error = CodecError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(NameInput::Name(name)),
            Value::Object(map) => Ok(NameInput::Components(map.into_iter().collect())),
            other => Err(CodecError::Shape {
                found: value_kind(&other),
            }),
        }
    }
}

/// A structured-name codec definition.
///
/// Implementors fix the ordered component keys, the schema, the forced
/// components and the parse/format functions. Most codecs are plain
/// delimited names and are generated with [`define_codec!`](crate::define_codec);
/// codecs with bespoke syntax implement this trait by hand.
///
/// The provided associated functions are the codec's public surface.
pub trait NameCodec: Sized {
    /// Short identifier for the codec, used in logs and the CLI.
    const NAME: &'static str;

    /// Component keys in positional order. Keys must be unique.
    const KEYS: &'static [&'static str];

    /// Components that are overridden on every format and used as
    /// defaults when constructing from a mapping.
    const FORCED: &'static [(&'static str, &'static str)] = &[];

    fn schema() -> &'static Schema;

    /// Extracts components from a name. Must not fail.
    fn parse_name(name: &str) -> Components;

    /// Formats components into a name, letting `forced` override them.
    fn format_name(components: &Components, forced: &RawComponents) -> Result<String, CodecError>;

    /// [`Self::FORCED`] as a component mapping.
    fn forced_components() -> RawComponents {
        Self::FORCED
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    /// Constructs a name from `input` and returns its formatted string.
    fn format(input: impl Into<NameInput>, skip_forced: bool) -> Result<String, CodecError> {
        StructuredName::<Self>::construct(input, skip_forced)?.name()
    }

    /// Constructs a name from `input` and returns its components.
    fn parse(input: impl Into<NameInput>, skip_forced: bool) -> Result<Components, CodecError> {
        Ok(StructuredName::<Self>::construct(input, skip_forced)?.into_components())
    }

    /// Parses `name`, applies `partial` and returns the new name.
    fn rename(name: &str, partial: RawComponents) -> Result<String, CodecError> {
        let mut structured = StructuredName::<Self>::from_name(name, false);
        structured.update(partial)?;
        structured.name()
    }

    /// Formats every row of `table` into a name. See [`batch::format_many`].
    fn format_many(table: &Table, options: &FormatManyOptions) -> Result<Series<String>, CodecError> {
        batch::format_many::<Self>(table, options)
    }

    /// Parses every name into a table row. See [`batch::parse_many`].
    fn parse_many<I, S>(names: I) -> Table
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        batch::parse_many::<Self, _, _>(names)
    }

    /// Like [`Self::parse_many`], keeping the series' index labels.
    fn parse_series<S: AsRef<str>>(names: &Series<S>) -> Result<Table, CodecError> {
        batch::parse_series::<Self, S>(names)
    }
}

/// One live name bound to a codec.
///
/// Built from a name string (parsed as-is, not validated) or from a
/// component mapping (validated, with forced components filling in omitted
/// keys). The formatted name is recomputed on every call to [`Self::name`].
pub struct StructuredName<C: NameCodec> {
    components: Components,
    skip_forced: bool,
    _codec: PhantomData<fn() -> C>,
}

impl<C: NameCodec> StructuredName<C> {
    pub fn construct(input: impl Into<NameInput>, skip_forced: bool) -> Result<Self, CodecError> {
        match input.into() {
            NameInput::Name(name) => Ok(Self::from_name(&name, skip_forced)),
            NameInput::Components(raw) => Self::from_components(raw, skip_forced),
        }
    }

    /// Constructs from an arbitrary JSON value, rejecting anything that is
    /// neither a string nor an object.
    pub fn from_value(value: Value, skip_forced: bool) -> Result<Self, CodecError> {
        Self::construct(NameInput::try_from(value)?, skip_forced)
    }

    /// Parses `name`. Forced components are not applied to the result.
    pub fn from_name(name: &str, skip_forced: bool) -> Self {
        Self {
            components: C::parse_name(name),
            skip_forced,
            _codec: PhantomData,
        }
    }

    /// Validates `raw`. Forced components fill keys `raw` omits; keys
    /// present in `raw` win.
    pub fn from_components(raw: RawComponents, skip_forced: bool) -> Result<Self, CodecError> {
        let mut merged = if skip_forced {
            RawComponents::new()
        } else {
            C::forced_components()
        };
        merged.extend(raw);

        Ok(Self {
            components: C::schema().validate(&merged)?,
            skip_forced,
            _codec: PhantomData,
        })
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn into_components(self) -> Components {
        self.components
    }

    pub fn skips_forced(&self) -> bool {
        self.skip_forced
    }

    /// The forced components in effect for this instance.
    pub fn forced_components(&self) -> RawComponents {
        if self.skip_forced {
            RawComponents::new()
        } else {
            C::forced_components()
        }
    }

    /// Formats the current components.
    pub fn name(&self) -> Result<String, CodecError> {
        C::format_name(&self.components, &self.forced_components())
    }

    /// Merges `partial` over the current components and re-validates the
    /// whole set. On failure the instance is left unchanged.
    pub fn update(&mut self, partial: RawComponents) -> Result<(), CodecError> {
        let mut candidate = self.components.to_raw();
        candidate.extend(partial);
        self.components = C::schema().validate(&candidate)?;
        Ok(())
    }
}

impl<C: NameCodec> Clone for StructuredName<C> {
    fn clone(&self) -> Self {
        Self {
            components: self.components.clone(),
            skip_forced: self.skip_forced,
            _codec: PhantomData,
        }
    }
}

impl<C: NameCodec> fmt::Debug for StructuredName<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredName")
            .field("codec", &C::NAME)
            .field("components", &self.components)
            .field("skip_forced", &self.skip_forced)
            .finish()
    }
}

impl<C: NameCodec> PartialEq for StructuredName<C> {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components && self.skip_forced == other.skip_forced
    }
}

impl<C: NameCodec> FromStr for StructuredName<C> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use crate::schema::{coerce_to_string, Field, FieldKind};
    use crate::value::raw_components;
    use serde_json::json;

    static SCHEMA: Schema = Schema::new(&[
        Field::required("kind", FieldKind::Str),
        Field::required("owner", FieldKind::Str),
        Field::required("seq", FieldKind::Str).with_coercion(coerce_to_string),
    ]);

    crate::define_codec! {
        /// Test codec with a forced `kind`.
        struct Ticket {
            name: "ticket",
            keys: ["kind", "owner", "seq"],
            separator: "-",
            schema: SCHEMA,
            forced: [("kind", "bug")],
        }
    }

    #[test]
    fn test_construct_from_string_ignores_forced() {
        let t = StructuredName::<Ticket>::construct("task-ann-4", false).unwrap();
        assert_eq!(t.components().get("kind"), Some("task"));
    }

    #[test]
    fn test_construct_from_string_does_not_fill_forced() {
        let t = StructuredName::<Ticket>::from_name("ann", false);
        assert_eq!(t.components().get("kind"), Some("ann"));
        assert!(!t.components().contains_key("seq"));
    }

    #[test]
    fn test_construct_from_mapping_uses_forced_as_default() {
        let t = StructuredName::<Ticket>::construct(
            raw_components([("owner", json!("ann")), ("seq", json!(4))]),
            false,
        )
        .unwrap();
        assert_eq!(t.components().get("kind"), Some("bug"));
        assert_eq!(t.components().get("seq"), Some("4"));
    }

    #[test]
    fn test_construct_from_mapping_input_wins_over_forced() {
        let t = StructuredName::<Ticket>::construct(
            raw_components([("kind", "task"), ("owner", "ann"), ("seq", "4")]),
            false,
        )
        .unwrap();
        assert_eq!(t.components().get("kind"), Some("task"));
        // ...but formatting lets the forced value override it.
        assert_eq!(t.name().unwrap(), "bug-ann-4");
    }

    #[test]
    fn test_skip_forced() {
        let err = StructuredName::<Ticket>::construct(
            raw_components([("owner", "ann"), ("seq", "4")]),
            true,
        )
        .unwrap_err();
        assert!(matches!(&err, CodecError::Validation(v) if v.is_missing("kind")));

        let t = StructuredName::<Ticket>::construct("task-ann-4", true).unwrap();
        assert!(t.skips_forced());
        assert!(t.forced_components().is_empty());
        assert_eq!(t.name().unwrap(), "task-ann-4");
    }

    #[test]
    fn test_from_value_rejects_other_shapes() {
        for value in [json!(12), json!(null), json!(["a"]), json!(true)] {
            let err = StructuredName::<Ticket>::from_value(value, false).unwrap_err();
            assert!(matches!(err, CodecError::Shape { .. }));
        }
        let t = StructuredName::<Ticket>::from_value(json!({"owner": "ann", "seq": 1}), false)
            .unwrap();
        assert_eq!(t.name().unwrap(), "bug-ann-1");
    }

    #[test]
    fn test_name_reflects_latest_update() {
        let mut t = StructuredName::<Ticket>::from_name("bug-ann-4", false);
        assert_eq!(t.name().unwrap(), "bug-ann-4");
        t.update(raw_components([("owner", "bob")])).unwrap();
        assert_eq!(t.name().unwrap(), "bug-bob-4");
    }

    #[test]
    fn test_update_revalidates_whole_set() {
        // "bug" parses to a single key; the update must still fail on the
        // keys that were never supplied.
        let mut t = StructuredName::<Ticket>::from_name("bug", false);
        let err = t.update(raw_components([("owner", "ann")])).unwrap_err();
        assert!(matches!(&err, CodecError::Validation(v) if v.is_missing("seq")));
    }

    #[test]
    fn test_failed_update_leaves_state_intact() {
        let mut t = StructuredName::<Ticket>::from_name("bug-ann-4", false);
        let before = t.clone();
        let err = t
            .update(raw_components([("owner", json!(5)), ("seq", json!({}))]))
            .unwrap_err();
        let CodecError::Validation(v) = err else {
            panic!("expected validation error");
        };
        assert!(matches!(v.violations()[0], Violation::WrongType { .. }));
        assert_eq!(t, before);
        assert_eq!(t.name().unwrap(), "bug-ann-4");
    }

    #[test]
    fn test_update_coerces() {
        let mut t = StructuredName::<Ticket>::from_name("bug-ann-4", false);
        t.update(raw_components([("seq", json!(5))])).unwrap();
        assert_eq!(t.components().get("seq"), Some("5"));
    }

    #[test]
    fn test_class_level_conveniences() {
        assert_eq!(
            Ticket::format(raw_components([("owner", "ann"), ("seq", "9")]), false).unwrap(),
            "bug-ann-9"
        );
        let parsed = Ticket::parse("bug-ann-9", false).unwrap();
        assert_eq!(parsed.get("owner"), Some("ann"));
        assert_eq!(
            Ticket::rename("bug-ann-9", raw_components([("seq", "10")])).unwrap(),
            "bug-ann-10"
        );
    }

    #[test]
    fn test_rename_matches_manual_composition() {
        let partial = raw_components([("owner", "bob")]);
        let mut manual = StructuredName::<Ticket>::construct("task-ann-9", false).unwrap();
        manual.update(partial.clone()).unwrap();
        assert_eq!(
            Ticket::rename("task-ann-9", partial).unwrap(),
            manual.name().unwrap()
        );
    }

    #[test]
    fn test_from_str() {
        let t: StructuredName<Ticket> = "bug-ann-4".parse().unwrap();
        assert_eq!(t.components().get("seq"), Some("4"));
        assert!(format!("{t:?}").contains("ticket"));
    }
}
