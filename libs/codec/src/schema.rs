//! Component schema validation.
//!
//! A [`Schema`] declares, per component key, whether it is required,
//! nullable or defaulted, which value kind it accepts, and an optional
//! coercion applied before the kind check. A field that may be omitted
//! without a default is always nullable. Schemas are `const`-constructible
//! so codec definitions can keep them in statics.

use serde_json::Value;

use crate::error::{ValidationError, Violation};
use crate::value::{value_kind, Components, RawComponents};

/// A coercion run on a supplied value before its kind is checked.
pub type Coercion = fn(&Value) -> Result<Value, String>;

/// The value kinds a component may hold after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string.
    Str,
    /// A string or null.
    NullableStr,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::Str => "a string",
            FieldKind::NullableStr => "a string or null",
        }
    }
}

/// Declaration of one component.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    key: &'static str,
    kind: FieldKind,
    required: bool,
    default: Option<&'static str>,
    coerce: Option<Coercion>,
}

impl Field {
    /// A component that must be supplied.
    pub const fn required(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            required: true,
            default: None,
            coerce: None,
        }
    }

    /// A nullable component that is null when omitted.
    pub const fn optional(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::NullableStr,
            required: false,
            default: None,
            coerce: None,
        }
    }

    /// A component that takes `default` when omitted.
    pub const fn defaulted(key: &'static str, kind: FieldKind, default: &'static str) -> Self {
        Self {
            key,
            kind,
            required: false,
            default: Some(default),
            coerce: None,
        }
    }

    /// Sets a coercion applied to supplied values before the kind check.
    pub const fn with_coercion(mut self, coerce: Coercion) -> Self {
        self.coerce = Some(coerce);
        self
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    fn check(&self, value: &Value) -> Result<Option<String>, Violation> {
        let coerced;
        let value = match self.coerce {
            Some(coerce) => {
                coerced = coerce(value).map_err(|reason| Violation::Coercion {
                    key: self.key.to_string(),
                    reason,
                })?;
                &coerced
            }
            None => value,
        };

        match (self.kind, value) {
            (_, Value::String(s)) => Ok(Some(s.clone())),
            (FieldKind::NullableStr, Value::Null) => Ok(None),
            (kind, other) => Err(Violation::WrongType {
                key: self.key.to_string(),
                expected: kind.expected(),
                found: value_kind(other),
            }),
        }
    }
}

/// An ordered set of component declarations.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [Field],
}

impl Schema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Validates `raw`, applying coercions and optional defaults.
    ///
    /// Every declared field is checked and all violations are reported
    /// together, followed by one [`Violation::Undeclared`] per key the
    /// schema does not declare.
    pub fn validate(&self, raw: &RawComponents) -> Result<Components, ValidationError> {
        let mut components = Components::new();
        let mut violations = Vec::new();

        for field in self.fields {
            match raw.get(field.key) {
                Some(value) => match field.check(value) {
                    Ok(value) => {
                        components.insert(field.key, value);
                    }
                    Err(violation) => violations.push(violation),
                },
                None if field.required => violations.push(Violation::Missing {
                    key: field.key.to_string(),
                }),
                None => {
                    components.insert(field.key, field.default.map(str::to_string));
                }
            }
        }

        violations.extend(
            raw.keys()
                .filter(|k| !self.fields.iter().any(|f| f.key == k.as_str()))
                .map(|k| Violation::Undeclared { key: k.clone() }),
        );

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(components)
    }
}

/// Coerces scalars to their string form; rejects null and containers.
///
/// Unlike Python's `str()`, bools render as `true`/`false` and null is an
/// error rather than `"None"`.
pub fn coerce_to_string(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(format!("cannot convert {} to a string", value_kind(other))),
    }
}
