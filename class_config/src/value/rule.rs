//! Compound variant rules and their discriminants.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::error::json_kind;
use crate::{StyleError, StyleResult};

use super::keys;

/// Scalar discriminant value a variant axis can take.
///
/// Numbers compare by value, so `1` and `1.0` are the same option.
#[derive(Clone, Debug, Eq)]
pub enum Scalar {
    /// String option, e.g. `"sm"`.
    Str(String),
    /// Boolean option, e.g. `true` for a `loading` axis.
    Bool(bool),
    /// Numeric option.
    Num(Number),
}

impl Scalar {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Num(n.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Converts the scalar back into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Num(n) => Value::Number(n.clone()),
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Num(a), Self::Num(b)) => same_number(a, b),
            _ => false,
        }
    }
}

/// Integers compare exactly; any other pairing compares as `f64`.
fn same_number(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y) == Some(Ordering::Equal),
        _ => false,
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Value of one discriminant key in a compound variant rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Discriminant {
    /// Matches exactly one option.
    One(Scalar),
    /// Shorthand for one rule per listed option.
    AnyOf(Vec<Scalar>),
}

impl Discriminant {
    fn to_value(&self) -> Value {
        match self {
            Self::One(scalar) => scalar.to_value(),
            Self::AnyOf(options) => Value::Array(options.iter().map(Scalar::to_value).collect()),
        }
    }
}

/// Rule contributing extra classes when every discriminant matches.
///
/// Two rules share an identity when their discriminants are equal; the
/// `class` string plays no part in identity.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompoundVariantRule {
    discriminants: BTreeMap<String, Discriminant>,
    class: String,
}

impl CompoundVariantRule {
    /// Create a rule with no discriminants.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            discriminants: BTreeMap::new(),
            class: class.into(),
        }
    }

    /// Add a single-option discriminant.
    #[must_use]
    pub fn when(mut self, axis: impl Into<String>, option: impl Into<Scalar>) -> Self {
        self.discriminants
            .insert(axis.into(), Discriminant::One(option.into()));
        self
    }

    /// Add a discriminant matching any of `options`.
    #[must_use]
    pub fn when_any<I, S>(mut self, axis: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        self.discriminants.insert(
            axis.into(),
            Discriminant::AnyOf(options.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Returns the rule's discriminants.
    #[must_use]
    pub const fn discriminants(&self) -> &BTreeMap<String, Discriminant> {
        &self.discriminants
    }

    /// Returns the classes the rule contributes.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns a copy of the rule carrying `class` instead.
    #[must_use]
    pub fn with_class(&self, class: String) -> Self {
        Self {
            discriminants: self.discriminants.clone(),
            class,
        }
    }

    /// Returns `true` when both rules select the same variant combination.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.discriminants == other.discriminants
    }

    /// Fans every [`Discriminant::AnyOf`] out into single-option rules.
    ///
    /// Several list-valued discriminants expand as a cartesian product, in
    /// key order. An empty option list yields no rules.
    #[must_use]
    pub fn expand(&self) -> Vec<Self> {
        let mut expanded = vec![Self::new(self.class.clone())];
        for (axis, discriminant) in &self.discriminants {
            let options: Vec<&Scalar> = match discriminant {
                Discriminant::One(scalar) => vec![scalar],
                Discriminant::AnyOf(options) => options.iter().collect(),
            };
            expanded = expanded
                .into_iter()
                .flat_map(|partial| {
                    options.iter().map(move |option| {
                        let mut rule = partial.clone();
                        rule.discriminants
                            .insert(axis.clone(), Discriminant::One((*option).clone()));
                        rule
                    })
                })
                .collect();
        }
        expanded
    }

    /// Converts the rule back into its flat JSON form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map: Map<String, Value> = self
            .discriminants
            .iter()
            .map(|(axis, discriminant)| (axis.clone(), discriminant.to_value()))
            .collect();
        map.insert(keys::CLASS.to_owned(), Value::String(self.class.clone()));
        Value::Object(map)
    }

    /// Parses one rule from its flat JSON form.
    pub(crate) fn from_json(value: &Value, path: &str, index: usize) -> StyleResult<Self> {
        let Value::Object(map) = value else {
            return Err(StyleError::invalid_rule(
                path,
                index,
                format!("expected a table, found {}", json_kind(value)),
            ));
        };
        let mut rule = Self::default();
        for (key, entry) in map {
            if key == keys::CLASS {
                rule.class = match entry {
                    Value::String(class) => class.clone(),
                    Value::Null => String::new(),
                    other => {
                        return Err(StyleError::invalid_rule(
                            path,
                            index,
                            format!("'class' must be a string, found {}", json_kind(other)),
                        ));
                    }
                };
                continue;
            }
            let discriminant = match entry {
                Value::Array(options) => options
                    .iter()
                    .map(Scalar::from_json)
                    .collect::<Option<Vec<_>>>()
                    .map(Discriminant::AnyOf),
                other => Scalar::from_json(other).map(Discriminant::One),
            };
            let Some(discriminant) = discriminant else {
                return Err(StyleError::invalid_rule(
                    path,
                    index,
                    format!("discriminant '{key}' must be a scalar or a list of scalars"),
                ));
            };
            rule.discriminants.insert(key.clone(), discriminant);
        }
        Ok(rule)
    }
}
