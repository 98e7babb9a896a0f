//! Typed representation of component style configuration.
//!
//! Raw configuration arrives as loosely typed JSON-like tables. It is
//! classified once, on ingestion, into [`ConfigValue`] so the merge
//! algorithms never need to re-inspect value shapes while recursing.

mod rule;

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::extends::compact_extends;
use crate::{StyleError, StyleResult};

pub use rule::{CompoundVariantRule, Discriminant, Scalar};

/// Reserved configuration keys with dedicated merge semantics.
pub mod keys {
    /// Class string applied to the element's root.
    pub const BASE: &str = "base";
    /// Class string of a compound variant rule.
    pub const CLASS: &str = "class";
    /// Variant tables keyed by axis then option.
    pub const VARIANTS: &str = "variants";
    /// List of compound variant rules.
    pub const COMPOUND_VARIANTS: &str = "compoundVariants";
    /// Default option per variant axis.
    pub const DEFAULT_VARIANTS: &str = "defaultVariants";
    /// Default prop values, including the default colour.
    pub const DEFAULTS: &str = "defaults";
    /// Opaque localisation payload.
    pub const I18N: &str = "i18n";
    /// Nested-component identity marker.
    pub const COMPONENT: &str = "component";
    /// Build-time safelist switch.
    pub const SAFELIST: &str = "safelist";
    /// Colours always kept in the safelist.
    pub const SAFELIST_COLORS: &str = "safelistColors";
    /// Per-call merge strategy selector.
    pub const STRATEGY: &str = "strategy";
    /// Default colour entry inside [`DEFAULTS`].
    pub const COLOR: &str = "color";
}

/// One configuration entry.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// A whitespace-separated class string.
    Str(String),
    /// A nested table of further entries.
    Nested(Config),
    /// Compound variant rules; only valid under `compoundVariants`.
    VariantList(Vec<CompoundVariantRule>),
    /// Payload the engine carries but does not interpret as classes.
    Opaque(Value),
}

impl ConfigValue {
    /// Returns the class string if this is a [`ConfigValue::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Nested(_) | Self::VariantList(_) | Self::Opaque(_) => None,
        }
    }

    /// Returns the nested table if this is a [`ConfigValue::Nested`].
    #[must_use]
    pub const fn as_nested(&self) -> Option<&Config> {
        match self {
            Self::Nested(config) => Some(config),
            Self::Str(_) | Self::VariantList(_) | Self::Opaque(_) => None,
        }
    }

    /// Returns `true` when the value carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Str(s) => s.trim().is_empty(),
            Self::Nested(config) => config.is_empty(),
            Self::VariantList(rules) => rules.is_empty(),
            Self::Opaque(value) => value.is_null(),
        }
    }

    /// Human-readable kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Nested(_) => "table",
            Self::VariantList(_) => "rule list",
            Self::Opaque(_) => "opaque payload",
        }
    }

    /// Converts the value back into JSON.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.clone()),
            Self::Nested(config) => config.to_value(),
            Self::VariantList(rules) => {
                Value::Array(rules.iter().map(CompoundVariantRule::to_value).collect())
            }
            Self::Opaque(value) => value.clone(),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Str(compact_extends(value))
    }
}

impl From<Config> for ConfigValue {
    fn from(value: Config) -> Self {
        Self::Nested(value)
    }
}

/// Ordered table of configuration entries.
///
/// Keys iterate in lexical order, so merges and serialised output are
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    entries: BTreeMap<String, ConfigValue>,
}

impl Config {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Create a table holding only `base`.
    #[must_use]
    pub fn with_base(class: &str) -> Self {
        let mut config = Self::new();
        config.insert(keys::BASE, ConfigValue::from(class));
        config
    }

    /// Classify a raw JSON table.
    ///
    /// `null` entries are treated as absent. `compoundVariants` holding
    /// anything but a list is kept as an opaque payload and reported when
    /// merged. Inheritance tokens in class strings are stored in their
    /// compact `{>name}` form.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidValue`] when `value` is not a table or a
    /// style key holds a number, boolean or list, and
    /// [`StyleError::InvalidRule`] when a compound variant rule is malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use class_config::{Config, ConfigValue};
    /// use serde_json::json;
    ///
    /// let config = Config::from_value(&json!({"base": "p-2", "padding": 4}));
    /// assert!(config.is_err());
    ///
    /// let config = Config::from_value(&json!({"base": "p-2"}))?;
    /// assert_eq!(config.get("base"), Some(&ConfigValue::from("p-2")));
    /// # Ok::<_, std::sync::Arc<class_config::StyleError>>(())
    /// ```
    pub fn from_value(value: &Value) -> StyleResult<Self> {
        match value {
            Value::Object(map) => ingest_table(map, ""),
            other => Err(StyleError::invalid_value("<root>", "table", other)),
        }
    }

    /// Converts the table back into JSON.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.to_value()))
                .collect(),
        )
    }

    /// Returns the entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Returns the nested table stored under `key`.
    #[must_use]
    pub fn get_nested(&self, key: &str) -> Option<&Config> {
        self.get(key).and_then(ConfigValue::as_nested)
    }

    /// Follows `path` through nested tables.
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&ConfigValue> {
        let (last, parents) = path.split_last()?;
        let mut level = self;
        for key in parents {
            level = level.get_nested(key)?;
        }
        level.get(last)
    }

    /// Returns the raw class string of `key`.
    ///
    /// A string entry is returned as-is; a table contributes its `base`.
    #[must_use]
    pub fn class_string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            ConfigValue::Str(class) => Some(class),
            ConfigValue::Nested(config) => config.get(keys::BASE).and_then(ConfigValue::as_str),
            ConfigValue::VariantList(_) | ConfigValue::Opaque(_) => None,
        }
    }

    /// Insert an entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value)
    }

    /// Remove an entry, returning it.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.remove(key)
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ConfigValue> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = btree_map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, ConfigValue)> for Config {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl TryFrom<&Value> for Config {
    type Error = std::sync::Arc<StyleError>;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Joins a parent path and a key into a dotted path.
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

fn ingest_table(map: &Map<String, Value>, path: &str) -> StyleResult<Config> {
    let mut config = Config::new();
    for (key, raw) in map {
        if raw.is_null() {
            continue;
        }
        let key_path = child_path(path, key);
        let value = ingest_entry(key, raw, &key_path)?;
        config.insert(key.clone(), value);
    }
    Ok(config)
}

fn ingest_entry(key: &str, raw: &Value, path: &str) -> StyleResult<ConfigValue> {
    match key {
        keys::I18N | keys::SAFELIST | keys::SAFELIST_COLORS => Ok(ConfigValue::Opaque(raw.clone())),
        keys::DEFAULTS | keys::DEFAULT_VARIANTS => match raw {
            Value::Object(_) => Ok(ConfigValue::Opaque(raw.clone())),
            other => Err(StyleError::invalid_value(path, "table", other)),
        },
        keys::COMPOUND_VARIANTS => match raw {
            Value::Array(rules) => rules
                .iter()
                .enumerate()
                .map(|(index, rule)| CompoundVariantRule::from_json(rule, path, index))
                .collect::<StyleResult<Vec<_>>>()
                .map(ConfigValue::VariantList),
            other => Ok(ConfigValue::Opaque(other.clone())),
        },
        keys::COMPONENT => match raw {
            Value::String(marker) => Ok(ConfigValue::Str(marker.clone())),
            other => Err(StyleError::invalid_value(path, "component name", other)),
        },
        _ => match raw {
            Value::String(class) => Ok(ConfigValue::Str(compact_extends(class))),
            Value::Object(map) => ingest_table(map, path).map(ConfigValue::Nested),
            other => Err(StyleError::invalid_value(
                path,
                "class string or table",
                other,
            )),
        },
    }
}
