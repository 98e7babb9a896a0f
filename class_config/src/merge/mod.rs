//! Three-layer structural merge of component configuration.
//!
//! Layers are visited lowest priority first: built-in defaults, then global
//! overrides, then per-call props. Keys are composed from the union of all
//! layers and merged according to their kind:
//!
//! - `i18n` keeps the highest-priority value verbatim;
//! - `defaults` and `defaultVariants` merge shallowly;
//! - `compoundVariants` merge by rule identity ([`CompoundVariantMerger`]);
//! - `component` keeps the highest-priority value and warns on conflicts;
//! - `safelist` and `safelistColors` ignore the props layer;
//! - tables recurse, and class strings are concatenated through the injected
//!   [`ClassDeduper`].

mod compound;
mod warning;

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::dedupe::{ClassDeduper, TokenDeduper};
use crate::extends::ExtendsResolver;
use crate::strategy::MergeStrategy;
use crate::value::{CompoundVariantRule, Config, ConfigValue, child_path, keys};
use crate::{StyleError, StyleResult};

pub use compound::CompoundVariantMerger;
pub use warning::{MergeProvenance, MergeWarning};

type Layers<'a> = [Option<&'a Config>; 3];
type Entries<'a> = [Option<&'a ConfigValue>; 3];

/// Merges default, global and props configuration layers.
#[derive(Clone)]
pub struct ConfigMerger {
    deduper: Arc<dyn ClassDeduper>,
}

impl Default for ConfigMerger {
    fn default() -> Self {
        Self::new(Arc::new(TokenDeduper))
    }
}

impl std::fmt::Debug for ConfigMerger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigMerger").finish_non_exhaustive()
    }
}

impl ConfigMerger {
    /// Create a merger that reconciles class strings with `deduper`.
    #[must_use]
    pub fn new(deduper: Arc<dyn ClassDeduper>) -> Self {
        Self { deduper }
    }

    /// Returns the deduper shared by this merger.
    #[must_use]
    pub fn deduper(&self) -> &Arc<dyn ClassDeduper> {
        &self.deduper
    }

    /// Merge `global` and `props` over `default`.
    ///
    /// Inputs are only borrowed; the result owns fresh copies of everything
    /// it keeps. When both overriding layers are absent or empty the default
    /// is returned as-is, whatever the strategy.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidValue`] when a key holds a value its kind
    /// does not allow, and [`StyleError::ShapeMismatch`] when a `variants`
    /// option is a class string in one layer and a table in another.
    pub fn merge(
        &self,
        default: &Config,
        global: Option<&Config>,
        props: Option<&Config>,
        strategy: MergeStrategy,
    ) -> StyleResult<Merged> {
        let global_layer = global.filter(|config| !config.is_empty());
        let props_layer = props.filter(|config| !config.is_empty());

        if global_layer.is_none() && props_layer.is_none() {
            tracing::debug!("no overriding layers; returning defaults");
            return Ok(self.finish(default.clone(), Vec::new()));
        }

        if strategy == MergeStrategy::Overwrite {
            let winner = props_layer.or(global_layer).unwrap_or(default);
            return Ok(self.finish(winner.clone(), Vec::new()));
        }

        let mut run = MergeRun {
            deduper: self.deduper.as_ref(),
            strategy,
            warnings: Vec::new(),
        };
        let config = run.merge_level([Some(default), global_layer, props_layer], "", false)?;
        Ok(self.finish(config, run.warnings))
    }

    fn finish(&self, config: Config, warnings: Vec<MergeWarning>) -> Merged {
        Merged {
            config,
            warnings,
            deduper: Arc::clone(&self.deduper),
        }
    }
}

/// Outcome of a merge: the final config plus any diagnostics.
#[derive(Clone)]
pub struct Merged {
    config: Config,
    warnings: Vec<MergeWarning>,
    deduper: Arc<dyn ClassDeduper>,
}

impl std::fmt::Debug for Merged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Merged")
            .field("config", &self.config)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl Merged {
    /// Returns the merged configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Consumes the outcome, returning the merged configuration.
    #[must_use]
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Returns the diagnostics raised while merging.
    #[must_use]
    pub fn warnings(&self) -> &[MergeWarning] {
        &self.warnings
    }

    /// Reads the class string at `path`, resolving `{>key}` references
    /// against the sibling keys of the final path segment.
    ///
    /// Missing keys read as an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::CyclicExtends`] when references form a cycle.
    pub fn classes(&self, path: &[&str]) -> StyleResult<String> {
        let Some((key, parents)) = path.split_last() else {
            return Ok(String::new());
        };
        let mut level = &self.config;
        for parent in parents {
            match level.get_nested(parent) {
                Some(next) => level = next,
                None => return Ok(String::new()),
            }
        }
        ExtendsResolver::new(self.deduper.as_ref()).resolve(level, key)
    }
}

struct MergeRun<'d> {
    deduper: &'d dyn ClassDeduper,
    strategy: MergeStrategy,
    warnings: Vec<MergeWarning>,
}

impl MergeRun<'_> {
    fn warn(&mut self, warning: MergeWarning) {
        tracing::warn!(%warning, "configuration merge diagnostic");
        self.warnings.push(warning);
    }

    fn merge_level(
        &mut self,
        layers: Layers<'_>,
        path: &str,
        in_variants: bool,
    ) -> StyleResult<Config> {
        let composed: BTreeSet<&str> = layers
            .iter()
            .flatten()
            .flat_map(|config| config.keys())
            .collect();
        let mut merged = Config::new();
        for key in composed {
            let entries: Entries<'_> = layers.map(|layer| layer.and_then(|config| config.get(key)));
            let key_path = child_path(path, key);
            if let Some(value) = self.merge_key(key, entries, &key_path, in_variants)? {
                merged.insert(key, value);
            }
        }
        Ok(merged)
    }

    fn merge_key(
        &mut self,
        key: &str,
        entries: Entries<'_>,
        path: &str,
        in_variants: bool,
    ) -> StyleResult<Option<ConfigValue>> {
        if in_variants {
            return self.merge_style(entries, path, true);
        }
        match key {
            keys::I18N => Ok(highest(entries).map(|(_, value)| value.clone())),
            keys::DEFAULTS | keys::DEFAULT_VARIANTS => merge_shallow(entries, path),
            keys::COMPOUND_VARIANTS => Ok(self.merge_rules(entries, path)),
            keys::COMPONENT => Ok(self.merge_component(entries, path)),
            keys::SAFELIST | keys::SAFELIST_COLORS => Ok(self.merge_build_only(entries, path)),
            keys::VARIANTS => self.merge_style(entries, path, true),
            _ => self.merge_style(entries, path, false),
        }
    }

    fn merge_style(
        &mut self,
        entries: Entries<'_>,
        path: &str,
        in_variants: bool,
    ) -> StyleResult<Option<ConfigValue>> {
        let has_table = entries
            .iter()
            .flatten()
            .any(|value| matches!(value, ConfigValue::Nested(_)));
        if has_table {
            let tables = normalise_tables(entries, path, in_variants)?;
            let layers: Layers<'_> = [
                tables[0].as_deref(),
                tables[1].as_deref(),
                tables[2].as_deref(),
            ];
            let nested = self.merge_level(layers, path, in_variants)?;
            return Ok(Some(ConfigValue::Nested(nested)));
        }

        let mut classes = Vec::with_capacity(3);
        for value in entries.iter().flatten() {
            match value {
                ConfigValue::Str(class) => classes.push(class.as_str()),
                other => return Err(unexpected(path, other)),
            }
        }
        if classes.is_empty() {
            return Ok(None);
        }
        let class = match self.strategy {
            MergeStrategy::Merge => self.deduper.dedupe(&classes),
            MergeStrategy::Replace | MergeStrategy::Overwrite => classes
                .iter()
                .rev()
                .find(|class| !class.trim().is_empty())
                .or_else(|| classes.last())
                .map(|class| (*class).to_owned())
                .unwrap_or_default(),
        };
        Ok(Some(ConfigValue::Str(class)))
    }

    fn merge_rules(&mut self, entries: Entries<'_>, path: &str) -> Option<ConfigValue> {
        if entries.iter().all(Option::is_none) {
            return None;
        }
        let mut lists: [&[CompoundVariantRule]; 3] = [&[], &[], &[]];
        for ((slot, entry), layer) in lists.iter_mut().zip(entries).zip(MergeProvenance::ALL) {
            match entry {
                Some(ConfigValue::VariantList(rules)) => *slot = rules.as_slice(),
                Some(_) => self.warn(MergeWarning::MalformedCompoundVariants {
                    path: path.to_owned(),
                    layer,
                }),
                None => {}
            }
        }
        let [default, global, props] = lists;
        let rules =
            CompoundVariantMerger::new(self.deduper).merge(default, global, props, self.strategy);
        Some(ConfigValue::VariantList(rules))
    }

    fn merge_component(&mut self, entries: Entries<'_>, path: &str) -> Option<ConfigValue> {
        let layers: Vec<MergeProvenance> = present(entries).map(|(layer, _)| layer).collect();
        let (winner, value) = highest(entries)?;
        if layers.len() > 1 {
            self.warn(MergeWarning::ComponentConflict {
                path: path.to_owned(),
                layers,
                winner,
            });
        }
        Some(value.clone())
    }

    fn merge_build_only(&mut self, entries: Entries<'_>, path: &str) -> Option<ConfigValue> {
        let [default, global, props] = entries;
        if props.is_some() {
            self.warn(MergeWarning::PropsSafelistIgnored {
                path: path.to_owned(),
            });
        }
        global.or(default).cloned()
    }
}

fn present<'a>(
    entries: Entries<'a>,
) -> impl DoubleEndedIterator<Item = (MergeProvenance, &'a ConfigValue)> {
    MergeProvenance::ALL
        .into_iter()
        .zip(entries)
        .filter_map(|(layer, entry)| entry.map(|value| (layer, value)))
}

fn highest<'a>(entries: Entries<'a>) -> Option<(MergeProvenance, &'a ConfigValue)> {
    present(entries).next_back()
}

fn merge_shallow(entries: Entries<'_>, path: &str) -> StyleResult<Option<ConfigValue>> {
    let mut merged: Option<Map<String, Value>> = None;
    for (_, value) in present(entries) {
        let ConfigValue::Opaque(Value::Object(table)) = value else {
            return Err(unexpected(path, value));
        };
        merged
            .get_or_insert_with(Map::new)
            .extend(table.iter().map(|(key, entry)| (key.clone(), entry.clone())));
    }
    Ok(merged.map(|table| ConfigValue::Opaque(Value::Object(table))))
}

fn normalise_tables<'a>(
    entries: Entries<'a>,
    path: &str,
    in_variants: bool,
) -> StyleResult<[Option<Cow<'a, Config>>; 3]> {
    let mut tables: [Option<Cow<'a, Config>>; 3] = [None, None, None];
    for (slot, entry) in tables.iter_mut().zip(entries) {
        *slot = match entry {
            None => None,
            Some(ConfigValue::Nested(config)) => Some(Cow::Borrowed(config)),
            Some(ConfigValue::Str(_)) if in_variants => {
                return Err(Arc::new(StyleError::ShapeMismatch {
                    path: path.to_owned(),
                }));
            }
            Some(ConfigValue::Str(class)) => Some(Cow::Owned(Config::with_base(class))),
            Some(other) => return Err(unexpected(path, other)),
        };
    }
    Ok(tables)
}

fn unexpected(path: &str, value: &ConfigValue) -> Arc<StyleError> {
    Arc::new(StyleError::InvalidValue {
        path: path.to_owned(),
        expected: "class string or table",
        found: value.kind(),
    })
}
