//! Build-time safelist of dynamic colour class patterns.
//!
//! Component configs may hold class tokens such as `bg-{color}-500` whose
//! final names are only known at runtime. A stylesheet build scanning
//! sources as plain text cannot see them, so this module derives one regex
//! pattern per utility family from the merged application config and the
//! colours each component is actually used with.

mod discovery;
mod pattern;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{Config, ConfigValue, keys};

use pattern::{ColorToken, RawPattern};

pub use discovery::{
    ColorScanner, DEFAULT_TAG_PREFIX, DirSourceReader, DiscoveredColors, SourceReader,
    discover_in_files,
};

/// Literal replaced by each discovered colour.
pub const COLOR_PLACEHOLDER: &str = "{color}";
/// Separator between variant prefixes and the utility.
pub const VARIANT_SEPARATOR: char = ':';
/// Default colour that never needs safelisting.
pub const NEUTRAL_COLOR: &str = "gray";

/// One safelist entry: a class-name regex and the variants to generate.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SafelistPattern {
    /// Regex source matching the class names to keep.
    pub pattern: String,
    /// Variant prefixes, such as `hover` or `dark:hover`, to keep as well.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
}

/// Derives safelist patterns from an application config.
///
/// # Examples
///
/// ```rust
/// use class_config::safelist::{DiscoveredColors, SafelistBuilder};
/// use class_config::Config;
/// use serde_json::json;
///
/// let app = Config::from_value(&json!({
///     "button": { "base": "bg-{color}-600 hover:bg-{color}-700" }
/// }))?;
/// let mut colors = DiscoveredColors::new();
/// colors.extend("button", ["red", "blue"]);
///
/// let manifest = SafelistBuilder::default().build(&app, &colors);
/// assert_eq!(manifest.len(), 2);
/// assert_eq!(manifest[0].pattern, "bg-(red|blue)-(600)");
/// assert_eq!(manifest[1].variants, vec!["hover".to_owned()]);
/// # Ok::<_, std::sync::Arc<class_config::StyleError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct SafelistBuilder {
    neutral: String,
}

impl Default for SafelistBuilder {
    fn default() -> Self {
        Self {
            neutral: NEUTRAL_COLOR.to_owned(),
        }
    }
}

impl SafelistBuilder {
    /// Use `color` as the neutral default colour instead of `gray`.
    #[must_use]
    pub fn with_neutral_color(mut self, color: impl Into<String>) -> Self {
        self.neutral = color.into();
        self
    }

    /// Build the manifest for every component in `app`.
    ///
    /// Each top-level key of `app` names a component; its patterns expand
    /// against [`Self::component_colors`]. Components with `safelist: false`
    /// are skipped.
    #[must_use]
    pub fn build(&self, app: &Config, discovered: &DiscoveredColors) -> Vec<SafelistPattern> {
        let mut safelist = Safelist::new();
        for (component, value) in app {
            if let ConfigValue::Nested(config) = value
                && matches!(config.get(keys::SAFELIST), Some(ConfigValue::Opaque(Value::Bool(false))))
            {
                tracing::debug!(component = %component, "safelist disabled for component");
                continue;
            }
            let colors = self.component_colors(component, value, discovered);
            safelist.add(component, value, &colors);
        }
        safelist.finish()
    }

    /// Returns the colours `component` must be safelisted for.
    ///
    /// These are the discovered colours, then the configured default colour
    /// unless it is the neutral colour, then any `safelistColors` entries.
    #[must_use]
    pub fn component_colors(
        &self,
        component: &str,
        config: &ConfigValue,
        discovered: &DiscoveredColors,
    ) -> Vec<String> {
        let mut colors = discovered.colors(component).to_vec();
        let Some(table) = config.as_nested() else {
            return colors;
        };
        let default_color = match table.get(keys::DEFAULTS) {
            Some(ConfigValue::Opaque(Value::Object(defaults))) => {
                defaults.get(keys::COLOR).and_then(Value::as_str)
            }
            _ => None,
        };
        let configured: Vec<&str> = match table.get(keys::SAFELIST_COLORS) {
            Some(ConfigValue::Opaque(Value::Array(entries))) => {
                entries.iter().filter_map(Value::as_str).collect()
            }
            _ => Vec::new(),
        };
        let extra = default_color
            .filter(|color| *color != self.neutral)
            .into_iter()
            .chain(configured);
        for color in extra {
            if !colors.iter().any(|known| known == color) {
                colors.push(color.to_owned());
            }
        }
        colors
    }
}

/// Accumulates raw patterns across components, consolidated once on
/// [`Safelist::finish`].
#[derive(Clone, Debug, Default)]
pub struct Safelist {
    patterns: Vec<RawPattern>,
}

impl Safelist {
    /// Create an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Collect every placeholder token in `config`, expanded over `colors`.
    ///
    /// `defaults` subtrees are skipped. Nothing is collected when `colors`
    /// is empty.
    pub fn add(&mut self, component: &str, config: &ConfigValue, colors: &[String]) {
        if colors.is_empty() {
            return;
        }
        let before = self.patterns.len();
        self.collect(config, colors);
        tracing::debug!(
            component,
            patterns = self.patterns.len() - before,
            "collected colour patterns"
        );
    }

    fn collect(&mut self, value: &ConfigValue, colors: &[String]) {
        match value {
            ConfigValue::Str(classes) => self.collect_tokens(classes, colors),
            ConfigValue::Nested(table) => {
                for (key, entry) in table {
                    if key != keys::DEFAULTS {
                        self.collect(entry, colors);
                    }
                }
            }
            ConfigValue::VariantList(rules) => {
                for rule in rules {
                    self.collect_tokens(rule.class(), colors);
                }
            }
            ConfigValue::Opaque(_) => {}
        }
    }

    fn collect_tokens(&mut self, classes: &str, colors: &[String]) {
        let tokens = classes.split_whitespace().filter_map(ColorToken::parse);
        self.patterns
            .extend(tokens.map(|token| RawPattern::new(&token, colors)));
    }

    /// Returns `true` when nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Merge overlapping patterns and return the deduplicated manifest.
    #[must_use]
    pub fn finish(self) -> Vec<SafelistPattern> {
        let by_color = pattern::merge_overlapping_colors(self.patterns);
        let by_variant = pattern::merge_variants(by_color);
        pattern::render_unique(&by_variant)
    }
}
