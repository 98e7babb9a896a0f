//! Explicitly constructed default and global configuration sources.

use std::sync::Arc;

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Format, Json, Toml};
use serde_json::Value;

use crate::dedupe::ClassDeduper;
use crate::merge::{ConfigMerger, Merged};
use crate::safelist::{DiscoveredColors, SafelistBuilder, SafelistPattern};
use crate::strategy::MergeStrategy;
use crate::value::Config;
use crate::{StyleError, StyleResult};

static EMPTY: Config = Config::new();

/// Application styling context: built-in defaults plus optional global
/// overrides, keyed by component name.
///
/// # Examples
///
/// ```rust
/// use class_config::{Config, MergeStrategy, StyleContext};
/// use serde_json::json;
///
/// let context = StyleContext::new(Config::from_value(&json!({
///     "button": { "base": "rounded", "slots": { "icon": "size-4" } }
/// }))?)
/// .with_global(Config::from_value(&json!({
///     "button": { "base": "font-medium" }
/// }))?);
///
/// let props = Config::from_value(&json!({ "slots": { "icon": "size-5" } }))?;
/// let merged = context.resolve("button", Some(&props), MergeStrategy::Merge)?;
/// assert_eq!(merged.classes(&["base"])?, "rounded font-medium");
/// assert_eq!(merged.classes(&["slots", "icon"])?, "size-4 size-5");
/// # Ok::<_, std::sync::Arc<class_config::StyleError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct StyleContext {
    default: Config,
    global: Option<Config>,
    merger: ConfigMerger,
}

impl StyleContext {
    /// Create a context from in-memory default configuration.
    #[must_use]
    pub fn new(default: Config) -> Self {
        Self {
            default,
            global: None,
            merger: ConfigMerger::default(),
        }
    }

    /// Attach application-wide overrides.
    #[must_use]
    pub fn with_global(mut self, global: Config) -> Self {
        self.global = Some(global);
        self
    }

    /// Replace the class deduper used by every merge.
    #[must_use]
    pub fn with_deduper(mut self, deduper: Arc<dyn ClassDeduper>) -> Self {
        self.merger = ConfigMerger::new(deduper);
        self
    }

    /// Load the default configuration and, optionally, global overrides
    /// from JSON or TOML files.
    ///
    /// The format is chosen by extension: `.json` is read as JSON, anything
    /// else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::File`] when a file cannot be read or parsed and
    /// the ingestion error when its content is not a valid configuration.
    /// Failures in both files are reported together as
    /// [`StyleError::Aggregate`].
    pub fn load(default_path: &Utf8Path, global_path: Option<&Utf8Path>) -> StyleResult<Self> {
        let loaded = (
            load_config(default_path),
            global_path.map(load_config).transpose(),
        );
        match loaded {
            (Ok(default), Ok(global)) => {
                tracing::debug!(
                    default = %default_path,
                    global = ?global_path,
                    "loaded style configuration"
                );
                Ok(Self {
                    default,
                    global,
                    merger: ConfigMerger::default(),
                })
            }
            (Err(default_err), global) => Err(StyleError::aggregate(default_err, global.err())),
            (Ok(_), Err(global_err)) => Err(global_err),
        }
    }

    /// Returns the built-in defaults.
    #[must_use]
    pub const fn default_config(&self) -> &Config {
        &self.default
    }

    /// Returns the global overrides, if any.
    #[must_use]
    pub const fn global_config(&self) -> Option<&Config> {
        self.global.as_ref()
    }

    /// Merge the global overrides over the defaults for every component.
    ///
    /// # Errors
    ///
    /// Propagates merge errors from [`ConfigMerger::merge`].
    pub fn app_config(&self) -> StyleResult<Config> {
        self.merger
            .merge(&self.default, self.global.as_ref(), None, MergeStrategy::Merge)
            .map(Merged::into_config)
    }

    /// Merge the configuration of `component` with per-call `props`.
    ///
    /// A component missing from a source contributes an empty layer.
    ///
    /// # Errors
    ///
    /// Propagates merge errors from [`ConfigMerger::merge`].
    pub fn resolve(
        &self,
        component: &str,
        props: Option<&Config>,
        strategy: MergeStrategy,
    ) -> StyleResult<Merged> {
        let default = self.default.get_nested(component).unwrap_or(&EMPTY);
        let global = self
            .global
            .as_ref()
            .and_then(|config| config.get_nested(component));
        tracing::debug!(component, %strategy, "resolving component configuration");
        self.merger.merge(default, global, props, strategy)
    }

    /// Like [`Self::resolve`], but a `strategy` key in `props` selects the
    /// strategy, falling back to `fallback`. The key is not merged.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownStrategy`] for an unrecognised strategy
    /// name and propagates merge errors.
    pub fn resolve_with_props_strategy(
        &self,
        component: &str,
        props: Option<Config>,
        fallback: MergeStrategy,
    ) -> StyleResult<Merged> {
        let Some(mut overrides) = props else {
            return self.resolve(component, None, fallback);
        };
        let strategy = MergeStrategy::from_props(&mut overrides, fallback)?;
        self.resolve(component, Some(&overrides), strategy)
    }

    /// Build the safelist manifest for the application config.
    ///
    /// # Errors
    ///
    /// Propagates merge errors from [`Self::app_config`].
    pub fn safelist(&self, colors: &DiscoveredColors) -> StyleResult<Vec<SafelistPattern>> {
        let app = self.app_config()?;
        Ok(SafelistBuilder::default().build(&app, colors))
    }
}

fn load_config(path: &Utf8Path) -> StyleResult<Config> {
    let data =
        std::fs::read_to_string(path).map_err(|err| StyleError::file(path.as_std_path(), err))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let figment = if is_json {
        Figment::from(Json::string(&data))
    } else {
        Figment::from(Toml::string(&data))
    };
    let raw: Value = figment
        .extract()
        .map_err(|err| StyleError::file(path.as_std_path(), err))?;
    Config::from_value(&raw)
}
