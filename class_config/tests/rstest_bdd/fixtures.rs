//! Shared fixtures for the behavioural scenarios.

use class_config::safelist::DiscoveredColors;
use class_config::{Config, Merged, SafelistPattern, StyleResult};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Layers and outcome of a configuration merge scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct MergeContext {
    pub default: Slot<Config>,
    pub global: Slot<Config>,
    pub props: Slot<Config>,
    pub result: Slot<StyleResult<Merged>>,
}

/// Component level and outcome of a reference resolution scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct ExtendsContext {
    pub level: Slot<Config>,
    pub result: Slot<StyleResult<String>>,
}

/// Inputs and manifest of a safelist scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct SafelistContext {
    pub app: Slot<Config>,
    pub discovered: Slot<DiscoveredColors>,
    pub template: Slot<String>,
    pub manifest: Slot<Vec<SafelistPattern>>,
}

#[fixture]
pub fn merge_context() -> MergeContext {
    MergeContext::default()
}

#[fixture]
pub fn extends_context() -> ExtendsContext {
    ExtendsContext::default()
}

#[fixture]
pub fn safelist_context() -> SafelistContext {
    SafelistContext::default()
}
