//! End-to-end resolution of component styles loaded from files.
use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use camino::Utf8Path;
use class_config::{
    ClassDeduper, CompoundVariantRule, Config, ConfigValue, MergeStrategy, StyleContext, keys,
};
use rstest::rstest;
use serde_json::json;
use test_helpers::figment::with_jail;

const DEFAULTS_TOML: &str = concat!(
    "[button]\n",
    "base = \"rounded p-2\"\n",
    "[button.slots]\n",
    "icon = \"size-4\"\n",
    "label = \"{>icon} truncate\"\n",
    "[button.variants.size]\n",
    "sm = \"text-sm\"\n",
    "lg = \"text-lg\"\n",
    "[[button.compoundVariants]]\n",
    "size = \"sm\"\n",
    "color = [\"red\", \"blue\"]\n",
    "class = \"ring-1\"\n",
);

const GLOBAL_JSON: &str = r#"{
  "button": {
    "base": "p-4",
    "compoundVariants": [{ "size": "sm", "color": "red", "class": "ring-2" }]
  }
}"#;

/// Keeps the last token of each utility family, where the family is the
/// token up to its final `-`.
fn family_wins(classes: &[&str]) -> String {
    let tokens: Vec<&str> = classes
        .iter()
        .flat_map(|class| class.split_whitespace())
        .collect();
    let family = |token: &str| token.rsplit_once('-').map_or(token, |(head, _)| head).to_owned();
    tokens
        .iter()
        .enumerate()
        .filter(|&(idx, token)| {
            !tokens
                .iter()
                .skip(idx + 1)
                .any(|later| family(*later) == family(*token))
        })
        .map(|(_, token)| *token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn load_context() -> Result<StyleContext> {
    with_jail(|j| {
        j.create_file("defaults.toml", DEFAULTS_TOML)?;
        j.create_file("app.json", GLOBAL_JSON)?;
        StyleContext::load(Utf8Path::new("defaults.toml"), Some(Utf8Path::new("app.json")))
            .map_err(|err| anyhow!(err.to_string()))
    })
}

#[rstest]
fn injected_deduper_resolves_conflicting_utilities() -> Result<()> {
    let deduper: Arc<dyn ClassDeduper> = Arc::new(family_wins);
    let context = load_context()?.with_deduper(deduper);
    let props = Config::from_value(&json!({ "base": "font-bold" }))
        .map_err(|err| anyhow!(err.to_string()))?;
    let merged = context
        .resolve("button", Some(&props), MergeStrategy::Merge)
        .map_err(|err| anyhow!(err.to_string()))?;

    let base = merged
        .classes(&["base"])
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(base == "rounded p-4 font-bold", "unexpected base {base:?}");

    let Some(ConfigValue::VariantList(rules)) = merged.config().get(keys::COMPOUND_VARIANTS)
    else {
        return Err(anyhow!("compound variants missing from {:?}", merged.config()));
    };
    ensure!(
        *rules
            == vec![
                CompoundVariantRule::new("ring-2")
                    .when("size", "sm")
                    .when("color", "red"),
                CompoundVariantRule::new("ring-1")
                    .when("size", "sm")
                    .when("color", "blue"),
            ],
        "unexpected rules {rules:?}"
    );
    Ok(())
}

#[rstest]
fn slot_references_resolve_after_merging() -> Result<()> {
    let context = load_context()?;
    let props = Config::from_value(&json!({ "slots": { "icon": "size-5" } }))
        .map_err(|err| anyhow!(err.to_string()))?;
    let merged = context
        .resolve("button", Some(&props), MergeStrategy::Merge)
        .map_err(|err| anyhow!(err.to_string()))?;
    let label = merged
        .classes(&["slots", "label"])
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(label == "size-4 size-5 truncate", "unexpected label {label:?}");
    Ok(())
}

#[rstest]
#[case(MergeStrategy::Merge, "rounded p-2 p-4")]
#[case(MergeStrategy::Replace, "p-4")]
#[case(MergeStrategy::Overwrite, "p-4")]
fn app_config_honours_each_strategy(
    #[case] strategy: MergeStrategy,
    #[case] expected: &str,
) -> Result<()> {
    let context = load_context()?;
    let merged = context
        .resolve("button", None, strategy)
        .map_err(|err| anyhow!(err.to_string()))?;
    let base = merged
        .classes(&["base"])
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(base == expected, "{strategy}: unexpected base {base:?}");
    Ok(())
}

#[rstest]
fn overwrite_drops_keys_missing_from_the_winning_layer() -> Result<()> {
    let merged = load_context()?
        .resolve("button", None, MergeStrategy::Overwrite)
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        merged.config().get("slots").is_none(),
        "overwrite kept default slots: {:?}",
        merged.config()
    );
    Ok(())
}
