//! Steps for layered configuration merges.

use super::value_parsing::{parse_config, parse_path};
use crate::fixtures::MergeContext;
use anyhow::{Result, anyhow, ensure};
use class_config::{ConfigMerger, ConfigValue, MergeStrategy, Merged, StyleError, keys};
use rstest_bdd_macros::{given, then, when};
use test_helpers::text::normalize_scalar;

#[given("the default layer {raw}")]
fn set_default(merge_context: &MergeContext, raw: String) -> Result<()> {
    ensure!(merge_context.default.is_empty(), "default layer already set");
    merge_context.default.set(parse_config(&raw)?);
    Ok(())
}

#[given("the global layer {raw}")]
fn set_global(merge_context: &MergeContext, raw: String) -> Result<()> {
    ensure!(merge_context.global.is_empty(), "global layer already set");
    merge_context.global.set(parse_config(&raw)?);
    Ok(())
}

#[given("the props layer {raw}")]
fn set_props(merge_context: &MergeContext, raw: String) -> Result<()> {
    ensure!(merge_context.props.is_empty(), "props layer already set");
    merge_context.props.set(parse_config(&raw)?);
    Ok(())
}

#[when("the layers are merged with strategy {strategy}")]
fn merge_layers(merge_context: &MergeContext, strategy: String) -> Result<()> {
    let strategy: MergeStrategy = normalize_scalar(&strategy)
        .parse()
        .map_err(|err: StyleError| anyhow!(err.to_string()))?;
    let default = merge_context
        .default
        .take()
        .ok_or_else(|| anyhow!("default layer not set"))?;
    let global = merge_context.global.take();
    let props = merge_context.props.take();
    let result =
        ConfigMerger::default().merge(&default, global.as_ref(), props.as_ref(), strategy);
    merge_context.result.set(result);
    Ok(())
}

fn merged(merge_context: &MergeContext) -> Result<Merged> {
    merge_context
        .result
        .with_ref(|result| result.clone())
        .ok_or_else(|| anyhow!("merge has not run"))?
        .map_err(|err| anyhow!(err.to_string()))
}

#[then("the classes at {path} are {expected}")]
fn check_classes(merge_context: &MergeContext, path: String, expected: String) -> Result<()> {
    let segments = parse_path(&path);
    let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
    let actual = merged(merge_context)?
        .classes(&refs)
        .map_err(|err| anyhow!(err.to_string()))?;
    let want = normalize_scalar(&expected);
    ensure!(actual == want, "classes at {path} were {actual:?}; expected {want:?}");
    Ok(())
}

#[then("compound variant {index:usize} has classes {expected}")]
fn check_compound(merge_context: &MergeContext, index: usize, expected: String) -> Result<()> {
    let outcome = merged(merge_context)?;
    let Some(ConfigValue::VariantList(rules)) = outcome.config().get(keys::COMPOUND_VARIANTS)
    else {
        return Err(anyhow!("merged config holds no compound variants"));
    };
    let rule = rules
        .get(index)
        .ok_or_else(|| anyhow!("no compound variant at index {index}"))?;
    let want = normalize_scalar(&expected);
    ensure!(
        rule.class() == want,
        "compound variant {index} has {:?}; expected {want:?}",
        rule.class()
    );
    Ok(())
}

#[then("the merge fails with a shape mismatch at {path}")]
fn check_shape_mismatch(merge_context: &MergeContext, path: String) -> Result<()> {
    let result = merge_context
        .result
        .take()
        .ok_or_else(|| anyhow!("merge has not run"))?;
    let Err(err) = result else {
        return Err(anyhow!("merge unexpectedly succeeded"));
    };
    let want = normalize_scalar(&path);
    ensure!(
        matches!(&*err, StyleError::ShapeMismatch { path: found } if *found == want),
        "unexpected error: {err}"
    );
    Ok(())
}

#[then("a merge warning mentions {text}")]
fn check_warning(merge_context: &MergeContext, text: String) -> Result<()> {
    let outcome = merged(merge_context)?;
    let want = normalize_scalar(&text);
    ensure!(
        outcome
            .warnings()
            .iter()
            .any(|warning| warning.to_string().contains(&want)),
        "no warning mentions {want:?}: {:?}",
        outcome.warnings()
    );
    Ok(())
}
