//! Steps for safelist derivation and colour discovery.

use super::value_parsing::{parse_config, parse_list};
use crate::fixtures::SafelistContext;
use anyhow::{Result, anyhow, ensure};
use class_config::SafelistBuilder;
use class_config::safelist::{ColorScanner, DEFAULT_TAG_PREFIX, DiscoveredColors};
use rstest_bdd_macros::{given, then, when};
use test_helpers::text::normalize_scalar;

#[given("the application config {raw}")]
fn set_app(safelist_context: &SafelistContext, raw: String) -> Result<()> {
    ensure!(safelist_context.app.is_empty(), "application config already set");
    safelist_context.app.set(parse_config(&raw)?);
    Ok(())
}

#[given("the {component} component is used with colours {colors}")]
fn record_colors(safelist_context: &SafelistContext, component: String, colors: String) {
    let mut discovered = safelist_context.discovered.take().unwrap_or_default();
    discovered.extend(&normalize_scalar(&component), parse_list(&colors));
    safelist_context.discovered.set(discovered);
}

#[given("the template {template}")]
fn set_template(safelist_context: &SafelistContext, template: String) {
    safelist_context.template.set(normalize_scalar(&template));
}

#[when("colours are discovered for {component}")]
fn discover(safelist_context: &SafelistContext, component: String) -> Result<()> {
    let template = safelist_context
        .template
        .take()
        .ok_or_else(|| anyhow!("template not set"))?;
    let scanner = ColorScanner::new(DEFAULT_TAG_PREFIX, &normalize_scalar(&component))
        .map_err(|err| anyhow!(err.to_string()))?;
    let mut discovered = safelist_context.discovered.take().unwrap_or_default();
    discovered.extend(scanner.component(), scanner.discover_colors(&template));
    safelist_context.discovered.set(discovered);
    Ok(())
}

#[when("the safelist is built")]
fn build(safelist_context: &SafelistContext) -> Result<()> {
    let app = safelist_context
        .app
        .take()
        .ok_or_else(|| anyhow!("application config not set"))?;
    let discovered = safelist_context
        .discovered
        .take()
        .unwrap_or_else(DiscoveredColors::new);
    let manifest = SafelistBuilder::default().build(&app, &discovered);
    safelist_context.manifest.set(manifest);
    Ok(())
}

fn patterns(safelist_context: &SafelistContext) -> Result<Vec<(String, Vec<String>)>> {
    safelist_context
        .manifest
        .with_ref(|manifest| {
            manifest
                .iter()
                .map(|entry| (entry.pattern.clone(), entry.variants.clone()))
                .collect()
        })
        .ok_or_else(|| anyhow!("safelist has not been built"))
}

#[then("the manifest holds {count:usize} entry")]
fn check_count(safelist_context: &SafelistContext, count: usize) -> Result<()> {
    let entries = patterns(safelist_context)?;
    ensure!(entries.len() == count, "manifest holds {entries:?}");
    Ok(())
}

#[then("the manifest is empty")]
fn check_empty(safelist_context: &SafelistContext) -> Result<()> {
    let entries = patterns(safelist_context)?;
    ensure!(entries.is_empty(), "manifest holds {entries:?}");
    Ok(())
}

#[then("the manifest contains pattern {pattern}")]
fn check_pattern(safelist_context: &SafelistContext, pattern: String) -> Result<()> {
    let want = normalize_scalar(&pattern);
    let entries = patterns(safelist_context)?;
    ensure!(
        entries.iter().any(|(found, _)| *found == want),
        "no entry {want:?} in {entries:?}"
    );
    Ok(())
}

#[then("the pattern {pattern} keeps variants {variants}")]
fn check_variants(
    safelist_context: &SafelistContext,
    pattern: String,
    variants: String,
) -> Result<()> {
    let want = normalize_scalar(&pattern);
    let entries = patterns(safelist_context)?;
    let (_, found) = entries
        .iter()
        .find(|(candidate, _)| *candidate == want)
        .ok_or_else(|| anyhow!("no entry {want:?} in {entries:?}"))?;
    let expected = parse_list(&variants);
    ensure!(*found == expected, "variants were {found:?}; expected {expected:?}");
    Ok(())
}
