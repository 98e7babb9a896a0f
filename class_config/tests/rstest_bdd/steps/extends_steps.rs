//! Steps for `{>key}` reference resolution.

use super::value_parsing::parse_config;
use crate::fixtures::ExtendsContext;
use anyhow::{Result, anyhow, ensure};
use class_config::{ExtendsResolver, StyleError, TokenDeduper};
use rstest_bdd_macros::{given, then, when};
use test_helpers::text::normalize_scalar;

#[given("the component level {raw}")]
fn set_level(extends_context: &ExtendsContext, raw: String) -> Result<()> {
    ensure!(extends_context.level.is_empty(), "component level already set");
    extends_context.level.set(parse_config(&raw)?);
    Ok(())
}

#[when("the key {key} is resolved")]
fn resolve_key(extends_context: &ExtendsContext, key: String) -> Result<()> {
    let level = extends_context
        .level
        .take()
        .ok_or_else(|| anyhow!("component level not set"))?;
    let result = ExtendsResolver::new(&TokenDeduper).resolve(&level, &normalize_scalar(&key));
    extends_context.result.set(result);
    Ok(())
}

#[then("the resolved classes are {expected}")]
fn check_resolved(extends_context: &ExtendsContext, expected: String) -> Result<()> {
    let actual = extends_context
        .result
        .take()
        .ok_or_else(|| anyhow!("resolution has not run"))?
        .map_err(|err| anyhow!(err.to_string()))?;
    let want = normalize_scalar(&expected);
    ensure!(actual == want, "resolved {actual:?}; expected {want:?}");
    Ok(())
}

#[then("resolution fails with cycle {cycle}")]
fn check_cycle(extends_context: &ExtendsContext, cycle: String) -> Result<()> {
    let result = extends_context
        .result
        .take()
        .ok_or_else(|| anyhow!("resolution has not run"))?;
    let Err(err) = result else {
        return Err(anyhow!("resolution unexpectedly succeeded"));
    };
    let want = normalize_scalar(&cycle);
    ensure!(
        matches!(&*err, StyleError::CyclicExtends { cycle: found } if *found == want),
        "unexpected error: {err}"
    );
    Ok(())
}
