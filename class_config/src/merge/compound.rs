//! Structural merge of compound variant rule lists.

use crate::dedupe::ClassDeduper;
use crate::strategy::MergeStrategy;
use crate::value::CompoundVariantRule;

/// Merges compound variant rules by discriminant identity.
///
/// List-valued discriminants are expanded first. Each default rule then
/// claims at most one identical rule from the global list and one from the
/// props list; claimed classes are combined according to the strategy.
/// Unclaimed global rules follow in order, each absorbing a matching props
/// rule, and unclaimed props rules come last.
///
/// # Examples
///
/// ```rust
/// use class_config::{CompoundVariantMerger, CompoundVariantRule, MergeStrategy, TokenDeduper};
///
/// let merger = CompoundVariantMerger::new(&TokenDeduper);
/// let merged = merger.merge(
///     &[CompoundVariantRule::new("a").when("color", "red")],
///     &[CompoundVariantRule::new("b").when("color", "red")],
///     &[],
///     MergeStrategy::Merge,
/// );
/// assert_eq!(merged, vec![CompoundVariantRule::new("a b").when("color", "red")]);
/// ```
#[derive(Clone, Copy)]
pub struct CompoundVariantMerger<'d> {
    deduper: &'d dyn ClassDeduper,
}

impl<'d> CompoundVariantMerger<'d> {
    /// Create a merger combining classes with `deduper`.
    #[must_use]
    pub const fn new(deduper: &'d dyn ClassDeduper) -> Self {
        Self { deduper }
    }

    /// Merge the three rule lists, lowest priority first.
    #[must_use]
    pub fn merge(
        &self,
        default: &[CompoundVariantRule],
        global: &[CompoundVariantRule],
        props: &[CompoundVariantRule],
        strategy: MergeStrategy,
    ) -> Vec<CompoundVariantRule> {
        let defaults = expand_all(default);
        let mut globals = expand_all(global);
        let mut overrides = expand_all(props);
        let mut merged = Vec::with_capacity(defaults.len() + globals.len() + overrides.len());

        for rule in defaults {
            let global_match = take_match(&mut globals, &rule);
            let props_match = take_match(&mut overrides, &rule);
            if global_match.is_none() && props_match.is_none() {
                merged.push(rule);
                continue;
            }
            let class = self.combine(
                strategy,
                Some(rule.class()),
                global_match.as_ref().map(CompoundVariantRule::class),
                props_match.as_ref().map(CompoundVariantRule::class),
            );
            merged.push(rule.with_class(class));
        }

        for rule in globals {
            let Some(props_match) = take_match(&mut overrides, &rule) else {
                merged.push(rule);
                continue;
            };
            let class = self.combine(strategy, None, Some(rule.class()), Some(props_match.class()));
            merged.push(rule.with_class(class));
        }

        merged.extend(overrides);
        merged
    }

    fn combine(
        &self,
        strategy: MergeStrategy,
        default: Option<&str>,
        global: Option<&str>,
        props: Option<&str>,
    ) -> String {
        match strategy {
            MergeStrategy::Merge => {
                let classes: Vec<&str> = [default, global, props].into_iter().flatten().collect();
                self.deduper.dedupe(&classes)
            }
            MergeStrategy::Replace | MergeStrategy::Overwrite => props
                .or(global)
                .or(default)
                .unwrap_or_default()
                .to_owned(),
        }
    }
}

fn expand_all(rules: &[CompoundVariantRule]) -> Vec<CompoundVariantRule> {
    rules.iter().flat_map(CompoundVariantRule::expand).collect()
}

fn take_match(
    candidates: &mut Vec<CompoundVariantRule>,
    rule: &CompoundVariantRule,
) -> Option<CompoundVariantRule> {
    let position = candidates
        .iter()
        .position(|candidate| candidate.same_identity(rule))?;
    Some(candidates.remove(position))
}
