//! Colour-token parsing and pattern consolidation.

use std::collections::BTreeSet;

use super::{COLOR_PLACEHOLDER, SafelistPattern, VARIANT_SEPARATOR};

/// A class token carrying the colour placeholder, split into its parts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct ColorToken<'t> {
    pub(super) variants: Option<&'t str>,
    pub(super) prefix: &'t str,
    pub(super) shade: Option<u16>,
    pub(super) rest: &'t str,
}

impl<'t> ColorToken<'t> {
    /// Splits `token` as `<variants>:<prefix>{color}[-<shade>]<rest>`.
    ///
    /// Returns `None` when the token holds no placeholder.
    pub(super) fn parse(token: &'t str) -> Option<Self> {
        let placeholder = token.find(COLOR_PLACEHOLDER)?;
        let head = token.get(..placeholder)?;
        let tail = token.get(placeholder + COLOR_PLACEHOLDER.len()..)?;

        let (variants, prefix) = last_separator(head).map_or(Some((None, head)), |idx| {
            Some((
                head.get(..idx).filter(|stack| !stack.is_empty()),
                head.get(idx + 1..)?,
            ))
        })?;

        let (shade, rest) = split_shade(tail);
        Some(Self {
            variants,
            prefix,
            shade,
            rest,
        })
    }
}

fn last_separator(head: &str) -> Option<usize> {
    let mut depth = 0_usize;
    let mut found = None;
    for (idx, ch) in head.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            VARIANT_SEPARATOR if depth == 0 => found = Some(idx),
            _ => {}
        }
    }
    found
}

fn split_shade(tail: &str) -> (Option<u16>, &str) {
    let Some(after_dash) = tail.strip_prefix('-') else {
        return (None, tail);
    };
    let digits = after_dash
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(after_dash.len());
    let parsed = after_dash
        .get(..digits)
        .and_then(|number| number.parse::<u16>().ok());
    match (parsed, after_dash.get(digits..)) {
        (Some(shade), Some(rest)) => (Some(shade), rest),
        _ => (None, tail),
    }
}

/// Pattern before rendering, still holding structured colour and shade sets.
#[derive(Clone, Debug)]
pub(super) struct RawPattern {
    pub(super) prefix: String,
    pub(super) rest: String,
    pub(super) shaded: bool,
    pub(super) colors: Vec<String>,
    pub(super) shades: BTreeSet<u16>,
    pub(super) variants: Vec<String>,
}

impl RawPattern {
    pub(super) fn new(token: &ColorToken<'_>, colors: &[String]) -> Self {
        Self {
            prefix: token.prefix.to_owned(),
            rest: token.rest.to_owned(),
            shaded: token.shade.is_some(),
            colors: colors.to_vec(),
            shades: token.shade.into_iter().collect(),
            variants: token.variants.map(str::to_owned).into_iter().collect(),
        }
    }

    fn same_property(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.rest == other.rest && self.shaded == other.shaded
    }

    fn shares_color(&self, other: &Self) -> bool {
        self.colors.iter().any(|color| other.colors.contains(color))
    }

    fn same_color_set(&self, other: &Self) -> bool {
        self.colors.len() == other.colors.len()
            && self.colors.iter().all(|color| other.colors.contains(color))
    }

    fn absorb_colors(&mut self, other: Self) {
        union_into(&mut self.colors, other.colors);
        self.shades.extend(other.shades);
    }

    fn render(&self) -> SafelistPattern {
        let colors: Vec<String> = self
            .colors
            .iter()
            .map(|color| escape_pattern(color))
            .collect();
        let mut pattern = format!(
            "{}({})",
            escape_pattern(&self.prefix),
            colors.join("|")
        );
        if self.shaded {
            let shades: Vec<String> = self.shades.iter().map(u16::to_string).collect();
            pattern.push_str(&format!("-({})", shades.join("|")));
        }
        pattern.push_str(&escape_pattern(&self.rest));
        SafelistPattern {
            pattern,
            variants: self.variants.clone(),
        }
    }
}

/// Escapes characters with a meaning outside character classes, leaving
/// `-`, `&` and `/` readable.
fn escape_pattern(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if matches!(
            ch,
            '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn union_into(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

/// Merges patterns for the same property whose variants match and whose
/// colour sets overlap, repeating until nothing changes.
pub(super) fn merge_overlapping_colors(mut patterns: Vec<RawPattern>) -> Vec<RawPattern> {
    while let Some((keep, absorb)) = find_pair(&patterns, |a, b| {
        a.same_property(b) && a.variants == b.variants && a.shares_color(b)
    }) {
        let absorbed = patterns.remove(absorb);
        if let Some(target) = patterns.get_mut(keep) {
            target.absorb_colors(absorbed);
        }
    }
    patterns
}

/// Merges patterns that differ only in their variants.
pub(super) fn merge_variants(mut patterns: Vec<RawPattern>) -> Vec<RawPattern> {
    while let Some((keep, absorb)) = find_pair(&patterns, |a, b| {
        a.same_property(b) && a.shades == b.shades && a.same_color_set(b)
    }) {
        let absorbed = patterns.remove(absorb);
        if let Some(target) = patterns.get_mut(keep) {
            union_into(&mut target.variants, absorbed.variants);
        }
    }
    patterns
}

fn find_pair<F>(patterns: &[RawPattern], mergeable: F) -> Option<(usize, usize)>
where
    F: Fn(&RawPattern, &RawPattern) -> bool,
{
    patterns.iter().enumerate().find_map(|(i, left)| {
        patterns
            .iter()
            .enumerate()
            .skip(i + 1)
            .find(|(_, right)| mergeable(left, right))
            .map(|(j, _)| (i, j))
    })
}

/// Renders patterns, dropping records identical to an earlier one.
pub(super) fn render_unique(patterns: &[RawPattern]) -> Vec<SafelistPattern> {
    let mut rendered: Vec<SafelistPattern> = Vec::with_capacity(patterns.len());
    for pattern in patterns.iter().map(RawPattern::render) {
        if !rendered.contains(&pattern) {
            rendered.push(pattern);
        }
    }
    rendered
}
