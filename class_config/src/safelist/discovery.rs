//! Discovery of the colours each component is used with in project sources.

use std::collections::BTreeMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use heck::{ToKebabCase, ToUpperCamelCase};
use regex_lite::Regex;

use crate::{StyleError, StyleResult};

/// Tag prefix applied to component names when none is configured.
pub const DEFAULT_TAG_PREFIX: &str = "U";

const STATIC_COLOR: &str = r#"(?:^|\s)color\s*=\s*(?:"([^"]*)"|'([^']*)')"#;
const BOUND_COLOR: &str = r#"(?:^|\s)(?::|v-bind:)color\s*=\s*"([^"]*)""#;
const QUOTED_LITERAL: &str = r#"'([^']*)'|`([^`]*)`"#;
const OBJECT_COLOR: &str = r#"\bcolor\s*:\s*(?:'([^']*)'|"([^"]*)")"#;

/// Colours discovered per component, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscoveredColors {
    by_component: BTreeMap<String, Vec<String>>,
}

impl DiscoveredColors {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_component: BTreeMap::new(),
        }
    }

    /// Record `color` for `component`; repeated colours are ignored.
    pub fn add(&mut self, component: &str, color: &str) {
        let colors = self.by_component.entry(component.to_owned()).or_default();
        if !colors.iter().any(|known| known == color) {
            colors.push(color.to_owned());
        }
    }

    /// Record every colour in `colors` for `component`.
    pub fn extend<I, S>(&mut self, component: &str, colors: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for color in colors {
            self.add(component, color.as_ref());
        }
    }

    /// Returns the colours recorded for `component`.
    #[must_use]
    pub fn colors(&self, component: &str) -> &[String] {
        self.by_component
            .get(component)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate over components and their colours, by component name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_component
            .iter()
            .map(|(component, colors)| (component.as_str(), colors.as_slice()))
    }

    /// Returns `true` when no colour has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_component.values().all(Vec::is_empty)
    }
}

/// Finds the colours one component is rendered with in a source file.
///
/// Recognised forms, on tags written as `UButton` or `u-button`:
///
/// - static attributes: `color="red"`;
/// - bound literals and ternaries: `:color="loading ? 'gray' : 'red'"`;
/// - object literals, such as `color: 'red'`, anywhere in a file that
///   mentions the component.
#[derive(Clone, Debug)]
pub struct ColorScanner {
    component: String,
    pascal: String,
    kebab: String,
    tag: Regex,
    static_color: Regex,
    bound_color: Regex,
    quoted: Regex,
    object_color: Regex,
}

impl ColorScanner {
    /// Build a scanner for `component` with tags named `<prefix><Component>`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Pattern`] when a discovery pattern cannot be
    /// compiled for this component.
    pub fn new(prefix: &str, component: &str) -> StyleResult<Self> {
        let pascal = format!("{prefix}{}", component.to_upper_camel_case());
        let kebab = pascal.to_kebab_case();
        let compile = |source: &str| {
            Regex::new(source).map_err(|err| {
                std::sync::Arc::new(StyleError::Pattern {
                    component: component.to_owned(),
                    source: err,
                })
            })
        };
        let tag = compile(&format!(
            r#"<(?:{}|{})(\s(?:"[^"]*"|'[^']*'|[^>"'])*)?/?>"#,
            regex_lite::escape(&pascal),
            regex_lite::escape(&kebab)
        ))?;
        Ok(Self {
            component: component.to_owned(),
            tag,
            static_color: compile(STATIC_COLOR)?,
            bound_color: compile(BOUND_COLOR)?,
            quoted: compile(QUOTED_LITERAL)?,
            object_color: compile(OBJECT_COLOR)?,
            pascal,
            kebab,
        })
    }

    /// Returns the component key this scanner records colours for.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the `PascalCase` and kebab-case tag names.
    #[must_use]
    pub fn tag_names(&self) -> (&str, &str) {
        (&self.pascal, &self.kebab)
    }

    /// Returns the colours used for this component in `text`, in order of
    /// appearance and without repeats.
    #[must_use]
    pub fn discover_colors(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        for tag in self.tag.captures_iter(text) {
            let Some(attributes) = tag.get(1) else {
                continue;
            };
            self.collect_attributes(attributes.as_str(), &mut found);
        }
        if text.contains(self.pascal.as_str()) || text.contains(self.kebab.as_str()) {
            for entry in self.object_color.captures_iter(text) {
                push_first_group(&entry, &mut found);
            }
        }
        found
    }

    fn collect_attributes(&self, attributes: &str, found: &mut Vec<String>) {
        for attribute in self.static_color.captures_iter(attributes) {
            push_first_group(&attribute, found);
        }
        for binding in self.bound_color.captures_iter(attributes) {
            let Some(expression) = binding.get(1) else {
                continue;
            };
            for literal in self.quoted.captures_iter(expression.as_str()) {
                push_first_group(&literal, found);
            }
        }
    }
}

fn push_first_group(captures: &regex_lite::Captures<'_>, found: &mut Vec<String>) {
    let Some(value) = captures.iter().skip(1).flatten().next() else {
        return;
    };
    let color = value.as_str().trim();
    if is_color_name(color) && !found.iter().any(|known| known == color) {
        found.push(color.to_owned());
    }
}

fn is_color_name(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// Reads project source files as UTF-8 text.
pub trait SourceReader {
    /// Read the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    fn read_source(&self, path: &Utf8Path) -> io::Result<String>;
}

/// Reads sources relative to a capability-scoped root directory.
#[derive(Debug)]
pub struct DirSourceReader {
    root: Utf8PathBuf,
    dir: Dir,
}

impl DirSourceReader {
    /// Open `root` for reading.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while opening the directory.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Returns the directory sources are read from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Lists files below the root whose extension is in `extensions`, as
    /// paths relative to the root in lexical order.
    ///
    /// An empty `extensions` list matches every file.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error raised while walking the tree.
    pub fn source_files(&self, extensions: &[String]) -> io::Result<Vec<Utf8PathBuf>> {
        let mut files = Vec::new();
        collect_files(&self.dir, Utf8Path::new(""), extensions, &mut files)?;
        Ok(files)
    }
}

impl SourceReader for DirSourceReader {
    fn read_source(&self, path: &Utf8Path) -> io::Result<String> {
        self.dir.read_to_string(path)
    }
}

fn collect_files(
    dir: &Dir,
    base: &Utf8Path,
    extensions: &[String],
    files: &mut Vec<Utf8PathBuf>,
) -> io::Result<()> {
    let mut entries = Vec::new();
    for entry_result in dir.read_dir(".")? {
        let entry = entry_result?;
        let name = Utf8PathBuf::from(entry.file_name()?);
        entries.push((name, entry.file_type()?));
    }
    entries.sort_by(|(left, _), (right, _)| left.cmp(right));

    for (name, file_type) in entries {
        let rel = base.join(&name);
        if file_type.is_dir() {
            if name.as_str().starts_with('.') || name.as_str() == "node_modules" {
                continue;
            }
            let subdir = dir.open_dir(&name)?;
            collect_files(&subdir, &rel, extensions, files)?;
        } else if file_type.is_file() && has_extension(&rel, extensions) {
            files.push(rel);
        }
    }
    Ok(())
}

fn has_extension(path: &Utf8Path, extensions: &[String]) -> bool {
    extensions.is_empty()
        || path
            .extension()
            .is_some_and(|ext| extensions.iter().any(|wanted| wanted.trim_start_matches('.') == ext))
}

/// Scans `paths` with every scanner, recording colours into `colors`.
///
/// A file that cannot be read is logged and contributes no colours; the
/// scan carries on with the remaining files. Returns the number of files
/// read successfully.
pub fn discover_in_files<R>(
    reader: &R,
    paths: &[Utf8PathBuf],
    scanners: &[ColorScanner],
    colors: &mut DiscoveredColors,
) -> usize
where
    R: SourceReader + ?Sized,
{
    let mut scanned = 0;
    for path in paths {
        let text = match reader.read_source(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "skipping unreadable source file");
                continue;
            }
        };
        scanned += 1;
        for scanner in scanners {
            colors.extend(scanner.component(), scanner.discover_colors(&text));
        }
    }
    tracing::debug!(scanned, total = paths.len(), "colour discovery finished");
    scanned
}
