//! Runs the manifest generator against a temporary project.
use anyhow::{Result, anyhow, ensure};
use camino::Utf8PathBuf;
use clap::Parser;
use class_safelist::cli::Args;
use class_safelist::error::SafelistCliError;
use class_safelist::{build_manifest, run};
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn write(&self, rel: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    fn args(&self, extra: &[&str]) -> Result<Args> {
        let mut argv = vec![
            "class-safelist".to_owned(),
            "--config".to_owned(),
            self.root.join("ui.toml").into_string(),
            "--root".to_owned(),
            self.root.join("app").into_string(),
        ];
        argv.extend(extra.iter().map(|arg| (*arg).to_owned()));
        Args::try_parse_from(argv).map_err(|err| anyhow!(err.to_string()))
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("tempdir is UTF-8");
    let ws = Workspace { _dir: dir, root };
    ws.write(
        "ui.toml",
        concat!(
            "[alert]\n",
            "base = \"border-{color}-200 text-{color}-700\"\n",
            "[alert.defaults]\n",
            "color = \"primary\"\n",
        ),
    )
    .expect("write defaults");
    ws.write(
        "app/pages/index.vue",
        r#"<template><UAlert color="red" title="Oops" /></template>"#,
    )
    .expect("write page");
    ws
}

#[rstest]
fn builds_manifest_from_files_and_sources(workspace: Workspace) -> Result<()> {
    let manifest = build_manifest(&workspace.args(&[])?)?;
    let encoded = serde_json::to_value(&manifest)?;
    ensure!(
        encoded
            == json!([
                { "pattern": "border-(red|primary)-(200)" },
                { "pattern": "text-(red|primary)-(700)" }
            ]),
        "unexpected manifest {encoded}"
    );
    Ok(())
}

#[rstest]
fn neutral_flag_drops_the_default_colour(workspace: Workspace) -> Result<()> {
    let manifest = build_manifest(&workspace.args(&["--neutral", "primary"])?)?;
    let patterns: Vec<&str> = manifest.iter().map(|entry| entry.pattern.as_str()).collect();
    ensure!(
        patterns == ["border-(red)-(200)", "text-(red)-(700)"],
        "unexpected patterns {patterns:?}"
    );
    Ok(())
}

#[rstest]
fn global_overrides_add_safelist_colours(workspace: Workspace) -> Result<()> {
    let global = workspace.write("app.json", r#"{"alert": {"safelistColors": ["sky"]}}"#)?;
    let manifest = build_manifest(&workspace.args(&["--global", global.as_str()])?)?;
    let patterns: Vec<&str> = manifest.iter().map(|entry| entry.pattern.as_str()).collect();
    ensure!(
        patterns == ["border-(red|primary|sky)-(200)", "text-(red|primary|sky)-(700)"],
        "unexpected patterns {patterns:?}"
    );
    Ok(())
}

#[rstest]
fn writes_manifest_to_the_requested_file(workspace: Workspace) -> Result<()> {
    let out = workspace.root.join("build/safelist.json");
    run(&workspace.args(&["--out", out.as_str()])?)?;
    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
    ensure!(
        written.as_array().map(Vec::len) == Some(2),
        "unexpected output {written}"
    );
    Ok(())
}

#[rstest]
fn missing_config_is_reported(workspace: Workspace) -> Result<()> {
    std::fs::remove_file(workspace.root.join("ui.toml"))?;
    let Err(err) = build_manifest(&workspace.args(&[])?) else {
        return Err(anyhow!("a missing config file must fail"));
    };
    ensure!(
        matches!(err, SafelistCliError::Style(_)),
        "unexpected error {err}"
    );
    Ok(())
}
