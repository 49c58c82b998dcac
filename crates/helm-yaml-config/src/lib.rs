#![doc = include_str!("../README.md")]

use std::path::Path;

use anyhow::{Context, Result, bail};
use helm_yaml::{Comment, Condition, Node, Settings};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

const CONFIG_FILENAME: &str = "helm-yaml.toml";

fn example_path() -> String {
    "image.tag".into()
}

fn example_nested_path() -> String {
    "spec.containers.0.env".into()
}

fn example_condition() -> String {
    "if .Values.ingress.enabled".into()
}

/// Annotation attached to the node at `path` before encoding.
///
/// In TOML, rules are written as `[[annotate]]` blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(title = "Annotation Rule")]
pub struct Annotation {
    /// Dotted path to the node. Mapping keys are matched literally, sequence
    /// members by zero-based index. An empty path targets the document root.
    #[schemars(title = "Path", example = example_path(), example = example_nested_path())]
    pub path: String,

    /// Comment written above the node. Use `\n` to separate lines.
    #[schemars(title = "Comment")]
    #[serde(default)]
    pub comment: Option<String>,

    /// Template action wrapped around the node, written as
    /// `{{- <condition> }}` and closed with `{{- end }}`.
    #[schemars(title = "Condition", example = example_condition())]
    #[serde(default)]
    pub condition: Option<String>,
}

/// Configuration file for `helm-render`.
///
/// `helm-render` walks up the directory tree looking for `helm-yaml.toml`
/// files and merges them. Settings in child directories take priority over
/// parent directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(title = "helm-yaml.toml")]
pub struct Config {
    /// Stop the upward search at this file.
    #[serde(default)]
    pub root: bool,

    /// Columns per nesting level. Must be at least 2; defaults to 2.
    #[schemars(title = "Indent")]
    #[serde(default)]
    pub indent: Option<usize>,

    /// Column budget for comment lines, indentation included. `0` disables
    /// wrapping, which is the default.
    #[schemars(title = "Wrap")]
    #[serde(default)]
    pub wrap: Option<usize>,

    #[schemars(title = "Annotation Rules")]
    #[serde(default, rename = "annotate")]
    pub annotations: Vec<Annotation>,
}

impl Config {
    fn merge_parent(&mut self, parent: Config) {
        self.indent = self.indent.or(parent.indent);
        self.wrap = self.wrap.or(parent.wrap);
        // Child rules come first so they are applied before the parent's.
        self.annotations.extend(parent.annotations);
    }

    /// Resolve encoder settings, filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `indent` is below 2.
    pub fn settings(&self) -> Result<Settings> {
        let defaults = Settings::default();
        let settings = Settings {
            indent: self.indent.unwrap_or(defaults.indent),
            wrap: self.wrap.unwrap_or(defaults.wrap),
        };
        if settings.indent < 2 {
            bail!(
                "indent must be at least 2 (sequence items need room for `- `), got {}",
                settings.indent
            );
        }
        Ok(settings)
    }

    /// Apply every annotation rule to `root`. Later rules for the same path
    /// replace what earlier rules set.
    ///
    /// Returns the paths that did not resolve to a node.
    pub fn annotate(&self, root: &mut Node) -> Vec<String> {
        let mut unresolved = Vec::new();
        // Parents first, so child rules win for the same path.
        for rule in self.annotations.iter().rev() {
            let Some(node) = root.find_mut(&rule.path) else {
                debug!(path = %rule.path, "annotation path does not resolve");
                unresolved.push(rule.path.clone());
                continue;
            };
            if let Some(comment) = &rule.comment {
                node.apply(Comment::new(comment.clone()));
            }
            if let Some(condition) = &rule.condition {
                node.apply(Condition::new(condition.clone()));
            }
            trace!(path = %rule.path, "applied annotation");
        }
        unresolved
    }
}

pub fn schema() -> Value {
    serde_json::to_value(schema_for!(Config)).unwrap_or(Value::Null)
}

/// Walk up from `start_dir`, merging every `helm-yaml.toml` found.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or parsed.
pub fn find_and_load(start_dir: &Path) -> Result<Option<Config>> {
    let mut configs: Vec<Config> = Vec::new();
    let mut dir = start_dir.to_path_buf();

    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading config");
            let content = std::fs::read_to_string(&candidate)
                .with_context(|| format!("failed to read {}", candidate.display()))?;
            let cfg: Config = toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", candidate.display()))?;
            let is_root = cfg.root;
            configs.push(cfg);
            if is_root {
                break;
            }
        }
        if !dir.pop() {
            break;
        }
    }

    if configs.is_empty() {
        return Ok(None);
    }

    // configs[0] is the closest (child), last is the farthest (root-most parent)
    let mut merged = configs.remove(0);
    for parent in configs {
        merged.merge_parent(parent);
    }
    Ok(Some(merged))
}

/// Load the merged config for `start_dir`, or the defaults when no file is
/// found.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or parsed.
pub fn load_from(start_dir: &Path) -> Result<Config> {
    Ok(find_and_load(start_dir)?.unwrap_or_default())
}

/// Load the merged config for the current working directory.
///
/// # Errors
///
/// Returns an error if the working directory is unavailable or a config file
/// is invalid.
pub fn load() -> Result<Config> {
    let cwd = std::env::current_dir()?;
    load_from(&cwd)
}
