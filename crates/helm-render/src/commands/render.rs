use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use helm_yaml::{Encoder, Node};
use helm_yaml_config::Config;
use serde_json::Value;
use tracing::{info_span, warn};

use crate::RenderArgs;

/// Detect input format from file extension.
fn detect_input_format(path: &Path) -> Option<&'static str> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Some("json"),
        Some("yaml" | "yml") => Some("yaml"),
        Some("toml") => Some("toml"),
        _ => None,
    }
}

/// Parse input file to `serde_json::Value`.
fn parse_input(content: &str, format: &str) -> Result<Value> {
    match format {
        "json" => serde_json::from_str(content).context("failed to parse JSON"),
        "yaml" => serde_yaml::from_str(content).context("failed to parse YAML"),
        "toml" => {
            let toml_value: toml::Value =
                toml::from_str(content).context("failed to parse TOML")?;
            serde_json::to_value(toml_value).context("failed to convert TOML to a data value")
        }
        _ => bail!("unsupported input format: {format}"),
    }
}

fn load_config(args: &RenderArgs) -> Result<Config> {
    let mut config = match &args.config_dir {
        Some(dir) => helm_yaml_config::load_from(Path::new(dir))?,
        None => helm_yaml_config::load()?,
    };
    if args.indent.is_some() {
        config.indent = args.indent;
    }
    if args.wrap.is_some() {
        config.wrap = args.wrap;
    }
    Ok(config)
}

/// Encode every file in `args.files` as one document on `writer`, in order.
fn render<W: Write>(args: &RenderArgs, config: &Config, writer: W) -> Result<W> {
    if args.files.is_empty() {
        bail!("no input files given");
    }
    let mut encoder = Encoder::new(writer).with(config.settings()?);

    for file in &args.files {
        let _span = info_span!("render", file = %file).entered();
        let path = Path::new(file);
        let format = detect_input_format(path).with_context(|| {
            format!("cannot detect format of {file}, use a known extension (.json, .yaml, .toml)")
        })?;
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {file}"))?;
        let value = parse_input(&content, format).with_context(|| format!("in {file}"))?;

        let mut root = Node::from(&value);
        for missing in config.annotate(&mut root) {
            warn!(path = %missing, "annotation path not found in {file}");
        }
        encoder
            .encode(&root)
            .with_context(|| format!("failed to encode {file}"))?;
    }

    Ok(encoder.into_inner())
}

/// Run the `render` command: encode each values file to stdout.
pub fn run(args: &RenderArgs) -> Result<()> {
    let config = load_config(args)?;
    let stdout = std::io::stdout().lock();
    let mut stdout = render(args, &config, stdout)?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_yaml_config::Annotation;
    use pretty_assertions::assert_eq;

    fn args(files: Vec<String>) -> RenderArgs {
        RenderArgs {
            indent: None,
            wrap: None,
            config_dir: None,
            files,
        }
    }

    fn render_to_string(args: &RenderArgs, config: &Config) -> Result<String> {
        let out = render(args, config, Vec::new())?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn detects_formats_by_extension() {
        assert_eq!(detect_input_format(Path::new("values.yml")), Some("yaml"));
        assert_eq!(detect_input_format(Path::new("values.yaml")), Some("yaml"));
        assert_eq!(detect_input_format(Path::new("values.json")), Some("json"));
        assert_eq!(detect_input_format(Path::new("Cargo.toml")), Some("toml"));
        assert_eq!(detect_input_format(Path::new("values.txt")), None);
        assert_eq!(detect_input_format(Path::new("values")), None);
    }

    #[test]
    fn toml_keeps_key_order() -> Result<()> {
        let value = parse_input("zeta = 1\nalpha = \"x\"\n", "toml")?;
        let keys: Vec<&String> = value
            .as_object()
            .map(|m| m.keys().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        Ok(())
    }

    #[test]
    fn renders_annotated_document() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let file = tmp.path().join("values.yaml");
        fs::write(&file, "replicas: 3\nimage:\n  tag: latest\n")?;
        let config = Config {
            annotations: vec![Annotation {
                path: "image.tag".into(),
                comment: Some("Image tag".into()),
                condition: Some("if .Values.pin".into()),
            }],
            ..Config::default()
        };

        let out = render_to_string(&args(vec![file.display().to_string()]), &config)?;
        assert_eq!(
            out,
            "\
---
replicas: 3
image:
  # Image tag
  {{- if .Values.pin }}
  tag: latest
  {{- end }}
"
        );
        Ok(())
    }

    #[test]
    fn rejects_missing_files_and_unknown_formats() -> Result<()> {
        let config = Config::default();
        assert!(render_to_string(&args(Vec::new()), &config).is_err());

        let tmp = tempfile::tempdir()?;
        let file = tmp.path().join("values.ini");
        fs::write(&file, "a=1\n")?;
        let err = render_to_string(&args(vec![file.display().to_string()]), &config)
            .expect_err("unknown extension");
        assert!(format!("{err:#}").contains("cannot detect format"));
        Ok(())
    }

    #[test]
    fn cli_overrides_config_settings() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::write(
            tmp.path().join("helm-yaml.toml"),
            "root = true\nindent = 8\nwrap = 40\n",
        )?;
        let mut args = args(Vec::new());
        args.config_dir = Some(tmp.path().display().to_string());
        args.indent = Some(4);

        let config = load_config(&args)?;
        assert_eq!(config.indent, Some(4));
        assert_eq!(config.wrap, Some(40));
        Ok(())
    }
}
