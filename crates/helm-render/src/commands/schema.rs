use anyhow::{Context, Result};

/// Print the JSON Schema of `helm-yaml.toml` to stdout.
pub fn run() -> Result<()> {
    let schema = serde_json::to_string_pretty(&helm_yaml_config::schema())
        .context("failed to serialize schema")?;
    println!("{schema}");
    Ok(())
}
