use anyhow::{Context, Result, bail};
use conf_regroup::PipelineConfig;

use super::build_canon_config;
use crate::cli::RunArgs;

/// Loads the TOML file named by `--config`, if any, then applies overrides.
pub fn build_pipeline_config(args: &RunArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load pipeline config '{}'", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(input) = &args.input {
        config.input = std::path::absolute(input)
            .with_context(|| format!("Invalid input path '{}'", input.display()))?;
    }
    if let Some(dir) = &args.work_dir {
        config.work_dir = dir.clone();
    }
    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }
    config.canon = build_canon_config(&args.canon, config.canon);

    if config.input.as_os_str().is_empty() {
        bail!("No input SD file given.\n\nUsage: cregroup run -i <INPUT> or set `input` in --config.");
    }
    if config.prefix.is_empty() {
        bail!("Title prefix must not be empty");
    }

    Ok(config)
}
