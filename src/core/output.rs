use crate::config::toml_config::TomlConfig;
use crate::domain::model::{EstimateRequest, EstimateResult};
use crate::utils::error::Result;
use std::path::Path;

/// `json` gives the full result; anything else gives title and summary lines.
pub fn render(result: &EstimateResult, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(result)?),
        _ => Ok(format!("{}\n{}", result.title, result.summary_text)),
    }
}

/// Writes the rendered result to a file so it can be passed on.
pub fn share<P: AsRef<Path>>(rendered: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{}\n", rendered))?;
    tracing::info!("📁 Result saved to: {}", path.display());
    Ok(())
}

/// Builds the engine, estimates one request, renders it and optionally
/// shares it. Returns the rendered text.
pub fn run_estimate(
    config: &TomlConfig,
    request: &EstimateRequest,
    format: &str,
    output: Option<&str>,
) -> Result<String> {
    let engine = config.build_engine()?;
    let result = engine.estimate(request)?;
    let rendered = render(&result, format)?;

    if let Some(path) = output {
        share(&rendered, path)?;
    }

    Ok(rendered)
}
