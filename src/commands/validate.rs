use super::{load_plan, resolve_config};
use crate::cli::OutputFormat;
use crate::config::OutcomemapConfig;
use crate::io::{self, create_writer};
use anyhow::Result;
use std::path::PathBuf;

pub struct ValidateConfig {
    pub path: PathBuf,
    pub config: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
}

/// Run the pipeline and write the report. Returns whether the plan passed.
pub fn validate_plan(config: ValidateConfig) -> Result<bool> {
    let settings = resolve_config(config.config.as_deref())?;
    let table = load_plan(&config.path, &settings)?;
    let report = table.validate();

    let format = resolve_format(config.format, &settings);
    if let Some(enabled) = settings.use_color() {
        colored::control::set_override(enabled);
    }
    let out = io::open_output(config.output.as_deref())?;
    create_writer(format, out).write_report(&report)?;

    log::info!("{}", report.message);
    Ok(report.success)
}

fn resolve_format(cli_format: Option<OutputFormat>, settings: &OutcomemapConfig) -> io::OutputFormat {
    if let Some(format) = cli_format {
        return format.into();
    }

    let configured = settings
        .output
        .as_ref()
        .and_then(|o| o.default_format.as_deref());
    match configured {
        Some("json") => io::OutputFormat::Json,
        Some("markdown") => io::OutputFormat::Markdown,
        Some("terminal") | None => io::OutputFormat::Terminal,
        Some(other) => {
            log::warn!("Unknown output.default_format '{}', using terminal", other);
            io::OutputFormat::Terminal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;

    fn with_default_format(format: &str) -> OutcomemapConfig {
        OutcomemapConfig {
            output: Some(OutputConfig {
                default_format: Some(format.to_string()),
                use_color: None,
            }),
            ..OutcomemapConfig::default()
        }
    }

    #[test]
    fn test_cli_format_wins() {
        let settings = with_default_format("markdown");
        assert_eq!(
            resolve_format(Some(OutputFormat::Json), &settings),
            io::OutputFormat::Json
        );
    }

    #[test]
    fn test_configured_format_used() {
        assert_eq!(
            resolve_format(None, &with_default_format("markdown")),
            io::OutputFormat::Markdown
        );
        assert_eq!(
            resolve_format(None, &with_default_format("yaml")),
            io::OutputFormat::Terminal
        );
        assert_eq!(
            resolve_format(None, &OutcomemapConfig::default()),
            io::OutputFormat::Terminal
        );
    }
}
