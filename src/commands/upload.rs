use super::{load_plan, resolve_config};
use crate::io::{Payload, UploadTarget, Uploader};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub struct UploadPlanConfig {
    pub path: PathBuf,
    pub config: Option<PathBuf>,
    pub target: UploadTarget,
    pub url: Option<String>,
    pub token: Option<String>,
    pub as_csv: bool,
}

/// Validate the plan and upload it. A plan with any issue is never sent.
pub fn upload_plan(config: UploadPlanConfig) -> Result<()> {
    let mut settings = resolve_config(config.config.as_deref())?;
    if config.url.is_some() {
        settings.upload.base_url = config.url.clone();
    }
    if config.token.is_some() {
        settings.upload.token = config.token.clone();
    }

    let table = load_plan(&config.path, &settings)?;
    let report = table.validate();
    if !report.success {
        for issue in report.issues() {
            eprintln!("  [{}] {}", issue.from, issue.error);
        }
        bail!("Refusing to upload: {}", report.message);
    }

    let record = report
        .record()
        .context("Validated report has no record to upload")?;
    let payload = if config.as_csv {
        Payload::Csv(table.get_table()?.to_delimited()?)
    } else {
        Payload::Json(record)
    };

    let uploader = Uploader::from_config(&settings.upload)?;
    let response = uploader
        .upload(&config.target, &payload)
        .context("Upload failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
