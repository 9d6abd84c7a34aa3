//! Submission check

use std::path::Path;

use anyhow::{bail, Context as _};
use cms_forms::{EntityId, FormUseCases, Submission};

use super::Context;

pub async fn handle(form_id: &str, submission: &Path, ctx: &Context) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(submission)
        .with_context(|| format!("reading {}", submission.display()))?;
    let submission: Submission = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON object", submission.display()))?;

    let report = ctx
        .service
        .validate_submission(&EntityId::from_string(form_id), &submission)
        .await?;
    ctx.format.print_report(&report)?;

    if !report.is_valid() {
        bail!("submission has {} violation(s)", report.violations().len());
    }
    Ok(())
}
