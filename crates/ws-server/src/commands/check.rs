use anyhow::Context;
use ws_config::WsConfig;
use ws_core::{Submission, match_member};

use super::{open_workbook, print_json};

pub async fn handle(
    config: &WsConfig,
    slug: &str,
    email: String,
    name: String,
    phone: String,
) -> anyhow::Result<()> {
    let workshop = config.workshops.require(slug)?;
    let workbook = open_workbook(config, false)?;
    let roster = workbook
        .roster(&workshop.sheet_id)
        .await
        .with_context(|| format!("failed to load roster for '{slug}'"))?;
    tracing::debug!(members = roster.len(), "roster loaded");

    let result = match_member(&Submission::with_full_name(name, email, phone), &roster);
    print_json(&result)
}
