use anyhow::Context;
use ws_config::WsConfig;

use super::{open_workbook, print_json};

pub async fn handle(config: &WsConfig, slug: &str) -> anyhow::Result<()> {
    let workshop = config.workshops.require(slug)?;
    let settings = open_workbook(config, false)?
        .workshop_settings(&workshop.sheet_id)
        .await
        .with_context(|| format!("failed to read settings for '{slug}'"))?;
    print_json(&settings)
}
