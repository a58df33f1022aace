use serde::Serialize;
use ws_config::WsConfig;

use super::print_json;

#[derive(Serialize)]
struct WorkshopLine<'a> {
    slug: &'a str,
    name: &'a str,
}

pub fn handle(config: &WsConfig) -> anyhow::Result<()> {
    let lines: Vec<WorkshopLine<'_>> = config
        .workshops
        .active()
        .map(|w| WorkshopLine {
            slug: &w.slug,
            name: &w.name,
        })
        .collect();
    print_json(&lines)
}
