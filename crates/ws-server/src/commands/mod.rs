//! Subcommand handlers.

mod check;
mod serve;
mod settings;
mod workshops;

use std::sync::Arc;

use anyhow::Context;
use ws_config::WsConfig;
use ws_sheets::{GoogleSheetsClient, MemorySheets, SheetBackend, Workbook};

use crate::cli::Commands;

pub async fn dispatch(command: Commands, config: WsConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve { bind, in_memory } => serve::handle(config, bind, in_memory).await,
        Commands::Check {
            workshop,
            email,
            name,
            phone,
        } => check::handle(&config, &workshop, email, name, phone).await,
        Commands::Workshops => workshops::handle(&config),
        Commands::Settings { workshop } => settings::handle(&config, &workshop).await,
    }
}

/// Workbook over Google Sheets, or over an empty in-memory store.
fn open_workbook(config: &WsConfig, in_memory: bool) -> anyhow::Result<Workbook> {
    let backend: Arc<dyn SheetBackend> = if in_memory {
        tracing::warn!("using in-memory spreadsheets, nothing will be persisted");
        Arc::new(MemorySheets::new())
    } else {
        let sheets = config.require_sheets()?;
        Arc::new(
            GoogleSheetsClient::new(sheets).context("failed to initialize Google Sheets client")?,
        )
    };
    Ok(Workbook::new(backend))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
