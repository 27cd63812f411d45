use crate::{error::CliError, output::JsonLines};
use clap::Parser;
use commands::Commands;
use connectors::adapter::Adapter;
use engine_config::settings::{BatchSettings, validator::SettingsValidator};
use engine_core::batch::iterator::KeysetBatchIterator;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "pluck",
    version = "0.1.0",
    about = "Read large tables in primary-key batches"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays machine-readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            url,
            table,
            columns,
            batch_size,
            start,
            settings,
            output,
        } => {
            let mut raw = match settings {
                Some(path) => BatchSettings::from_file(path)?,
                None => BatchSettings::default(),
            };
            if let Some(batch_size) = batch_size {
                raw.batch_size = batch_size;
            }
            if start.is_some() {
                raw.start = start;
            }
            let validated = SettingsValidator::new().validate(&raw)?;

            let adapter = Adapter::connect(&url, &table).await?;
            info!(database = ?adapter.kind(), %table, "Connected");
            let iterator = KeysetBatchIterator::with_settings(adapter.executor(), validated);

            let mut writer = match output {
                Some(path) => JsonLines::file(&path)?,
                None => JsonLines::stdout(),
            };
            let columns = columns.iter().map(String::as_str).collect::<Vec<_>>();
            let summary = iterator
                .pluck_each(&columns, |row| writer.write(&row))
                .await?;
            writer.finish()?;

            info!(
                batches = summary.batches,
                rows = summary.rows,
                last_id = ?summary.last_id,
                next_start = ?summary.resume_from(),
                "Scan complete"
            );
        }
        Commands::Columns { url, table } => {
            let adapter = Adapter::connect(&url, &table).await?;
            let metadata = output::metadata_to_json(adapter.executor().table());
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
    }

    Ok(())
}
