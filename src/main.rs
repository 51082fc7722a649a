#![allow(non_snake_case)]

use anyhow::Context;
use clap::Parser;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use ramadanCalendar::cli::{self, Cli};
use ramadanCalendar::config::{AppConfig, AppSettings};
use ramadanCalendar::runtime::CalendarSession;
use ramadanCalendar::service::schedule_service::ScheduleService;
use ramadanCalendar::storage::JsonFileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::default(),
    };
    let settings = AppSettings::from_config(&config)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    let cli = Cli::parse();
    let store = Arc::new(JsonFileStore::in_dir(&settings.data_location));
    tracing::debug!(path = %store.path().display(), "using settings file");
    let client = Arc::new(ScheduleService::new(
        settings.schedule_base_url.clone(),
        settings.request_timeout,
    ));

    let mut session = CalendarSession::open(store, client)
        .await
        .context("failed to load calendar settings")?;
    // Each fetch is bounded by the request timeout; allow a little slack on top.
    let wait = settings.request_timeout + Duration::from_secs(1);
    cli::cli(cli, &mut session, wait).await?;
    Ok(())
}
