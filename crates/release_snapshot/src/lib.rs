//! Download a month of game releases from the IGDB catalog and write one JSON file per
//! release date.

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod normalize;
pub mod query;
pub mod record;
pub mod snapshot;
pub mod window;

use reqwest::Client;
use tracing::info;

use auth::authenticate;
use config::{AppConfig, CliArgs};
use error::SnapshotError;
use fetch::fetch_releases;
use normalize::normalize_all;
use snapshot::{WriteSummary, group_by_release_date, write_groups};
use window::TimeWindow;

pub async fn run(cli: CliArgs) -> Result<WriteSummary, SnapshotError> {
    let config = cli.resolve()?;
    let window = TimeWindow::current()
        .ok_or_else(|| SnapshotError::Config("release window is out of range".to_string()))?;
    run_with_config(&config, window).await
}

/// Authenticate, download every release inside `window`, and write the per-date files.
pub async fn run_with_config(
    config: &AppConfig,
    window: TimeWindow,
) -> Result<WriteSummary, SnapshotError> {
    info!(
        start = %window.start.to_rfc3339(),
        end = %window.end.to_rfc3339(),
        "Downloading games data"
    );

    let client = Client::builder()
        .user_agent(concat!("release-snapshot/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let token = authenticate(&client, &config.tunables.token_url, &config.credentials).await?;
    let fetched = fetch_releases(
        &client,
        &config.tunables,
        &config.credentials,
        &token,
        window,
    )
    .await?;
    info!(
        pages = fetched.pages,
        games = fetched.records.len(),
        "Download complete"
    );

    let normalized = normalize_all(&fetched.records, &config.timezone);
    let groups = group_by_release_date(normalized);
    info!(dates = groups.len(), timezone = %config.timezone, "Grouped games by release date");

    let summary = write_groups(&config.paths.output_dir, &groups)?;
    info!(
        files = summary.files.len(),
        dir = %config.paths.output_dir.display(),
        "Done writing files"
    );

    Ok(summary)
}
