#![warn(clippy::all, rust_2018_idioms)]

pub mod cli;
pub mod configuration;
pub mod tracing;

use anyhow::Context as _;
use wiki_client_core::Client;
use wiki_shared::user::CurrentUser;

pub fn create_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Unable to create Runtime")
}

/// Asks the configured site (after command line overrides) who we are
pub async fn run(
    cli: &cli::Cli,
    mut configuration: configuration::Configuration,
) -> anyhow::Result<CurrentUser> {
    cli.apply_overrides(&mut configuration);
    let client = Client::new(&configuration.client)?;
    let site = configuration.default_site;
    ::tracing::info!(%site, policy = %client.anonymous_policy(), "fetching current user");
    client
        .fetch_current_user(&site, || {})
        .await
        .context("request was dropped before it completed")?
        .with_context(|| format!("failed to fetch current user from {site}"))
}
