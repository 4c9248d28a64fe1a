use anyhow::Context as _;
use std::{
    convert::{TryFrom, TryInto},
    path::Path,
};
use wiki_client_core::ClientSettings;
use wiki_shared::site::SiteUrl;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    /// Used when no site is given on the command line
    pub default_site: SiteUrl,
    #[serde(default)]
    pub client: ClientSettings,
}

pub fn get_configuration() -> anyhow::Result<Configuration> {
    let base_path = std::env::current_dir().context("failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("failed to parse APP_ENVIRONMENT")?;
    get_configuration_from(&configuration_directory, environment)
}

pub fn get_configuration_from(
    configuration_directory: &Path,
    environment: Environment,
) -> anyhow::Result<Configuration> {
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.toml"),
        ))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_CLIENT__ANONYMOUS_POLICY=strict` would set `Configuration.client.anonymous_policy`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("failed to load configuration sources")?;

    settings
        .try_deserialize::<Configuration>()
        .context("failed to deserialize configuration")
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
