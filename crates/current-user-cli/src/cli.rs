use clap::Parser;
use wiki_shared::{site::SiteUrl, user::AnonymousPolicy};

use crate::configuration::Configuration;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "log-to-console",
        action,
        help = "Logs to the console (stderr) instead of to a file"
    )]
    pub is_log_to_console: bool,

    #[arg(long, help = "Base URL of the wiki to ask. Defaults to the configured site")]
    pub site: Option<String>,

    #[arg(long, action, help = "Treat an anonymous (IP) session as an error")]
    pub strict: bool,
}

impl Cli {
    /// Command line arguments win over the configuration files
    pub fn apply_overrides(&self, configuration: &mut Configuration) {
        if let Some(site) = &self.site {
            configuration.default_site = SiteUrl::new(site.clone());
        }
        if self.strict {
            configuration.client.anonymous_policy = AnonymousPolicy::Strict;
        }
    }
}
