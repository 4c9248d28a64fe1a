#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context as _;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = current_user_cli::cli::Cli::parse();

    if let Err(e) = current_user_cli::tracing::init(&cli) {
        eprintln!("Failed to start tracing: {e}");
    }

    let configuration = current_user_cli::configuration::get_configuration()
        .context("failed to read configuration")?;
    let rt = current_user_cli::create_runtime()?;
    let user = rt.block_on(current_user_cli::run(&cli, configuration))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&user).context("failed to serialize user")?
    );
    Ok(())
}
