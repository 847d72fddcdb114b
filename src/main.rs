use anyhow::Context;
use clap::Parser;
use legend_local::cli::{run, Cli};
use legend_local::Settings;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load_from(cli.config.as_deref()).context("loading settings")?;
    run(cli, settings)?;
    Ok(())
}
