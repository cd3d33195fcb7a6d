//! COVID-19 Dashboard
//!
//! Serves, or writes once to disk, a two-tab page of global and national
//! COVID-19 maps, charts and tables.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use covid_dashboard::config::Settings;
use covid_dashboard::dashboard::{self, Dashboard};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if cli.timeout_secs.is_some() {
        settings.timeout_secs = cli.timeout_secs;
    }

    match cli.command {
        Commands::Render { output } => {
            let html = Dashboard::new(settings)?
                .render_html()
                .context("rendering dashboard")?;
            std::fs::write(&output, html)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(path = %output.display(), "dashboard written");
        }
        Commands::Serve { bind, open } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("starting async runtime")?;
            runtime
                .block_on(dashboard::serve(settings, bind, open))
                .with_context(|| format!("serving on {bind}"))?;
        }
    }

    Ok(())
}
