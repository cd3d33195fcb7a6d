use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use covid_dashboard::config::DEFAULT_BIND;

#[derive(Parser, Debug)]
#[command(name = "covid-dashboard", version, about = "COVID-19 dashboard")]
pub struct Cli {
    #[arg(long, global = true, help = "JSON file overriding dataset sources and settings")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Per-request HTTP timeout in seconds")]
    pub timeout_secs: Option<u64>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the dashboard, rebuilding it on every page load
    Serve {
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
        #[arg(long, default_value_t = false, help = "Open the page in a browser")]
        open: bool,
    },
    /// Run one render pass and write the page to a file
    Render {
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults_to_local_port() {
        let cli = Cli::try_parse_from(["covid-dashboard", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind, open } => {
                assert_eq!(bind.port(), 8050);
                assert!(!open);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "covid-dashboard",
            "render",
            "--output",
            "page.html",
            "--timeout-secs",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.timeout_secs, Some(30));
        assert!(matches!(cli.command, Commands::Render { .. }));
    }
}
