use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line of the `launch-dashboard` binary.
#[derive(Parser, Debug)]
#[command(name = "launch-dashboard", version)]
#[command(about = "Launch records dashboard: success pie and payload scatter per launch site")]
pub struct Cli {
    /// Launch table to load (.csv, .json or .parquet)
    #[arg(long, env = "LAUNCH_DASHBOARD_DATA", default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Address the HTTP server binds to
    #[arg(long, env = "LAUNCH_DASHBOARD_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the dashboard over HTTP (default)
    Serve,
    /// Open the dashboard in a native window
    Desktop,
}

pub const DEFAULT_BIND: &str = "127.0.0.1:8050";

impl Cli {
    /// The subcommand to run, `serve` when omitted.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

// ---------------------------------------------------------------------------
// Dashboard layout constants
// ---------------------------------------------------------------------------

/// Fixed page settings shared by the web page and the desktop window.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub title: String,
    pub slider_min: f64,
    pub slider_max: f64,
    pub slider_step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider_min: 0.0,
            slider_max: 10_000.0,
            slider_step: 1_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["launch-dashboard", "--data", "launches.csv"]).unwrap();
        assert_eq!(cli.data, PathBuf::from("launches.csv"));
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn parses_bind_and_desktop() {
        let cli = Cli::try_parse_from(["launch-dashboard", "--bind", "0.0.0.0:9000", "serve"]).unwrap();
        assert_eq!(cli.bind, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.command(), Command::Serve);

        let cli = Cli::try_parse_from(["launch-dashboard", "desktop"]).unwrap();
        assert_eq!(cli.command(), Command::Desktop);
    }

    #[test]
    fn slider_defaults() {
        let cfg = DashboardConfig::default();
        assert_eq!((cfg.slider_min, cfg.slider_max, cfg.slider_step), (0.0, 10_000.0, 1_000.0));
    }
}
