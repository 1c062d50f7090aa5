//! dbt console - a terminal console for dbt sources, models and tests
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;
use dbtc_tui::RunOptions;

/// dbt console - browse and edit dbt sources, models and tests
#[derive(Parser, Debug)]
#[command(name = "dbtc", version)]
#[command(about = "A terminal console for dbt projects backed by the dbt admin service", long_about = None)]
struct Args {
    /// Base URL of the backend service (overrides config.toml)
    #[arg(long, env = "DBTC_BACKEND_URL", value_name = "URL")]
    backend_url: Option<String>,

    /// Directory holding config.toml and project.toml
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// dbt project path to prefill when no project is configured
    #[arg(long, value_name = "PATH")]
    project: Option<String>,
}

impl From<Args> for RunOptions {
    fn from(args: Args) -> Self {
        RunOptions {
            backend_url: args.backend_url,
            config_dir: args.config_dir,
            project: args.project,
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    dbtc_core::logging::init()?;
    tracing::debug!("Arguments: {:?}", args);

    dbtc_tui::run(args.into()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["dbtc"]).unwrap();
        let options = RunOptions::from(args);
        assert!(options.config_dir.is_none());
        assert!(options.project.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "dbtc",
            "--backend-url",
            "http://dbt-admin:8080",
            "--config-dir",
            "/tmp/dbtc",
            "--project",
            "/work/jaffle_shop",
        ])
        .unwrap();
        let options = RunOptions::from(args);
        assert_eq!(options.backend_url.as_deref(), Some("http://dbt-admin:8080"));
        assert_eq!(options.config_dir, Some(PathBuf::from("/tmp/dbtc")));
        assert_eq!(options.project.as_deref(), Some("/work/jaffle_shop"));
    }
}
