use anyhow::Context;
use clap::Parser;
use std::io::{self, IsTerminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cbook::cli::{greet, run_command, run_menu, run_setup, Cli, Session};
use cbook::config::Config;
use cbook::db::Database;

fn init_logging() {
    let filter = EnvFilter::try_from_env("CBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let db = Database::open()?;
    debug!("database ready");

    match cli.command {
        None => {
            let config_path = Config::default_path()?;
            let config = match Config::load(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?
            {
                Some(config) => config,
                None if io::stdin().is_terminal() => run_setup(&config_path)?,
                None => anyhow::bail!("Not set up yet. Run cbook in a terminal first."),
            };
            info!(user = %config.user.name, "starting menu");

            greet(&config);
            run_menu(&Session {
                db: &db,
                config: &config,
            })?;
        }
        Some(command) => run_command(&db, command)?,
    }

    Ok(())
}
