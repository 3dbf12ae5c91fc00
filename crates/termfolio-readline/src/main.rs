mod helper;
mod logging;
mod render;
mod shell;
mod view;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use termfolio_application::{open_state_repository, RuntimeSettings, StorageMode};
use termfolio_core::command::Page;
use termfolio_infrastructure::ConfigService;

use crate::shell::Shell;

/// Explore the portfolio from your terminal.
#[derive(Parser, Debug)]
#[command(name = "termfolio", version, about)]
struct Args {
    /// Page to open, by name (`about`) or path (`/about`)
    #[arg(long, default_value = "home")]
    page: String,

    /// Keep theme and points in memory only
    #[arg(long, conflicts_with = "storage")]
    ephemeral: bool,

    /// Storage file to use instead of the default
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Relay server used by the contact and chat forms
    #[arg(long)]
    relay_url: Option<String>,
}

fn start_page(raw: &str) -> Page {
    if raw.starts_with('/') {
        Page::from_path(raw)
    } else {
        raw.parse().unwrap_or(Page::NotFound)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let config = match ConfigService::new().get_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Ignoring config: {}", e).yellow());
            Default::default()
        }
    };

    let mode = if args.ephemeral {
        StorageMode::Ephemeral
    } else if let Some(path) = args.storage {
        StorageMode::File(path)
    } else {
        StorageMode::Default
    };
    let repository = open_state_repository(mode)?;

    let settings = RuntimeSettings {
        clear_mode: config.shell.clear_mode,
        ..RuntimeSettings::default()
    };
    let relay_url = args.relay_url.unwrap_or(config.shell.relay_url);

    Shell::new(repository, settings, relay_url)?
        .run(start_page(&args.page))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_page_accepts_names_and_paths() {
        assert_eq!(start_page("about"), Page::About);
        assert_eq!(start_page("/projects"), Page::Projects);
        assert_eq!(start_page("/"), Page::Home);
        assert_eq!(start_page("nowhere"), Page::NotFound);
    }
}
