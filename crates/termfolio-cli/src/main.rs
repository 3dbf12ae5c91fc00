use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "termfolio-relay")]
#[command(about = "termfolio relay server and maintenance tools", long_about = None)]
struct Cli {
    /// Log as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the relay endpoints (/api/chat, /api/send-email, /api/webhook, /api/ip)
    Serve {
        /// Address to bind, overriding config and TERMFOLIO_BIND
        #[arg(long)]
        bind: Option<String>,
    },
    /// List the terminal commands
    Commands,
    /// Inspect or reset the persisted visitor state
    State {
        #[command(subcommand)]
        action: StateAction,

        /// Storage file to use instead of the default
        #[arg(long, global = true)]
        storage: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum StateAction {
    /// Print theme, points and the easter egg flag
    Show,
    /// Forget everything
    Reset,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json);

    match cli.command {
        Commands::Serve { bind } => commands::serve::run(bind)?,
        Commands::Commands => commands::catalog::print(),
        Commands::State { action, storage } => match action {
            StateAction::Show => commands::state::show(storage)?,
            StateAction::Reset => commands::state::reset(storage)?,
        },
    }

    Ok(())
}
