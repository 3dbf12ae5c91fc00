use std::path::PathBuf;

use anyhow::{Context, Result};

use termfolio_application::{open_state_repository, StorageMode};

fn mode(storage: Option<PathBuf>) -> StorageMode {
    storage.map_or(StorageMode::Default, StorageMode::File)
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")
}

pub fn show(storage: Option<PathBuf>) -> Result<()> {
    let repository = open_state_repository(mode(storage))?;
    let state = runtime()?.block_on(repository.load_state())?;
    println!("theme:          {}", state.theme);
    println!("points:         {}", state.points);
    println!("easterEggFound: {}", state.easter_egg_found);
    Ok(())
}

pub fn reset(storage: Option<PathBuf>) -> Result<()> {
    let repository = open_state_repository(mode(storage))?;
    runtime()?.block_on(repository.reset_state())?;
    println!("Visitor state cleared.");
    Ok(())
}
