// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use application::NoteSession;
use infrastructure::{config, Config, FileNoteStore, HttpNoteRemote};
use ports::TerminalPresenter;
use std::path::Path;
use tracing::{debug, info};
use crate::cli::args::{Args, Command};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notesync with arguments");

    if let Command::InitConfig { path } = &args.command {
        return init_config(path.as_deref());
    }

    // Initialize infrastructure
    let mut config = Config::locate(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        debug!(%base_url, "Using provided base URL");
        config.remote.base_url = base_url.clone();
    }
    let store_dir = match &args.data_dir {
        Some(dir) => dir.clone(),
        None => config.store_dir()?,
    };
    debug!(?store_dir, key = %config.store.key, "Using local note store");

    let store = FileNoteStore::new(&store_dir, &config.store.key);
    let remote = HttpNoteRemote::new(&config.remote);

    // Initialize application
    let mut session = NoteSession::new(remote, store);
    session.load().await?;

    // Initialize presentation
    let presenter = TerminalPresenter::new();

    // Execute use case
    match args.command {
        Command::List { json } => {
            let output = if json {
                presenter
                    .render_json(session.notes())
                    .context("Failed to serialize notes")?
            } else {
                presenter.render(session.notes())
            };
            println!("{}", output);
        }
        Command::Create { text } => {
            let note = session.create(&text).await?;
            println!("{}", presenter.render(std::slice::from_ref(&note)));
        }
        Command::Edit { note_id, text } => {
            let note = session.update(note_id, &text).await?;
            println!("{}", presenter.render(std::slice::from_ref(&note)));
        }
        Command::Delete { note_id } => {
            session.delete(note_id).await?;
            info!(note_id, "Note removed");
        }
        Command::InitConfig { .. } => {}
    }

    Ok(())
}

fn init_config(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::default_config_path().context("Could not find config directory")?,
    };

    if path.exists() {
        return Err(anyhow::anyhow!(
            "Config file already exists: {}",
            path.display()
        ));
    }

    Config::create_default(&path)?;
    info!(?path, "Wrote default config");
    println!("{}", path.display());
    Ok(())
}
