// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory of the local note store (overrides config)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the remote collection (overrides config)
    #[arg(short = 'u', long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load remote and local notes, merge them and print the result
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Create {
        /// Note text
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Replace the text of a note
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// New note text
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },

    /// Write a default config file
    InitConfig {
        /// Target path (defaults to the platform config directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}
