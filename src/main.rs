// src/main.rs
use anyhow::Result;
use clap::Parser;
use notesync::cli::args::Args;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(format!("notesync={}", filter).parse()?),
        )
        .init();

    notesync::run(args).await
}
