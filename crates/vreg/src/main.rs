//! vreg CLI - component registry generator for Vue component libraries.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "vreg")]
#[command(about = "Bundle Vue components into shadcn-style registry items")]
#[command(version)]
pub struct Cli {
    /// Command to run (defaults to build)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to registry.toml config file
    #[arg(short, long, default_value = "registry.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one JSON registry item per component
    Build {
        /// Output directory (defaults to config or "public/registry")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a registry.toml describing the components found on disk
    Init {
        /// Components directory to scan (defaults to "app/components/ui")
        #[arg(long)]
        components_dir: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Serve the built registry over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the configured output)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Open the registry in a browser
        #[arg(long)]
        open: bool,
    },

    /// Build, serve, and rebuild on changes
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Output directory (defaults to config or "public/registry")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the registry in a browser
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command.unwrap_or(Commands::Build { output: None }) {
        Commands::Build { output } => {
            commands::build::run(&cli.config, output).await?;
        }
        Commands::Init {
            components_dir,
            yes,
        } => {
            commands::init::run(&cli.config, components_dir, yes).await?;
        }
        Commands::Serve { port, dir, open } => {
            commands::serve::run(&cli.config, port, dir, open).await?;
        }
        Commands::Dev { port, output, open } => {
            commands::dev::run(&cli.config, port, output, open).await?;
        }
    }

    Ok(())
}
