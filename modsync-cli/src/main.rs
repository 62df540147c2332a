//! modsync — keep a mods directory in line with a manifest.
//!
//! # Usage
//!
//! ```text
//! modsync sync --dir <DIR> (--manifest <PATH> | --manifest-url <URL>)
//!              [--verify-hash] [--remove-unlisted] [--json]
//! modsync resolve <provider> <key=value>... [--json]
//! modsync hash <FILE> [--algorithm sha1|sha256|md5]
//! ```
//!
//! Every command accepts `--config <PATH>`; otherwise
//! `~/.modsync/config.yaml` is used when present. Set `RUST_LOG` for
//! diagnostics on stderr.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{hash::HashArgs, resolve::ResolveArgs, sync::SyncArgs};
use modsync_core::{config, Config, CoreError};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "modsync",
    version,
    about = "Synchronize a mods directory against a CurseForge/Modrinth manifest",
    long_about = None,
)]
struct Cli {
    /// Config file to use instead of ~/.modsync/config.yaml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download missing or outdated mods and optionally remove unlisted ones.
    Sync(SyncArgs),

    /// Resolve a single provider entry and print its descriptor.
    Resolve(ResolveArgs),

    /// Print the digest of a local file.
    Hash(HashArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Sync(args) => args.run(&config),
        Commands::Resolve(args) => args.run(&config),
        Commands::Hash(args) => args.run(),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }
    match config::load() {
        Ok(config) => Ok(config),
        Err(CoreError::HomeNotFound) => Ok(Config::default()),
        Err(err) => Err(err).context("failed to load ~/.modsync/config.yaml"),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
