//! Sashimono CLI - Main entry point

mod generate;
mod init;
mod package;
mod show;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sashimono - bridge between a host build system and a downstream builder
#[derive(Parser, Debug)]
#[command(name = "sashimono")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write .sashimono/config.json with the default settings
    Init {
        /// Project root
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
    /// Check the host lifecycle and write the dependency manifest
    Generate(generate::GenerateArgs),
    /// Package a classes directory into the local repository layout
    Package(package::PackageArgs),
    /// Print the manifest of a project
    Show {
        /// Project root
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", render_error(&e));
            if let Some(command) = corrective_command(&e) {
                eprintln!("\n  Run: {}", command);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Init { root, force } => init::init_project(&root, force),
        Command::Generate(args) => generate::run(args),
        Command::Package(args) => package::run(args),
        Command::Show { root, json } => show::run(&root, json),
    }
}

/// The bridge error somewhere in the chain, if any
fn bridge_error(err: &anyhow::Error) -> Option<&sashimono_foundation::Error> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<sashimono_foundation::Error>())
}

/// Errors the operator can act on print alone; anything else prints with its
/// whole context chain.
fn render_error(err: &anyhow::Error) -> String {
    match bridge_error(err) {
        Some(inner) if inner.is_user_facing() => format!("Error: {}", inner),
        _ => format!("Error: {:#}", err),
    }
}

/// Command the operator should run instead, if the failure carries one
fn corrective_command(err: &anyhow::Error) -> Option<&str> {
    bridge_error(err).and_then(|e| e.corrective_command())
}
