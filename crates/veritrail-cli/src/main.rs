//! Veritrail CLI
//!
//! Command-line interface for the attestation pipeline

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "veritrail")]
#[command(about = "Veritrail - Verifiable agent execution attestation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the input root over local files or hex digests
    InputRoot(commands::input_root::InputRootArgs),
    /// Build (and optionally sign) a root credential
    Credential(commands::credential::CredentialArgs),
    /// Push proof artifacts to the content-addressed store
    Publish(commands::publish::PublishArgs),
    /// Anchor a root on the claims registry
    Anchor(commands::anchor::AnchorArgs),
    /// Verify an anchored claim against recomputed expectations
    Verify(commands::verify::VerifyArgs),
}

fn main() {
    veritrail_core::logging::init(config::log_profile());
    let cli = Cli::parse();

    let result = config::Config::from_env()
        .map_err(Into::into)
        .and_then(|config| match cli.command {
            Commands::InputRoot(args) => commands::input_root::execute(args),
            Commands::Credential(args) => commands::credential::execute(args, &config),
            Commands::Publish(args) => commands::publish::execute(args, &config),
            Commands::Anchor(args) => commands::anchor::execute(args, &config),
            Commands::Verify(args) => commands::verify::execute(args, &config),
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
