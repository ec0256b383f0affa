#![deny(missing_docs)]

//! # LLM Ops CLI
//!
//! Operator tooling for the tool service.
//!
//! Supported Commands:
//! - `validate`: Checks a provider schema file and lists the tools it defines.
//! - `builtin`: Prints the builtin tool catalog as JSON.
//! - `upload-policy`: Prints a fresh object key with its put-only policy.

use clap::{Parser, Subcommand};
use log::error;
use std::process::ExitCode;

mod builtin;
mod error;
mod upload;
mod validate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "LLM Ops tool service CLI")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validates a provider schema file and lists its tools.
    Validate(validate::ValidateArgs),
    /// Prints the builtin tool catalog.
    Builtin(builtin::BuiltinArgs),
    /// Prints a fresh object key and the policy scoping uploads to it.
    UploadPolicy(upload::UploadPolicyArgs),
}

fn main() -> ExitCode {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    let result = match &cli.command {
        Commands::Validate(args) => validate::execute(args, &mut stdout),
        Commands::Builtin(args) => builtin::execute(args, &mut stdout),
        Commands::UploadPolicy(args) => upload::execute(args, &mut stdout),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
