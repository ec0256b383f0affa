#![deny(missing_docs)]

//! # Validate Command
//!
//! Runs the schema validator over a file and prints one line per tool.

use crate::error::CliResult;
use clap::Args;
use llmops_core::api_tool::format_api_tools;
use llmops_core::validate_openapi_schema;
use log::info;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the validate command.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the schema JSON file.
    pub file: PathBuf,
}

/// Validates `args.file`, writing the tool list to `out`.
pub fn execute(args: &ValidateArgs, out: &mut impl Write) -> CliResult<()> {
    let input = std::fs::read_to_string(&args.file)?;
    let openapi = validate_openapi_schema(&input)?;
    let tools = format_api_tools(&openapi);
    info!("{} is valid ({} tools)", args.file.display(), tools.len());

    writeln!(out, "{}", openapi.description)?;
    for tool in tools {
        writeln!(
            out,
            "{:<8}{:<32}{}",
            tool.method.as_str().to_uppercase(),
            tool.name,
            tool.url
        )?;
    }
    Ok(())
}
