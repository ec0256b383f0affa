#![deny(missing_docs)]

//! # Builtin Command
//!
//! Prints the builtin catalog, or a single tool of it, as pretty JSON.

use crate::error::CliResult;
use clap::Args;
use llmops_core::builtin::{all_builtin_tools, builtin_tool_categories, specific_builtin_tool};
use llmops_core::AppError;
use serde_json::json;
use std::io::Write;

/// Arguments for the builtin command.
#[derive(Args, Debug, Clone)]
pub struct BuiltinArgs {
    /// Provider name; with `--tool`, prints only that tool.
    #[clap(long, requires = "tool")]
    pub provider: Option<String>,

    /// Tool name within `--provider`.
    #[clap(long, requires = "provider")]
    pub tool: Option<String>,
}

/// Writes the catalog (or one tool) to `out`.
pub fn execute(args: &BuiltinArgs, out: &mut impl Write) -> CliResult<()> {
    let value = match (&args.provider, &args.tool) {
        (Some(provider), Some(tool)) => {
            let tool = specific_builtin_tool(provider, tool)
                .ok_or_else(|| AppError::not_found("the requested tool does not exist"))?;
            serde_json::to_value(tool)?
        }
        _ => json!({
            "categories": builtin_tool_categories(),
            "providers": all_builtin_tools(),
        }),
    };
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serde_json::Value;

    #[test]
    fn test_prints_whole_catalog() {
        let mut out = Vec::new();
        execute(
            &BuiltinArgs {
                provider: None,
                tool: None,
            },
            &mut out,
        )
        .unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert!(!value["categories"].as_array().unwrap().is_empty());
        assert!(!value["providers"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_prints_single_tool() {
        let mut out = Vec::new();
        execute(
            &BuiltinArgs {
                provider: Some("dalle".into()),
                tool: Some("dalle3".into()),
            },
            &mut out,
        )
        .unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["name"], "dalle3");
    }

    #[test]
    fn test_unknown_tool() {
        let mut out = Vec::new();
        let res = execute(
            &BuiltinArgs {
                provider: Some("dalle".into()),
                tool: Some("nope".into()),
            },
            &mut out,
        );
        assert!(matches!(res, Err(CliError::App(AppError::NotFound(_)))));
    }
}
