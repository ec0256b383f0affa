#![deny(missing_docs)]

//! # Upload Policy Command
//!
//! Generates a fresh object key and prints the put-only policy an STS call
//! would be made with. Useful when debugging bucket permissions.

use crate::error::CliResult;
use clap::Args;
use llmops_core::upload::{generate_file_key, put_object_policy};
use serde_json::json;
use std::io::Write;

/// Arguments for the upload-policy command.
#[derive(Args, Debug, Clone)]
pub struct UploadPolicyArgs {
    /// File extension of the object, without the dot.
    #[clap(long)]
    pub ext: String,

    /// Bucket name, `<name>-<appid>`.
    #[clap(long, env = "COS_BUCKET")]
    pub bucket: String,

    /// Bucket region.
    #[clap(long, env = "COS_REGION")]
    pub region: String,
}

/// Writes `{fileKey, policy}` to `out`.
pub fn execute(args: &UploadPolicyArgs, out: &mut impl Write) -> CliResult<()> {
    let ext = args.ext.trim_start_matches('.');
    let file_key = generate_file_key(ext);
    let policy = put_object_policy(&args.bucket, &args.region, &file_key);
    serde_json::to_writer_pretty(&mut *out, &json!({ "fileKey": file_key, "policy": policy }))?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_policy_targets_generated_key() {
        let mut out = Vec::new();
        execute(
            &UploadPolicyArgs {
                ext: ".png".into(),
                bucket: "assets-1250000000".into(),
                region: "ap-guangzhou".into(),
            },
            &mut out,
        )
        .unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        let key = value["fileKey"].as_str().unwrap();
        assert!(key.ends_with(".png") && !key.ends_with("..png"));
        let resource = value["policy"]["statement"][0]["resource"][0].as_str().unwrap();
        assert!(resource.ends_with(&format!("assets-1250000000/{key}")));
    }
}
