#![deny(missing_docs)]

//! # Upload Keys and Credentials
//!
//! Object keys and the STS policy that scopes a temporary credential to a
//! single `PutObject` on that key. Exchanging the policy for a credential is
//! delegated to a [`CredentialVendor`].

use crate::error::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Builds an object key `YYYYMMDD/<random>.<ext>` for today's date.
pub fn generate_file_key(ext: &str) -> String {
    file_key_for(Utc::now().date_naive(), ext)
}

fn file_key_for(date: NaiveDate, ext: &str) -> String {
    format!("{}/{}.{}", date.format("%Y%m%d"), Uuid::new_v4().simple(), ext)
}

/// The bucket owner's app id: the suffix after the last `-` of the bucket name.
pub fn app_id_of(bucket: &str) -> &str {
    bucket.rsplit_once('-').map_or(bucket, |(_, app_id)| app_id)
}

/// Builds a policy allowing only `PutObject` on `bucket/file_key`.
pub fn put_object_policy(bucket: &str, region: &str, file_key: &str) -> Value {
    json!({
        "version": "2.0",
        "statement": [{
            "action": ["name/cos:PutObject"],
            "effect": "allow",
            "principal": { "qcs": ["*"] },
            "resource": [format!(
                "qcs::cos:{region}:uid/{}:{bucket}/{file_key}",
                app_id_of(bucket)
            )],
        }],
    })
}

/// A short-lived upload credential handed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempCredential {
    /// Temporary secret id.
    pub tmp_secret_id: String,
    /// Temporary secret key.
    pub tmp_secret_key: String,
    /// Session token.
    pub session_token: String,
    /// Validity start, epoch seconds.
    pub start_time: i64,
    /// Expiry, epoch seconds.
    pub expired_time: i64,
}

/// Exchanges a policy for a temporary credential.
pub trait CredentialVendor: Send + Sync {
    /// Requests a credential restricted to `policy`.
    fn issue(&self, policy: &Value) -> AppResult<TempCredential>;
}

/// Bucket coordinates used to scope credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketConfig {
    /// Bucket name, `<name>-<appid>`.
    pub bucket: String,
    /// Bucket region.
    pub region: String,
}

/// Issues a credential that may upload exactly `file_key`.
pub fn temp_credential(
    vendor: &dyn CredentialVendor,
    bucket: &BucketConfig,
    file_key: &str,
) -> AppResult<TempCredential> {
    if file_key.is_empty() {
        return Err(AppError::bad_request("file key should be a non-empty string"));
    }
    vendor.issue(&put_object_policy(&bucket.bucket, &bucket.region, file_key))
}
