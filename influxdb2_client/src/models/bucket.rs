//! Buckets

use serde::{Deserialize, Serialize};

/// The subset of a bucket the benchmark tooling needs. Other fields of the
/// server's response are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bucket {
    /// Bucket ID
    #[serde(default)]
    pub id: String,
    /// Bucket name
    pub name: String,
    /// `user` or `system`
    #[serde(rename = "type", default)]
    pub bucket_type: String,
}

impl Bucket {
    /// Whether the server created this bucket for its own use.
    pub fn is_system(&self) -> bool {
        self.bucket_type == "system"
    }
}

/// Response of the bucket listing endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Buckets {
    /// The buckets on this page
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

/// Body of a bucket creation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBucketRequest {
    /// Bucket name
    pub name: String,
    /// Owning organization ID
    #[serde(rename = "orgID")]
    pub org_id: String,
    /// Always `user` for buckets created by clients
    #[serde(rename = "type")]
    pub bucket_type: String,
    /// Retention rules; empty keeps data forever
    pub retention_rules: Vec<RetentionRule>,
    /// Free-form description
    pub description: String,
}

impl PostBucketRequest {
    /// A request for a user bucket with infinite retention.
    pub fn new(org_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            org_id: org_id.into(),
            bucket_type: "user".to_owned(),
            retention_rules: vec![],
            description: "tsbs load test".to_owned(),
        }
    }
}

/// Rule to expire or retain data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionRule {
    /// Expiry type, `expire`
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Duration in seconds for how long data will be kept in the database.
    pub every_seconds: i64,
}
