use crate::types::{ObjectLockLegalHold, ObjectLockRetention};

/// S3 GetObjectLegalHoldInput.
#[derive(Debug, Clone, Default)]
pub struct GetObjectLegalHoldInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// S3 PutObjectLegalHoldInput.
#[derive(Debug, Clone, Default)]
pub struct PutObjectLegalHoldInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP payload body.
    pub legal_hold: Option<ObjectLockLegalHold>,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// S3 GetObjectRetentionInput.
#[derive(Debug, Clone, Default)]
pub struct GetObjectRetentionInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// S3 PutObjectRetentionInput.
#[derive(Debug, Clone, Default)]
pub struct PutObjectRetentionInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP header: `x-amz-bypass-governance-retention`.
    pub bypass_governance_retention: Option<bool>,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP payload body.
    pub retention: Option<ObjectLockRetention>,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}
