use crate::types::{ObjectLockLegalHold, ObjectLockRetention};

/// S3 GetObjectLegalHoldOutput.
#[derive(Debug, Clone, Default)]
pub struct GetObjectLegalHoldOutput {
    /// HTTP payload body.
    pub legal_hold: Option<ObjectLockLegalHold>,
}

/// S3 PutObjectLegalHoldOutput.
#[derive(Debug, Clone, Default)]
pub struct PutObjectLegalHoldOutput {}

/// S3 GetObjectRetentionOutput.
#[derive(Debug, Clone, Default)]
pub struct GetObjectRetentionOutput {
    /// HTTP payload body.
    pub retention: Option<ObjectLockRetention>,
}

/// S3 PutObjectRetentionOutput.
#[derive(Debug, Clone, Default)]
pub struct PutObjectRetentionOutput {}
