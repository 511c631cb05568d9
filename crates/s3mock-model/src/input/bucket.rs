use crate::types::ObjectLockConfiguration;

/// S3 CreateBucketInput.
#[derive(Debug, Clone, Default)]
pub struct CreateBucketInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// `LocationConstraint` from the optional `CreateBucketConfiguration` body.
    pub location_constraint: Option<String>,
    /// HTTP header: `x-amz-bucket-object-lock-enabled`.
    pub object_lock_enabled_for_bucket: Option<bool>,
}

/// S3 DeleteBucketInput.
#[derive(Debug, Clone, Default)]
pub struct DeleteBucketInput {
    /// HTTP label (URI path).
    pub bucket: String,
}

/// S3 HeadBucketInput.
#[derive(Debug, Clone, Default)]
pub struct HeadBucketInput {
    /// HTTP label (URI path).
    pub bucket: String,
}

/// S3 ListBucketsInput.
#[derive(Debug, Clone, Default)]
pub struct ListBucketsInput {
    /// HTTP query: `prefix`.
    pub prefix: Option<String>,
}

/// S3 GetObjectLockConfigurationInput.
#[derive(Debug, Clone, Default)]
pub struct GetObjectLockConfigurationInput {
    /// HTTP label (URI path).
    pub bucket: String,
}

/// S3 PutObjectLockConfigurationInput.
#[derive(Debug, Clone, Default)]
pub struct PutObjectLockConfigurationInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP payload body.
    pub object_lock_configuration: Option<ObjectLockConfiguration>,
}
