use crate::types::{Bucket, ObjectLockConfiguration, Owner};

/// S3 CreateBucketOutput.
#[derive(Debug, Clone, Default)]
pub struct CreateBucketOutput {
    /// HTTP header: `Location`.
    pub location: Option<String>,
}

/// S3 HeadBucketOutput.
#[derive(Debug, Clone, Default)]
pub struct HeadBucketOutput {
    /// HTTP header: `x-amz-bucket-region`.
    pub bucket_region: Option<String>,
}

/// S3 ListBucketsOutput.
#[derive(Debug, Clone, Default)]
pub struct ListBucketsOutput {
    pub buckets: Vec<Bucket>,
    pub owner: Option<Owner>,
    pub prefix: Option<String>,
}

/// S3 GetObjectLockConfigurationOutput.
#[derive(Debug, Clone, Default)]
pub struct GetObjectLockConfigurationOutput {
    /// HTTP payload body.
    pub object_lock_configuration: Option<ObjectLockConfiguration>,
}

/// S3 PutObjectLockConfigurationOutput.
#[derive(Debug, Clone, Default)]
pub struct PutObjectLockConfigurationOutput {}
