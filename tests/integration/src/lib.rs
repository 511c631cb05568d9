//! End-to-end tests for the s3mock server.
//!
//! These tests require a running server at `localhost:4566` (override with
//! `S3_ENDPOINT_URL`). They are marked `#[ignore]` so they don't run during
//! normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p s3mock-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::types::{ObjectLockLegalHold, ObjectLockLegalHoldStatus};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
fn endpoint_url() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Create a configured S3 client pointing at the local server.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket, optionally with object lock, and return its name.
/// Caller is responsible for cleanup.
pub async fn create_test_bucket(
    client: &aws_sdk_s3::Client,
    prefix: &str,
    object_lock: bool,
) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .object_lock_enabled_for_bucket(object_lock)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

/// Put a small object and return its version ID, if the bucket reports one.
pub async fn put_test_object(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Option<String> {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(aws_sdk_s3::primitives::ByteStream::from_static(b"payload"))
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to put {bucket}/{key}: {e}"))
        .version_id()
        .map(ToOwned::to_owned)
}

/// Legal hold document with the given status.
#[must_use]
pub fn legal_hold(status: ObjectLockLegalHoldStatus) -> ObjectLockLegalHold {
    ObjectLockLegalHold::builder().status(status).build()
}

/// Release holds, delete the given versions and then the bucket.
///
/// Errors are ignored: cleanup is best effort.
pub async fn cleanup_bucket(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    versions: &[(&str, Option<String>)],
) {
    for (key, version_id) in versions {
        let _ = client
            .put_object_legal_hold()
            .bucket(bucket)
            .key(*key)
            .set_version_id(version_id.clone())
            .legal_hold(legal_hold(ObjectLockLegalHoldStatus::Off))
            .send()
            .await;
        let _ = client
            .delete_object()
            .bucket(bucket)
            .key(*key)
            .set_version_id(version_id.clone())
            .bypass_governance_retention(true)
            .send()
            .await;
    }
    let _ = client.delete_bucket().bucket(bucket).send().await;
}

mod test_bucket;
mod test_legal_hold;
mod test_object;
mod test_retention;
