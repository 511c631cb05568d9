//! The s3mock provider.
//!
//! [`S3Provider`] owns the bucket registry and the configuration. The
//! individual S3 operations live in the [`crate::ops`] submodules as
//! `handle_*` methods on this type.

use std::sync::Arc;

use crate::config::S3Config;
use crate::state::S3ServiceState;
use crate::state::object::Owner;

/// The S3 provider: process-wide state plus configuration.
///
/// Both fields are `Arc`-wrapped, so cloning is cheap and every clone sees
/// the same buckets.
///
/// # Examples
///
/// ```
/// use s3mock_core::S3Provider;
/// use s3mock_core::config::S3Config;
/// use s3mock_model::input::CreateBucketInput;
///
/// # tokio_test::block_on(async {
/// let provider = S3Provider::new(S3Config::default());
/// assert!(provider.state().list_buckets().is_empty());
///
/// provider
///     .handle_create_bucket(CreateBucketInput {
///         bucket: "my-bucket".to_owned(),
///         object_lock_enabled_for_bucket: Some(true),
///         ..CreateBucketInput::default()
///     })
///     .await
///     .unwrap();
/// assert!(provider.state().bucket_exists("my-bucket"));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct S3Provider {
    /// Bucket and object state.
    pub(crate) state: Arc<S3ServiceState>,
    /// Provider configuration.
    pub(crate) config: Arc<S3Config>,
    /// Owner stamped on new buckets and versions.
    pub(crate) owner: Owner,
}

impl S3Provider {
    /// Create a new provider with empty state.
    #[must_use]
    pub fn new(config: S3Config) -> Self {
        Self {
            state: Arc::new(S3ServiceState::new()),
            config: Arc::new(config),
            owner: Owner::default(),
        }
    }

    /// Returns a reference to the service state.
    #[must_use]
    pub fn state(&self) -> &S3ServiceState {
        &self.state
    }

    /// Returns a reference to the provider configuration.
    #[must_use]
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// Drop every bucket and object.
    pub fn reset(&self) {
        self.state.reset();
    }
}
