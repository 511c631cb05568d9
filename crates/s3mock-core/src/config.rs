//! S3-specific configuration.
//!
//! Provides [`S3Config`] for configuring the s3mock service. Values are
//! loaded from environment variables with the same names the server
//! documents in its README.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default upper bound on a single object body (5 GiB).
pub const DEFAULT_MAX_OBJECT_SIZE: u64 = 5 * 1024 * 1024 * 1024;

/// S3 service configuration.
///
/// All fields have sensible defaults. Configuration can be loaded from
/// environment variables via [`S3Config::from_env`].
///
/// # Examples
///
/// ```
/// use s3mock_core::config::S3Config;
///
/// let config = S3Config::default();
/// assert_eq!(config.gateway_listen, "0.0.0.0:4566");
/// assert!(!config.legal_hold_creates_missing_object);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    /// Bind address for the gateway (e.g. `"0.0.0.0:4566"`).
    #[builder(default = String::from("0.0.0.0:4566"))]
    pub gateway_listen: String,

    /// Whether S3 virtual-hosted-style addressing is enabled.
    #[builder(default = true)]
    pub s3_virtual_hosting: bool,

    /// Domain for S3 virtual hosting resolution.
    #[builder(default = String::from("s3.localhost"))]
    pub s3_domain: String,

    /// Default AWS region for this S3 service instance.
    #[builder(default = String::from("us-east-1"))]
    pub default_region: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Whether `PutObjectLegalHold` on a missing key creates an empty
    /// version carrying only the hold, instead of failing with `NoSuchKey`.
    #[builder(default = false)]
    pub legal_hold_creates_missing_object: bool,

    /// Largest object body accepted by `PutObject`, in bytes.
    #[builder(default = DEFAULT_MAX_OBJECT_SIZE)]
    pub max_object_size: u64,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:4566"),
            s3_virtual_hosting: true,
            s3_domain: String::from("s3.localhost"),
            default_region: String::from("us-east-1"),
            log_level: String::from("info"),
            legal_hold_creates_missing_object: false,
            max_object_size: DEFAULT_MAX_OBJECT_SIZE,
        }
    }
}

impl S3Config {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:4566` |
    /// | `S3_VIRTUAL_HOSTING` | `true` |
    /// | `S3_DOMAIN` | `s3.localhost` |
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `LOG_LEVEL` | `info` |
    /// | `S3_LEGAL_HOLD_CREATE_MISSING` | `false` |
    /// | `S3_MAX_OBJECT_SIZE` | `5368709120` |
    ///
    /// # Examples
    ///
    /// ```
    /// use s3mock_core::config::S3Config;
    ///
    /// let config = S3Config::from_env();
    /// assert!(!config.gateway_listen.is_empty());
    /// ```
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("S3_VIRTUAL_HOSTING") {
            config.s3_virtual_hosting = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("S3_DOMAIN") {
            config.s3_domain = v;
        }
        if let Ok(v) = std::env::var("DEFAULT_REGION") {
            config.default_region = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("S3_LEGAL_HOLD_CREATE_MISSING") {
            config.legal_hold_creates_missing_object = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("S3_MAX_OBJECT_SIZE") {
            if let Ok(n) = v.parse::<u64>() {
                config.max_object_size = n;
            }
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
