//! Object lock rules: legal hold state, retention checks and default retention.
//!
//! Nothing here owns storage. Every function inspects or computes lock
//! fields for a version it is handed, and the ops layer applies the result
//! while it still holds the bucket's object store write guard. Validation
//! therefore always runs before any field is touched.
//!
//! Legal hold and retention are independent. A version can be mutated only
//! when neither of them blocks it.

use chrono::{DateTime, Duration, Months, Utc};
use s3mock_model::types::{
    DefaultRetention, ObjectLockConfiguration, ObjectLockEnabled, ObjectLockLegalHoldStatus,
    ObjectLockRetention, ObjectLockRetentionMode, ObjectLockRule,
};

use crate::error::S3ServiceError;
use crate::state::{Retention, S3Object};

/// Longest default retention S3 accepts, in days.
const MAX_RETENTION_DAYS: u32 = 36_500;
/// Longest default retention S3 accepts, in years.
const MAX_RETENTION_YEARS: u32 = 100;

const PAST_RETAIN_UNTIL: &str = "The retain until date must be in the future!";
const MISSING_LOCK_CONFIGURATION: &str = "Bucket is missing Object Lock Configuration";

// ---------------------------------------------------------------------------
// Legal hold state
// ---------------------------------------------------------------------------

/// Where a version stands on the legal hold axis.
///
/// The two absence states are kept apart on purpose: a plain bucket has no
/// lock configuration at all, while a version in a lock-enabled bucket
/// simply never had a hold set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalHoldState {
    /// The owning bucket was not created with object lock.
    NoBucketLockConfig,
    /// Lock-enabled bucket, but no hold was ever set on this version.
    NoObjectLockConfig,
    /// Hold is ON.
    On,
    /// Hold was explicitly turned OFF.
    Off,
}

impl LegalHoldState {
    /// Derive the state from the bucket flag and the stored hold field.
    #[must_use]
    pub fn derive(object_lock_enabled: bool, hold: Option<ObjectLockLegalHoldStatus>) -> Self {
        match (object_lock_enabled, hold) {
            (false, _) => Self::NoBucketLockConfig,
            (true, None) => Self::NoObjectLockConfig,
            (true, Some(ObjectLockLegalHoldStatus::On)) => Self::On,
            (true, Some(ObjectLockLegalHoldStatus::Off)) => Self::Off,
        }
    }

    /// The status `GetObjectLegalHold` reports, or the matching 404.
    ///
    /// # Errors
    ///
    /// - [`S3ServiceError::NoBucketLockConfig`] for
    ///   [`LegalHoldState::NoBucketLockConfig`].
    /// - [`S3ServiceError::NoObjectLockConfig`] for
    ///   [`LegalHoldState::NoObjectLockConfig`].
    pub fn into_status(
        self,
        bucket: &str,
        key: &str,
    ) -> Result<ObjectLockLegalHoldStatus, S3ServiceError> {
        match self {
            Self::NoBucketLockConfig => Err(S3ServiceError::NoBucketLockConfig {
                bucket: bucket.to_owned(),
            }),
            Self::NoObjectLockConfig => Err(S3ServiceError::NoObjectLockConfig {
                key: key.to_owned(),
            }),
            Self::On => Ok(ObjectLockLegalHoldStatus::On),
            Self::Off => Ok(ObjectLockLegalHoldStatus::Off),
        }
    }
}

/// Pull the status out of a `<LegalHold>` document.
///
/// # Errors
///
/// Returns [`S3ServiceError::MalformedXml`] when the body or `<Status>` is missing.
pub fn requested_legal_hold(
    legal_hold: Option<&s3mock_model::types::ObjectLockLegalHold>,
) -> Result<ObjectLockLegalHoldStatus, S3ServiceError> {
    legal_hold
        .and_then(|lh| lh.status)
        .ok_or_else(|| S3ServiceError::MalformedXml {
            detail: "LegalHold requires a Status of ON or OFF".to_owned(),
        })
}

// ---------------------------------------------------------------------------
// Enforcement
// ---------------------------------------------------------------------------

/// Fail with [`S3ServiceError::ObjectLocked`] if `object` may not be deleted
/// or overwritten right now.
///
/// Blocks on a legal hold that is ON, on active COMPLIANCE retention, and on
/// active GOVERNANCE retention unless `bypass_governance` is set.
///
/// # Errors
///
/// Returns [`S3ServiceError::ObjectLocked`] when the version is protected.
pub fn check_mutable(
    object: &S3Object,
    bypass_governance: bool,
    now: DateTime<Utc>,
) -> Result<(), S3ServiceError> {
    let retention_blocks = object
        .retention
        .filter(|r| r.is_active(now))
        .is_some_and(|r| match r.mode {
            ObjectLockRetentionMode::Compliance => true,
            ObjectLockRetentionMode::Governance => !bypass_governance,
        });

    if object.is_legal_hold_on() || retention_blocks {
        return Err(locked(object));
    }
    Ok(())
}

fn locked(object: &S3Object) -> S3ServiceError {
    S3ServiceError::ObjectLocked {
        key: object.key.clone(),
        version_id: object.version_id.clone(),
    }
}

// ---------------------------------------------------------------------------
// Retention
// ---------------------------------------------------------------------------

/// Turn a `<Retention>` document into the value to store.
///
/// `None` (or a document with neither field) asks for the retention to be
/// removed.
///
/// # Errors
///
/// Returns [`S3ServiceError::MalformedXml`] when only one of `Mode` and
/// `RetainUntilDate` is present.
pub fn requested_retention(
    retention: Option<&ObjectLockRetention>,
) -> Result<Option<Retention>, S3ServiceError> {
    match retention.map(|r| (r.mode, r.retain_until_date)) {
        None | Some((None, None)) => Ok(None),
        Some((Some(mode), Some(retain_until))) => Ok(Some(Retention { mode, retain_until })),
        Some(_) => Err(S3ServiceError::MalformedXml {
            detail: "Retention requires both Mode and RetainUntilDate".to_owned(),
        }),
    }
}

/// Check that `object`'s retention may be replaced by `requested`.
///
/// - A new retain-until date must lie in the future.
/// - Active COMPLIANCE retention can only be extended, never shortened,
///   relaxed to GOVERNANCE or removed.
/// - Active GOVERNANCE retention can be extended or upgraded to COMPLIANCE
///   freely. Shortening or removing it needs `bypass_governance`.
///
/// # Errors
///
/// - [`S3ServiceError::InvalidArgument`] for a past retain-until date.
/// - [`S3ServiceError::ObjectLocked`] when the active retention forbids the change.
pub fn validate_retention_update(
    object: &S3Object,
    requested: Option<&Retention>,
    bypass_governance: bool,
    now: DateTime<Utc>,
) -> Result<(), S3ServiceError> {
    if let Some(requested) = requested {
        if !requested.is_active(now) {
            return Err(S3ServiceError::InvalidArgument {
                message: PAST_RETAIN_UNTIL.to_owned(),
            });
        }
    }

    let Some(current) = object.retention.filter(|r| r.is_active(now)) else {
        return Ok(());
    };

    let weakens = requested.is_none_or(|r| r.retain_until < current.retain_until);
    let allowed = match current.mode {
        ObjectLockRetentionMode::Compliance => {
            !weakens && requested.is_some_and(|r| r.mode == ObjectLockRetentionMode::Compliance)
        }
        ObjectLockRetentionMode::Governance => !weakens || bypass_governance,
    };

    if allowed { Ok(()) } else { Err(locked(object)) }
}

/// Retention as `GetObjectRetention` reports it.
///
/// # Errors
///
/// Returns [`S3ServiceError::NoObjectLockConfig`] when the version has no retention.
pub fn stored_retention(object: &S3Object) -> Result<ObjectLockRetention, S3ServiceError> {
    object
        .retention
        .map(ObjectLockRetention::from)
        .ok_or_else(|| S3ServiceError::NoObjectLockConfig {
            key: object.key.clone(),
        })
}

// ---------------------------------------------------------------------------
// PutObject lock headers
// ---------------------------------------------------------------------------

/// Lock fields supplied as `x-amz-object-lock-*` headers on `PutObject`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectLockHeaders {
    /// `x-amz-object-lock-legal-hold`.
    pub legal_hold: Option<ObjectLockLegalHoldStatus>,
    /// `x-amz-object-lock-mode`.
    pub mode: Option<ObjectLockRetentionMode>,
    /// `x-amz-object-lock-retain-until-date`.
    pub retain_until: Option<DateTime<Utc>>,
}

impl ObjectLockHeaders {
    fn is_empty(&self) -> bool {
        self.legal_hold.is_none() && self.mode.is_none() && self.retain_until.is_none()
    }
}

/// Lock fields a new version starts with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitialLock {
    /// Initial legal hold.
    pub legal_hold: Option<ObjectLockLegalHoldStatus>,
    /// Initial retention, explicit or from the bucket default.
    pub retention: Option<Retention>,
}

/// Work out the lock fields for a version created by `PutObject`.
///
/// Explicit headers win over the bucket's default retention rule.
///
/// # Errors
///
/// - [`S3ServiceError::InvalidRequest`] when lock headers target a bucket
///   without object lock.
/// - [`S3ServiceError::InvalidArgument`] when mode and date are not supplied
///   together, or the date is in the past.
pub fn initial_lock(
    object_lock_enabled: bool,
    default_rule: Option<&DefaultRetentionRule>,
    headers: ObjectLockHeaders,
    now: DateTime<Utc>,
) -> Result<InitialLock, S3ServiceError> {
    if !object_lock_enabled {
        if headers.is_empty() {
            return Ok(InitialLock::default());
        }
        return Err(S3ServiceError::InvalidRequest {
            message: MISSING_LOCK_CONFIGURATION.to_owned(),
        });
    }

    let retention = match (headers.mode, headers.retain_until) {
        (Some(mode), Some(retain_until)) => {
            let retention = Retention { mode, retain_until };
            if !retention.is_active(now) {
                return Err(S3ServiceError::InvalidArgument {
                    message: PAST_RETAIN_UNTIL.to_owned(),
                });
            }
            Some(retention)
        }
        (None, None) => default_rule
            .map(|rule| rule.retention_from(now))
            .transpose()?,
        _ => {
            return Err(S3ServiceError::InvalidArgument {
                message: "x-amz-object-lock-retain-until-date and x-amz-object-lock-mode \
                          must both be supplied"
                    .to_owned(),
            });
        }
    };

    Ok(InitialLock {
        legal_hold: headers.legal_hold,
        retention,
    })
}

// ---------------------------------------------------------------------------
// Default retention rule
// ---------------------------------------------------------------------------

/// Length of a default retention period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionPeriod {
    /// A number of days.
    Days(u32),
    /// A number of years.
    Years(u32),
}

/// A bucket's default retention: applied to every new version that does
/// not carry its own lock headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultRetentionRule {
    /// Mode stamped on new versions.
    pub mode: ObjectLockRetentionMode,
    /// How far past creation the retention runs.
    pub period: RetentionPeriod,
}

impl DefaultRetentionRule {
    /// Validate a `PutObjectLockConfiguration` body into an optional rule.
    ///
    /// # Errors
    ///
    /// - [`S3ServiceError::MalformedXml`] when `ObjectLockEnabled` is missing,
    ///   the rule lacks a mode, or it sets both or neither of `Days`/`Years`.
    /// - [`S3ServiceError::InvalidArgument`] for a period that is not
    ///   positive or exceeds the S3 maximum.
    pub fn from_configuration(
        config: &ObjectLockConfiguration,
    ) -> Result<Option<Self>, S3ServiceError> {
        if config.object_lock_enabled.is_none() {
            return Err(malformed("ObjectLockEnabled must be Enabled"));
        }

        let Some(default) = config
            .rule
            .as_ref()
            .and_then(|rule| rule.default_retention.as_ref())
        else {
            return Ok(None);
        };

        let mode = default
            .mode
            .ok_or_else(|| malformed("DefaultRetention requires a Mode"))?;
        let period = match (default.days, default.years) {
            (Some(days), None) => RetentionPeriod::Days(positive(days, MAX_RETENTION_DAYS)?),
            (None, Some(years)) => RetentionPeriod::Years(positive(years, MAX_RETENTION_YEARS)?),
            _ => return Err(malformed("DefaultRetention requires exactly one of Days or Years")),
        };

        Ok(Some(Self { mode, period }))
    }

    /// The wire configuration `GetObjectLockConfiguration` returns for a
    /// lock-enabled bucket with this (optional) rule.
    #[must_use]
    pub fn to_configuration(rule: Option<&Self>) -> ObjectLockConfiguration {
        ObjectLockConfiguration {
            object_lock_enabled: Some(ObjectLockEnabled::Enabled),
            rule: rule.map(|rule| {
                let (days, years) = match rule.period {
                    RetentionPeriod::Days(d) => (Some(to_wire(d)), None),
                    RetentionPeriod::Years(y) => (None, Some(to_wire(y))),
                };
                ObjectLockRule {
                    default_retention: Some(DefaultRetention {
                        days,
                        mode: Some(rule.mode),
                        years,
                    }),
                }
            }),
        }
    }

    /// Retention for a version created at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`S3ServiceError::InvalidArgument`] if the date overflows.
    pub fn retention_from(&self, now: DateTime<Utc>) -> Result<Retention, S3ServiceError> {
        let retain_until = match self.period {
            RetentionPeriod::Days(days) => now.checked_add_signed(Duration::days(i64::from(days))),
            RetentionPeriod::Years(years) => {
                now.checked_add_months(Months::new(years.saturating_mul(12)))
            }
        }
        .ok_or_else(|| S3ServiceError::InvalidArgument {
            message: "Default retention period is out of range".to_owned(),
        })?;

        Ok(Retention {
            mode: self.mode,
            retain_until,
        })
    }
}

fn positive(value: i32, max: u32) -> Result<u32, S3ServiceError> {
    u32::try_from(value)
        .ok()
        .filter(|v| (1..=max).contains(v))
        .ok_or_else(|| S3ServiceError::InvalidArgument {
            message: "Default retention period must be a positive integer value".to_owned(),
        })
}

// Periods are capped well below i32::MAX by `positive`.
#[allow(clippy::cast_possible_wrap)]
fn to_wire(value: u32) -> i32 {
    value as i32
}

fn malformed(detail: &str) -> S3ServiceError {
    S3ServiceError::MalformedXml {
        detail: detail.to_owned(),
    }
}
