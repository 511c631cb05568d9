//! Shared S3 shapes used by object lock, tagging and bucket listing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a wire string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// The enum being parsed.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Implements `as_str`, `Display` and `FromStr` for a wire enum.
macro_rules! wire_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            /// Returns the wire value of this variant.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Legal hold status of an object version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectLockLegalHoldStatus {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

wire_enum!(ObjectLockLegalHoldStatus, "legal hold status", {
    On => "ON",
    Off => "OFF",
});

/// Retention mode of an object version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectLockRetentionMode {
    #[serde(rename = "GOVERNANCE")]
    Governance,
    #[serde(rename = "COMPLIANCE")]
    Compliance,
}

wire_enum!(ObjectLockRetentionMode, "retention mode", {
    Governance => "GOVERNANCE",
    Compliance => "COMPLIANCE",
});

/// The only value S3 accepts for `ObjectLockEnabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectLockEnabled {
    #[default]
    Enabled,
}

wire_enum!(ObjectLockEnabled, "object lock enabled", {
    Enabled => "Enabled",
});

/// `<LegalHold>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectLockLegalHold {
    pub status: Option<ObjectLockLegalHoldStatus>,
}

/// `<Retention>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectLockRetention {
    pub mode: Option<ObjectLockRetentionMode>,
    pub retain_until_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// `<ObjectLockConfiguration>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectLockConfiguration {
    pub object_lock_enabled: Option<ObjectLockEnabled>,
    pub rule: Option<ObjectLockRule>,
}

/// Bucket-wide object lock rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectLockRule {
    pub default_retention: Option<DefaultRetention>,
}

/// Default retention applied to new object versions. Exactly one of
/// `days` and `years` is set in a valid rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultRetention {
    pub days: Option<i32>,
    pub mode: Option<ObjectLockRetentionMode>,
    pub years: Option<i32>,
}

/// A single object tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// `<Tagging>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tagging {
    pub tag_set: Vec<Tag>,
}

/// `<CreateBucketConfiguration>` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateBucketConfiguration {
    pub location_constraint: Option<String>,
}

/// Entry of a `ListBuckets` response.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    pub creation_date: Option<chrono::DateTime<chrono::Utc>>,
    pub name: Option<String>,
}

/// Bucket or object owner.
#[derive(Debug, Clone, Default)]
pub struct Owner {
    pub display_name: Option<String>,
    pub id: Option<String>,
}
