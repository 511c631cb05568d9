//! Response body serialization.
//!
//! Each [`S3Serialize`] impl writes the children of its document; [`to_xml`]
//! supplies the declaration, the root element and the S3 namespace.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use s3mock_model::output::{
    GetObjectLegalHoldOutput, GetObjectLockConfigurationOutput, GetObjectRetentionOutput,
    GetObjectTaggingOutput, ListBucketsOutput,
};
use s3mock_model::types::{
    Bucket, DefaultRetention, ObjectLockConfiguration, ObjectLockEnabled, ObjectLockLegalHold,
    ObjectLockLegalHoldStatus, ObjectLockRetention, ObjectLockRetentionMode, ObjectLockRule, Owner,
    Tag, Tagging,
};

use crate::error::XmlError;

/// The S3 XML namespace.
pub const S3_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// Trait for serializing S3 types to XML.
///
/// Uses `io::Result` because `quick_xml::Writer` closures require `io::Result<()>`.
pub trait S3Serialize {
    /// Serialize this value as XML child elements into the given writer.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to the underlying writer fails.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize a value as a complete S3 XML document under `root_element`.
///
/// # Errors
///
/// Returns `XmlError` if serialization fails.
pub fn to_xml<T: S3Serialize>(root_element: &str, value: &T) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(256);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element(root_element)
        .with_attribute(("xmlns", S3_NAMESPACE))
        .write_inner_content(|w| value.serialize_xml(w))?;

    Ok(buf)
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn write_optional_text<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&str>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, v)?;
    }
    Ok(())
}

fn write_optional_i32<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<i32>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, &v.to_string())?;
    }
    Ok(())
}

fn write_optional_enum<W: Write, E: AsStr>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&E>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, v.as_str())?;
    }
    Ok(())
}

fn write_optional_timestamp<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&chrono::DateTime<chrono::Utc>>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, &format_timestamp(v))?;
    }
    Ok(())
}

/// Format a timestamp the way S3 bodies carry it: `%Y-%m-%dT%H:%M:%S%.3fZ`.
#[must_use]
pub fn format_timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

trait AsStr {
    fn as_str(&self) -> &'static str;
}

macro_rules! impl_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AsStr for $ty {
                fn as_str(&self) -> &'static str {
                    <$ty>::as_str(self)
                }
            }
        )+
    };
}

impl_as_str!(
    ObjectLockEnabled,
    ObjectLockLegalHoldStatus,
    ObjectLockRetentionMode
);

impl S3Serialize for ObjectLockLegalHold {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_enum(writer, "Status", self.status.as_ref())
    }
}

impl S3Serialize for ObjectLockRetention {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_enum(writer, "Mode", self.mode.as_ref())?;
        write_optional_timestamp(writer, "RetainUntilDate", self.retain_until_date.as_ref())
    }
}

impl S3Serialize for DefaultRetention {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer
            .create_element("DefaultRetention")
            .write_inner_content(|w| {
                write_optional_enum(w, "Mode", self.mode.as_ref())?;
                write_optional_i32(w, "Days", self.days)?;
                write_optional_i32(w, "Years", self.years)
            })?;
        Ok(())
    }
}

impl S3Serialize for ObjectLockRule {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Rule").write_inner_content(|w| {
            if let Some(ref dr) = self.default_retention {
                dr.serialize_xml(w)?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for ObjectLockConfiguration {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_optional_enum(
            writer,
            "ObjectLockEnabled",
            self.object_lock_enabled.as_ref(),
        )?;
        if let Some(ref rule) = self.rule {
            rule.serialize_xml(writer)?;
        }
        Ok(())
    }
}

impl S3Serialize for Tag {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Tag").write_inner_content(|w| {
            write_text_element(w, "Key", &self.key)?;
            write_text_element(w, "Value", &self.value)
        })?;
        Ok(())
    }
}

impl S3Serialize for Tagging {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("TagSet").write_inner_content(|w| {
            for tag in &self.tag_set {
                tag.serialize_xml(w)?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl S3Serialize for Owner {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Owner").write_inner_content(|w| {
            write_optional_text(w, "ID", self.id.as_deref())?;
            write_optional_text(w, "DisplayName", self.display_name.as_deref())
        })?;
        Ok(())
    }
}

impl S3Serialize for Bucket {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Bucket").write_inner_content(|w| {
            write_optional_text(w, "Name", self.name.as_deref())?;
            write_optional_timestamp(w, "CreationDate", self.creation_date.as_ref())
        })?;
        Ok(())
    }
}

impl S3Serialize for ListBucketsOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        if let Some(ref owner) = self.owner {
            owner.serialize_xml(writer)?;
        }
        writer.create_element("Buckets").write_inner_content(|w| {
            for bucket in &self.buckets {
                bucket.serialize_xml(w)?;
            }
            Ok(())
        })?;
        write_optional_text(writer, "Prefix", self.prefix.as_deref())
    }
}

impl S3Serialize for GetObjectLegalHoldOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        match self.legal_hold {
            Some(ref hold) => hold.serialize_xml(writer),
            None => Ok(()),
        }
    }
}

impl S3Serialize for GetObjectRetentionOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        match self.retention {
            Some(ref retention) => retention.serialize_xml(writer),
            None => Ok(()),
        }
    }
}

impl S3Serialize for GetObjectLockConfigurationOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        match self.object_lock_configuration {
            Some(ref config) => config.serialize_xml(writer),
            None => Ok(()),
        }
    }
}

impl S3Serialize for GetObjectTaggingOutput {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        self.tagging.serialize_xml(writer)
    }
}
