//! Request body deserialization.
//!
//! The caller consumes the root start tag; each [`S3Deserialize`] impl reads
//! child elements until the matching end tag. Unknown children are skipped,
//! unknown enum values are rejected.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use s3mock_model::types::{
    CreateBucketConfiguration, DefaultRetention, ObjectLockConfiguration, ObjectLockLegalHold,
    ObjectLockRetention, ObjectLockRule, Tag, Tagging,
};

use crate::error::XmlError;

/// Trait for deserializing S3 types from XML.
pub trait S3Deserialize: Sized {
    /// Deserialize an instance from a reader positioned just after the
    /// element's opening tag.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed or a value does not parse.
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError>;
}

/// Deserialize an S3 XML document into a typed value.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or deserialization fails.
pub fn from_xml<T: S3Deserialize>(xml: &[u8]) -> Result<T, XmlError> {
    let mut reader = Reader::from_reader(xml);

    loop {
        match reader.read_event()? {
            Event::Start(_) => return T::deserialize_xml(&mut reader),
            Event::Eof => return Err(XmlError::MissingElement("root element".to_owned())),
            // declaration, comments, whitespace
            _ => {}
        }
    }
}

/// Walk the children of the current element, calling `on_child` with each
/// child's tag name. `on_child` must consume the child (via
/// [`read_text_content`], a nested `deserialize_xml`, or [`skip_element`]).
fn for_each_child<F>(
    reader: &mut Reader<&[u8]>,
    context: &str,
    mut on_child: F,
) -> Result<(), XmlError>
where
    F: FnMut(&mut Reader<&[u8]>, &str) -> Result<(), XmlError>,
{
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let tag = std::str::from_utf8(name.as_ref())
                    .map_err(|err| XmlError::ParseError(err.to_string()))?
                    .to_owned();
                on_child(reader, &tag)?;
            }
            // `<Tag/>` carries nothing we read
            Event::Empty(_) => {}
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(format!(
                    "unexpected EOF in {context}"
                )));
            }
            _ => {}
        }
    }
}

/// Collect the text of a leaf element, resolving entity and character
/// references. Whitespace is kept as sent.
fn read_text_content(reader: &mut Reader<&[u8]>) -> Result<String, XmlError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&decoded);
            }
            Event::CData(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&decoded);
            }
            Event::GeneralRef(e) => {
                if let Some(ch) = e.resolve_char_ref()? {
                    text.push(ch);
                } else {
                    let name = e
                        .decode()
                        .map_err(|err| XmlError::ParseError(err.to_string()))?;
                    let resolved = resolve_predefined_entity(&name).ok_or_else(|| {
                        XmlError::ParseError(format!("unknown entity '&{name};'"))
                    })?;
                    text.push_str(resolved);
                }
            }
            Event::End(_) => return Ok(text),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while reading text content".to_owned(),
                ));
            }
            _ => {}
        }
    }
}

fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while skipping element".to_owned(),
                ));
            }
            _ => {}
        }
    }
}

fn parse_i32(s: &str) -> Result<i32, XmlError> {
    s.trim()
        .parse::<i32>()
        .map_err(|e| XmlError::ParseError(format!("invalid integer '{s}': {e}")))
}

/// Accepts RFC 3339 as well as the millisecond `Z` form S3 clients send.
fn parse_timestamp(s: &str) -> Result<chrono::DateTime<chrono::Utc>, XmlError> {
    let s = s.trim();
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|e| XmlError::ParseError(format!("invalid timestamp '{s}': {e}")))
}

impl S3Deserialize for ObjectLockLegalHold {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut hold = ObjectLockLegalHold::default();
        for_each_child(reader, "LegalHold", |reader, tag| {
            match tag {
                "Status" => hold.status = Some(read_text_content(reader)?.trim().parse()?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(hold)
    }
}

impl S3Deserialize for ObjectLockRetention {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut retention = ObjectLockRetention::default();
        for_each_child(reader, "Retention", |reader, tag| {
            match tag {
                "Mode" => retention.mode = Some(read_text_content(reader)?.trim().parse()?),
                "RetainUntilDate" => {
                    retention.retain_until_date =
                        Some(parse_timestamp(&read_text_content(reader)?)?);
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(retention)
    }
}

impl S3Deserialize for DefaultRetention {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut retention = DefaultRetention::default();
        for_each_child(reader, "DefaultRetention", |reader, tag| {
            match tag {
                "Mode" => retention.mode = Some(read_text_content(reader)?.trim().parse()?),
                "Days" => retention.days = Some(parse_i32(&read_text_content(reader)?)?),
                "Years" => retention.years = Some(parse_i32(&read_text_content(reader)?)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(retention)
    }
}

impl S3Deserialize for ObjectLockRule {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut rule = ObjectLockRule::default();
        for_each_child(reader, "Rule", |reader, tag| {
            match tag {
                "DefaultRetention" => {
                    rule.default_retention = Some(DefaultRetention::deserialize_xml(reader)?);
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(rule)
    }
}

impl S3Deserialize for ObjectLockConfiguration {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut config = ObjectLockConfiguration::default();
        for_each_child(reader, "ObjectLockConfiguration", |reader, tag| {
            match tag {
                "ObjectLockEnabled" => {
                    config.object_lock_enabled = Some(read_text_content(reader)?.trim().parse()?);
                }
                "Rule" => config.rule = Some(ObjectLockRule::deserialize_xml(reader)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(config)
    }
}

impl S3Deserialize for Tag {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut key = None;
        let mut value = None;
        for_each_child(reader, "Tag", |reader, tag| {
            match tag {
                "Key" => key = Some(read_text_content(reader)?),
                "Value" => value = Some(read_text_content(reader)?),
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(Tag {
            key: key.ok_or_else(|| XmlError::MissingElement("Key".to_owned()))?,
            value: value.unwrap_or_default(),
        })
    }
}

impl S3Deserialize for Tagging {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut tag_set = Vec::new();
        for_each_child(reader, "Tagging", |reader, tag| {
            match tag {
                "TagSet" => for_each_child(reader, "TagSet", |reader, tag| {
                    match tag {
                        "Tag" => tag_set.push(Tag::deserialize_xml(reader)?),
                        _ => skip_element(reader)?,
                    }
                    Ok(())
                })?,
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(Tagging { tag_set })
    }
}

impl S3Deserialize for CreateBucketConfiguration {
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut config = CreateBucketConfiguration::default();
        for_each_child(reader, "CreateBucketConfiguration", |reader, tag| {
            match tag {
                "LocationConstraint" => {
                    let text = read_text_content(reader)?;
                    let text = text.trim();
                    if !text.is_empty() {
                        config.location_constraint = Some(text.to_owned());
                    }
                }
                _ => skip_element(reader)?,
            }
            Ok(())
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use s3mock_model::types::{ObjectLockLegalHoldStatus, ObjectLockRetentionMode};

    use super::*;

    #[test]
    fn test_should_deserialize_legal_hold() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <LegalHold xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
            <Status>ON</Status>
        </LegalHold>"#;

        let hold: ObjectLockLegalHold = from_xml(xml).expect("deserialization should succeed");
        assert_eq!(hold.status, Some(ObjectLockLegalHoldStatus::On));
    }

    #[test]
    fn test_should_reject_unknown_legal_hold_status() {
        let xml = b"<LegalHold><Status>MAYBE</Status></LegalHold>";

        let err = from_xml::<ObjectLockLegalHold>(xml).unwrap_err();
        assert!(matches!(err, XmlError::ParseError(ref m) if m.contains("MAYBE")));
    }

    #[test]
    fn test_should_leave_status_unset_for_empty_legal_hold() {
        let hold: ObjectLockLegalHold =
            from_xml(b"<LegalHold></LegalHold>").expect("deserialization should succeed");
        assert!(hold.status.is_none());
    }

    #[test]
    fn test_should_deserialize_retention() {
        let xml = b"<Retention><Mode>COMPLIANCE</Mode>\
            <RetainUntilDate>2030-05-06T07:08:09.123Z</RetainUntilDate></Retention>";

        let retention: ObjectLockRetention = from_xml(xml).expect("deserialization should succeed");
        assert_eq!(retention.mode, Some(ObjectLockRetentionMode::Compliance));
        let until = retention.retain_until_date.expect("date should be set");
        assert_eq!(until.timestamp_subsec_millis(), 123);
        assert_eq!(until.to_rfc3339(), "2030-05-06T07:08:09.123+00:00");
    }

    #[test]
    fn test_should_deserialize_lock_configuration() {
        let xml = br#"<ObjectLockConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
            <ObjectLockEnabled>Enabled</ObjectLockEnabled>
            <Rule><DefaultRetention>
                <Mode>GOVERNANCE</Mode><Years>1</Years>
            </DefaultRetention></Rule>
        </ObjectLockConfiguration>"#;

        let config: ObjectLockConfiguration =
            from_xml(xml).expect("deserialization should succeed");
        let retention = config
            .rule
            .and_then(|r| r.default_retention)
            .expect("default retention should be set");
        assert_eq!(retention.mode, Some(ObjectLockRetentionMode::Governance));
        assert_eq!(retention.years, Some(1));
        assert_eq!(retention.days, None);
    }

    #[test]
    fn test_should_deserialize_tagging() {
        let xml = b"<Tagging><TagSet>\
            <Tag><Key>case</Key><Value>4711</Value></Tag>\
            <Tag><Key>owner</Key><Value>legal &amp; compliance</Value></Tag>\
            </TagSet></Tagging>";

        let tagging: Tagging = from_xml(xml).expect("deserialization should succeed");
        assert_eq!(tagging.tag_set.len(), 2);
        assert_eq!(tagging.tag_set[1].value, "legal & compliance");
    }

    #[test]
    fn test_should_resolve_references_in_tag_values() {
        let xml = b"<Tagging><TagSet><Tag>\
            <Key> a&lt;b </Key><Value>&#x41;&#66; &quot;x&apos; &gt;</Value>\
            </Tag></TagSet></Tagging>";

        let tagging: Tagging = from_xml(xml).expect("deserialization should succeed");
        assert_eq!(tagging.tag_set[0].key, " a<b ");
        assert_eq!(tagging.tag_set[0].value, "AB \"x' >");
    }

    #[test]
    fn test_should_reject_unknown_entity() {
        let xml = b"<Tagging><TagSet><Tag>\
            <Key>k</Key><Value>&nbsp;</Value>\
            </Tag></TagSet></Tagging>";

        let err = from_xml::<Tagging>(xml).unwrap_err();
        assert!(matches!(err, XmlError::ParseError(ref m) if m.contains("nbsp")));
    }

    #[test]
    fn test_should_read_location_constraint() {
        let xml = b"<CreateBucketConfiguration><LocationConstraint>eu-west-1</LocationConstraint>\
            </CreateBucketConfiguration>";

        let config: CreateBucketConfiguration =
            from_xml(xml).expect("deserialization should succeed");
        assert_eq!(config.location_constraint.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn test_should_fail_on_truncated_document() {
        assert!(from_xml::<ObjectLockLegalHold>(b"<LegalHold><Status>ON</Status>").is_err());
        assert!(from_xml::<ObjectLockLegalHold>(b"").is_err());
    }
}
