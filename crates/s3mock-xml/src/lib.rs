//! RestXml layer for s3mock.
//!
//! Converts between the `s3mock-model` shapes and the S3 XML wire format:
//!
//! - [`S3Serialize`] and [`to_xml`] write response bodies
//! - [`S3Deserialize`] and [`from_xml`] parse request bodies
//! - [`error_to_xml`] formats the flat `<Error>` document
//!
//! Documents use the `http://s3.amazonaws.com/doc/2006-03-01/` namespace and
//! ISO 8601 timestamps with millisecond precision (`2026-02-03T16:45:09.000Z`).

pub mod deserialize;
pub mod error;
pub mod serialize;

pub use deserialize::{S3Deserialize, from_xml};
pub use error::{XmlError, error_to_xml};
pub use serialize::{S3_NAMESPACE, S3Serialize, to_xml};
