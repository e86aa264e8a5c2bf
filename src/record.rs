use serde::{Serialize, Serializer};
pub use serde_json::Value as Json;
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

/// Receipt time of a frame. Always UTC.
pub type Timestamp = OffsetDateTime;

/// `received_at` is written with a fixed microsecond precision, so lines sort chronologically
/// as plain strings.
pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z");

#[derive(Debug, Clone, PartialEq, Serialize)]
/// The unit persisted for every inbound frame, one JSON object per line:
///
/// ```json
/// {"received_at":"2024-01-02T03:04:05.678901Z","data":{"event":"chat"}}
/// {"received_at":"2024-01-02T03:04:05.678901Z","raw":"not json"}
/// ```
pub struct Record {
    #[serde(serialize_with = "serialize_timestamp")]
    received_at: Timestamp,
    #[serde(flatten)]
    payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Exactly one of `data` or `raw`.
pub enum Payload {
    /// The frame parsed as JSON.
    Data(Json),
    /// The frame as received, because it is not JSON.
    Raw(Raw),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Original content of a frame that could not be parsed.
pub enum Raw {
    Text(String),
    /// Serialized as a string with one char per byte (U+0000 to U+00FF), so nothing is lost.
    Binary(Vec<u8>),
}

impl Record {
    pub fn new(received_at: Timestamp, payload: Payload) -> Self {
        Self {
            received_at,
            payload,
        }
    }

    pub fn received_at(&self) -> &Timestamp {
        &self.received_at
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

impl Payload {
    pub fn data(&self) -> Option<&Json> {
        match self {
            Self::Data(data) => Some(data),
            Self::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&Raw> {
        match self {
            Self::Data(_) => None,
            Self::Raw(raw) => Some(raw),
        }
    }
}

impl Raw {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }
}

impl Serialize for Raw {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Binary(bytes) => {
                let latin1: String = bytes.iter().map(|b| *b as char).collect();
                serializer.serialize_str(&latin1)
            }
        }
    }
}

fn serialize_timestamp<S: Serializer>(v: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(
        &v.format(TIMESTAMP_FORMAT)
            .map_err(serde::ser::Error::custom)?,
    )
}
