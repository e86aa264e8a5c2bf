use crate::{Json, Payload, Raw};
use async_tungstenite::tungstenite::Message;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A data frame as delivered by the transport.
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

impl Frame {
    /// Data frames only; control frames carry nothing worth recording.
    pub fn from_message(message: Message) -> Option<Self> {
        match message {
            Message::Text(text) => Some(Self::Text(text)),
            Message::Binary(bytes) => Some(Self::Binary(bytes)),
            Message::Ping(_) | Message::Pong(_) | Message::Close(_) | Message::Frame(_) => None,
        }
    }
}

/// Decode a frame into a record payload. Never fails: anything that is not JSON is kept as
/// [`Payload::Raw`]. Binary frames holding UTF-8 text are kept as text; other bytes are kept
/// byte for byte.
pub fn decode(frame: Frame) -> Payload {
    let text = match frame {
        Frame::Text(text) => text,
        Frame::Binary(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => return Payload::Raw(Raw::Binary(e.into_bytes())),
        },
    };
    match serde_json::from_str::<Json>(&text) {
        Ok(json) => Payload::Data(json),
        Err(_) => Payload::Raw(Raw::Text(text)),
    }
}

/// The `event` field of a structured payload, if any. Falsy values (`null`, `false`, zero, and
/// empty strings, arrays or objects) count as absent.
pub fn event_name(payload: &Payload) -> Option<Cow<'_, str>> {
    match payload.data()?.get("event")? {
        Json::Null | Json::Bool(false) => None,
        Json::Number(n) if n.as_f64() == Some(0.0) => None,
        Json::String(name) if name.is_empty() => None,
        Json::Array(list) if list.is_empty() => None,
        Json::Object(map) if map.is_empty() => None,
        Json::String(name) => Some(Cow::Borrowed(name)),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Suffix for the console line of a frame, e.g. ` evento=chat`; empty if there is no event name.
pub fn summary(payload: &Payload) -> String {
    match event_name(payload) {
        Some(name) => format!(" evento={name}"),
        None => String::new(),
    }
}
