//! Typed view of the host context after sanitization.
//!
//! Only values that have already been through the deep sanitizer are
//! decoded into these types. Unknown fields are kept in `extra` so the
//! presentation layer sees everything the host sent.
//!
//! `conversation.id` is the only field with a required type. Every other
//! host field is untrusted and may arrive as a string, a number or anything
//! else, so it is held as a raw `Value` and read through lenient accessors.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Context payload published to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppContext {
    pub conversation: Conversation,

    /// Absent when the host sent no contact or a non-object one.
    #[serde(default, deserialize_with = "object_or_none", skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    #[serde(
        rename = "currentAgent",
        default,
        deserialize_with = "object_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_agent: Option<Agent>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The conversation currently open in the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Number,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<Value>,

    /// Unix seconds when numeric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Conversation {
    pub fn status(&self) -> Option<&str> {
        text(&self.status)
    }

    pub fn is_open(&self) -> bool {
        self.status() == Some("open")
    }

    pub fn is_resolved(&self) -> bool {
        self.status() == Some("resolved")
    }

    /// Unread count; zero unless the host sent a non-negative number or a
    /// string holding one.
    pub fn unread(&self) -> u64 {
        match &self.unread_count {
            Some(Value::Number(n)) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .map(|f| f as u64)
            }),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .unwrap_or(0)
    }

    /// Timestamp in whole Unix seconds, if numeric.
    pub fn timestamp_secs(&self) -> Option<i64> {
        match &self.timestamp {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
            _ => None,
        }
    }
}

/// The contact on the other side of the conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    pub fn name(&self) -> Option<&str> {
        text(&self.name)
    }
}

/// The agent using the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Agent {
    pub fn name(&self) -> Option<&str> {
        text(&self.name)
    }
}

fn text(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

fn object_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}
