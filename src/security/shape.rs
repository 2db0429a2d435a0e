//! Inbound envelope shape validation.

use serde_json::Value;
use thiserror::Error;

/// Event tag carried by context envelopes from the host.
pub const APP_CONTEXT_EVENT: &str = "appContext";

/// Why an envelope was rejected. Variants carry no payload data so they can
/// be logged as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    #[error("envelope is not an object")]
    NotAnObject,
    #[error("unexpected event tag")]
    UnexpectedEvent,
    #[error("envelope has no data")]
    MissingData,
    #[error("conversation id is missing")]
    MissingConversationId,
    #[error("conversation id is not numeric")]
    NonNumericConversationId,
}

/// Check an envelope against the context contract.
///
/// Every nested access is guarded; absent fields are violations, never
/// panics.
pub fn check_envelope(candidate: &Value) -> Result<(), ShapeViolation> {
    let envelope = candidate.as_object().ok_or(ShapeViolation::NotAnObject)?;

    if envelope.get("event").and_then(Value::as_str) != Some(APP_CONTEXT_EVENT) {
        return Err(ShapeViolation::UnexpectedEvent);
    }

    let data = match envelope.get("data") {
        None | Some(Value::Null) => return Err(ShapeViolation::MissingData),
        Some(data) => data,
    };

    match data.get("conversation").and_then(|c| c.get("id")) {
        None | Some(Value::Null) => Err(ShapeViolation::MissingConversationId),
        Some(Value::Number(_)) => Ok(()),
        Some(_) => Err(ShapeViolation::NonNumericConversationId),
    }
}

/// Returns true if the envelope satisfies the context contract.
pub fn is_valid_envelope(candidate: &Value) -> bool {
    check_envelope(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_envelope() {
        let envelope = json!({"event": "appContext", "data": {"conversation": {"id": 42}}});
        assert!(is_valid_envelope(&envelope));

        let with_extras = json!({
            "event": "appContext",
            "data": {
                "conversation": {"id": 7, "status": "open"},
                "contact": {"name": "Jo"},
                "currentAgent": {"name": "Ana"}
            }
        });
        assert!(is_valid_envelope(&with_extras));
    }

    #[test]
    fn test_string_id_rejected() {
        let envelope = json!({"event": "appContext", "data": {"conversation": {"id": "42"}}});
        assert_eq!(
            check_envelope(&envelope),
            Err(ShapeViolation::NonNumericConversationId)
        );
    }

    #[test]
    fn test_malformed_envelopes() {
        assert_eq!(check_envelope(&json!({})), Err(ShapeViolation::UnexpectedEvent));
        assert_eq!(check_envelope(&json!("appContext")), Err(ShapeViolation::NotAnObject));
        assert_eq!(check_envelope(&json!([1, 2])), Err(ShapeViolation::NotAnObject));
        assert_eq!(check_envelope(&json!(null)), Err(ShapeViolation::NotAnObject));

        assert_eq!(
            check_envelope(&json!({"event": "other", "data": {"conversation": {"id": 1}}})),
            Err(ShapeViolation::UnexpectedEvent)
        );
        assert_eq!(
            check_envelope(&json!({"event": "appContext"})),
            Err(ShapeViolation::MissingData)
        );
        assert_eq!(
            check_envelope(&json!({"event": "appContext", "data": null})),
            Err(ShapeViolation::MissingData)
        );
        assert_eq!(
            check_envelope(&json!({"event": "appContext", "data": {}})),
            Err(ShapeViolation::MissingConversationId)
        );
        assert_eq!(
            check_envelope(&json!({"event": "appContext", "data": "text"})),
            Err(ShapeViolation::MissingConversationId)
        );
        assert_eq!(
            check_envelope(&json!({"event": "appContext", "data": {"conversation": {"id": null}}})),
            Err(ShapeViolation::MissingConversationId)
        );
        assert_eq!(
            check_envelope(&json!({"event": "appContext", "data": {"conversation": {"id": [1]}}})),
            Err(ShapeViolation::NonNumericConversationId)
        );
    }
}
