use serde_json::Value;

use crate::error::{ApiError, Result};

/// An HTTP response as plain data, as handed back by a session.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Maps a completed exchange to its outcome.
///
/// 404, 401 and 204 are checked before the generic 2xx test, so a 204 is a
/// failure even though it is a success status.
pub fn classify(response: &RawResponse) -> Result<Value> {
    match response.status {
        404 => Err(ApiError::NotFound),
        401 => Err(ApiError::Unauthorized),
        204 => Err(ApiError::NoContent),
        200..=299 => Ok(decode_body(&response.body)),
        status => Err(ApiError::http(status)),
    }
}

/// JSON when the body parses, the raw text when it does not, null when empty.
pub fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_decodes_json() {
        let value = classify(&RawResponse::new(200, r#"{"ok":true}"#)).unwrap();
        assert_eq!(value, json!({"ok": true}));

        let value = classify(&RawResponse::new(201, "[1,2]")).unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            classify(&RawResponse::new(404, "")),
            Err(ApiError::NotFound)
        ));
        assert!(matches!(
            classify(&RawResponse::new(401, "")),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            classify(&RawResponse::new(204, "")),
            Err(ApiError::NoContent)
        ));
        assert!(matches!(
            classify(&RawResponse::new(500, "boom")),
            Err(ApiError::Http { status: 500, .. })
        ));
        assert!(matches!(
            classify(&RawResponse::new(302, "")),
            Err(ApiError::Http { status: 302, .. })
        ));
        assert!(matches!(
            classify(&RawResponse::new(403, "")),
            Err(ApiError::Http { status: 403, .. })
        ));
    }

    #[test]
    fn test_decode_body_fallbacks() {
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(b"  \n"), Value::Null);
        assert_eq!(decode_body(b"plain text"), json!("plain text"));
        assert_eq!(decode_body(b"42"), json!(42));
    }
}
