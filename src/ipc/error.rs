use serde_json::json;

use crate::session::SessionError;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

pub fn session_err(id: &str, e: &SessionError) -> serde_json::Value {
    let details = match e {
        SessionError::UnknownClass(c) => Some(json!({ "classId": c })),
        SessionError::UnknownStudent(s) => Some(json!({ "studentId": s })),
        SessionError::PasswordTooLong { max } => Some(json!({ "maxChars": max })),
        _ => None,
    };
    err(id, e.code(), e.to_string(), details)
}

/// Reply for a line that did not parse as a request; there is no id to echo.
pub fn bad_json(e: &serde_json::Error) -> serde_json::Value {
    err("", "bad_json", e.to_string(), None)
}
