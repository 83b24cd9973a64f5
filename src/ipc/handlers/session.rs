use crate::ipc::error::{err, ok, session_err};
use crate::ipc::helpers::{optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_session_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let preferred = match optional_str(req, "preferredClass") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    let session = state.sessions.open(&state.dataset, preferred);
    ok(
        &req.id,
        json!({
            "sessionId": session.id().to_string(),
            "selectedClass": session.selected_class(),
            "authenticated": false,
        }),
    )
}

fn handle_session_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session_id = match required_str(req, "sessionId") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    let session = match state.sessions.get_mut(session_id) {
        Ok(s) => s,
        Err(e) => return session_err(&req.id, &e),
    };
    let outcome = session.status(&state.dataset);
    let class_id = session.selected_class().unwrap_or_default();
    ok(
        &req.id,
        json!({
            "selectedClass": session.selected_class(),
            "authenticated": outcome.granted(),
            "outcome": outcome,
            "message": outcome.message(class_id),
            "openedAt": session.opened_at().to_rfc3339(),
        }),
    )
}

fn handle_session_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (session_id, class_id) = match (
        required_str(req, "sessionId"),
        required_str(req, "classId"),
    ) {
        (Ok(s), Ok(c)) => (s, c),
        (Err(m), _) | (_, Err(m)) => return err(&req.id, "bad_params", m, None),
    };
    let session = match state.sessions.get_mut(session_id) {
        Ok(s) => s,
        Err(e) => return session_err(&req.id, &e),
    };
    if let Err(e) = session.select(&state.dataset, class_id) {
        return session_err(&req.id, &e);
    }
    ok(
        &req.id,
        json!({
            "selectedClass": session.selected_class(),
            "authenticated": session.is_authenticated(),
        }),
    )
}

fn handle_session_authenticate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (session_id, password) = match (
        required_str(req, "sessionId"),
        required_str(req, "password"),
    ) {
        (Ok(s), Ok(p)) => (s, p),
        (Err(m), _) | (_, Err(m)) => return err(&req.id, "bad_params", m, None),
    };
    let session = match state.sessions.get_mut(session_id) {
        Ok(s) => s,
        Err(e) => return session_err(&req.id, &e),
    };
    let outcome = match session.authenticate(&state.dataset, password) {
        Ok(o) => o,
        Err(e) => return session_err(&req.id, &e),
    };
    let class_id = session.selected_class().unwrap_or_default();
    ok(
        &req.id,
        json!({
            "outcome": outcome,
            "authenticated": outcome.granted(),
            "selectedClass": class_id,
            "message": outcome.message(class_id),
        }),
    )
}

fn handle_session_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session_id = match required_str(req, "sessionId") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    ok(&req.id, json!({ "closed": state.sessions.close(session_id) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.open" => Some(handle_session_open(state, req)),
        "session.status" => Some(handle_session_status(state, req)),
        "session.select" => Some(handle_session_select(state, req)),
        "session.authenticate" => Some(handle_session_authenticate(state, req)),
        "session.close" => Some(handle_session_close(state, req)),
        _ => None,
    }
}
