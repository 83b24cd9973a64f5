use crate::ipc::error::{err, ok, session_err};
use crate::ipc::helpers::{optional_bool, optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::session::SessionError;
use crate::view::{self, ViewFilter};
use serde_json::json;

fn parse_filter(req: &Request) -> Result<ViewFilter, String> {
    let query = optional_str(req, "query")?.unwrap_or_default();
    let remarked_only = optional_bool(req, "remarkedOnly")?;
    Ok(ViewFilter::new(query, remarked_only))
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (session_id, filter) = match (required_str(req, "sessionId"), parse_filter(req)) {
        (Ok(s), Ok(f)) => (s, f),
        (Err(m), _) | (_, Err(m)) => return err(&req.id, "bad_params", m, None),
    };
    let session = match state.sessions.get(session_id) {
        Ok(s) => s,
        Err(e) => return session_err(&req.id, &e),
    };
    let (class_id, roster) = match session.authorized_roster(&state.dataset) {
        Ok(v) => v,
        Err(e) => return session_err(&req.id, &e),
    };

    if roster.is_empty() {
        return ok(
            &req.id,
            json!({
                "classId": class_id,
                "rows": [],
                "total": 0,
                "message": "no data for this class",
            }),
        );
    }

    let rows = view::filtered_summary(roster, &filter);
    ok(
        &req.id,
        json!({
            "classId": class_id,
            "rows": rows,
            "total": roster.len(),
        }),
    )
}

fn handle_students_details(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (session_id, filter) = match (required_str(req, "sessionId"), parse_filter(req)) {
        (Ok(s), Ok(f)) => (s, f),
        (Err(m), _) | (_, Err(m)) => return err(&req.id, "bad_params", m, None),
    };
    let session = match state.sessions.get(session_id) {
        Ok(s) => s,
        Err(e) => return session_err(&req.id, &e),
    };
    let (class_id, roster) = match session.authorized_roster(&state.dataset) {
        Ok(v) => v,
        Err(e) => return session_err(&req.id, &e),
    };
    ok(
        &req.id,
        json!({
            "classId": class_id,
            "details": view::filtered_details(roster, &filter),
        }),
    )
}

fn handle_students_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (session_id, student_id) = match (
        required_str(req, "sessionId"),
        required_str(req, "studentId"),
    ) {
        (Ok(s), Ok(id)) => (s, id),
        (Err(m), _) | (_, Err(m)) => return err(&req.id, "bad_params", m, None),
    };
    let session = match state.sessions.get(session_id) {
        Ok(s) => s,
        Err(e) => return session_err(&req.id, &e),
    };
    let (class_id, roster) = match session.authorized_roster(&state.dataset) {
        Ok(v) => v,
        Err(e) => return session_err(&req.id, &e),
    };
    match view::find_detail(roster, student_id) {
        Some(detail) => ok(&req.id, json!({ "classId": class_id, "detail": detail })),
        None => session_err(
            &req.id,
            &SessionError::UnknownStudent(student_id.to_string()),
        ),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.details" => Some(handle_students_details(state, req)),
        "students.get" => Some(handle_students_get(state, req)),
        _ => None,
    }
}
