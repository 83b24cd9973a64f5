use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

const USAGE: [&str; 5] = [
    "Select a class.",
    "Enter that class's password and press confirm.",
    "Review number, name, student id, remark and length in the list.",
    "Tick the remark filter to show only students with a remark.",
    "Open a student to read the record and copy it.",
];

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ds = &state.dataset;
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "dataPath": ds.data_path().to_string_lossy(),
            "dataSha256": ds.sha256(),
            "loadedAt": ds.loaded_at().to_rfc3339(),
            "classCount": ds.classes().len(),
            "sessionCount": state.sessions.len(),
        }),
    )
}

fn handle_app_info(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "title": state.title,
            "usage": USAGE,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "app.info" => Some(handle_app_info(state, req)),
        _ => None,
    }
}
