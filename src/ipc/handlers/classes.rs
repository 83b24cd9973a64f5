use crate::dataset::parse_class_key;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ds = &state.dataset;
    // Ids were validated at load; the key lookup cannot fail here.
    let classes: Vec<serde_json::Value> = ds
        .classes()
        .iter()
        .filter_map(|c| {
            let key = parse_class_key(c).ok()?;
            Some(json!({
                "classId": c,
                "grade": key.grade,
                "room": key.room,
                "studentCount": ds.roster(c).map(|r| r.len()).unwrap_or(0),
                "locked": ds.passwords().is_locked(c),
            }))
        })
        .collect();
    ok(&req.id, json!({ "classes": classes }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_classes_list(state, req)),
        _ => None,
    }
}
