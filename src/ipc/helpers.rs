use crate::ipc::types::Request;

pub fn required_str<'a>(req: &'a Request, key: &str) -> Result<&'a str, String> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing params.{key}"))
}

pub fn optional_str<'a>(req: &'a Request, key: &str) -> Result<Option<&'a str>, String> {
    match req.params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| format!("params.{key} must be a string")),
    }
}

pub fn optional_bool(req: &Request, key: &str) -> Result<bool, String> {
    match req.params.get(key) {
        None => Ok(false),
        Some(v) if v.is_null() => Ok(false),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| format!("params.{key} must be a boolean")),
    }
}
