use crate::clock;
use crate::ipc::error::HandlerErr;
use crate::ledger::AttendanceStatus;
use serde_json::Value;

/// Form text. Strings pass through, numbers are rendered as text, anything
/// else (missing, null, bool, ...) is blank.
pub fn text_field(params: &Value, key: &str) -> String {
    match params.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

pub fn optional_text(params: &Value, key: &str) -> Option<String> {
    let t = text_field(params, key);
    if t.trim().is_empty() {
        None
    } else {
        Some(t)
    }
}

pub fn get_required_str(params: &Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

/// Optional `YYYY-MM-DD` date. Blank means "use the default".
pub fn optional_date(params: &Value, key: &str) -> Result<Option<String>, HandlerErr> {
    let Some(raw) = optional_text(params, key) else {
        return Ok(None);
    };
    clock::parse_date(&raw)
        .map(Some)
        .ok_or_else(|| HandlerErr::bad_params(format!("{} must be YYYY-MM-DD", key)))
}

pub fn required_status(params: &Value) -> Result<AttendanceStatus, HandlerErr> {
    params
        .get("status")
        .and_then(|v| v.as_str())
        .and_then(AttendanceStatus::parse)
        .ok_or_else(|| HandlerErr::bad_params("status must be Present or Absent"))
}

pub fn confirmed(params: &Value) -> bool {
    params
        .get("confirmed")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

pub fn optional_count(params: &Value, key: &str) -> Result<Option<usize>, HandlerErr> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| HandlerErr::bad_params(format!("{} must be a non-negative integer", key))),
    }
}
