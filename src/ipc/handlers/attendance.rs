use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_required_str, optional_date, required_status, text_field};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn attendance_mark(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let student_id = text_field(params, "studentId");
    let status = required_status(params)?;
    let date = optional_date(params, "date")?;
    Ok(
        match state
            .records
            .mark_attendance(student_id.trim(), status, date.as_deref())
        {
            Some((outcome, record)) => json!({
                "applied": true,
                "outcome": outcome,
                "record": record,
            }),
            None => json!({ "applied": false }),
        },
    )
}

fn attendance_status(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let date = optional_date(params, "date")?;
    let status = state.records.attendance_for(&student_id, date.as_deref());
    Ok(json!({ "status": status }))
}

fn attendance_list(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let ledger = state.records.ledger();
    let records: Vec<_> = match optional_date(params, "date")? {
        Some(date) => ledger.on_date(&date).collect(),
        None => ledger.all().iter().collect(),
    };
    Ok(json!({ "records": records }))
}

fn attendance_count(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let status = required_status(params)?;
    let date = optional_date(params, "date")?.unwrap_or_else(|| state.records.today.clone());
    let count = state.records.ledger().count_by_status(&date, status);
    Ok(json!({ "count": count, "date": date, "status": status }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "attendance.mark" => attendance_mark(state, &req.params),
        "attendance.status" => attendance_status(state, &req.params),
        "attendance.list" => attendance_list(state, &req.params),
        "attendance.count" => attendance_count(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
