use crate::confirm::DELETE_STUDENT_PROMPT;
use crate::directory::StudentInput;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{confirmed, text_field};
use crate::ipc::types::{AppState, Request};
use crate::records::DeleteOutcome;
use serde_json::{json, Value};
use tracing::debug;

fn student_input(params: &Value) -> StudentInput {
    StudentInput {
        name: text_field(params, "name"),
        class: text_field(params, "class"),
        email: text_field(params, "email"),
        phone: text_field(params, "phone"),
    }
}

fn students_list(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let query = text_field(params, "query");
    let students: Vec<_> = state.records.directory().search(&query).collect();
    Ok(json!({ "students": students }))
}

fn students_create(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let input = student_input(params);
    Ok(match state.records.add_student(&input) {
        Some(s) => json!({ "applied": true, "student": s }),
        None => json!({ "applied": false }),
    })
}

fn students_update(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let student_id = text_field(params, "studentId");
    let input = student_input(params);
    Ok(match state.records.edit_student(student_id.trim(), &input) {
        Some(s) => json!({ "applied": true, "student": s }),
        None => json!({ "applied": false }),
    })
}

fn students_delete(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let student_id = text_field(params, "studentId");
    let confirmed = confirmed(params);
    let mut gate = |prompt: &str| {
        debug!(prompt, confirmed, "delete confirmation");
        confirmed
    };
    Ok(match state.records.delete_student(student_id.trim(), &mut gate) {
        DeleteOutcome::Deleted { exams_removed } => {
            json!({ "applied": true, "examsRemoved": exams_removed })
        }
        DeleteOutcome::Declined => json!({
            "applied": false,
            "reason": "declined",
            "prompt": DELETE_STUDENT_PROMPT,
        }),
        DeleteOutcome::NotFound => json!({ "applied": false, "reason": "not_found" }),
    })
}

fn students_classes(state: &mut AppState) -> Result<Value, HandlerErr> {
    Ok(json!({ "classes": state.records.directory().classes() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "students.list" => students_list(state, &req.params),
        "students.create" => students_create(state, &req.params),
        "students.update" => students_update(state, &req.params),
        "students.delete" => students_delete(state, &req.params),
        "students.classes" => students_classes(state),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
