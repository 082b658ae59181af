use crate::calc;
use crate::confirm::DELETE_EXAM_PROMPT;
use crate::exams::ExamInput;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{confirmed, get_required_str, optional_date, optional_text, text_field};
use crate::ipc::types::{AppState, Request};
use crate::records::DeleteOutcome;
use serde_json::{json, Value};
use tracing::debug;

fn exam_input(params: &Value) -> Result<ExamInput, HandlerErr> {
    Ok(ExamInput {
        student_id: text_field(params, "studentId"),
        exam_name: text_field(params, "examName"),
        subject: text_field(params, "subject"),
        date: optional_date(params, "date")?,
        score: text_field(params, "score"),
        max_score: text_field(params, "maxScore"),
        notes: optional_text(params, "notes"),
    })
}

fn exams_record(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let input = exam_input(params)?;
    Ok(match state.records.record_exam(&input) {
        Some(exam) => json!({ "applied": true, "exam": exam }),
        None => json!({ "applied": false }),
    })
}

fn exams_delete(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let exam_id = text_field(params, "examId");
    let confirmed = confirmed(params);
    let mut gate = |prompt: &str| {
        debug!(prompt, confirmed, "delete confirmation");
        confirmed
    };
    Ok(match state.records.delete_exam(exam_id.trim(), &mut gate) {
        DeleteOutcome::Deleted { .. } => json!({ "applied": true }),
        DeleteOutcome::Declined => json!({
            "applied": false,
            "reason": "declined",
            "prompt": DELETE_EXAM_PROMPT,
        }),
        DeleteOutcome::NotFound => json!({ "applied": false, "reason": "not_found" }),
    })
}

fn exams_list(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let exams: Vec<_> = state.records.exams().results_for(&student_id).collect();
    Ok(json!({ "exams": exams }))
}

/// Live preview for the record form; nulls where no grade can be derived.
fn exams_grade(params: &Value) -> Result<Value, HandlerErr> {
    let score = calc::parse_score_text(&text_field(params, "score"));
    let max_score = calc::parse_score_text(&text_field(params, "maxScore"));
    let (grade, percentage) = match (score, max_score) {
        (Some(s), Some(m)) => (calc::grade(s, m), calc::percentage(s, m)),
        _ => (None, None),
    };
    Ok(json!({ "grade": grade, "percentage": percentage }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "exams.record" => exams_record(state, &req.params),
        "exams.delete" => exams_delete(state, &req.params),
        "exams.list" => exams_list(state, &req.params),
        "exams.grade" => exams_grade(&req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
