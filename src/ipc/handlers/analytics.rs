use crate::analytics;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::handlers::setup::{passing_grade, top_performer_count};
use crate::ipc::helpers::{get_required_str, optional_count, optional_text, text_field};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn analytics_average(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    Ok(json!({ "average": analytics::average_for(&state.records, &student_id) }))
}

fn analytics_top_performers(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let n = optional_count(params, "n")?.unwrap_or_else(|| top_performer_count(&state.settings));
    let ranking = analytics::top_performers(&state.records, n);
    let performers = analytics::performers(&ranking);
    Ok(json!({
        "ranking": ranking,
        "hasPerformers": !performers.is_empty(),
        "performers": performers,
    }))
}

fn analytics_overall_average(state: &mut AppState) -> Result<Value, HandlerErr> {
    Ok(json!({ "average": analytics::overall_average(&state.records) }))
}

fn analytics_present_today(state: &mut AppState) -> Result<Value, HandlerErr> {
    Ok(json!({
        "count": analytics::present_today_count(&state.records),
        "date": state.records.today,
    }))
}

fn analytics_dashboard(state: &mut AppState) -> Result<Value, HandlerErr> {
    let n = top_performer_count(&state.settings);
    Ok(json!(analytics::dashboard(&state.records, n)))
}

fn analytics_exam_board(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let query = text_field(params, "query");
    Ok(json!({ "rows": analytics::exam_board(&state.records, &query) }))
}

fn analytics_grade_distribution(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let class = optional_text(params, "class");
    let passing = passing_grade(&state.settings);
    let dist = analytics::grade_distribution(&state.records, class.as_deref().map(str::trim), passing);
    Ok(json!({
        "class": dist.class,
        "total": dist.total,
        "passed": dist.passed,
        "passingGrade": passing,
        "counts": dist.counts,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "analytics.average" => analytics_average(state, &req.params),
        "analytics.topPerformers" => analytics_top_performers(state, &req.params),
        "analytics.overallAverage" => analytics_overall_average(state),
        "analytics.presentToday" => analytics_present_today(state),
        "analytics.dashboard" => analytics_dashboard(state),
        "analytics.examBoard" => analytics_exam_board(state, &req.params),
        "analytics.gradeDistribution" => analytics_grade_distribution(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
