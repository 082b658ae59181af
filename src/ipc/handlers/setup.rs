use crate::calc::Grade;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::settings::SettingsStore;
use serde_json::{json, Map, Value};
use tracing::info;

#[derive(Clone, Copy)]
enum SetupSection {
    Dashboard,
    Exams,
}

impl SetupSection {
    const ALL: [SetupSection; 2] = [SetupSection::Dashboard, SetupSection::Exams];

    fn parse(s: &str) -> Option<Self> {
        match s {
            "dashboard" => Some(Self::Dashboard),
            "exams" => Some(Self::Exams),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Exams => "exams",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Dashboard => "setup.dashboard",
            Self::Exams => "setup.exams",
        }
    }
}

fn default_section(section: SetupSection) -> Value {
    match section {
        SetupSection::Dashboard => json!({
            "topPerformerCount": 3
        }),
        SetupSection::Exams => json!({
            "passingGrade": "D"
        }),
    }
}

fn as_object_mut(value: &mut Value) -> Result<&mut Map<String, Value>, String> {
    value
        .as_object_mut()
        .ok_or_else(|| "internal setup object must be a JSON object".to_string())
}

fn parse_i64_range(v: &Value, key: &str, min: i64, max: i64) -> Result<i64, String> {
    let n = v
        .as_i64()
        .ok_or_else(|| format!("{} must be integer", key))?;
    if !(min..=max).contains(&n) {
        return Err(format!("{} must be in {}..={}", key, min, max));
    }
    Ok(n)
}

fn merge_section_patch(
    section: SetupSection,
    current: &mut Value,
    patch: &Map<String, Value>,
) -> Result<(), String> {
    let obj = as_object_mut(current)?;
    for (k, v) in patch {
        match section {
            SetupSection::Dashboard => match k.as_str() {
                "topPerformerCount" => {
                    obj.insert(k.clone(), Value::from(parse_i64_range(v, k, 1, 20)?));
                }
                _ => return Err(format!("unknown dashboard field: {}", k)),
            },
            SetupSection::Exams => match k.as_str() {
                "passingGrade" => {
                    let g = v
                        .as_str()
                        .and_then(Grade::parse)
                        .ok_or_else(|| "passingGrade must be one of: A, B, C, D, F".to_string())?;
                    obj.insert(k.clone(), Value::String(g.to_string()));
                }
                _ => return Err(format!("unknown exams field: {}", k)),
            },
        }
    }
    Ok(())
}

fn load_section(settings: &SettingsStore, section: SetupSection) -> Value {
    let mut current = default_section(section);
    if let Some(saved_obj) = settings.get_json(section.key()).and_then(|v| v.as_object()) {
        let _ = merge_section_patch(section, &mut current, saved_obj);
    }
    current
}

pub(crate) fn top_performer_count(settings: &SettingsStore) -> usize {
    load_section(settings, SetupSection::Dashboard)
        .get("topPerformerCount")
        .and_then(|v| v.as_u64())
        .unwrap_or(3) as usize
}

pub(crate) fn passing_grade(settings: &SettingsStore) -> Grade {
    load_section(settings, SetupSection::Exams)
        .get("passingGrade")
        .and_then(|v| v.as_str())
        .and_then(Grade::parse)
        .unwrap_or(Grade::D)
}

fn handle_setup_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let mut out = Map::new();
    for section in SetupSection::ALL {
        out.insert(
            section.name().to_string(),
            load_section(&state.settings, section),
        );
    }
    ok(&req.id, Value::Object(out))
}

fn handle_setup_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(section_raw) = req.params.get("section").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing section", None);
    };
    let Some(section) = SetupSection::parse(section_raw) else {
        return err(&req.id, "bad_params", "unknown section", None);
    };
    let Some(patch_obj) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "patch must be an object", None);
    };

    let mut current = load_section(&state.settings, section);
    if let Err(msg) = merge_section_patch(section, &mut current, patch_obj) {
        return err(&req.id, "bad_params", msg, None);
    }
    state.settings.set_json(section.key(), current.clone());
    info!(section = section.name(), "setup updated");
    ok(
        &req.id,
        json!({ "section": section.name(), "values": current }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "setup.get" => Some(handle_setup_get(state, req)),
        "setup.update" => Some(handle_setup_update(state, req)),
        _ => None,
    }
}
