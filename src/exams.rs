use crate::calc::{self, Grade};
use crate::directory::Student;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record-form fields. Scores arrive as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExamInput {
    pub student_id: String,
    pub exam_name: String,
    pub subject: String,
    pub date: Option<String>,
    pub score: String,
    pub max_score: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub exam_name: String,
    pub subject: String,
    pub date: String,
    pub score: f64,
    pub max_score: f64,
    pub grade: Grade,
    pub percentage: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

#[derive(Debug, Default)]
pub struct ExamBook {
    exams: Vec<ExamRecord>,
}

impl ExamBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.exams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }

    pub fn all(&self) -> &[ExamRecord] {
        &self.exams
    }

    pub fn get(&self, id: &str) -> Option<&ExamRecord> {
        self.exams.iter().find(|e| e.id == id)
    }

    /// Records a result for `student`. Grade and percentage are derived here
    /// and nowhere else. `None` when a required field is missing or the
    /// scores are unusable.
    pub fn record(
        &mut self,
        student: &Student,
        input: &ExamInput,
        default_date: &str,
    ) -> Option<&ExamRecord> {
        if input.student_id.trim() != student.id {
            return None;
        }
        let exam_name = non_blank(&input.exam_name)?;
        let subject = non_blank(&input.subject)?;
        let score = calc::parse_score_text(&input.score)?;
        let max_score = calc::parse_score_text(&input.max_score)?;
        let grade = calc::grade(score, max_score)?;
        let percentage = calc::percentage(score, max_score)?;
        let date = input
            .date
            .as_deref()
            .and_then(non_blank)
            .unwrap_or_else(|| default_date.to_string());

        self.exams.push(ExamRecord {
            id: Uuid::new_v4().to_string(),
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            exam_name,
            subject,
            date,
            score,
            max_score,
            grade,
            percentage,
            notes: input.notes.as_deref().and_then(non_blank),
        });
        self.exams.last()
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<ExamRecord> {
        let idx = self.exams.iter().position(|e| e.id == id)?;
        Some(self.exams.remove(idx))
    }

    /// Removes every result owned by `student_id`; returns how many went.
    pub(crate) fn remove_for_student(&mut self, student_id: &str) -> usize {
        let before = self.exams.len();
        self.exams.retain(|e| e.student_id != student_id);
        before - self.exams.len()
    }

    pub fn results_for<'a>(&'a self, student_id: &'a str) -> impl Iterator<Item = &'a ExamRecord> + 'a {
        self.exams.iter().filter(move |e| e.student_id == student_id)
    }
}
