use crate::directory::Student;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    /// Snapshot of the student's name when the slot was first marked.
    pub name: String,
    /// Snapshot of the student's class when the slot was first marked.
    pub class: String,
    pub date: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkOutcome {
    Created,
    Updated,
}

/// One record per (student, date) slot, insertion ordered. There is no way
/// to clear a slot once marked.
#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<AttendanceRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn on_date<'a, 'd>(&'a self, date: &'d str) -> impl Iterator<Item = &'a AttendanceRecord> + 'd
    where
        'a: 'd,
    {
        self.records.iter().filter(move |r| r.date == date)
    }

    pub fn get(&self, student_id: &str, date: &str) -> Option<&AttendanceRecord> {
        self.records
            .iter()
            .find(|r| r.student_id == student_id && r.date == date)
    }

    /// Overwrites the status of an existing slot, otherwise opens one with
    /// a snapshot of `student`.
    pub fn mark(&mut self, student: &Student, status: AttendanceStatus, date: &str) -> MarkOutcome {
        if let Some(rec) = self
            .records
            .iter_mut()
            .find(|r| r.student_id == student.id && r.date == date)
        {
            rec.status = status;
            return MarkOutcome::Updated;
        }
        self.records.push(AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            student_id: student.id.clone(),
            name: student.name.clone(),
            class: student.class.clone(),
            date: date.to_string(),
            status,
        });
        MarkOutcome::Created
    }

    pub fn status_for(&self, student_id: &str, date: &str) -> Option<AttendanceStatus> {
        self.get(student_id, date).map(|r| r.status)
    }

    pub fn count_by_status(&self, date: &str, status: AttendanceStatus) -> usize {
        self.on_date(date).filter(|r| r.status == status).count()
    }
}
