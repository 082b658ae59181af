use crate::confirm::{Confirm, DELETE_EXAM_PROMPT, DELETE_STUDENT_PROMPT};
use crate::directory::{Directory, Student, StudentInput};
use crate::exams::{ExamBook, ExamInput, ExamRecord};
use crate::ledger::{AttendanceRecord, AttendanceStatus, Ledger, MarkOutcome};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { exams_removed: usize },
    Declined,
    NotFound,
}

/// The three stores plus the session date. Every mutation goes through here
/// so cross-store rules (cascades, identity lookups) live in one place.
#[derive(Debug)]
pub struct Records {
    pub today: String,
    directory: Directory,
    ledger: Ledger,
    exams: ExamBook,
}

impl Records {
    pub fn new(today: impl Into<String>) -> Self {
        Self {
            today: today.into(),
            directory: Directory::new(),
            ledger: Ledger::new(),
            exams: ExamBook::new(),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn exams(&self) -> &ExamBook {
        &self.exams
    }

    pub fn add_student(&mut self, input: &StudentInput) -> Option<&Student> {
        match self.directory.add(input) {
            Some(s) => {
                info!(student_id = %s.id, class = %s.class, "student added");
                Some(s)
            }
            None => {
                debug!("student add ignored: blank field");
                None
            }
        }
    }

    pub fn edit_student(&mut self, id: &str, input: &StudentInput) -> Option<&Student> {
        match self.directory.edit(id, input) {
            Some(s) => {
                info!(student_id = %s.id, "student updated");
                Some(s)
            }
            None => {
                debug!(student_id = id, "student edit ignored");
                None
            }
        }
    }

    /// Removes the student and every exam result they own. Attendance rows
    /// are left in place.
    pub fn delete_student(&mut self, id: &str, gate: &mut impl Confirm) -> DeleteOutcome {
        if self.directory.get(id).is_none() {
            debug!(student_id = id, "student delete ignored: not found");
            return DeleteOutcome::NotFound;
        }
        if !gate.confirm(DELETE_STUDENT_PROMPT) {
            debug!(student_id = id, "student delete declined");
            return DeleteOutcome::Declined;
        }
        self.directory.remove(id);
        let exams_removed = self.exams.remove_for_student(id);
        info!(student_id = id, exams_removed, "student deleted");
        DeleteOutcome::Deleted { exams_removed }
    }

    /// `date` defaults to today. `None` when the student does not exist.
    pub fn mark_attendance(
        &mut self,
        student_id: &str,
        status: AttendanceStatus,
        date: Option<&str>,
    ) -> Option<(MarkOutcome, &AttendanceRecord)> {
        let Some(student) = self.directory.get(student_id) else {
            debug!(student_id, "attendance mark ignored: unknown student");
            return None;
        };
        let date = date.unwrap_or(&self.today);
        let outcome = self.ledger.mark(student, status, date);
        info!(student_id, date, ?status, ?outcome, "attendance marked");
        self.ledger.get(student_id, date).map(|r| (outcome, r))
    }

    pub fn attendance_for(&self, student_id: &str, date: Option<&str>) -> Option<AttendanceStatus> {
        self.ledger
            .status_for(student_id, date.unwrap_or(&self.today))
    }

    pub fn record_exam(&mut self, input: &ExamInput) -> Option<&ExamRecord> {
        let Some(student) = self.directory.get(input.student_id.trim()) else {
            debug!(student_id = %input.student_id, "exam record ignored: unknown student");
            return None;
        };
        match self.exams.record(student, input, &self.today) {
            Some(e) => {
                info!(
                    exam_id = %e.id,
                    student_id = %e.student_id,
                    percentage = e.percentage,
                    grade = %e.grade,
                    "exam recorded"
                );
                Some(e)
            }
            None => {
                debug!(student_id = %input.student_id, "exam record ignored: missing or invalid field");
                None
            }
        }
    }

    pub fn delete_exam(&mut self, id: &str, gate: &mut impl Confirm) -> DeleteOutcome {
        if self.exams.get(id).is_none() {
            debug!(exam_id = id, "exam delete ignored: not found");
            return DeleteOutcome::NotFound;
        }
        if !gate.confirm(DELETE_EXAM_PROMPT) {
            debug!(exam_id = id, "exam delete declined");
            return DeleteOutcome::Declined;
        }
        self.exams.remove(id);
        info!(exam_id = id, "exam deleted");
        DeleteOutcome::Deleted { exams_removed: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: &str = "2024-03-15";

    fn add(records: &mut Records, name: &str, class: &str) -> String {
        records
            .add_student(&StudentInput {
                name: name.into(),
                class: class.into(),
                email: format!("{}@school.org", name.to_lowercase()),
                phone: "555-0100".into(),
            })
            .map(|s| s.id.clone())
            .expect("student added")
    }

    fn exam(student_id: &str, score: &str) -> ExamInput {
        ExamInput {
            student_id: student_id.into(),
            exam_name: "Unit Test".into(),
            subject: "Science".into(),
            score: score.into(),
            max_score: "100".into(),
            ..ExamInput::default()
        }
    }

    #[test]
    fn delete_student_cascades_exams_but_not_attendance() {
        let mut records = Records::new(TODAY);
        let s = add(&mut records, "Ann", "10A");
        let other = add(&mut records, "Bob", "10A");
        assert!(records.record_exam(&exam(&s, "90")).is_some());
        assert!(records.record_exam(&exam(&s, "70")).is_some());
        assert!(records.record_exam(&exam(&other, "60")).is_some());
        assert!(records
            .mark_attendance(&s, AttendanceStatus::Present, None)
            .is_some());

        let outcome = records.delete_student(&s, &mut |_: &str| true);
        assert_eq!(outcome, DeleteOutcome::Deleted { exams_removed: 2 });
        assert!(records.directory().get(&s).is_none());
        assert_eq!(records.exams().len(), 1);
        // Attendance is intentionally not cascaded.
        assert_eq!(
            records.attendance_for(&s, None),
            Some(AttendanceStatus::Present)
        );
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let mut records = Records::new(TODAY);
        let s = add(&mut records, "Ann", "10A");
        records.record_exam(&exam(&s, "90"));

        let mut asked = Vec::new();
        let outcome = records.delete_student(&s, &mut |p: &str| {
            asked.push(p.to_string());
            false
        });
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(asked, vec![DELETE_STUDENT_PROMPT.to_string()]);
        assert_eq!(records.directory().len(), 1);
        assert_eq!(records.exams().len(), 1);
    }

    #[test]
    fn unknown_ids_do_not_prompt() {
        let mut records = Records::new(TODAY);
        let mut prompted = false;
        let outcome = records.delete_student("ghost", &mut |_: &str| {
            prompted = true;
            true
        });
        assert_eq!(outcome, DeleteOutcome::NotFound);
        assert!(!prompted);
        assert_eq!(
            records.delete_exam("ghost", &mut |_: &str| true),
            DeleteOutcome::NotFound
        );
    }

    #[test]
    fn mark_attendance_requires_known_student_and_defaults_to_today() {
        let mut records = Records::new(TODAY);
        assert!(records
            .mark_attendance("ghost", AttendanceStatus::Present, None)
            .is_none());
        assert_eq!(records.ledger().all().len(), 0);

        let s = add(&mut records, "Ann", "10A");
        let (outcome, rec) = records
            .mark_attendance(&s, AttendanceStatus::Present, None)
            .map(|(o, r)| (o, r.clone()))
            .expect("marked");
        assert_eq!(outcome, MarkOutcome::Created);
        assert_eq!(rec.date, TODAY);

        let (outcome, _) = records
            .mark_attendance(&s, AttendanceStatus::Absent, None)
            .expect("re-marked");
        assert_eq!(outcome, MarkOutcome::Updated);
        assert_eq!(records.ledger().all().len(), 1);
        assert_eq!(records.attendance_for(&s, None), Some(AttendanceStatus::Absent));
    }

    #[test]
    fn record_exam_for_unknown_student_is_ignored() {
        let mut records = Records::new(TODAY);
        assert!(records.record_exam(&exam("ghost", "90")).is_none());
        assert!(records.exams().is_empty());
    }

    #[test]
    fn exam_snapshot_survives_student_edit() {
        let mut records = Records::new(TODAY);
        let s = add(&mut records, "Ann", "10A");
        records.record_exam(&exam(&s, "88"));
        records.edit_student(
            &s,
            &StudentInput {
                name: "Ann Marie".into(),
                class: "10A".into(),
                email: "ann@school.org".into(),
                phone: "555-0100".into(),
            },
        );
        assert_eq!(records.exams().all()[0].student_name, "Ann");
        assert_eq!(
            records.directory().get(&s).map(|st| st.name.as_str()),
            Some("Ann Marie")
        );
    }

    #[test]
    fn delete_exam_removes_only_that_result() {
        let mut records = Records::new(TODAY);
        let s = add(&mut records, "Ann", "10A");
        let first = records
            .record_exam(&exam(&s, "90"))
            .map(|e| e.id.clone())
            .expect("recorded");
        records.record_exam(&exam(&s, "50"));

        assert_eq!(
            records.delete_exam(&first, &mut |_: &str| true),
            DeleteOutcome::Deleted { exams_removed: 1 }
        );
        assert_eq!(records.exams().len(), 1);
        assert_eq!(records.exams().all()[0].percentage, 50);
    }
}
