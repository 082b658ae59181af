use crate::calc::{self, Grade};
use crate::directory::Student;
use crate::exams::ExamRecord;
use crate::ledger::AttendanceStatus;
use crate::records::Records;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStudent<'a> {
    #[serde(flatten)]
    pub student: &'a Student,
    pub average: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard<'a> {
    pub today: &'a str,
    pub total_students: usize,
    pub present_today: usize,
    pub total_exams: usize,
    pub average_score_all: i64,
    pub top_performers: Vec<RankedStudent<'a>>,
    pub performers: Vec<RankedStudent<'a>>,
    pub has_performers: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamBoardRow<'a> {
    pub student: &'a Student,
    pub average: i64,
    pub exams: Vec<&'a ExamRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCount {
    pub grade: Grade,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDistribution {
    pub class: Option<String>,
    pub total: usize,
    pub passed: usize,
    pub counts: Vec<GradeCount>,
}

/// Mean percentage over the student's results, 0 when there are none.
pub fn average_for(records: &Records, student_id: &str) -> i64 {
    calc::mean_rounded(records.exams().results_for(student_id).map(|e| e.percentage))
}

/// Every student ranked by average, best first. Ties keep roster order and
/// students without results stay in with an average of 0.
pub fn ranking(records: &Records) -> Vec<RankedStudent<'_>> {
    let mut out: Vec<RankedStudent<'_>> = records
        .directory()
        .all()
        .iter()
        .map(|s| RankedStudent {
            student: s,
            average: average_for(records, &s.id),
        })
        .collect();
    // sort_by is stable.
    out.sort_by(|a, b| b.average.cmp(&a.average));
    out
}

pub fn top_performers(records: &Records, n: usize) -> Vec<RankedStudent<'_>> {
    let mut out = ranking(records);
    out.truncate(n);
    out
}

/// The subset of a ranking that has actually scored something.
pub fn performers<'a>(ranked: &[RankedStudent<'a>]) -> Vec<RankedStudent<'a>> {
    ranked.iter().filter(|r| r.average > 0).cloned().collect()
}

/// Mean over every result in the book, not a mean of student averages.
pub fn overall_average(records: &Records) -> i64 {
    calc::mean_rounded(records.exams().all().iter().map(|e| e.percentage))
}

pub fn present_today_count(records: &Records) -> usize {
    records
        .ledger()
        .count_by_status(&records.today, AttendanceStatus::Present)
}

/// Home-screen summary. The top list is rendered whole as soon as anyone in
/// it has performed; otherwise the dashboard shows its empty state.
pub fn dashboard(records: &Records, top_n: usize) -> Dashboard<'_> {
    let top = top_performers(records, top_n);
    let performing = performers(&top);
    let average_score_all = if records.directory().is_empty() || records.exams().is_empty() {
        0
    } else {
        overall_average(records)
    };
    Dashboard {
        today: &records.today,
        total_students: records.directory().len(),
        present_today: present_today_count(records),
        total_exams: records.exams().len(),
        average_score_all,
        has_performers: !performing.is_empty(),
        top_performers: top,
        performers: performing,
    }
}

/// Exam view: every student matching `query` with their results. No
/// filtering on average happens here.
pub fn exam_board<'a>(records: &'a Records, query: &str) -> Vec<ExamBoardRow<'a>> {
    records
        .directory()
        .search(query)
        .map(|s| ExamBoardRow {
            student: s,
            average: average_for(records, &s.id),
            exams: records.exams().results_for(&s.id).collect(),
        })
        .collect()
}

/// Grade counts for one class (by the owning student's current class) or
/// for the whole book. `passed` counts grades at or above `passing`.
pub fn grade_distribution(records: &Records, class: Option<&str>, passing: Grade) -> GradeDistribution {
    let in_scope = |e: &&ExamRecord| match class {
        None => true,
        Some(c) => records
            .directory()
            .get(&e.student_id)
            .map(|s| s.class == c)
            .unwrap_or(false),
    };

    let mut counts: Vec<GradeCount> = Grade::ALL
        .iter()
        .map(|g| GradeCount { grade: *g, count: 0 })
        .collect();
    let mut total = 0;
    let mut passed = 0;
    for e in records.exams().all().iter().filter(in_scope) {
        total += 1;
        if e.grade <= passing {
            passed += 1;
        }
        if let Some(slot) = counts.iter_mut().find(|c| c.grade == e.grade) {
            slot.count += 1;
        }
    }

    GradeDistribution {
        class: class.map(|c| c.to_string()),
        total,
        passed,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StudentInput;
    use crate::exams::ExamInput;

    const TODAY: &str = "2024-03-15";

    fn add(records: &mut Records, name: &str, class: &str) -> String {
        records
            .add_student(&StudentInput {
                name: name.into(),
                class: class.into(),
                email: format!("{}@school.org", name.to_lowercase()),
                phone: "555".into(),
            })
            .map(|s| s.id.clone())
            .expect("student added")
    }

    fn score(records: &mut Records, student_id: &str, score: &str, max: &str) {
        let input = ExamInput {
            student_id: student_id.into(),
            exam_name: "Quiz".into(),
            subject: "English".into(),
            score: score.into(),
            max_score: max.into(),
            ..ExamInput::default()
        };
        assert!(records.record_exam(&input).is_some(), "exam recorded");
    }

    fn count_of(d: &GradeDistribution, g: Grade) -> usize {
        d.counts
            .iter()
            .find(|c| c.grade == g)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    #[test]
    fn average_is_zero_without_results() {
        let mut records = Records::new(TODAY);
        let s = add(&mut records, "Ann", "10A");
        assert_eq!(average_for(&records, &s), 0);
        assert_eq!(average_for(&records, "ghost"), 0);

        score(&mut records, &s, "1", "3");
        score(&mut records, &s, "2", "3");
        // (33 + 67) / 2
        assert_eq!(average_for(&records, &s), 50);
    }

    #[test]
    fn ranking_is_stable_and_keeps_zero_averages() {
        let mut records = Records::new(TODAY);
        let a = add(&mut records, "Ann", "10A");
        let b = add(&mut records, "Bob", "10A");
        let c = add(&mut records, "Cy", "10B");
        let d = add(&mut records, "Di", "10B");
        score(&mut records, &b, "80", "100");
        score(&mut records, &c, "80", "100");
        score(&mut records, &d, "95", "100");

        let top = top_performers(&records, 3);
        let ids: Vec<&str> = top.iter().map(|r| r.student.id.as_str()).collect();
        assert_eq!(ids, vec![d.as_str(), b.as_str(), c.as_str()]);

        let all = ranking(&records);
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].student.id, a);
        assert_eq!(all[3].average, 0);
        assert_eq!(performers(&all).len(), 3);
    }

    #[test]
    fn performers_drop_exact_zero_only() {
        let mut records = Records::new(TODAY);
        let a = add(&mut records, "Ann", "10A");
        let b = add(&mut records, "Bob", "10A");
        add(&mut records, "Cy", "10A");
        score(&mut records, &a, "0", "100");
        score(&mut records, &b, "1", "100");

        let top = top_performers(&records, 3);
        assert_eq!(top.len(), 3);
        let shown = performers(&top);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].student.id, b);
    }

    #[test]
    fn huge_scores_average_without_overflow() {
        let mut records = Records::new(TODAY);
        let a = add(&mut records, "Ann", "10A");
        score(&mut records, &a, "9e16", "1");
        score(&mut records, &a, "9e16", "1");
        assert_eq!(average_for(&records, &a), 9_000_000_000_000_000_000);
        assert_eq!(overall_average(&records), 9_000_000_000_000_000_000);

        // Past i64 range the result is not recorded at all.
        let input = ExamInput {
            student_id: a.clone(),
            exam_name: "Quiz".into(),
            subject: "English".into(),
            score: "1e17".into(),
            max_score: "1".into(),
            ..ExamInput::default()
        };
        assert!(records.record_exam(&input).is_none());
        assert_eq!(records.exams().len(), 2);
    }

    #[test]
    fn overall_average_weights_every_result() {
        let mut records = Records::new(TODAY);
        assert_eq!(overall_average(&records), 0);
        let a = add(&mut records, "Ann", "10A");
        let b = add(&mut records, "Bob", "10A");
        score(&mut records, &a, "100", "100");
        score(&mut records, &a, "90", "100");
        score(&mut records, &a, "80", "100");
        score(&mut records, &b, "50", "100");
        // per-result mean is 80; mean of student averages would be 70
        assert_eq!(overall_average(&records), 80);
    }

    #[test]
    fn present_today_ignores_other_dates() {
        let mut records = Records::new(TODAY);
        let a = add(&mut records, "Ann", "10A");
        let b = add(&mut records, "Bob", "10A");
        records.mark_attendance(&a, AttendanceStatus::Present, None);
        records.mark_attendance(&b, AttendanceStatus::Absent, None);
        records.mark_attendance(&b, AttendanceStatus::Present, Some("2024-03-14"));
        assert_eq!(present_today_count(&records), 1);
    }

    #[test]
    fn dashboard_empty_state_and_full_list() {
        let mut records = Records::new(TODAY);
        let a = add(&mut records, "Ann", "10A");
        add(&mut records, "Bob", "10A");

        let empty = dashboard(&records, 3);
        assert!(!empty.has_performers);
        assert_eq!(empty.top_performers.len(), 2);
        assert_eq!(empty.average_score_all, 0);

        score(&mut records, &a, "72", "100");
        let d = dashboard(&records, 3);
        assert!(d.has_performers);
        assert_eq!(d.top_performers.len(), 2);
        assert_eq!(d.performers.len(), 1);
        assert_eq!(d.total_exams, 1);
        assert_eq!(d.average_score_all, 72);
    }

    #[test]
    fn exam_board_keeps_students_without_results() {
        let mut records = Records::new(TODAY);
        let a = add(&mut records, "Ann", "10A");
        add(&mut records, "Bob", "11B");
        score(&mut records, &a, "45", "50");

        let rows = exam_board(&records, "");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].average, 90);
        assert_eq!(rows[0].exams.len(), 1);
        assert_eq!(rows[1].average, 0);
        assert!(rows[1].exams.is_empty());

        assert_eq!(exam_board(&records, "11b").len(), 1);
    }

    #[test]
    fn grade_distribution_per_class() {
        let mut records = Records::new(TODAY);
        let a = add(&mut records, "Ann", "10A");
        let b = add(&mut records, "Bob", "10B");
        score(&mut records, &a, "95", "100");
        score(&mut records, &a, "65", "100");
        score(&mut records, &a, "10", "100");
        score(&mut records, &b, "85", "100");

        let all = grade_distribution(&records, None, Grade::D);
        assert_eq!(all.total, 4);
        assert_eq!(all.passed, 3);
        assert_eq!(all.counts.len(), 5);

        let ten_a = grade_distribution(&records, Some("10A"), Grade::C);
        assert_eq!(ten_a.total, 3);
        assert_eq!(count_of(&ten_a, Grade::A), 1);
        assert_eq!(count_of(&ten_a, Grade::D), 1);
        assert_eq!(count_of(&ten_a, Grade::F), 1);
        assert_eq!(count_of(&ten_a, Grade::B), 0);
        assert_eq!(ten_a.passed, 1);

        assert_eq!(grade_distribution(&records, Some("10a"), Grade::D).total, 0);
    }
}
