//! Per-subject aggregation of the grade ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use gradebook_domain::score::{PercentageSummary, format_one_decimal, percentage, round_one_decimal};

use crate::domain::tabular::{Cell, Row, RowStyle, Sheet, TabularDocument};
use crate::domain::types::{GradeEntry, Student, Subject};

pub const GRADE_HEADER: [&str; 8] = [
    "No",
    "Student Name",
    "NISN",
    "Task Name",
    "Score",
    "Max Score",
    "Percentage",
    "Date",
];

pub const SUMMARY_TITLE: &str = "GRADE SUMMARY PER STUDENT";

pub const SUMMARY_HEADER: [&str; 8] = [
    "No",
    "Student Name",
    "NISN",
    "Task Count",
    "Total",
    "Average",
    "Highest",
    "Lowest",
];

pub const COLUMN_WIDTHS: [f64; 8] = [5.0, 25.0, 15.0, 20.0, 10.0, 15.0, 12.0, 15.0];

const MISSING_NISN: &str = "-";
const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub subjects: Vec<SubjectReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectReport {
    pub subject_id: String,
    pub subject_name: String,
    pub grades: Vec<GradeLine>,
    pub students: Vec<StudentSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeLine {
    pub grade_id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub nisn: Option<String>,
    pub task_name: String,
    pub score: f64,
    pub max_score: f64,
    /// Rounded to one decimal.
    pub percentage: f64,
    #[serde(serialize_with = "gradebook_core::serde::to_rfc3339_ms")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    pub student_id: Uuid,
    pub student_name: String,
    pub nisn: Option<String>,
    pub task_count: usize,
    pub total: f64,
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
}

/// Aggregate the ledger for one class.
///
/// `subjects` is the caller's band, `students` the caller's roster. Grades of
/// students outside the roster are ignored.
pub fn build_report(subjects: &[Subject], students: &[Student], grades: &[GradeEntry]) -> Report {
    let mut subjects: Vec<&Subject> = subjects.iter().collect();
    subjects.sort_by(|a, b| a.name.cmp(&b.name));

    let mut roster: Vec<&Student> = students.iter().collect();
    roster.sort_by(|a, b| a.name.cmp(&b.name));

    let subjects = subjects
        .into_iter()
        .map(|subject| {
            let mut entries: Vec<&GradeEntry> = grades
                .iter()
                .filter(|e| e.grade.subject_id == subject.id)
                .filter(|e| roster.iter().any(|s| s.id == e.grade.student_id))
                .collect();
            entries.sort_by(|a, b| {
                a.student_name
                    .cmp(&b.student_name)
                    .then(a.grade.date.cmp(&b.grade.date))
            });

            let students = roster
                .iter()
                .map(|student| summarize_student(student, &entries))
                .collect();

            SubjectReport {
                subject_id: subject.id.clone(),
                subject_name: subject.name.clone(),
                grades: entries.into_iter().map(grade_line).collect(),
                students,
            }
        })
        .collect();

    Report { subjects }
}

fn grade_line(entry: &GradeEntry) -> GradeLine {
    let g = &entry.grade;
    GradeLine {
        grade_id: g.id,
        student_id: g.student_id,
        student_name: entry.student_name.clone(),
        nisn: entry.student_nisn.clone(),
        task_name: g.task_name.clone(),
        score: g.score,
        max_score: g.max_score,
        percentage: round_one_decimal(percentage(g.score, g.max_score)),
        date: g.date,
    }
}

fn summarize_student(student: &Student, entries: &[&GradeEntry]) -> StudentSummary {
    let summary = PercentageSummary::from_percentages(
        entries
            .iter()
            .filter(|e| e.grade.student_id == student.id)
            .map(|e| percentage(e.grade.score, e.grade.max_score)),
    )
    .rounded();

    StudentSummary {
        student_id: student.id,
        student_name: student.name.clone(),
        nisn: student.nisn.clone(),
        task_count: summary.count,
        total: summary.total,
        average: summary.average,
        highest: summary.highest,
        lowest: summary.lowest,
    }
}

impl Report {
    /// One sheet per subject: grade table, blank row, summary title, summary table.
    pub fn to_document(&self, creator: &str) -> TabularDocument {
        let sheets = self
            .subjects
            .iter()
            .map(|subject| {
                let mut rows = Vec::with_capacity(subject.grades.len() + subject.students.len() + 4);
                rows.push(Row::labels(RowStyle::Header, &GRADE_HEADER));
                for (i, line) in subject.grades.iter().enumerate() {
                    rows.push(Row::plain(vec![
                        Cell::from(i + 1),
                        Cell::text(&line.student_name),
                        Cell::text(nisn_or_dash(line.nisn.as_deref())),
                        Cell::text(&line.task_name),
                        Cell::from(line.score),
                        Cell::from(line.max_score),
                        Cell::text(format!("{}%", format_one_decimal(line.percentage))),
                        Cell::text(line.date.format(DATE_FORMAT).to_string()),
                    ]));
                }

                rows.push(Row::blank());
                rows.push(Row::labels(RowStyle::Title, &[SUMMARY_TITLE]));
                rows.push(Row::labels(RowStyle::SummaryHeader, &SUMMARY_HEADER));
                for (i, s) in subject.students.iter().enumerate() {
                    rows.push(Row::plain(vec![
                        Cell::from(i + 1),
                        Cell::text(&s.student_name),
                        Cell::text(nisn_or_dash(s.nisn.as_deref())),
                        Cell::from(s.task_count),
                        Cell::text(format_one_decimal(s.total)),
                        Cell::text(format_one_decimal(s.average)),
                        Cell::text(format_one_decimal(s.highest)),
                        Cell::text(format_one_decimal(s.lowest)),
                    ]));
                }

                Sheet {
                    name: subject.subject_name.clone(),
                    column_widths: COLUMN_WIDTHS.to_vec(),
                    rows,
                }
            })
            .collect();

        TabularDocument {
            creator: creator.to_owned(),
            sheets,
        }
    }
}

fn nisn_or_dash(nisn: Option<&str>) -> &str {
    nisn.unwrap_or(MISSING_NISN)
}
