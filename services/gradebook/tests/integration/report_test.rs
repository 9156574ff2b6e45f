use std::io::{Cursor, Read};

use chrono::{TimeZone, Utc};

use gradebook::domain::repository::TabularExportPort;
use gradebook::infra::xlsx::{XLSX_CONTENT_TYPE, XlsxExporter};
use gradebook::usecase::report::{ExportReportUseCase, GetReportUseCase};

use crate::helpers::{InMemoryStore, subject_for};

fn report_usecase(store: &InMemoryStore) -> GetReportUseCase<InMemoryStore, InMemoryStore, InMemoryStore> {
    GetReportUseCase {
        students: store.clone(),
        subjects: store.clone(),
        grades: store.clone(),
    }
}

#[tokio::test]
async fn should_summarize_each_student_per_subject() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 2);
    let ani = store.add_student(&teacher, "Ani", Some("001"));
    let budi = store.add_student(&teacher, "Budi", None);
    let math = subject_for("Matematika", 2);
    let jan = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let feb = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
    store.add_grade(&ani, &math, 80.0, 100.0, jan);
    store.add_grade(&ani, &math, 45.0, 50.0, feb);

    let report = report_usecase(&store)
        .execute(teacher.id, teacher.assigned_class)
        .await
        .unwrap();

    // One section per subject of the band, even without grades.
    assert_eq!(report.subjects.len(), 7);

    let math_section = report
        .subjects
        .iter()
        .find(|s| s.subject_id == math)
        .unwrap();
    assert_eq!(math_section.grades.len(), 2);
    let ani_summary = math_section
        .students
        .iter()
        .find(|s| s.student_id == ani.id)
        .unwrap();
    assert_eq!(ani_summary.task_count, 2);
    assert_eq!(ani_summary.average, 85.0);
    assert_eq!(ani_summary.highest, 90.0);
    assert_eq!(ani_summary.lowest, 80.0);

    let budi_summary = math_section
        .students
        .iter()
        .find(|s| s.student_id == budi.id)
        .unwrap();
    assert_eq!(budi_summary.task_count, 0);
    assert_eq!(budi_summary.average, 0.0);

    let ipas = report
        .subjects
        .iter()
        .find(|s| s.subject_name == "IPAS")
        .unwrap();
    assert!(ipas.grades.is_empty());
    assert!(ipas.students.iter().all(|s| s.task_count == 0 && s.total == 0.0));
}

#[tokio::test]
async fn should_export_workbook_with_one_sheet_per_subject() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 5);
    let ani = store.add_student(&teacher, "Ani", None);
    store.add_grade(
        &ani,
        &subject_for("Bahasa Inggris", 5),
        75.0,
        100.0,
        Utc::now(),
    );

    let exported = ExportReportUseCase {
        teachers: store.clone(),
        report: report_usecase(&store),
        exporter: XlsxExporter,
    }
    .execute(teacher.id, teacher.assigned_class)
    .await
    .unwrap();

    assert_eq!(exported.content_type, XLSX_CONTENT_TYPE);
    assert_eq!(exported.content_type, XlsxExporter.content_type());
    let today = Utc::now().format("%Y-%m-%d").to_string();
    assert_eq!(
        exported.filename,
        format!("grade_report_class_5_{today}.xlsx")
    );

    let mut archive = zip::ZipArchive::new(Cursor::new(exported.bytes)).unwrap();
    let mut workbook = String::new();
    archive
        .by_name("xl/workbook.xml")
        .unwrap()
        .read_to_string(&mut workbook)
        .unwrap();
    assert_eq!(workbook.matches("<sheet ").count(), 8);
    assert!(workbook.contains("Bahasa Inggris"));

    let mut core = String::new();
    archive
        .by_name("docProps/core.xml")
        .unwrap()
        .read_to_string(&mut core)
        .unwrap();
    assert!(core.contains("Teacher A"));
}
