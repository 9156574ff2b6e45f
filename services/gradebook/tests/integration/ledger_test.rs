use chrono::{TimeZone, Utc};

use gradebook::domain::types::GradeFilter;
use gradebook::error::GradebookServiceError;
use gradebook::usecase::grade::{
    BulkCreateGradesInput, BulkCreateGradesUseCase, CreateGradeInput, DeleteGradeUseCase,
    ListGradesUseCase, UpdateGradeInput, UpdateGradeUseCase,
};
use gradebook::usecase::subject::ListSubjectsUseCase;

use crate::helpers::{InMemoryStore, subject_for};

#[tokio::test]
async fn should_reject_subject_from_the_other_band() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 2);
    let ani = store.add_student(&teacher, "Ani", None);

    let err = store
        .create_grade_usecase()
        .execute(
            teacher.id,
            CreateGradeInput {
                student_id: Some(ani.id),
                subject_id: Some(subject_for("Matematika", 5)),
                task_name: Some("UH 1".to_owned()),
                score: Some(80.0),
                max_score: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, GradebookServiceError::SubjectClassMismatch));
    assert_eq!(store.grade_count(teacher.id), 0);
}

#[tokio::test]
async fn should_record_grade_with_default_max_score() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 5);
    let ani = store.add_student(&teacher, "Ani", None);

    let grade = store
        .create_grade_usecase()
        .execute(
            teacher.id,
            CreateGradeInput {
                student_id: Some(ani.id),
                subject_id: Some(subject_for("Bahasa Inggris", 5)),
                task_name: Some("  Quiz  ".to_owned()),
                score: Some(88.0),
                max_score: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(grade.max_score, 100.0);
    assert_eq!(grade.task_name, "Quiz");
    assert_eq!(grade.teacher_id, teacher.id);
}

#[tokio::test]
async fn should_not_grade_other_teachers_students() {
    let store = InMemoryStore::seeded();
    let a = store.add_teacher("Teacher A", 1);
    let b = store.add_teacher("Teacher B", 2);
    let theirs = store.add_student(&b, "Budi", None);

    let err = store
        .create_grade_usecase()
        .execute(
            a.id,
            CreateGradeInput {
                student_id: Some(theirs.id),
                subject_id: Some(subject_for("PJOK", 1)),
                task_name: Some("Lari".to_owned()),
                score: Some(50.0),
                max_score: Some(100.0),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, GradebookServiceError::StudentNotFound));
}

#[tokio::test]
async fn should_list_newest_first_then_by_student_name() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 4);
    let ani = store.add_student(&teacher, "Ani", None);
    let budi = store.add_student(&teacher, "Budi", None);
    let citra = store.add_student(&teacher, "Citra", None);
    let subject = subject_for("IPAS", 4);

    let jan = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    let feb = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
    store.add_grade(&budi, &subject, 70.0, 100.0, jan);
    store.add_grade(&citra, &subject, 75.0, 100.0, feb);
    store.add_grade(&ani, &subject, 80.0, 100.0, feb);

    let entries = ListGradesUseCase {
        repo: store.clone(),
    }
    .execute(teacher.id, GradeFilter::default())
    .await
    .unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.student_name.as_str()).collect();
    assert_eq!(names, ["Ani", "Citra", "Budi"]);
    assert!(entries.iter().all(|e| e.subject_name == "IPAS"));

    let only_budi = ListGradesUseCase {
        repo: store.clone(),
    }
    .execute(
        teacher.id,
        GradeFilter {
            student_id: Some(budi.id),
            subject_id: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(only_budi.len(), 1);
    assert_eq!(only_budi[0].grade.score, 70.0);
}

#[tokio::test]
async fn should_apply_bulk_grade_to_whole_roster() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 3);
    let other = store.add_teacher("Teacher B", 6);
    for name in ["Ani", "Budi", "Citra"] {
        store.add_student(&teacher, name, None);
    }
    store.add_student(&other, "Dewi", None);

    let outcome = BulkCreateGradesUseCase {
        create: store.create_grade_usecase(),
    }
    .execute(
        teacher.id,
        teacher.assigned_class,
        BulkCreateGradesInput {
            subject_id: Some(subject_for("Seni", 3)),
            task_name: Some("Menggambar".to_owned()),
            score: Some(90.0),
            max_score: Some(100.0),
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome.success_count, 3);
    assert_eq!(outcome.error_count, 0);
    assert_eq!(store.grade_count(teacher.id), 3);
    assert_eq!(store.grade_count(other.id), 0);
}

#[tokio::test]
async fn should_reject_invalid_bulk_input_once() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 3);
    store.add_student(&teacher, "Ani", None);

    let err = BulkCreateGradesUseCase {
        create: store.create_grade_usecase(),
    }
    .execute(
        teacher.id,
        teacher.assigned_class,
        BulkCreateGradesInput {
            subject_id: Some(subject_for("Seni", 3)),
            task_name: Some("Menggambar".to_owned()),
            score: Some(120.0),
            max_score: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        GradebookServiceError::ScoreOutOfRange { .. }
    ));
    assert_eq!(store.grade_count(teacher.id), 0);
}

#[tokio::test]
async fn should_update_and_delete_own_grades_only() {
    let store = InMemoryStore::seeded();
    let a = store.add_teacher("Teacher A", 1);
    let b = store.add_teacher("Teacher B", 2);
    let ani = store.add_student(&a, "Ani", None);
    let date = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let grade = store.add_grade(&ani, &subject_for("Matematika", 1), 40.0, 50.0, date);

    let update = UpdateGradeUseCase {
        repo: store.clone(),
    };
    let input = UpdateGradeInput {
        task_name: Some("UTS".to_owned()),
        score: Some(45.0),
        max_score: Some(50.0),
    };

    let err = update.execute(b.id, grade.id, input.clone()).await.unwrap_err();
    assert!(matches!(err, GradebookServiceError::GradeNotFound));

    let updated = update.execute(a.id, grade.id, input).await.unwrap();
    assert_eq!(updated.task_name, "UTS");
    assert_eq!(updated.score, 45.0);
    assert_eq!(updated.date, date);
    assert_eq!(updated.student_id, ani.id);

    let delete = DeleteGradeUseCase {
        repo: store.clone(),
    };
    let err = delete.execute(b.id, grade.id).await.unwrap_err();
    assert!(matches!(err, GradebookServiceError::GradeNotFound));
    delete.execute(a.id, grade.id).await.unwrap();
    assert_eq!(store.grade_count(a.id), 0);
}

#[tokio::test]
async fn should_list_subjects_of_own_band() {
    let store = InMemoryStore::seeded();
    let lower = store.add_teacher("Teacher A", 2);
    let upper = store.add_teacher("Teacher B", 4);
    let list = ListSubjectsUseCase {
        repo: store.clone(),
    };

    let lower_subjects = list.execute(lower.assigned_class).await.unwrap();
    let upper_subjects = list.execute(upper.assigned_class).await.unwrap();
    assert_eq!(lower_subjects.len(), 7);
    assert_eq!(upper_subjects.len(), 8);
    assert!(!lower_subjects.iter().any(|s| s.name == "Bahasa Inggris"));
    assert!(upper_subjects.iter().any(|s| s.name == "Bahasa Inggris"));
}
