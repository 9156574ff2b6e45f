use gradebook::error::GradebookServiceError;
use gradebook::usecase::student::{
    CreateStudentUseCase, DeleteStudentUseCase, ListStudentsUseCase, StudentInput,
    UpdateStudentUseCase,
};

use crate::helpers::{InMemoryStore, subject_for};

fn input(name: &str, nisn: Option<&str>) -> StudentInput {
    StudentInput {
        name: Some(name.to_owned()),
        nisn: nisn.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_reject_duplicate_nisn_across_teachers() {
    let store = InMemoryStore::seeded();
    let a = store.add_teacher("Teacher A", 2);
    let b = store.add_teacher("Teacher B", 4);
    let create = CreateStudentUseCase {
        repo: store.clone(),
    };

    create
        .execute(a.id, a.assigned_class, input("Ani", Some("12345")))
        .await
        .unwrap();
    let err = create
        .execute(b.id, b.assigned_class, input("Budi", Some(" 12345 ")))
        .await
        .unwrap_err();
    assert!(matches!(err, GradebookServiceError::NisnAlreadyUsed));
}

#[tokio::test]
async fn should_reject_update_to_a_taken_nisn_but_allow_keeping_own() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 3);
    store.add_student(&teacher, "Ani", Some("111"));
    let budi = store.add_student(&teacher, "Budi", Some("222"));
    let update = UpdateStudentUseCase {
        repo: store.clone(),
    };

    let err = update
        .execute(teacher.id, budi.id, input("Budi", Some("111")))
        .await
        .unwrap_err();
    assert!(matches!(err, GradebookServiceError::NisnAlreadyUsed));

    let kept = update
        .execute(teacher.id, budi.id, input("Budi Santoso", Some("222")))
        .await
        .unwrap();
    assert_eq!(kept.name, "Budi Santoso");
    assert_eq!(kept.nisn.as_deref(), Some("222"));
}

#[tokio::test]
async fn should_never_collide_on_blank_nisn() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 6);
    let create = CreateStudentUseCase {
        repo: store.clone(),
    };

    for name in ["Ani", "Budi", "Citra"] {
        let student = create
            .execute(teacher.id, teacher.assigned_class, input(name, Some("  ")))
            .await
            .unwrap();
        assert_eq!(student.nisn, None);
    }
    assert_eq!(store.student_count(teacher.id), 3);
}

#[tokio::test]
async fn should_list_only_own_roster_sorted_by_name() {
    let store = InMemoryStore::seeded();
    let a = store.add_teacher("Teacher A", 1);
    let b = store.add_teacher("Teacher B", 2);
    store.add_student(&a, "Citra", None);
    store.add_student(&a, "Ani", None);
    store.add_student(&b, "Budi", None);

    let roster = ListStudentsUseCase {
        repo: store.clone(),
    }
    .execute(a.id, a.assigned_class)
    .await
    .unwrap();
    let names: Vec<_> = roster.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Ani", "Citra"]);
}

#[tokio::test]
async fn should_hide_other_teachers_students() {
    let store = InMemoryStore::seeded();
    let a = store.add_teacher("Teacher A", 1);
    let b = store.add_teacher("Teacher B", 2);
    let theirs = store.add_student(&b, "Budi", None);

    let err = UpdateStudentUseCase {
        repo: store.clone(),
    }
    .execute(a.id, theirs.id, input("Hijacked", None))
    .await
    .unwrap_err();
    assert!(matches!(err, GradebookServiceError::StudentNotFound));

    let err = DeleteStudentUseCase {
        repo: store.clone(),
    }
    .execute(a.id, theirs.id)
    .await
    .unwrap_err();
    assert!(matches!(err, GradebookServiceError::StudentNotFound));
    assert_eq!(store.student_count(b.id), 1);
}

#[tokio::test]
async fn should_remove_grades_with_deleted_student() {
    let store = InMemoryStore::seeded();
    let teacher = store.add_teacher("Teacher A", 2);
    let ani = store.add_student(&teacher, "Ani", None);
    let budi = store.add_student(&teacher, "Budi", None);
    let subject = subject_for("IPAS", 2);
    let now = chrono::Utc::now();
    store.add_grade(&ani, &subject, 60.0, 100.0, now);
    store.add_grade(&ani, &subject, 70.0, 100.0, now);
    store.add_grade(&budi, &subject, 80.0, 100.0, now);

    DeleteStudentUseCase {
        repo: store.clone(),
    }
    .execute(teacher.id, ani.id)
    .await
    .unwrap();

    assert_eq!(store.student_count(teacher.id), 1);
    assert_eq!(store.grade_count(teacher.id), 1);
}
