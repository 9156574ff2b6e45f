use gradebook::error::GradebookServiceError;
use gradebook::usecase::account::{
    DeleteAccountUseCase, GetMeUseCase, LoginInput, LoginUseCase, RegisterTeacherInput,
    RegisterTeacherUseCase,
};
use gradebook_auth_types::token::validate_access_token;
use gradebook_testing::auth::TEST_JWT_SECRET;

use crate::helpers::{InMemoryStore, PlainHasher};

fn register_input(email: &str, class: i64) -> RegisterTeacherInput {
    RegisterTeacherInput {
        email: Some(email.to_owned()),
        password: Some("rahasia".to_owned()),
        name: Some("Bu Sari".to_owned()),
        assigned_class: Some(class),
    }
}

#[tokio::test]
async fn should_register_then_login_then_read_me() {
    let store = InMemoryStore::seeded();
    let register = RegisterTeacherUseCase {
        repo: store.clone(),
        hasher: PlainHasher,
    };
    let teacher = register
        .execute(register_input("sari@school.id", 4))
        .await
        .unwrap();
    assert_eq!(teacher.assigned_class.get(), 4);

    let login = LoginUseCase {
        repo: store.clone(),
        hasher: PlainHasher,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let out = login
        .execute(LoginInput {
            email: Some("sari@school.id".to_owned()),
            password: Some("rahasia".to_owned()),
        })
        .await
        .unwrap();
    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.teacher_id, teacher.id);
    assert_eq!(info.assigned_class.get(), 4);

    let me = GetMeUseCase {
        repo: store.clone(),
    }
    .execute(info.teacher_id)
    .await
    .unwrap();
    assert_eq!(me.email, "sari@school.id");
}

#[tokio::test]
async fn should_give_second_teacher_of_a_class_a_conflict() {
    let store = InMemoryStore::seeded();
    let register = RegisterTeacherUseCase {
        repo: store.clone(),
        hasher: PlainHasher,
    };
    register
        .execute(register_input("a@school.id", 2))
        .await
        .unwrap();

    let err = register
        .execute(register_input("b@school.id", 2))
        .await
        .unwrap_err();
    assert!(matches!(err, GradebookServiceError::ClassAlreadyAssigned));

    let err = register
        .execute(register_input("a@school.id", 3))
        .await
        .unwrap_err();
    assert!(matches!(err, GradebookServiceError::EmailAlreadyUsed));
}

#[tokio::test]
async fn should_not_distinguish_unknown_email_from_wrong_password() {
    let store = InMemoryStore::seeded();
    RegisterTeacherUseCase {
        repo: store.clone(),
        hasher: PlainHasher,
    }
    .execute(register_input("sari@school.id", 1))
    .await
    .unwrap();

    let login = LoginUseCase {
        repo: store.clone(),
        hasher: PlainHasher,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let wrong_password = login
        .execute(LoginInput {
            email: Some("sari@school.id".to_owned()),
            password: Some("salah".to_owned()),
        })
        .await
        .unwrap_err();
    let unknown_email = login
        .execute(LoginInput {
            email: Some("nobody@school.id".to_owned()),
            password: Some("rahasia".to_owned()),
        })
        .await
        .unwrap_err();

    assert_eq!(wrong_password.kind(), unknown_email.kind());
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn should_delete_account_without_touching_other_teachers() {
    let store = InMemoryStore::seeded();
    let a = store.add_teacher("Teacher A", 1);
    let b = store.add_teacher("Teacher B", 5);

    let a1 = store.add_student(&a, "Ani", Some("001"));
    let a2 = store.add_student(&a, "Budi", None);
    let b1 = store.add_student(&b, "Citra", Some("002"));

    let lower = crate::helpers::subject_for("Matematika", 1);
    let upper = crate::helpers::subject_for("Matematika", 5);
    let now = chrono::Utc::now();
    for _ in 0..3 {
        store.add_grade(&a1, &lower, 70.0, 100.0, now);
    }
    for _ in 0..2 {
        store.add_grade(&a2, &lower, 80.0, 100.0, now);
    }
    store.add_grade(&b1, &upper, 90.0, 100.0, now);
    store.add_grade(&b1, &upper, 95.0, 100.0, now);

    DeleteAccountUseCase {
        repo: store.clone(),
    }
    .execute(a.id)
    .await
    .unwrap();

    assert!(!store.has_teacher(a.id));
    assert_eq!(store.student_count(a.id), 0);
    assert_eq!(store.grade_count(a.id), 0);

    assert!(store.has_teacher(b.id));
    assert_eq!(store.student_count(b.id), 1);
    assert_eq!(store.grade_count(b.id), 2);

    let err = GetMeUseCase {
        repo: store.clone(),
    }
    .execute(a.id)
    .await
    .unwrap_err();
    assert!(matches!(err, GradebookServiceError::TeacherNotFound));
}
