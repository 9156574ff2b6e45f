use axum::{
    Router,
    routing::{get, post, put},
};

use gradebook_core::health::healthz;
use gradebook_core::middleware::with_http_layers;

use crate::handlers::{
    auth::{create_token, delete_token, register},
    grades::{create_grade, create_grades_bulk, delete_grade, get_grades, update_grade},
    health::readyz,
    me::{delete_me, get_me},
    reports::{export_report, get_report_summary},
    students::{create_student, delete_student, get_students, update_student},
    subjects::get_subjects,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/auth/register", post(register))
        .route("/auth/token", post(create_token).delete(delete_token))
        .route("/me", get(get_me).delete(delete_me))
        // Roster
        .route("/students", get(get_students).post(create_student))
        .route("/students/{id}", put(update_student).delete(delete_student))
        // Subjects
        .route("/subjects", get(get_subjects))
        // Grades
        .route("/grades", get(get_grades).post(create_grade))
        .route("/grades/bulk", post(create_grades_bulk))
        .route("/grades/{id}", put(update_grade).delete(delete_grade))
        // Reports
        .route("/reports/summary", get(get_report_summary))
        .route("/reports/export", get(export_report))
        .with_state(state);

    with_http_layers(router)
}
