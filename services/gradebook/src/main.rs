use sea_orm::Database;
use tracing::info;

use gradebook::config::GradebookConfig;
use gradebook::router::build_router;
use gradebook::state::AppState;
use gradebook_auth_types::identity::JwtSecret;
use gradebook_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = GradebookConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret),
        cookie_secure: config.cookie_secure,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.gradebook_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("gradebook service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
