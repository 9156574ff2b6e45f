/// Gradebook service configuration loaded from environment variables.
#[derive(Debug)]
pub struct GradebookConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3000). Env var: `GRADEBOOK_PORT`.
    pub gradebook_port: u16,
    /// Mark the access-token cookie `Secure` (default true). Env var: `COOKIE_SECURE`.
    pub cookie_secure: bool,
}

impl GradebookConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            gradebook_port: std::env::var("GRADEBOOK_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

/// Anything other than an explicit "off" value counts as enabled.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
