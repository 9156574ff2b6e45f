//! Signed test identities.
//!
//! Protected routes expect a real HS256 access token, so `MockAuth` signs one with
//! the secret the router under test was built with.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use gradebook_auth_types::cookie::ACCESS_TOKEN_EXP;
use gradebook_auth_types::token::issue_access_token;
use gradebook_domain::class::ClassNumber;

/// Secret shared by tests that build a router and mint tokens for it.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Configurable teacher identity injected into test requests.
pub struct MockAuth {
    pub teacher_id: Uuid,
    pub assigned_class: ClassNumber,
}

impl MockAuth {
    /// Panics if `class` is outside 1–6.
    pub fn new(teacher_id: Uuid, class: u8) -> Self {
        Self {
            teacher_id,
            assigned_class: ClassNumber::new(class).expect("test class must be 1-6"),
        }
    }

    /// A fresh teacher id for `class`.
    pub fn random(class: u8) -> Self {
        Self::new(Uuid::now_v7(), class)
    }

    /// Signed access token for this identity.
    pub fn token(&self) -> String {
        issue_access_token(
            self.teacher_id,
            self.assigned_class,
            TEST_JWT_SECRET,
            ACCESS_TOKEN_EXP,
        )
        .expect("failed to sign test token")
        .0
    }

    /// `Authorization` header value, e.g. `Bearer eyJ...`.
    pub fn bearer(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .expect("token is a valid header value")
    }

    /// Return headers as a logged-in browser/client would send them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.bearer());
        map
    }
}
