//! JWT access-token issuing and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gradebook_domain::class::ClassNumber;

/// Teacher identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub teacher_id: Uuid,
    pub assigned_class: ClassNumber,
    pub access_token_exp: u64,
}

/// Errors returned by [`issue_access_token`] and [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | JWT claim | Rust type | Meaning |
/// |-------|-----------|-----------|---------|
/// | `sub` | `sub` | UUID string | teacher ID |
/// | `class` | custom | `u8` | assigned class, 1–6 |
/// | `exp` | `exp` | seconds since epoch | token expiration |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub class: u8,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign an HS256 access token valid for `ttl_secs`. Returns the token and its `exp`.
pub fn issue_access_token(
    teacher_id: Uuid,
    assigned_class: ClassNumber,
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, u64), AuthError> {
    let exp = now_secs() + ttl_secs;
    let claims = JwtClaims {
        sub: teacher_id.to_string(),
        class: assigned_class.get(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)?;
    Ok((token, exp))
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate an access token, returning the teacher identity it carries.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let teacher_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    let assigned_class = ClassNumber::new(claims.class).map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        teacher_id,
        assigned_class,
        access_token_exp: claims.exp,
    })
}
