//! Bearer-credential verification for privileged operations.
//!
//! Session issuance lives elsewhere; this module only validates the token a
//! caller presents and checks its administrator claim. Missing or invalid
//! credentials are a 401, a valid token without the claim is a 403.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{forbidden_error, unauthorized_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub admin: bool,
    pub exp: i64,
}

/// Extract and verify the bearer token, then require the admin claim.
pub fn require_admin(headers: &HeaderMap) -> Result<Claims, Error> {
    let claims = verify_bearer(headers)?;

    if !claims.admin {
        return Err(forbidden_error());
    }

    Ok(claims)
}

fn verify_bearer(headers: &HeaderMap) -> Result<Claims, Error> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(unauthorized_error)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(unauthorized_error)?;

    verify_token(token)
}

pub fn verify_token(token: &str) -> Result<Claims, Error> {
    let secret = env::var("AUTH_SECRET")?;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| unauthorized_error())?;

    Ok(data.claims)
}
