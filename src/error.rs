use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => not_found_error(),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                store_unavailable_error()
            }
            other => database_error(other),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        provider_error("unreachable", &err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        serialization_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=49 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            50..=99 => (StatusCode::SERVICE_UNAVAILABLE, self.message.as_str()),
            100 => (StatusCode::UNAUTHORIZED, self.message.as_str()),
            101 => (StatusCode::FORBIDDEN, self.message.as_str()),
            103 | 104 => (StatusCode::NOT_FOUND, self.message.as_str()),
            105 => (StatusCode::BAD_GATEWAY, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(_: T) -> Error {
    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn serialization_error<T: Debug>(_: T) -> Error {
    Error {
        code: 3,
        message: "serialization error".into(),
    }
}

pub fn store_unavailable_error() -> Error {
    Error {
        code: 50,
        message: "store not ready".into(),
    }
}

pub fn unauthorized_error() -> Error {
    Error {
        code: 100,
        message: "missing or invalid credentials".into(),
    }
}

pub fn forbidden_error() -> Error {
    Error {
        code: 101,
        message: "administrator privileges required".into(),
    }
}

pub fn validation_error(missing: &[&str]) -> Error {
    Error {
        code: 102,
        message: format!("missing required fields: {}", missing.join(", ")),
    }
}

pub fn nothing_to_update_error() -> Error {
    Error {
        code: 102,
        message: "no updatable fields in payload".into(),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 103,
        message: "no such record".into(),
    }
}

pub fn no_path_found_error() -> Error {
    Error {
        code: 104,
        message: "provider returned no usable path".into(),
    }
}

pub fn provider_error(code: &str, info: &str) -> Error {
    Error {
        code: 105,
        message: format!("provider error {}: {}", code, info),
    }
}
