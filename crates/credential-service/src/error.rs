//! Error types for the credential service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// A user-supplied request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Phone,
    Password,
}

impl Field {
    /// Name used when reporting the field as missing.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Email => "correo",
            Field::Phone => "telefono",
            Field::Password => "contraseña",
        }
    }

    /// Message used when the field has an invalid format.
    pub fn invalid_message(&self) -> &'static str {
        match self {
            Field::Email => "Correo inválido",
            Field::Phone => "Teléfono inválido",
            Field::Password => "Contraseña inválida",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons a registration is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Falta el campo {0}")]
    MissingField(Field),

    #[error("{}", .0.invalid_message())]
    InvalidFormat(Field),

    #[error("El correo ya se encuentra registrado")]
    DuplicateEmail,

    #[error("El teléfono ya se encuentra registrado")]
    DuplicatePhone,
}

/// Reasons a login is rejected.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Falta el campo {0}")]
    MissingField(Field),

    /// Covers both unknown email and wrong password.
    #[error("Correo o contraseña incorrectos")]
    InvalidCredentials,

    #[error("Error generando token")]
    TokenIssuance(#[source] TokenError),
}

/// Token signing and decoding errors.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Token lifetime out of range: {0}")]
    InvalidTtl(String),
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Cuerpo inválido")]
    MalformedBody(#[source] serde_json::Error),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Login(#[from] LoginError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Registration(e) => match e {
                RegistrationError::MissingField(_) | RegistrationError::InvalidFormat(_) => {
                    StatusCode::BAD_REQUEST
                }
                RegistrationError::DuplicateEmail | RegistrationError::DuplicatePhone => {
                    StatusCode::CONFLICT
                }
            },
            ApiError::Login(e) => match e {
                LoginError::MissingField(_) => StatusCode::BAD_REQUEST,
                LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                LoginError::TokenIssuance(source) => {
                    error!(error = %source, "Token issuance failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_messages() {
        assert_eq!(
            RegistrationError::MissingField(Field::Email).to_string(),
            "Falta el campo correo"
        );
        assert_eq!(
            RegistrationError::MissingField(Field::Phone).to_string(),
            "Falta el campo telefono"
        );
        assert_eq!(
            LoginError::MissingField(Field::Password).to_string(),
            "Falta el campo contraseña"
        );
    }

    #[test]
    fn test_invalid_format_messages() {
        assert_eq!(
            RegistrationError::InvalidFormat(Field::Email).to_string(),
            "Correo inválido"
        );
        assert_eq!(
            RegistrationError::InvalidFormat(Field::Phone).to_string(),
            "Teléfono inválido"
        );
        assert_eq!(
            RegistrationError::InvalidFormat(Field::Password).to_string(),
            "Contraseña inválida"
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (
                RegistrationError::MissingField(Field::Email).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                RegistrationError::InvalidFormat(Field::Phone).into(),
                StatusCode::BAD_REQUEST,
            ),
            (RegistrationError::DuplicateEmail.into(), StatusCode::CONFLICT),
            (RegistrationError::DuplicatePhone.into(), StatusCode::CONFLICT),
            (LoginError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (
                LoginError::TokenIssuance(TokenError::InvalidTtl("overflow".into())).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_malformed_body_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::MalformedBody(source);
        assert_eq!(err.to_string(), "Cuerpo inválido");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_token_issuance_hides_detail() {
        let err = LoginError::TokenIssuance(TokenError::InvalidTtl("overflow".into()));
        assert_eq!(err.to_string(), "Error generando token");
    }
}
