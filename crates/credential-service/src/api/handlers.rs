//! HTTP request handlers.

use super::types::{HealthResponse, LoginResponse, RegisterResponse};
use super::AppState;
use crate::error::ApiError;
use crate::service::{LoginRequest, RegistrationRequest};
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::de::{self, DeserializeOwned};
use tracing::warn;

/// Decode the first JSON value of a body regardless of the declared
/// content type.
///
/// Anything after that value is ignored, and a `null` body decodes as an
/// empty request.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    let first = serde_json::Deserializer::from_slice(body)
        .into_iter::<Option<T>>()
        .next()
        .unwrap_or_else(|| Err(de::Error::custom("empty body")));

    match first {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(e) => {
            warn!(error = %e, "Invalid request body");
            Err(ApiError::MalformedBody(e))
        }
    }
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        identities: state.auth.store().count().await,
    })
}

/// Register a new user.
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let request: RegistrationRequest = parse_body(&body)?;
    state.auth.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            mensaje: "Usuario registrado exitosamente".to_string(),
        }),
    ))
}

/// Log in and receive a signed token.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, ApiError> {
    let request: LoginRequest = parse_body(&body)?;
    let issued = state.auth.login(request).await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        fecha_inicio: issued.issued_at,
    }))
}
