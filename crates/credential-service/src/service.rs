//! Registration and login flows.

use crate::error::{Field, LoginError, RegistrationError};
use crate::registry::{Identity, IdentityStore};
use crate::token::{IssuedToken, TokenIssuer};
use crate::validation::{is_valid_email, is_valid_password, is_valid_phone};
use serde::{Deserialize, Deserializer};
use tracing::{info, instrument, warn};

/// Decode a string field, treating `null` as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request to register a new identity.
///
/// Absent or `null` fields decode as empty strings and are reported as
/// missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationRequest {
    #[serde(rename = "correo", deserialize_with = "null_as_empty")]
    pub email: String,

    #[serde(rename = "telefono", deserialize_with = "null_as_empty")]
    pub phone: String,

    #[serde(rename = "password", deserialize_with = "null_as_empty")]
    pub secret: String,
}

/// Request to log in with email and password.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(rename = "correo", deserialize_with = "null_as_empty")]
    pub email: String,

    #[serde(rename = "password", deserialize_with = "null_as_empty")]
    pub secret: String,
}

/// Successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub email: String,
}

/// Runs the registration and login flows against a shared registry.
#[derive(Clone)]
pub struct AuthService {
    store: IdentityStore,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(store: IdentityStore, issuer: TokenIssuer) -> Self {
        Self { store, issuer }
    }

    /// The shared registry handle.
    pub fn store(&self) -> &IdentityStore {
        &self.store
    }

    /// Register a new identity.
    ///
    /// Checks run in a fixed order and stop at the first failure: presence
    /// (email, phone, password), then format (same order), then uniqueness
    /// (email, then phone). The registry is only touched on success.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<Confirmation, RegistrationError> {
        let RegistrationRequest {
            email,
            phone,
            secret,
        } = request;

        let required = [
            (Field::Email, &email),
            (Field::Phone, &phone),
            (Field::Password, &secret),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            warn!(field = %field, "Registration rejected: missing field");
            return Err(RegistrationError::MissingField(*field));
        }

        if !is_valid_email(&email) {
            return Err(RegistrationError::InvalidFormat(Field::Email));
        }
        if !is_valid_phone(&phone) {
            return Err(RegistrationError::InvalidFormat(Field::Phone));
        }
        if !is_valid_password(&secret) {
            return Err(RegistrationError::InvalidFormat(Field::Password));
        }

        self.store
            .insert_unique(Identity::new(email.clone(), phone, secret))
            .await
            .inspect_err(|e| warn!(reason = %e, "Registration rejected"))?;

        info!("User registered");
        Ok(Confirmation { email })
    }

    /// Verify credentials and issue a signed token.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<IssuedToken, LoginError> {
        if request.email.is_empty() {
            warn!("Login rejected: missing email");
            return Err(LoginError::MissingField(Field::Email));
        }
        if request.secret.is_empty() {
            warn!("Login rejected: missing password");
            return Err(LoginError::MissingField(Field::Password));
        }

        let identity = self
            .store
            .find_by_credentials(&request.email, &request.secret)
            .await
            .ok_or_else(|| {
                warn!("Login rejected: no matching identity");
                LoginError::InvalidCredentials
            })?;

        let issued = self
            .issuer
            .issue(&identity.email)
            .map_err(LoginError::TokenIssuance)?;

        info!(expires_at = %issued.expires_at, "Token issued");
        Ok(issued)
    }
}
