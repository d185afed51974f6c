//! Credential Service - user registration and token-issuing login.
//!
//! Registered identities live in process memory only. A successful login
//! returns a signed token that expires after the configured lifetime.

pub mod api;
pub mod config;
pub mod error;
pub mod registry;
pub mod service;
pub mod token;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, Field, LoginError, RegistrationError, TokenError};
pub use registry::{Identity, IdentityStore, Registry};
pub use service::{AuthService, Confirmation, LoginRequest, RegistrationRequest};
pub use token::{Claims, IssuedToken, TokenIssuer};
