//! Account access for OpportunAI.
//!
//! A thin HTTP client for the backend's `/auth` routes, the credential
//! store it reads the bearer token from, and the form checks run before
//! any request is sent.

pub mod client;
pub mod error;
pub mod storage;
pub mod types;
pub mod validation;

pub use client::{AuthClient, API_URL_ENV, DEFAULT_BASE_URL};
pub use error::{AuthError, Result};
pub use storage::{CredentialStore, Scope};
pub use types::{LoginResponse, LogoutResponse, RegisterRequest, User, UserProfile};
pub use validation::{is_valid_email, require_session, LoginForm, RegistrationForm};
