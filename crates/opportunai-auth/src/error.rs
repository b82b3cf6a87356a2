//! Error types for authentication and credential storage.

/// Text shown when the backend rejects a login without a message.
pub const LOGIN_REJECTED: &str = "Credenciais inválidas.";
/// Text shown when the backend rejects a registration without a message.
pub const REGISTER_REJECTED: &str = "Falha no registro. Por favor, tente novamente.";
/// Text shown when a profile cannot be loaded.
pub const PROFILE_REJECTED: &str = "Não foi possível carregar o perfil do usuário.";

const UNREACHABLE: &str = "Não foi possível conectar ao servidor. Por favor, tente novamente.";
const UNEXPECTED: &str = "Ocorreu um erro inesperado.";
const SESSION_REQUIRED: &str = "Você precisa estar logado para acessar esta página.";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A form check failed. Carries the user-facing message.
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// No valid session. Stored credentials have been cleared.
    #[error("not authenticated")]
    Unauthorized,
    #[error("server unreachable: {0}")]
    Unreachable(String),
    #[error("unexpected response: {0}")]
    Unexpected(String),
    #[error("credential storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl AuthError {
    /// The inline message a form shows for this error. `rejected` is used
    /// when the backend refused the request without explaining why.
    pub fn user_message(&self, rejected: &str) -> String {
        match self {
            AuthError::Validation(msg) => msg.clone(),
            AuthError::Rejected {
                message: Some(msg), ..
            } => msg.clone(),
            AuthError::Rejected { message: None, .. } => rejected.to_string(),
            AuthError::Unauthorized => SESSION_REQUIRED.to_string(),
            AuthError::Unreachable(_) => UNREACHABLE.to_string(),
            AuthError::Unexpected(_) | AuthError::Storage(_) => UNEXPECTED.to_string(),
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            AuthError::Unreachable(err.to_string())
        } else {
            AuthError::Unexpected(err.to_string())
        }
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Storage(err.to_string())
    }
}
