//! Auth client tests against an in-process mock backend.
//!
//! Each test binds its own server on an ephemeral port and talks to it over
//! real HTTP.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use opportunai_auth::error::{LOGIN_REJECTED, PROFILE_REJECTED};
use opportunai_auth::{AuthClient, AuthError, CredentialStore, RegistrationForm, Scope};

// =============================================================================
// Mock backend
// =============================================================================

const VALID_TOKEN: &str = "tok-123";

/// Authorization headers seen by the backend, in request order.
#[derive(Clone, Default)]
struct Seen {
    auth: Arc<Mutex<Vec<Option<String>>>>,
}

impl Seen {
    fn record(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.auth.lock().unwrap().push(value);
    }

    fn last(&self) -> Option<String> {
        self.auth.lock().unwrap().last().cloned().flatten()
    }
}

fn user_json() -> Value {
    json!({"id": 7, "email": "ana@metal.com.br", "name": "Ana", "companyName": "Metalúrgica Sul"})
}

async fn login(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    seen.record(&headers);
    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("semtoken@metal.com.br"), _) => (StatusCode::OK, Json(json!({"user": null}))),
        (Some(_), Some("segredo1")) => (
            StatusCode::OK,
            Json(json!({"token": VALID_TOKEN, "user": user_json()})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Email ou senha incorretos"})),
        ),
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "dup@metal.com.br" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "Email já cadastrado"})),
        );
    }
    assert_eq!(body["companyName"], "Metalúrgica Sul");
    assert_eq!(body["confirmPassword"], body["password"]);
    (
        StatusCode::CREATED,
        Json(json!({"token": "registered-token", "user": user_json()})),
    )
}

async fn profile(State(seen): State<Seen>, headers: HeaderMap) -> (StatusCode, String) {
    seen.record(&headers);
    match seen.last().as_deref() {
        Some("Bearer boom") => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded".into()),
        Some(auth) if auth == format!("Bearer {}", VALID_TOKEN) => {
            let body = json!({
                "success": true,
                "message": "Perfil carregado",
                "data": {
                    "id": 7,
                    "name": "Ana",
                    "email": "ana@metal.com.br",
                    "companyName": "Metalúrgica Sul",
                    "cnpj": "12345678000199",
                    "createdAt": "2024-11-02T10:00:00Z"
                }
            });
            (StatusCode::OK, body.to_string())
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            json!({"message": "Token inválido"}).to_string(),
        ),
    }
}

async fn logout(State(seen): State<Seen>, headers: HeaderMap) -> Json<Value> {
    seen.record(&headers);
    Json(json!({"message": "Logout realizado"}))
}

/// Start the mock backend and return its base URL.
async fn spawn_backend() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/profile", get(profile))
        .route("/api/auth/logout", post(logout))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/api", addr), seen)
}

fn client(base_url: &str, store: Arc<CredentialStore>) -> AuthClient {
    AuthClient::new(base_url, Duration::from_secs(5), store).unwrap()
}

/// A base URL nothing listens on.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_remember_me_persists_credentials() {
    let (url, _) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CredentialStore::open(dir.path()));

    let response = client(&url, store.clone())
        .login("ana@metal.com.br", "segredo1", true)
        .await
        .unwrap();
    assert_eq!(response.token, VALID_TOKEN);
    assert_eq!(store.token_scope(), Some(Scope::Persistent));

    let reopened = CredentialStore::open(dir.path());
    assert_eq!(reopened.token().as_deref(), Some(VALID_TOKEN));
    let user = reopened.current_user().unwrap();
    assert_eq!(user.company_name.as_deref(), Some("Metalúrgica Sul"));
}

#[tokio::test]
async fn test_login_without_remember_me_uses_session_scope() {
    let (url, _) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CredentialStore::open(dir.path()));

    client(&url, store.clone())
        .login("ana@metal.com.br", "segredo1", false)
        .await
        .unwrap();
    assert_eq!(store.token_scope(), Some(Scope::Session));
    assert!(!CredentialStore::open(dir.path()).is_authenticated());
}

#[tokio::test]
async fn test_login_rejected_keeps_existing_credentials() {
    let (url, _) = spawn_backend().await;
    let store = Arc::new(CredentialStore::in_memory());
    store.save_token("old-token", true).unwrap();

    let err = client(&url, store.clone())
        .login("ana@metal.com.br", "errada", false)
        .await
        .unwrap_err();
    match &err {
        AuthError::Rejected { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message.as_deref(), Some("Email ou senha incorretos"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(err.user_message(LOGIN_REJECTED), "Email ou senha incorretos");
    assert_eq!(store.token().as_deref(), Some("old-token"));
}

#[tokio::test]
async fn test_login_response_without_token_stores_nothing() {
    let (url, _) = spawn_backend().await;
    let store = Arc::new(CredentialStore::in_memory());

    let response = client(&url, store.clone())
        .login("semtoken@metal.com.br", "segredo1", true)
        .await
        .unwrap();
    assert!(response.token.is_empty());
    assert!(!store.is_authenticated());
    assert!(store.current_user().is_none());
}

#[tokio::test]
async fn test_login_unreachable() {
    let store = Arc::new(CredentialStore::in_memory());
    let err = client(&dead_url().await, store)
        .login("ana@metal.com.br", "segredo1", false)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unreachable(_)), "got {:?}", err);
    assert_eq!(
        err.user_message(LOGIN_REJECTED),
        "Não foi possível conectar ao servidor. Por favor, tente novamente."
    );
}

// =============================================================================
// Register
// =============================================================================

fn registration(email: &str) -> RegistrationForm {
    RegistrationForm {
        name: "Ana Souza".into(),
        email: email.into(),
        password: "segredo12".into(),
        confirm_password: "segredo12".into(),
        company_name: "Metalúrgica Sul".into(),
        cnpj: "12.345.678/0001-99".into(),
        sector: "Metalurgia".into(),
        phone: "(51) 99999-0000".into(),
        city: "Porto Alegre".into(),
        state: "RS".into(),
        accept_terms: true,
    }
}

#[tokio::test]
async fn test_register_does_not_store_credentials() {
    let (url, _) = spawn_backend().await;
    let store = Arc::new(CredentialStore::in_memory());
    let request = registration("ana@metal.com.br").into_request().unwrap();

    let response = client(&url, store.clone()).register(&request).await.unwrap();
    assert_eq!(response.token, "registered-token");
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (url, _) = spawn_backend().await;
    let store = Arc::new(CredentialStore::in_memory());
    let request = registration("dup@metal.com.br").into_request().unwrap();

    let err = client(&url, store).register(&request).await.unwrap_err();
    assert!(matches!(err, AuthError::Rejected { status: 409, .. }));
    assert_eq!(err.user_message("fallback"), "Email já cadastrado");
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_profile_attaches_token_and_unwraps_envelope() {
    let (url, seen) = spawn_backend().await;
    let store = Arc::new(CredentialStore::in_memory());
    store.save_token(VALID_TOKEN, false).unwrap();

    let profile = client(&url, store).profile().await.unwrap();
    assert_eq!(profile.id, 7);
    assert_eq!(profile.cnpj.as_deref(), Some("12345678000199"));
    assert_eq!(seen.last().as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn test_profile_unauthorized_clears_credentials() {
    let (url, _) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CredentialStore::open(dir.path()));
    store.save_token("expired", true).unwrap();
    store.save_token("expired", false).unwrap();

    let err = client(&url, store.clone()).profile().await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized));
    assert!(!store.is_authenticated());
    assert!(!CredentialStore::open(dir.path()).is_authenticated());
}

#[tokio::test]
async fn test_profile_without_token_sends_no_header() {
    let (url, seen) = spawn_backend().await;
    let store = Arc::new(CredentialStore::in_memory());

    let err = client(&url, store).profile().await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized));
    assert!(seen.last().is_none());
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let (url, _) = spawn_backend().await;
    let store = Arc::new(CredentialStore::in_memory());
    store.save_token("boom", false).unwrap();

    let err = client(&url, store.clone()).profile().await.unwrap_err();
    match &err {
        AuthError::Rejected { status, message } => {
            assert_eq!(*status, 500);
            assert!(message.is_none());
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(
        err.user_message(PROFILE_REJECTED),
        "Não foi possível carregar o perfil do usuário."
    );
    // Only 401 clears credentials.
    assert!(store.is_authenticated());
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_clears_credentials() {
    let (url, seen) = spawn_backend().await;
    let store = Arc::new(CredentialStore::in_memory());
    store.save_token(VALID_TOKEN, true).unwrap();

    let response = client(&url, store.clone()).logout().await.unwrap();
    assert_eq!(response.message, "Logout realizado");
    assert_eq!(seen.last().as_deref(), Some("Bearer tok-123"));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_credentials_when_server_unreachable() {
    let store = Arc::new(CredentialStore::in_memory());
    store.save_token(VALID_TOKEN, true).unwrap();

    let result = client(&dead_url().await, store.clone()).logout().await;
    assert!(matches!(result, Err(AuthError::Unreachable(_))));
    assert!(!store.is_authenticated());
}
