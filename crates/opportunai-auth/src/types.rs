//! Wire types of the backend's `/auth` routes. Field names are camelCase
//! on the wire.

use serde::{Deserialize, Serialize};

/// Account summary returned by login and kept in the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Full profile returned by `GET /auth/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub remember_me: bool,
}

/// Response of login and register. A missing token deserializes as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Company registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub company_name: String,
    pub cnpj: String,
    pub sector: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub message: String,
}

/// `{ success, message, data }` wrapper used by the profile route. Only
/// `data` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Body of a non-success response. Only `message` is read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_is_camel_case() {
        let req = LoginRequest {
            email: "ana@empresa.com.br",
            password: "segredo1",
            remember_me: true,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"email": "ana@empresa.com.br", "password": "segredo1", "rememberMe": true})
        );
    }

    #[test]
    fn test_register_request_omits_missing_optionals() {
        let req = RegisterRequest {
            company_name: "Metalúrgica Sul".into(),
            cnpj: "12.345.678/0001-99".into(),
            sector: "Metalurgia".into(),
            name: "Ana".into(),
            email: "ana@metal.com.br".into(),
            password: "segredo12".into(),
            confirm_password: "segredo12".into(),
            phone: None,
            city: Some("Porto Alegre".into()),
            state: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["companyName"], "Metalúrgica Sul");
        assert_eq!(value["confirmPassword"], "segredo12");
        assert_eq!(value["city"], "Porto Alegre");
        assert!(value.get("phone").is_none());
    }

    #[test]
    fn test_login_response_without_token() {
        let resp: LoginResponse = serde_json::from_value(json!({"user": null})).unwrap();
        assert!(resp.token.is_empty());
        assert!(resp.user.is_none());
    }

    #[test]
    fn test_profile_envelope() {
        let body = json!({
            "success": true,
            "message": "ok",
            "data": {
                "id": 7,
                "name": "Ana",
                "email": "ana@metal.com.br",
                "companyName": "Metalúrgica Sul",
                "createdAt": "2024-11-02T10:00:00Z"
            }
        });
        let env: Envelope<UserProfile> = serde_json::from_value(body).unwrap();
        assert_eq!(env.data.company_name.as_deref(), Some("Metalúrgica Sul"));
        assert!(env.data.cnpj.is_none());
        assert_eq!(env.data.created_at, "2024-11-02T10:00:00Z");
    }
}
