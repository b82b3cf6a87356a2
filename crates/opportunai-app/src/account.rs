//! `login`, `register`, `profile` and `logout` subcommands.

use opportunai_auth::error::{LOGIN_REJECTED, PROFILE_REJECTED, REGISTER_REJECTED};
use opportunai_auth::{
    require_session, AuthClient, AuthError, LoginForm, RegistrationForm, UserProfile,
};

use crate::cli::RegisterArgs;

/// An auth failure paired with the text the user should see.
#[derive(Debug)]
pub struct AccountError {
    pub source: AuthError,
    pub message: String,
}

impl AccountError {
    fn new(source: AuthError, rejected: &str) -> Self {
        let message = source.user_message(rejected);
        Self { source, message }
    }
}

const SESSION_ONLY_NOTICE: &str =
    "\nSessão válida apenas durante este comando. Use --remember-me para manter o login.";

pub async fn login(
    client: &AuthClient,
    email: &str,
    password: &str,
    remember_me: bool,
) -> Result<String, AccountError> {
    let form = LoginForm {
        email: email.to_string(),
        password: password.to_string(),
        remember_me,
    };
    let wrap = |e| AccountError::new(e, LOGIN_REJECTED);
    form.validate().map_err(wrap)?;

    let response = client
        .login(&form.email, &form.password, form.remember_me)
        .await
        .map_err(wrap)?;
    let name = response
        .user
        .as_ref()
        .and_then(|u| u.name.clone())
        .unwrap_or_else(|| form.email.clone());
    Ok(welcome(&name, form.remember_me))
}

/// Greeting printed after login. Each command runs in its own process, so a
/// session-scoped token is gone once `login` exits.
fn welcome(name: &str, remember_me: bool) -> String {
    let mut message = format!("Bem-vindo, {}!", name);
    if !remember_me {
        message.push_str(SESSION_ONLY_NOTICE);
    }
    message
}

pub fn registration_form(args: &RegisterArgs) -> RegistrationForm {
    RegistrationForm {
        name: args.name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        confirm_password: args.confirm_password.clone(),
        company_name: args.company_name.clone(),
        cnpj: args.cnpj.clone(),
        sector: args.sector.clone(),
        phone: args.phone.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        accept_terms: args.accept_terms,
    }
}

pub async fn register(client: &AuthClient, args: &RegisterArgs) -> Result<String, AccountError> {
    let wrap = |e| AccountError::new(e, REGISTER_REJECTED);
    let request = registration_form(args).into_request().map_err(wrap)?;
    client.register(&request).await.map_err(wrap)?;
    Ok("Cadastro realizado. Faça login para continuar.".to_string())
}

pub async fn profile(client: &AuthClient, json: bool) -> Result<String, AccountError> {
    let wrap = |e| AccountError::new(e, PROFILE_REJECTED);
    require_session(client.store()).map_err(wrap)?;
    let profile = client.profile().await.map_err(wrap)?;
    if json {
        return serde_json::to_string_pretty(&profile)
            .map_err(|e| wrap(AuthError::Unexpected(e.to_string())));
    }
    Ok(render_profile(&profile))
}

pub async fn logout(client: &AuthClient) -> Result<String, AccountError> {
    match client.logout().await {
        Ok(response) if !response.message.is_empty() => Ok(response.message),
        Ok(_) => Ok("Sessão encerrada.".to_string()),
        // The store is cleared even when the request fails.
        Err(e) => {
            tracing::warn!(error = %e, "Logout request failed");
            Ok("Sessão encerrada localmente.".to_string())
        }
    }
}

fn render_profile(p: &UserProfile) -> String {
    let field = |label: &str, value: &Option<String>| {
        format!("{}: {}\n", label, value.as_deref().unwrap_or("-"))
    };
    let mut out = format!("{}\n{}\n\n", p.name, p.email);
    out.push_str(&field("Empresa", &p.company_name));
    out.push_str(&field("CNPJ", &p.cnpj));
    out.push_str(&field("Setor", &p.sector));
    out.push_str(&field("Telefone", &p.phone));
    out.push_str(&field("Cidade", &p.city));
    out.push_str(&field("Estado", &p.state));
    out.push_str(&format!("Membro desde: {}\n", p.created_at));
    out
}
