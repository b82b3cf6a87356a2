//! Form checks run before any auth request is sent.
//!
//! Checks run in a fixed order and the first failure wins. Messages are the
//! pt-BR texts shown inline by the forms.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AuthError, Result};
use crate::storage::CredentialStore;
use crate::types::RegisterRequest;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

const LOGIN_MIN_PASSWORD: usize = 6;
const REGISTER_MIN_PASSWORD: usize = 8;
const CNPJ_DIGITS: usize = 14;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn fail(message: &str) -> Result<()> {
    Err(AuthError::Validation(message.to_string()))
}

/// Email checks shared by both forms.
fn check_email(email: &str) -> Result<()> {
    if blank(email) {
        return fail("Email é obrigatório.");
    }
    if !is_valid_email(email) {
        return fail("Por favor, insira um endereço de email válido.");
    }
    Ok(())
}

fn check_password(password: &str, min_len: usize) -> Result<()> {
    if blank(password) {
        return fail("Senha é obrigatória.");
    }
    if password.chars().count() < min_len {
        return Err(AuthError::Validation(format!(
            "A senha deve ter pelo menos {} caracteres.",
            min_len
        )));
    }
    Ok(())
}

// =============================================================================
// Login
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn validate(&self) -> Result<()> {
        check_email(&self.email)?;
        check_password(&self.password, LOGIN_MIN_PASSWORD)
    }
}

// =============================================================================
// Registration
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub company_name: String,
    pub cnpj: String,
    pub sector: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub accept_terms: bool,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<()> {
        if blank(&self.name) {
            return fail("Nome é obrigatório.");
        }
        check_email(&self.email)?;
        check_password(&self.password, REGISTER_MIN_PASSWORD)?;
        if self.password != self.confirm_password {
            return fail("As senhas não coincidem.");
        }

        if blank(&self.company_name) {
            return fail("Nome da empresa é obrigatório.");
        }
        if blank(&self.cnpj) {
            return fail("CNPJ é obrigatório.");
        }
        if self.cnpj.chars().filter(char::is_ascii_digit).count() != CNPJ_DIGITS {
            return fail("CNPJ deve ter 14 dígitos.");
        }
        if blank(&self.sector) {
            return fail("Setor é obrigatório.");
        }
        if blank(&self.phone) {
            return fail("Telefone é obrigatório.");
        }
        if blank(&self.city) {
            return fail("Cidade é obrigatória.");
        }
        if blank(&self.state) {
            return fail("Estado é obrigatório.");
        }

        if !self.accept_terms {
            return fail("Você deve aceitar os termos e condições.");
        }
        Ok(())
    }

    /// Validate and build the request payload.
    pub fn into_request(self) -> Result<RegisterRequest> {
        self.validate()?;
        Ok(RegisterRequest {
            company_name: self.company_name,
            cnpj: self.cnpj,
            sector: self.sector,
            name: self.name,
            email: self.email,
            password: self.password,
            confirm_password: self.confirm_password,
            phone: Some(self.phone),
            city: Some(self.city),
            state: Some(self.state),
        })
    }
}

/// Gate for pages that need a logged-in user.
pub fn require_session(store: &CredentialStore) -> Result<()> {
    if store.is_authenticated() {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}

// =============================================================================
// Tests
// =============================================================================
