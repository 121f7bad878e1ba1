use super::account::AccountClass;
use crate::error::{Error, FieldError, Result};
use serde::Deserialize;

const MAX_LOGIN_ID_LEN: usize = 100;
const MAX_NAME_LEN: usize = 100;
const MIN_PASSWORD_LEN: usize = 6;
const MAX_PASSWORD_LEN: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    pub login_id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    #[serde(default)]
    pub name: String,
}

/// Registration input that passed every field check and the confirmation
/// check. The password is still raw here.
#[derive(Debug)]
pub(crate) struct ValidatedRegistration {
    pub login_id: String,
    pub password: String,
    pub name: String,
}

impl RegisterForm {
    pub(crate) fn validate<C: AccountClass>(self) -> Result<ValidatedRegistration> {
        let mut errors = Vec::new();

        let login_id = self.login_id.trim();
        if login_id.is_empty() {
            errors.push(FieldError::new("loginId", "login id is required"));
        } else if login_id.chars().count() > MAX_LOGIN_ID_LEN {
            errors.push(FieldError::new(
                "loginId",
                format!("login id must be at most {MAX_LOGIN_ID_LEN} characters"),
            ));
        } else if C::EMAIL_LOGIN && !looks_like_email(login_id) {
            errors.push(FieldError::new("loginId", "login id must be an e-mail address"));
        }

        check_password("password", &self.password, &mut errors);
        check_password("passwordConfirm", &self.password_confirm, &mut errors);

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "name is required"));
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("name must be at most {MAX_NAME_LEN} characters"),
            ));
        }

        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        if self.password != self.password_confirm {
            return Err(Error::Mismatch);
        }

        Ok(ValidatedRegistration {
            login_id: login_id.to_string(),
            password: self.password,
            name: name.to_string(),
        })
    }
}

fn check_password(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    let len = value.chars().count();
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "password is required"));
    } else if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        errors.push(FieldError::new(
            field,
            format!("password must be {MIN_PASSWORD_LEN} to {MAX_PASSWORD_LEN} characters"),
        ));
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !domain.contains('@')
}
