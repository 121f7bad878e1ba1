use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// One of the two disjoint authentication domains. Each class has its own
/// table and its own session slot.
pub trait AccountClass: fmt::Debug + Clone + Copy + Send + Sync + 'static {
    const TABLE: &'static str;
    const LABEL: &'static str;
    /// Whether login ids of this class must be e-mail addresses.
    const EMAIL_LOGIN: bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admin;

impl AccountClass for User {
    const TABLE: &'static str = "user_account";
    const LABEL: &'static str = "user";
    const EMAIL_LOGIN: bool = true;
}

impl AccountClass for Admin {
    const TABLE: &'static str = "admin_account";
    const LABEL: &'static str = "admin";
    const EMAIL_LOGIN: bool = false;
}

#[derive(Debug, Clone, Serialize)]
pub struct Account<C: AccountClass> {
    pub id: i64,
    pub login_id: String,
    #[serde(skip)]
    pub password_hash: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip)]
    class: PhantomData<C>,
}

pub type UserAccount = Account<User>;
pub type AdminAccount = Account<Admin>;

#[derive(sqlx::FromRow)]
pub(crate) struct AccountRow {
    id: i64,
    login_id: String,
    password_hash: String,
    name: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl<C: AccountClass> From<AccountRow> for Account<C> {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            login_id: row.login_id,
            password_hash: row.password_hash,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
            class: PhantomData,
        }
    }
}

#[cfg(test)]
impl<C: AccountClass> Account<C> {
    pub(crate) fn sample(id: i64, login_id: &str) -> Self {
        AccountRow {
            id,
            login_id: login_id.to_string(),
            password_hash: String::new(),
            name: "Sample".to_string(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
        .into()
    }
}
