use super::account::{Account, AccountClass, AccountRow};
use super::register::RegisterForm;
use crate::error::{AuthFailureReason, Error, Result};
use sqlx::SqlitePool;
use std::marker::PhantomData;
use tracing::{info, warn};

/// Accounts of one class, stored in that class's table with bcrypt hashes.
pub struct AccountStore<C: AccountClass> {
    pool: SqlitePool,
    bcrypt_cost: u32,
    class: PhantomData<C>,
}

impl<C: AccountClass> Clone for AccountStore<C> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            bcrypt_cost: self.bcrypt_cost,
            class: PhantomData,
        }
    }
}

impl<C: AccountClass> AccountStore<C> {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            bcrypt_cost,
            class: PhantomData,
        }
    }

    pub async fn find_by_login_id(&self, login_id: &str) -> Result<Option<Account<C>>> {
        let sql = format!(
            "SELECT id, login_id, password_hash, name, created_at, updated_at \
             FROM {} WHERE login_id = ?1",
            C::TABLE
        );
        let row: Option<AccountRow> = sqlx::query_as(&sql)
            .bind(login_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Account::from))
    }

    /// Check a login id and raw password against the stored hash.
    ///
    /// Unknown login ids and wrong passwords fail with different reasons but
    /// render identically. A throwaway hash is computed for unknown ids so
    /// both paths cost about the same.
    pub async fn authenticate(&self, login_id: &str, raw_password: &str) -> Result<Account<C>> {
        let Some(account) = self.find_by_login_id(login_id).await? else {
            let _ = hash_password(raw_password.to_string(), self.bcrypt_cost).await;
            warn!(class = C::LABEL, reason = "unknown login id", "Login failed");
            return Err(Error::AuthFailure(AuthFailureReason::NotFound));
        };

        if !verify_password(raw_password.to_string(), account.password_hash.clone()).await? {
            warn!(
                class = C::LABEL,
                account_id = account.id,
                reason = "bad password",
                "Login failed"
            );
            return Err(Error::AuthFailure(AuthFailureReason::BadCredentials));
        }

        info!(class = C::LABEL, account_id = account.id, "Login succeeded");
        Ok(account)
    }

    /// Validate a registration form, hash the password and insert the account.
    pub async fn register(&self, form: RegisterForm) -> Result<Account<C>> {
        let registration = form.validate::<C>()?;
        let password_hash = hash_password(registration.password, self.bcrypt_cost).await?;

        let sql = format!(
            "INSERT INTO {} (login_id, password_hash, name) VALUES (?1, ?2, ?3) \
             RETURNING id, login_id, password_hash, name, created_at, updated_at",
            C::TABLE
        );

        let mut tx = self.pool.begin().await?;
        let row: AccountRow = sqlx::query_as(&sql)
            .bind(&registration.login_id)
            .bind(&password_hash)
            .bind(&registration.name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => Error::LoginIdTaken,
                other => Error::Database(other),
            })?;
        tx.commit().await?;

        let account = Account::from(row);
        info!(class = C::LABEL, account_id = account.id, "Account registered");
        Ok(account)
    }
}

/// bcrypt runs on the blocking pool so a login does not stall the async
/// worker for the whole work factor.
async fn hash_password(password: String, cost: u32) -> Result<String> {
    Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

/// An unparsable stored hash can never match.
async fn verify_password(password: String, hash: String) -> Result<bool> {
    let matches =
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await?;
    Ok(matches)
}
