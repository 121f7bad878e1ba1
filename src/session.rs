//! Server-side login sessions.
//!
//! A session is a typed context with one optional slot per account class,
//! stored in memory under a random token that travels in a cookie. Sessions
//! left idle past the registry's timeout are treated as logged out.

use crate::AppState;
use crate::accounts::{Account, AccountClass, Admin, AdminAccount, User, UserAccount};
use crate::error::Error;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header;
use axum::http::request::Parts;
use dashmap::DashMap;
use std::convert::Infallible;
use std::time::{Duration, Instant};
use tracing::debug;

pub const SESSION_COOKIE: &str = "tangocho_session";

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub current_user: Option<UserAccount>,
    pub current_admin: Option<AdminAccount>,
}

/// Maps an account class to its slot in [`SessionContext`].
pub trait SessionSlot: AccountClass {
    fn slot(context: &SessionContext) -> Option<&Account<Self>>;
    fn slot_mut(context: &mut SessionContext) -> &mut Option<Account<Self>>;
}

impl SessionSlot for User {
    fn slot(context: &SessionContext) -> Option<&Account<Self>> {
        context.current_user.as_ref()
    }

    fn slot_mut(context: &mut SessionContext) -> &mut Option<Account<Self>> {
        &mut context.current_user
    }
}

impl SessionSlot for Admin {
    fn slot(context: &SessionContext) -> Option<&Account<Self>> {
        context.current_admin.as_ref()
    }

    fn slot_mut(context: &mut SessionContext) -> &mut Option<Account<Self>> {
        &mut context.current_admin
    }
}

/// Sessions idle for longer than this are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct StoredSession {
    context: SessionContext,
    last_seen: Instant,
}

impl StoredSession {
    fn new(context: SessionContext) -> Self {
        Self {
            context,
            last_seen: Instant::now(),
        }
    }

    fn is_expired(&self, idle_timeout: Duration) -> bool {
        self.last_seen.elapsed() > idle_timeout
    }
}

pub struct SessionRegistry {
    sessions: DashMap<String, StoredSession>,
    idle_timeout: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    /// Look up a live session and mark it as used. Expired sessions are
    /// removed and reported as missing.
    pub fn get(&self, token: &str) -> Option<SessionContext> {
        let mut entry = self.sessions.get_mut(token)?;
        if entry.is_expired(self.idle_timeout) {
            drop(entry);
            self.sessions.remove_if(token, |_, stored| stored.is_expired(self.idle_timeout));
            return None;
        }

        entry.last_seen = Instant::now();
        Some(entry.context.clone())
    }

    /// Put `account` into its class's slot and return a fresh token.
    ///
    /// Whatever the previous session held is carried over unless it has
    /// expired; the previous token stops working.
    pub fn sign_in<C: SessionSlot>(&self, previous: Option<&str>, account: Account<C>) -> String {
        let mut context = previous
            .and_then(|token| self.sessions.remove(token))
            .filter(|(_, stored)| !stored.is_expired(self.idle_timeout))
            .map(|(_, stored)| stored.context)
            .unwrap_or_default();
        *C::slot_mut(&mut context) = Some(account);

        self.prune_expired();

        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), StoredSession::new(context));
        debug!(class = C::LABEL, sessions = self.sessions.len(), "Session signed in");
        token
    }

    /// Drop the whole session. Returns whether it existed.
    pub fn clear(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Remove every session idle for longer than the timeout.
    pub fn prune_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, stored| !stored.is_expired(self.idle_timeout));
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!(expired_sessions = removed, "Expired sessions pruned");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for part in raw.split(';') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };
            if key == name && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// The caller's session. Missing or unknown tokens yield an empty context.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: Option<String>,
    pub context: SessionContext,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = get_cookie(&parts.headers, SESSION_COOKIE) else {
            return Ok(Session::default());
        };
        let Some(context) = state.sessions.get(&token) else {
            return Ok(Session::default());
        };

        Ok(Session {
            token: Some(token),
            context,
        })
    }
}

/// The account signed in for class `C`; rejects with `LoginRequired`.
#[derive(Debug, Clone)]
pub struct SignedIn<C: SessionSlot>(pub Account<C>);

pub type CurrentUser = SignedIn<User>;
pub type CurrentAdmin = SignedIn<Admin>;

#[async_trait]
impl<C: SessionSlot> FromRequestParts<AppState> for SignedIn<C> {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = match Session::from_request_parts(parts, state).await {
            Ok(session) => session,
            Err(never) => match never {},
        };
        C::slot(&session.context)
            .cloned()
            .map(SignedIn)
            .ok_or(Error::LoginRequired)
    }
}
