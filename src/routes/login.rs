use crate::AppState;
use crate::accounts::AccountStore;
use crate::error::Result;
use crate::extract::Form;
use crate::session::{
    Session, SessionRegistry, SessionSlot, expired_session_cookie, session_cookie,
};
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[serde(default)]
    login_id: String,
    #[serde(default)]
    password: String,
}

pub async fn login_user(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    sign_in(&state.users, &state.sessions, session, form).await
}

pub async fn login_admin(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    sign_in(&state.admins, &state.sessions, session, form).await
}

/// A failed login leaves the caller's session untouched.
async fn sign_in<C: SessionSlot>(
    accounts: &AccountStore<C>,
    sessions: &SessionRegistry,
    session: Session,
    form: LoginForm,
) -> Result<Response> {
    let account = accounts.authenticate(&form.login_id, &form.password).await?;
    let token = sessions.sign_in(session.token.as_deref(), account.clone());

    Ok(([(header::SET_COOKIE, session_cookie(&token))], Json(account)).into_response())
}

pub async fn logout(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    if let Some(token) = &session.token {
        state.sessions.clear(token);
        info!("Session logged out");
    }

    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, expired_session_cookie())],
    )
}
