use super::{PageQuery, WordListing};
use crate::AppState;
use crate::accounts::{AdminAccount, RegisterForm};
use crate::error::{Error, Result};
use crate::extract::{Form, Path, Query};
use crate::pagination::{ADMIN_PAGE_SIZE, paginate};
use crate::session::{CurrentAdmin, SignedIn};
use crate::words::{WordEntry, WordForm};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

pub async fn home(SignedIn(admin): CurrentAdmin) -> Json<AdminAccount> {
    Json(admin)
}

pub async fn list_words(
    _admin: CurrentAdmin,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<WordListing>> {
    let total_count = state.words.count_all().await?;
    let page = paginate(total_count, query.page, ADMIN_PAGE_SIZE);
    let words = state.words.find_page(page.offset, page.limit).await?;

    Ok(Json(WordListing {
        words,
        current_page: page.page,
        total_pages: page.total_pages,
        total_count,
        keyword: None,
    }))
}

pub async fn create_word(
    SignedIn(admin): CurrentAdmin,
    State(state): State<AppState>,
    Form(form): Form<WordForm>,
) -> Result<(StatusCode, Json<WordEntry>)> {
    let word = form.validate()?;
    let created = state.words.create(&word).await?;
    info!(admin_id = admin.id, word_id = created.id, "Admin added a word");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn edit_word(
    _admin: CurrentAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WordEntry>> {
    let word = state.words.find_by_id(id).await?.ok_or(Error::NotFound)?;
    Ok(Json(word))
}

pub async fn update_word(
    SignedIn(admin): CurrentAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<WordForm>,
) -> Result<Json<WordEntry>> {
    let word = form.validate()?;
    let updated = state.words.update(id, &word).await?;
    info!(admin_id = admin.id, word_id = id, "Admin edited a word");
    Ok(Json(updated))
}

pub async fn delete_word(
    SignedIn(admin): CurrentAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.words.delete(id).await?;
    info!(admin_id = admin.id, word_id = id, "Admin removed a word");
    Ok(StatusCode::NO_CONTENT)
}

/// New admins can only be added by an admin; the first one comes from the
/// seed tool.
pub async fn register(
    SignedIn(admin): CurrentAdmin,
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<(StatusCode, Json<AdminAccount>)> {
    let created = state.admins.register(form).await?;
    info!(admin_id = admin.id, new_admin_id = created.id, "Admin registered another admin");
    Ok((StatusCode::CREATED, Json(created)))
}
