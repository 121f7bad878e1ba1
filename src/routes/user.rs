use super::{WordListing, first_page};
use crate::AppState;
use crate::accounts::{RegisterForm, UserAccount};
use crate::error::Result;
use crate::extract::{Form, Query};
use crate::pagination::{USER_PAGE_SIZE, paginate};
use crate::session::{CurrentUser, SignedIn};
use crate::words::WordEntry;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default = "first_page")]
    page: i64,
}

pub async fn home(SignedIn(user): CurrentUser) -> Json<UserAccount> {
    Json(user)
}

pub async fn list_words(
    _user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<WordListing>> {
    let keyword = query.keyword.as_deref().unwrap_or_default();
    let total_count = state.words.count_by_keyword(keyword).await?;
    let page = paginate(total_count, query.page, USER_PAGE_SIZE);
    let words = state
        .words
        .find_page_by_keyword(keyword, page.offset, page.limit)
        .await?;

    Ok(Json(WordListing {
        words,
        current_page: page.page,
        total_pages: page.total_pages,
        total_count,
        keyword: query.keyword,
    }))
}

pub async fn card(_user: CurrentUser, State(state): State<AppState>) -> Result<Json<WordEntry>> {
    Ok(Json(state.quiz.draw_word().await?))
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<(StatusCode, Json<UserAccount>)> {
    let created = state.users.register(form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
