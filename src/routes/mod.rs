mod admin;
mod login;
mod quiz;
mod user;

use crate::AppState;
use crate::words::WordEntry;
use axum::Router;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};

/// One page of the word list as shown to admins and users.
#[derive(Debug, Serialize)]
pub struct WordListing {
    pub words: Vec<WordEntry>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

fn first_page() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/home", get(admin::home))
        .route("/admin/words", get(admin::list_words).post(admin::create_word))
        .route("/admin/words/:id", post(admin::update_word))
        .route("/admin/words/:id/edit", get(admin::edit_word))
        .route("/admin/words/:id/delete", get(admin::delete_word))
        .route("/admin/register", post(admin::register))
        .route("/user/home", get(user::home))
        .route("/user/words", get(user::list_words))
        .route("/user/cards", get(user::card))
        .route("/user/register", post(user::register))
        .route("/quiz", get(quiz::anonymous_round))
        .route("/user/quiz", get(quiz::user_round))
        .route(
            "/user/input-quiz",
            get(quiz::typing_question).post(quiz::check_typing_answer),
        )
        .route("/login/user", post(login::login_user))
        .route("/login/admin", post(login::login_admin))
        .route("/logout", get(login::logout))
}
