use crate::AppState;
use crate::error::{Error, Result};
use crate::extract::Form;
use crate::quiz::{DEFAULT_DISTRACTORS, Evaluation, QuizRound, evaluate};
use crate::session::{CurrentUser, SignedIn};
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub async fn anonymous_round(State(state): State<AppState>) -> Result<Json<QuizRound>> {
    Ok(Json(state.quiz.build_round(DEFAULT_DISTRACTORS).await?))
}

pub async fn user_round(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<QuizRound>> {
    Ok(Json(state.quiz.build_round(DEFAULT_DISTRACTORS).await?))
}

/// The typing quiz shows the Japanese text only; the English answer stays
/// on the server.
#[derive(Debug, Serialize)]
pub struct TypingQuestion {
    word_id: i64,
    japanese: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingAnswer {
    word_id: i64,
    #[serde(default)]
    answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TypingResult {
    word_id: i64,
    japanese: String,
    user_answer: String,
    #[serde(flatten)]
    evaluation: Evaluation,
}

pub async fn typing_question(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<TypingQuestion>> {
    let word = state.quiz.draw_word().await?;
    Ok(Json(TypingQuestion {
        word_id: word.id,
        japanese: word.japanese,
    }))
}

pub async fn check_typing_answer(
    SignedIn(user): CurrentUser,
    State(state): State<AppState>,
    Form(submitted): Form<TypingAnswer>,
) -> Result<Json<TypingResult>> {
    let word = state
        .words
        .find_by_id(submitted.word_id)
        .await?
        .ok_or(Error::NotFound)?;

    let evaluation = evaluate(submitted.answer.as_deref(), &word.english);
    debug!(user_id = user.id, word_id = word.id, ?evaluation, "Typing answer checked");

    Ok(Json(TypingResult {
        word_id: word.id,
        japanese: word.japanese,
        user_answer: submitted.answer.unwrap_or_default(),
        evaluation,
    }))
}
