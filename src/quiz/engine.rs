use crate::error::{Error, Result};
use crate::words::{WordEntry, WordStore};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_DISTRACTORS: usize = 3;

/// One multiple-choice question: an English word and shuffled Japanese
/// choices that contain the correct translation exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct QuizRound {
    pub question: WordEntry,
    pub correct_answer: String,
    pub choices: Vec<String>,
}

/// Draws questions from a word store. Nothing is cached: every call samples
/// the store again.
#[derive(Clone)]
pub struct QuizEngine {
    words: Arc<dyn WordStore>,
}

impl QuizEngine {
    pub fn new(words: Arc<dyn WordStore>) -> Self {
        Self { words }
    }

    /// Build a round with up to `distractor_count` wrong choices. Small word
    /// lists yield fewer choices rather than an error.
    pub async fn build_round(&self, distractor_count: usize) -> Result<QuizRound> {
        let question = self.draw_word().await?;
        let distractors = self
            .words
            .select_random_distractors(question.id, distractor_count)
            .await?;

        let round = {
            let mut rng = rand::rng();
            assemble_round(question, distractors, &mut rng)
        };

        debug!(
            word_id = round.question.id,
            choices = round.choices.len(),
            "Quiz round built"
        );
        Ok(round)
    }

    /// A single random word, used for flash cards and typing questions.
    pub async fn draw_word(&self) -> Result<WordEntry> {
        self.words.select_random().await?.ok_or(Error::EmptyCorpus)
    }
}

/// Combine the question with its distractors and shuffle them uniformly.
pub fn assemble_round<R: Rng + ?Sized>(
    question: WordEntry,
    distractors: Vec<String>,
    rng: &mut R,
) -> QuizRound {
    let correct_answer = question.japanese.clone();

    let mut choices = Vec::with_capacity(distractors.len() + 1);
    choices.push(correct_answer.clone());
    for distractor in distractors {
        if !choices.contains(&distractor) {
            choices.push(distractor);
        }
    }
    choices.shuffle(rng);

    QuizRound {
        question,
        correct_answer,
        choices,
    }
}
