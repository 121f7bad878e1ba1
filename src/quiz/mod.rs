pub mod answer;
mod engine;

pub use answer::{Evaluation, evaluate, normalize};
pub use engine::{DEFAULT_DISTRACTORS, QuizEngine, QuizRound, assemble_round};
