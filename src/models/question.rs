// src/models/question.rs

use serde::Serialize;
use sqlx::{prelude::FromRow, types::Json};

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: i64,
    pub test_id: i64,

    /// The text content of the question.
    pub question_text: String,

    /// The four choice strings.
    /// Stored as a JSON array in the database.
    pub choices: Json<Vec<String>>,

    /// Index (0-3) of the correct choice.
    pub correct_index: i32,

    /// Points awarded when the correct choice is selected.
    pub score: i32,
}

/// Wire shape of a question inside a test detail response.
/// The frontend receives the answer key too and hides it client-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: i64,
    pub question: String,
    pub choices: Vec<String>,
    pub correct_answer: i32,
    pub score: i32,
}

impl From<Question> for QuestionView {
    fn from(q: Question) -> Self {
        QuestionView {
            id: q.id,
            question: q.question_text,
            choices: q.choices.0,
            correct_answer: q.correct_index,
            score: q.score,
        }
    }
}
