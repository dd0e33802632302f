// src/grading.rs
//
// Scoring of a submitted test and durable persistence of the outcome.
// This is the only computed business logic in the service; everything
// around it is query plumbing.

use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::AppError;

/// Projection of a question row holding just what grading needs.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnswerKey {
    pub id: i64,
    pub correct_index: i32,
    pub score: i32,
}

/// A selected choice as it arrives on the wire.
///
/// Clients are not consistent about representation: the same index may
/// come through as `2` or `"2"`. Both are accepted; anything that does
/// not coerce to an integer fails the whole submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SelectedChoice {
    Index(i64),
    Text(String),
}

impl SelectedChoice {
    /// Coerces the selection to an integer index.
    pub fn index(&self) -> Result<i32, AppError> {
        match self {
            SelectedChoice::Index(n) => i32::try_from(*n)
                .map_err(|_| AppError::InvalidInput(format!("Invalid selected index '{}'", n))),
            SelectedChoice::Text(s) => s
                .trim()
                .parse::<i32>()
                .map_err(|_| AppError::InvalidInput(format!("Invalid selected index '{}'", s))),
        }
    }
}

/// Question id -> selected choice.
///
/// serde_json parses numeric object keys, so `{"5": 2}` and an
/// integer-keyed map produce the same sheet. Duplicate keys collapse,
/// matching the behavior of a JSON object.
pub type AnswerSheet = HashMap<i64, SelectedChoice>;

/// Earned and total points of one graded submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub earned: i32,
    pub total: i32,
}

/// Grades an answer sheet against the stored questions of a test.
///
/// Every question contributes its points to `total`; a question
/// contributes to `earned` only when the sheet holds a selection for it
/// whose coerced index equals the stored correct index. Unanswered
/// questions simply earn nothing. Scores are recomputed here from the
/// stored questions on every call and never trusted from the client.
pub fn grade(questions: &[AnswerKey], answers: &AnswerSheet) -> Result<Score, AppError> {
    let mut total = 0;
    let mut earned = 0;

    for q in questions {
        total += q.score;

        if let Some(selected) = answers.get(&q.id) {
            if selected.index()? == q.correct_index {
                earned += q.score;
            }
        }
    }

    Ok(Score { earned, total })
}

/// Grades a submission and persists it: one `results` row plus one
/// `answers` row per sheet entry (per entry, not per question — a sheet
/// referencing unknown question ids still writes those rows).
///
/// Both writes happen in a single transaction; a failure part-way
/// leaves no orphaned result behind. The submission timestamp is
/// captured here, never taken from the client. Resubmissions are not
/// deduplicated: each call creates a fresh result row.
pub async fn record_submission(
    pool: &PgPool,
    test_id: i64,
    student_id: i64,
    answers: &AnswerSheet,
) -> Result<Score, AppError> {
    let keys = sqlx::query_as::<_, AnswerKey>(
        "SELECT id, correct_index, score FROM questions WHERE test_id = $1",
    )
    .bind(test_id)
    .fetch_all(pool)
    .await?;

    let score = grade(&keys, answers)?;

    let mut tx = pool.begin().await?;

    let result_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO results (student_id, test_id, score, total_score, submitted_at, feedback, sent)
        VALUES ($1, $2, $3, $4, $5, NULL, FALSE)
        RETURNING id
        "#,
    )
    .bind(student_id)
    .bind(test_id)
    .bind(score.earned)
    .bind(score.total)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    for (question_id, selected) in answers {
        sqlx::query(
            "INSERT INTO answers (result_id, question_id, selected_index) VALUES ($1, $2, $3)",
        )
        .bind(result_id)
        .bind(*question_id)
        .bind(selected.index()?)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        "Recorded submission: test {} student {} scored {}/{}",
        test_id,
        student_id,
        score.earned,
        score.total
    );

    Ok(score)
}
