// src/models/result.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::grading::AnswerSheet;

/// A result row joined with the student, for the teacher's per-test view.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultRow {
    pub id: i64,
    pub student_reg_num: String,
    pub student_name: String,
    pub score: i32,
    pub total_score: i32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub feedback: Option<String>,

    /// Overloaded flag meaning "feedback has been written".
    pub sent: bool,
}

/// A result row joined with the test, for the student's own history.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResultRow {
    pub id: i64,
    pub subject: String,
    pub score: i32,
    pub total_score: i32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub feedback: Option<String>,
}

/// DTO for a student submitting test answers.
///
/// Both fields must be present (an *empty* answers map is accepted and
/// still produces a result row); the handler rejects absence with
/// `InvalidInput` before the grading core runs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestRequest {
    pub student_id: Option<i64>,
    pub answers: Option<AnswerSheet>,
}

/// DTO for a teacher saving feedback on a result.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: String,
}
