// src/handlers/results.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::result::{FeedbackRequest, StudentResultRow, TestResultRow},
};

/// Teacher view: every student's result for a given test.
pub async fn results_for_test(
    State(pool): State<PgPool>,
    Path(test_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let results = sqlx::query_as::<_, TestResultRow>(
        r#"
        SELECT r.id, s.reg_num AS student_reg_num, s.name AS student_name,
               r.score, r.total_score, r.submitted_at, r.feedback, r.sent
        FROM results r
        JOIN students s ON r.student_id = s.id
        WHERE r.test_id = $1
        ORDER BY r.submitted_at DESC
        "#,
    )
    .bind(test_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(results))
}

/// Teacher saves/updates feedback for a student's result.
/// Also flips the `sent` flag, which the UI reads as "feedback written".
pub async fn save_feedback(
    State(pool): State<PgPool>,
    Path(result_id): Path<i64>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = sqlx::query("UPDATE results SET feedback = $1, sent = TRUE WHERE id = $2")
        .bind(&payload.feedback)
        .bind(result_id)
        .execute(&pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound("Result not found".to_string()));
    }

    Ok(Json(json!({ "message": "Feedback updated" })))
}

/// Student view: all of their own results.
pub async fn results_for_student(
    State(pool): State<PgPool>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let results = sqlx::query_as::<_, StudentResultRow>(
        r#"
        SELECT r.id, t.subject, r.score, r.total_score, r.submitted_at, r.feedback
        FROM results r
        JOIN tests t ON r.test_id = t.id
        WHERE r.student_id = $1
        ORDER BY r.submitted_at DESC
        "#,
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(results))
}
