// src/handlers/tests.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::NaiveDateTime;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    grading,
    models::{
        question::{Question, QuestionView},
        result::SubmitTestRequest,
        test::{CreateTestRequest, TestDetail, TestSummary},
    },
};

/// Parses the scheduled timestamp sent by the frontend.
/// The datetime-local widget omits seconds, so both forms are accepted.
fn parse_schedule(raw: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| AppError::InvalidInput(format!("Invalid scheduledDate '{}'", raw)))
}

/// Teacher creates a test with its questions for a specific class.
///
/// The test row and all question rows are written in one transaction,
/// so a half-created test can never be served to students.
pub async fn create_test(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (subject, scheduled_date, duration, class_id, teacher_id) = match (
        payload.subject,
        payload.scheduled_date,
        payload.duration,
        payload.class_id,
        payload.teacher_id,
    ) {
        (Some(s), Some(d), Some(dur), Some(c), Some(t)) if !s.is_empty() && !d.is_empty() => {
            (s, d, dur, c, t)
        }
        _ => return Err(AppError::InvalidInput("Missing fields".to_string())),
    };

    if payload.questions.is_empty() {
        return Err(AppError::InvalidInput("Missing fields".to_string()));
    }

    let scheduled_at = parse_schedule(&scheduled_date)?;

    for q in &payload.questions {
        if q.choices.len() != 4 {
            return Err(AppError::InvalidInput(
                "Each question needs exactly 4 choices".to_string(),
            ));
        }
    }

    let mut tx = pool.begin().await?;

    let test_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO tests (subject, scheduled_at, duration_minutes, status, class_id, created_by)
        VALUES ($1, $2, $3, 'ongoing', $4, $5)
        RETURNING id
        "#,
    )
    .bind(&subject)
    .bind(scheduled_at)
    .bind(duration)
    .bind(class_id)
    .bind(teacher_id)
    .fetch_one(&mut *tx)
    .await?;

    for q in payload.questions {
        sqlx::query(
            r#"
            INSERT INTO questions (test_id, question_text, choices, correct_index, score)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(test_id)
        .bind(&q.question)
        .bind(sqlx::types::Json(&q.choices))
        .bind(q.correct_answer)
        .bind(q.score)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!("Created test {} ({}) for class {}", test_id, subject, class_id);

    Ok(Json(json!({ "message": "Test created", "testId": test_id })))
}

/// Lists tests created by a teacher, newest scheduled first.
pub async fn tests_for_teacher(
    State(pool): State<PgPool>,
    Path(teacher_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let tests = sqlx::query_as::<_, TestSummary>(
        r#"
        SELECT id, subject, scheduled_at, duration_minutes, status
        FROM tests
        WHERE created_by = $1
        ORDER BY scheduled_at DESC
        "#,
    )
    .bind(teacher_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(tests))
}

/// Lists tests scheduled for a student's class.
pub async fn tests_for_student(
    State(pool): State<PgPool>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let class_id: i64 = sqlx::query_scalar("SELECT class_id FROM students WHERE id = $1")
        .bind(student_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Student not found".to_string()))?;

    let tests = sqlx::query_as::<_, TestSummary>(
        r#"
        SELECT id, subject, scheduled_at, duration_minutes, status
        FROM tests
        WHERE class_id = $1
        ORDER BY scheduled_at DESC
        "#,
    )
    .bind(class_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(tests))
}

/// Returns one test with its questions, used when a student starts it.
pub async fn test_detail(
    State(pool): State<PgPool>,
    Path(test_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let test = sqlx::query_as::<_, TestSummary>(
        r#"
        SELECT id, subject, scheduled_at, duration_minutes, status
        FROM tests
        WHERE id = $1
        "#,
    )
    .bind(test_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Test not found".to_string()))?;

    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, test_id, question_text, choices, correct_index, score
        FROM questions
        WHERE test_id = $1
        "#,
    )
    .bind(test_id)
    .fetch_all(&pool)
    .await?;

    let detail = TestDetail {
        test,
        questions: questions.into_iter().map(QuestionView::from).collect(),
    };

    Ok(Json(detail))
}

/// Student submits answers for a test.
///
/// Existence of the test is checked here; the grading core trusts the
/// id it is given. Both request fields must be present, but an empty
/// answers map is a valid (zero-score) submission and still records a
/// result.
pub async fn submit_test(
    State(pool): State<PgPool>,
    Path(test_id): Path<i64>,
    Json(payload): Json<SubmitTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = payload
        .student_id
        .ok_or(AppError::InvalidInput("Missing fields".to_string()))?;
    let answers = payload
        .answers
        .ok_or(AppError::InvalidInput("Missing fields".to_string()))?;

    sqlx::query_scalar::<_, i64>("SELECT id FROM tests WHERE id = $1")
        .bind(test_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Test not found".to_string()))?;

    let score = grading::record_submission(&pool, test_id, student_id, &answers).await?;

    Ok(Json(json!({
        "message": "Submitted",
        "score": score.earned,
        "totalScore": score.total,
    })))
}
