// src/handlers/classes.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{error::AppError, models::class::Class};

/// Lists all classes, used to populate the teacher's class dropdown.
pub async fn list_classes(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let classes =
        sqlx::query_as::<_, Class>("SELECT id, department, year, section FROM classes")
            .fetch_all(&pool)
            .await?;

    Ok(Json(classes))
}
