// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        account::{
            BulkStudentsRequest, CreateStudentRequest, CreateTeacherRequest, StudentListParams,
            StudentView, StudentWithClass,
        },
        class::{Class, CreateClassRequest},
    },
};

/// Lists all classes for the admin panel.
pub async fn list_classes(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let classes = sqlx::query_as::<_, Class>(
        "SELECT id, department, year, section FROM classes ORDER BY department, year, section",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(classes))
}

/// Creates a new class.
pub async fn create_class(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateClassRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (department, year, section) = match (payload.department, payload.year, payload.section) {
        (Some(d), Some(y), Some(s)) if !d.is_empty() && !s.is_empty() => (d, y, s),
        _ => {
            return Err(AppError::InvalidInput(
                "Missing department, year or section".to_string(),
            ));
        }
    };

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO classes (department, year, section) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&department)
    .bind(year)
    .bind(&section)
    .fetch_one(&pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "department": department,
            "year": year,
            "section": section,
        })),
    ))
}

/// Lists all teachers, ordered by name.
pub async fn list_teachers(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let rows = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, name, email FROM teachers ORDER BY name",
    )
    .fetch_all(&pool)
    .await?;

    let teachers: Vec<_> = rows
        .into_iter()
        .map(|(id, name, email)| json!({ "id": id, "name": name, "email": email }))
        .collect();

    Ok(Json(teachers))
}

/// Creates a teacher account.
pub async fn create_teacher(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (name, email, password) = match (payload.name, payload.email, payload.password) {
        (Some(n), Some(e), Some(p)) if !n.is_empty() && !e.is_empty() && !p.is_empty() => {
            (n, e, p)
        }
        _ => {
            return Err(AppError::InvalidInput(
                "Missing name, email or password".to_string(),
            ));
        }
    };

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO teachers (name, email, password) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&name)
    .bind(&email)
    .bind(&password)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        // Postgres error code for unique violation is 23505
        if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
            AppError::Conflict(format!("Teacher '{}' already exists", email))
        } else {
            AppError::from(e)
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "name": name, "email": email })),
    ))
}

/// Lists students with their class info.
/// Optional query param `classId` restricts the listing to one class.
pub async fn list_students(
    State(pool): State<PgPool>,
    Query(params): Query<StudentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let base = r#"
        SELECT s.id, s.name, s.reg_num, s.password,
               c.id AS class_id, c.department, c.year, c.section
        FROM students s
        JOIN classes c ON s.class_id = c.id
    "#;

    let rows = match params.class_id {
        Some(class_id) => {
            sqlx::query_as::<_, StudentWithClass>(&format!(
                "{base} WHERE c.id = $1 ORDER BY s.reg_num"
            ))
            .bind(class_id)
            .fetch_all(&pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, StudentWithClass>(&format!("{base} ORDER BY s.reg_num"))
                .fetch_all(&pool)
                .await?
        }
    };

    let students: Vec<StudentView> = rows.into_iter().map(StudentView::from).collect();

    Ok(Json(students))
}

/// Creates a student account in a class.
pub async fn create_student(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (name, reg_num, password, class_id) = match (
        payload.name,
        payload.reg_num,
        payload.password,
        payload.class_id,
    ) {
        (Some(n), Some(r), Some(p), Some(c)) if !n.is_empty() && !r.is_empty() && !p.is_empty() => {
            (n, r, p, c)
        }
        _ => return Err(AppError::InvalidInput("Missing fields".to_string())),
    };

    let id = insert_student(&pool, &name, &reg_num, &password, class_id)
        .await
        .map_err(|e| match e {
            AppError::Storage(err)
                if err.to_string().contains("unique constraint")
                    || err.to_string().contains("23505") =>
            {
                AppError::Conflict(format!("Student '{}' already exists", reg_num))
            }
            other => other,
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "name": name,
            "regNum": reg_num,
            "classId": class_id,
        })),
    ))
}

/// Imports a batch of students.
///
/// Each item is processed on its own: a missing field or a duplicate
/// reg_num is reported in `errors` and never aborts the rest of the
/// batch, matching the import UI's row-by-row feedback.
pub async fn bulk_create_students(
    State(pool): State<PgPool>,
    Json(payload): Json<BulkStudentsRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.students.is_empty() {
        return Err(AppError::InvalidInput("No students provided".to_string()));
    }

    let mut created = Vec::new();
    let mut errors = Vec::new();

    for (idx, stu) in payload.students.into_iter().enumerate() {
        let (name, reg_num, password, class_id) =
            match (stu.name, stu.reg_num, stu.password, stu.class_id) {
                (Some(n), Some(r), Some(p), Some(c))
                    if !n.is_empty() && !r.is_empty() && !p.is_empty() =>
                {
                    (n, r, p, c)
                }
                (_, reg, _, _) => {
                    errors.push(json!({
                        "index": idx,
                        "regNum": reg,
                        "error": "missing fields",
                    }));
                    continue;
                }
            };

        match insert_student(&pool, &name, &reg_num, &password, class_id).await {
            Ok(_) => created.push(json!({ "index": idx, "regNum": reg_num })),
            Err(e) => {
                tracing::warn!("Bulk import row {} ({}) failed: {}", idx, reg_num, e);
                errors.push(json!({
                    "index": idx,
                    "regNum": reg_num,
                    "error": e.to_string(),
                }));
            }
        }
    }

    Ok(Json(json!({ "created": created, "errors": errors })))
}

async fn insert_student(
    pool: &PgPool,
    name: &str,
    reg_num: &str,
    password: &str,
    class_id: i64,
) -> Result<i64, AppError> {
    let id = sqlx::query_scalar(
        "INSERT INTO students (name, reg_num, password, class_id) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(reg_num)
    .bind(password)
    .bind(class_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
