// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::account::{Admin, AdminLoginRequest, LoginRequest, StudentWithClass, Teacher},
};

/// Authenticates a teacher or student.
///
/// `type` selects the lookup: teachers by email, students by reg_num.
/// Passwords are stored and compared as plaintext — inherited demo
/// behavior, hashing is out of scope here.
pub async fn login(
    State(pool): State<PgPool>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user_type, identifier, password) =
        match (payload.user_type, payload.identifier, payload.password) {
            (Some(t), Some(i), Some(p)) if !t.is_empty() && !i.is_empty() && !p.is_empty() => {
                (t, i, p)
            }
            _ => return Err(AppError::InvalidInput("Missing fields".to_string())),
        };

    match user_type.as_str() {
        "teacher" => {
            let teacher = sqlx::query_as::<_, Teacher>(
                "SELECT id, name, email, password FROM teachers WHERE email = $1",
            )
            .bind(&identifier)
            .fetch_optional(&pool)
            .await?
            .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?;

            if password != teacher.password {
                return Err(AppError::Unauthorized("Invalid credentials".to_string()));
            }

            Ok(Json(json!({
                "type": "teacher",
                "user": {
                    "id": teacher.id,
                    "name": teacher.name,
                    "email": teacher.email,
                }
            })))
        }
        "student" => {
            let student = sqlx::query_as::<_, StudentWithClass>(
                r#"
                SELECT s.id, s.name, s.reg_num, s.password,
                       c.id AS class_id, c.department, c.year, c.section
                FROM students s
                JOIN classes c ON s.class_id = c.id
                WHERE s.reg_num = $1
                "#,
            )
            .bind(&identifier)
            .fetch_optional(&pool)
            .await?
            .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?;

            if password != student.password {
                return Err(AppError::Unauthorized("Invalid credentials".to_string()));
            }

            Ok(Json(json!({
                "type": "student",
                "user": {
                    "id": student.id,
                    "name": student.name,
                    "regNum": student.reg_num,
                    "class": {
                        "id": student.class_id,
                        "department": student.department,
                        "year": student.year,
                        "section": student.section,
                    }
                }
            })))
        }
        _ => Err(AppError::InvalidInput("Invalid user type".to_string())),
    }
}

/// Authenticates an admin by email.
pub async fn admin_login(
    State(pool): State<PgPool>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (email, password) = match (payload.email, payload.password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(AppError::InvalidInput(
                "Missing email or password".to_string(),
            ));
        }
    };

    let admin =
        sqlx::query_as::<_, Admin>("SELECT id, name, email, password FROM admins WHERE email = $1")
            .bind(&email)
            .fetch_optional(&pool)
            .await?
            .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?;

    if password != admin.password {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(Json(json!({
        "id": admin.id,
        "name": admin.name,
        "email": admin.email,
    })))
}
