// src/models/account.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'admins' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub email: String,

    /// Plaintext credential, compared as-is at login.
    /// Skipped during serialization to keep it out of responses.
    #[serde(skip)]
    pub password: String,
}

/// Represents the 'teachers' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,

    #[serde(skip)]
    pub password: String,
}

/// A student row joined with its class, as needed by the login and
/// admin-listing responses.
#[derive(Debug, Clone, FromRow)]
pub struct StudentWithClass {
    pub id: i64,
    pub name: String,
    pub reg_num: String,
    pub password: String,
    pub class_id: i64,
    pub department: String,
    pub year: i32,
    pub section: String,
}

/// Wire shape of a student in the admin listing, class info nested.
#[derive(Debug, Serialize)]
pub struct StudentView {
    pub id: i64,
    pub name: String,
    #[serde(rename = "regNum")]
    pub reg_num: String,
    pub class: StudentClassView,
}

#[derive(Debug, Serialize)]
pub struct StudentClassView {
    pub department: String,
    pub year: i32,
    pub section: String,
}

impl From<StudentWithClass> for StudentView {
    fn from(row: StudentWithClass) -> Self {
        StudentView {
            id: row.id,
            name: row.name,
            reg_num: row.reg_num,
            class: StudentClassView {
                department: row.department,
                year: row.year,
                section: row.section,
            },
        }
    }
}

/// DTO for teacher/student login.
///
/// `type` selects the table: 'teacher' (lookup by email) or
/// 'student' (lookup by reg_num).
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "type")]
    pub user_type: Option<String>,
    pub identifier: Option<String>,
    pub password: Option<String>,
}

/// DTO for admin login.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// DTO for Admin creating a teacher account.
#[derive(Debug, Deserialize)]
pub struct CreateTeacherRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// DTO for Admin creating a student account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub reg_num: Option<String>,
    pub password: Option<String>,
    pub class_id: Option<i64>,
}

/// DTO for the bulk student import.
/// Each item carries the same fields as `CreateStudentRequest`; a bad
/// item is reported in the response instead of aborting the batch.
#[derive(Debug, Deserialize)]
pub struct BulkStudentsRequest {
    #[serde(default)]
    pub students: Vec<CreateStudentRequest>,
}

/// Query parameters for the admin student listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListParams {
    /// Optional filter: only students of this class.
    pub class_id: Option<i64>,
}
