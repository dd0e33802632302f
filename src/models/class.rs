// src/models/class.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'classes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub department: String,
    pub year: i32,
    pub section: String,
}

/// DTO for creating a new class.
/// Fields are optional so that presence can be checked explicitly.
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub department: Option<String>,
    pub year: Option<i32>,
    pub section: Option<String>,
}
