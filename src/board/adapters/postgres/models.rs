//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Group label.
    pub label: String,
    /// Display period text.
    pub period: String,
    /// Position within the group.
    pub position: Option<i32>,
    /// Owning identity.
    pub user_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Group label.
    pub label: String,
    /// Display period text.
    pub period: String,
    /// Position within the group.
    pub position: Option<i32>,
    /// Owning identity.
    pub user_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Partial update model. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New title.
    pub title: Option<String>,
    /// New group label.
    pub label: Option<String>,
    /// New display period text.
    pub period: Option<String>,
    /// New position.
    pub position: Option<i32>,
}
