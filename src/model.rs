use chrono::NaiveDateTime;

// Data model representing a registered user. The password hash never leaves
// the server, so serialization skips it.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

// Data model representing a Todo item, joined with its author's display name
// at read time.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub is_shared: bool,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub author_name: String,
}
