use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use sqlx::{query, query_as, query_scalar, Pool, Sqlite};

use crate::{
    auth::{hash_password, optional_auth, require_auth, verify_password},
    error::ApiError,
    model::{Todo, User},
    schema::{
        CreateTodoSchema, ListTodosQuery, LoginSchema, RegisterSchema, TodoFilter,
        UpdateTodoSchema,
    },
    AppState,
};

const SELECT_TODO: &str = "SELECT t.id, t.title, t.description, t.is_completed, t.is_shared, \
     t.user_id, t.created_at, t.updated_at, u.username AS author_name \
     FROM todos t JOIN users u ON t.user_id = u.id";

const SELECT_USER: &str =
    "SELECT id, username, email, password_hash, created_at FROM users";

// Handler for the health checker route
pub async fn health_checker_handler() -> impl IntoResponse {
    const MESSAGE: &str = "Team Todo API is running";

    let json_response = json!({
        "status": "OK",
        "message": MESSAGE,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Json(json_response)
}

// Handler for registering a new user
pub async fn register(
    State(data): State<Arc<AppState>>,
    Json(body): Json<RegisterSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let username = body.username.trim();
    let email = body.email.trim();

    if username.is_empty() || email.is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation(
            "username, email and password are required".to_string(),
        ));
    }
    if body.password.chars().count() < 6 {
        return Err(ApiError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }
    if username.chars().count() > 50 {
        return Err(ApiError::Validation(
            "username must be at most 50 characters".to_string(),
        ));
    }
    if email.chars().count() > 100 {
        return Err(ApiError::Validation(
            "email must be at most 100 characters".to_string(),
        ));
    }

    // Check for an existing user before touching bcrypt
    let existing: Option<i64> =
        query_scalar("SELECT id FROM users WHERE username = ? OR email = ?")
            .bind(username)
            .bind(email)
            .fetch_optional(&data.db)
            .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict(
            "username or email is already taken".to_string(),
        ));
    }

    let password_hash = hash_password(&body.password)?;

    // A concurrent register can still hit the unique constraint here
    let user = query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?) \
         RETURNING id, username, email, password_hash, created_at",
    )
    .bind(username)
    .bind(email)
    .bind(&password_hash)
    .fetch_one(&data.db)
    .await
    .map_err(|err| match err.as_database_error() {
        Some(db_err) if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) => {
            ApiError::Conflict("username or email is already taken".to_string())
        }
        _ => ApiError::from(err),
    })?;

    let token = data.keys.issue(user.id, &user.username, &user.email)?;
    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "user registered successfully",
            "user": user,
            "token": token,
        })),
    ))
}

// Handler for logging in with a username or email
pub async fn login(
    State(data): State<Arc<AppState>>,
    Json(body): Json<LoginSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let identifier = body.username.trim();
    if identifier.is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let user = query_as::<_, User>(&format!(
        "{SELECT_USER} WHERE username = ? OR email = ?"
    ))
    .bind(identifier)
    .bind(identifier)
    .fetch_optional(&data.db)
    .await?
    .ok_or(ApiError::BadCredentials)?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(ApiError::BadCredentials);
    }

    let token = data.keys.issue(user.id, &user.username, &user.email)?;
    tracing::info!(user_id = user.id, username = %user.username, "user logged in");

    Ok(Json(json!({
        "message": "login successful",
        "user": user,
        "token": token,
    })))
}

// Handler for returning the authenticated user's profile
pub async fn me(
    State(data): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let claims = require_auth(&headers, &data.keys)?;

    let user = query_as::<_, User>(&format!("{SELECT_USER} WHERE id = ?"))
        .bind(claims.user_id)
        .fetch_optional(&data.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(Json(json!({ "user": user })))
}

// Handler for getting Todo items. Auth is optional here: anonymous callers
// get the shared view, identified callers additionally see their own items.
pub async fn list_todos(
    State(data): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ListTodosQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let requester = optional_auth(&headers, &data.keys);
    let filter = TodoFilter::parse(params.filter.as_deref());

    let todos: Vec<Todo> = match (filter, &requester) {
        (TodoFilter::Personal, Some(user)) => {
            query_as(&format!(
                "{SELECT_TODO} WHERE t.user_id = ? AND t.is_shared = 0 \
                 ORDER BY t.created_at DESC, t.id DESC"
            ))
            .bind(user.user_id)
            .fetch_all(&data.db)
            .await?
        }
        (TodoFilter::All, Some(user)) => {
            query_as(&format!(
                "{SELECT_TODO} WHERE t.is_shared = 1 OR t.user_id = ? \
                 ORDER BY t.created_at DESC, t.id DESC"
            ))
            .bind(user.user_id)
            .fetch_all(&data.db)
            .await?
        }
        // Anonymous callers only ever see shared items, whatever they asked for
        _ => {
            query_as(&format!(
                "{SELECT_TODO} WHERE t.is_shared = 1 \
                 ORDER BY t.created_at DESC, t.id DESC"
            ))
            .fetch_all(&data.db)
            .await?
        }
    };

    Ok(Json(json!({
        "todos": todos,
        "count": todos.len(),
    })))
}

// Handler for creating a new Todo
pub async fn create_todo(
    State(data): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateTodoSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = require_auth(&headers, &data.keys)?;

    let title = validated_title(&body.title)?;
    let description = body.description.trim();

    let result = query("INSERT INTO todos (title, description, is_shared, user_id) VALUES (?, ?, ?, ?)")
        .bind(&title)
        .bind(description)
        .bind(body.is_shared)
        .bind(claims.user_id)
        .execute(&data.db)
        .await?;

    let todo = fetch_todo(&data.db, result.last_insert_rowid())
        .await?
        .ok_or_else(|| ApiError::Internal("todo row missing after insert".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "todo created",
            "todo": todo,
        })),
    ))
}

// Handler for updating a Todo by ID. Fields absent from the body keep their
// stored values; only the owner may update.
pub async fn update_todo(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<UpdateTodoSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = require_auth(&headers, &data.keys)?;

    let current = fetch_todo(&data.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("todo not found".to_string()))?;
    if current.user_id != claims.user_id {
        return Err(ApiError::Forbidden(
            "only the owner can modify this todo".to_string(),
        ));
    }

    let title = match body.title {
        Some(raw) => validated_title(&raw)?,
        None => current.title,
    };
    let description = match body.description {
        Some(raw) => raw.trim().to_string(),
        None => current.description,
    };
    let is_completed = body.is_completed.unwrap_or(current.is_completed);
    let is_shared = body.is_shared.unwrap_or(current.is_shared);

    query(
        "UPDATE todos SET title = ?, description = ?, is_completed = ?, is_shared = ?, \
         updated_at = CURRENT_TIMESTAMP WHERE id = ?",
    )
    .bind(&title)
    .bind(&description)
    .bind(is_completed)
    .bind(is_shared)
    .bind(id)
    .execute(&data.db)
    .await?;

    let todo = fetch_todo(&data.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("todo not found".to_string()))?;

    Ok(Json(json!({
        "message": "todo updated",
        "todo": todo,
    })))
}

// Handler for deleting a Todo by ID; only the owner may delete
pub async fn delete_todo(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let claims = require_auth(&headers, &data.keys)?;

    let current = fetch_todo(&data.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("todo not found".to_string()))?;
    if current.user_id != claims.user_id {
        return Err(ApiError::Forbidden(
            "only the owner can modify this todo".to_string(),
        ));
    }

    query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(&data.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_todo(db: &Pool<Sqlite>, id: i64) -> Result<Option<Todo>, sqlx::Error> {
    query_as::<_, Todo>(&format!("{SELECT_TODO} WHERE t.id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

fn validated_title(raw: &str) -> Result<String, ApiError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > 200 {
        return Err(ApiError::Validation(
            "title must be at most 200 characters".to_string(),
        ));
    }
    Ok(title.to_string())
}
