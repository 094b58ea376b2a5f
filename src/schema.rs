use serde::Deserialize;

// Struct representing the request body for registering a user
#[derive(Debug, Deserialize)]
pub struct RegisterSchema {
    pub username: String,
    pub email: String,
    pub password: String,
}

// Struct representing the request body for logging in. The username field
// doubles as an email address; the lookup matches either column.
#[derive(Debug, Deserialize)]
pub struct LoginSchema {
    pub username: String,
    pub password: String,
}

// Struct representing the request body for creating a new Todo
#[derive(Debug, Deserialize)]
pub struct CreateTodoSchema {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_shared: bool,
}

// Struct representing the request body for updating a Todo. Absent fields
// keep their stored values, so a completion toggle is just {"is_completed"}.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
    pub is_shared: Option<bool>,
}

// Query string accepted by the list endpoint
#[derive(Debug, Deserialize)]
pub struct ListTodosQuery {
    #[serde(rename = "type")]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoFilter {
    All,
    Personal,
    Shared,
}

impl TodoFilter {
    // Unknown or absent values fall back to the "all" view
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("personal") => TodoFilter::Personal,
            Some("shared") => TodoFilter::Shared,
            _ => TodoFilter::All,
        }
    }
}
