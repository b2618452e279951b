use crate::domain;
use crate::dto::CategoryResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// DTO for creating a new todo. The owner comes from the caller's identity, not the body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct TodoCreate {
    #[schema(example = "Something to do")]
    pub text: String,
}

/// DTO for partially updating a todo. Omitted fields are left alone.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct TodoUpdate {
    #[schema(example = "Something else to do")]
    pub text: Option<String>,
    #[schema(example = true)]
    pub done: Option<bool>,
}

impl From<TodoUpdate> for domain::todo::UpdateTodo {
    fn from(value: TodoUpdate) -> Self {
        domain::todo::UpdateTodo {
            text: value.text,
            done: value.done,
        }
    }
}

/// DTO for a returned todo, with its categories resolved
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct TodoResponse {
    #[schema(example = 10)]
    pub id: i32,
    #[schema(example = "Something to do")]
    pub text: String,
    #[schema(example = false)]
    pub done: bool,
    pub categories: Vec<CategoryResponse>,
}

impl From<domain::todo::Todo> for TodoResponse {
    fn from(value: domain::todo::Todo) -> Self {
        TodoResponse {
            id: value.id,
            text: value.text,
            done: value.done,
            categories: value
                .categories
                .into_iter()
                .map(CategoryResponse::from)
                .collect(),
        }
    }
}
