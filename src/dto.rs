use crate::domain;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use utoipa::OpenApi;
use validator::Validate;

pub mod category;
pub mod todo;
pub mod user;

pub use category::{CategoryCreate, CategoryResponse};
pub use todo::{TodoCreate, TodoResponse, TodoUpdate};
pub use user::{Token, UserCreate, UserResponse};

/// Reads an inbound transfer object from a JSON payload. Types and required fields are checked
/// first, then the object's declared constraints. Nothing is returned unless both pass.
pub fn parse<T>(payload: Value) -> Result<T, domain::Error>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(payload)?;
    if let Err(issues) = parsed.validate() {
        debug!("rejected inbound payload: {issues}");
        return Err(domain::Error::Invalid(issues));
    }

    Ok(parsed)
}

/// OpenAPI component schemas for every transfer object
#[derive(OpenApi)]
#[openapi(components(schemas(
    UserCreate,
    UserResponse,
    Token,
    TodoCreate,
    TodoUpdate,
    TodoResponse,
    CategoryCreate,
    CategoryResponse
)))]
pub struct OpenApiSchemas;
