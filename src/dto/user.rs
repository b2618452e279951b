use crate::domain;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// DTO for registering a new user
#[derive(Debug, Deserialize, Display, Validate, ToSchema)]
#[display("{username} <{email}>")]
#[cfg_attr(test, derive(Serialize))]
pub struct UserCreate {
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(email, length(max = 255))]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    #[schema(example = "correct horse battery")]
    pub password: String,
}

/// DTO for a stored user. Never carries the password.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct UserResponse {
    #[schema(example = 4)]
    pub id: i32,
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[schema(example = "regular_user")]
    pub role: String,
}

impl From<domain::user::User> for UserResponse {
    fn from(value: domain::user::User) -> Self {
        UserResponse {
            id: value.id,
            username: value.username,
            email: value.email,
            role: value.role.to_string(),
        }
    }
}

/// DTO carrying an access token
#[derive(Serialize, Deserialize, ToSchema)]
#[cfg_attr(test, derive(PartialEq, Eq, Debug))]
pub struct Token {
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9.e30.c2lnbmF0dXJl")]
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}
