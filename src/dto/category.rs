use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// DTO for creating a new category
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct CategoryCreate {
    #[schema(example = "work")]
    pub text: String,
}

/// DTO for a returned category
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct CategoryResponse {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "work")]
    pub text: String,
}

impl From<domain::category::Category> for CategoryResponse {
    fn from(value: domain::category::Category) -> Self {
        CategoryResponse {
            id: value.id,
            text: value.text,
        }
    }
}
