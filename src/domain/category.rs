use crate::dto;
use serde::Serialize;

/// A label owned by a regular user which can tag any number of that user's todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i32,
    pub user_id: i32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub user_id: i32,
    pub text: String,
}

impl NewCategory {
    pub fn for_user(user_id: i32, create: dto::CategoryCreate) -> NewCategory {
        NewCategory {
            user_id,
            text: create.text,
        }
    }
}

/// Link row tagging a todo with a category. The (category_id, todo_id) pair is the key,
/// so a todo can carry a given category at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TodoCategory {
    pub category_id: i32,
    pub todo_id: i32,
}

pub mod driven_ports {
    use super::*;
    use crate::domain::DrivenPortError;
    use crate::external_connections::ExternalConnectivity;

    pub trait CategoryReader {
        async fn categories_for_user(
            &self,
            user_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Category>, DrivenPortError>;
    }

    pub trait CategoryWriter {
        /// Fails with [DrivenPortError::DoesNotExist] if the owning user is missing
        async fn create_category(
            &self,
            category: &NewCategory,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i32, DrivenPortError>;

        /// Fails with [DrivenPortError::AlreadyExists] if the pair is already linked
        async fn link_todo(
            &self,
            link: &TodoCategory,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), DrivenPortError>;

        /// Removing a link which doesn't exist is not an error
        async fn unlink_todo(
            &self,
            link: &TodoCategory,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), DrivenPortError>;
    }
}
