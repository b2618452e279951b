use crate::domain::Error;
use crate::dto;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which kind of user a record describes. Each role is stored in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    RegularUser,
}

impl Role {
    /// The literal written to the `role` field for this variant
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::RegularUser => "regular_user",
        }
    }

    /// Name of the table holding users of this role
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::RegularUser => "regularuser",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognized user role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "regular_user" => Ok(Self::RegularUser),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}

/// A user which has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    /// Builds an admin from a raw payload. Any role in the payload is replaced with "admin".
    pub fn admin(raw: Value) -> Result<NewUser, Error> {
        Self::from_raw(Role::Admin, raw)
    }

    /// Builds a regular user from a raw payload. Any role in the payload is replaced with "regular_user".
    pub fn regular_user(raw: Value) -> Result<NewUser, Error> {
        Self::from_raw(Role::RegularUser, raw)
    }

    /// Constructs a user of the given `role` from untrusted input. The role is forced onto the
    /// payload before anything else is looked at, then the remaining fields are type-checked.
    pub fn from_raw(role: Role, raw: Value) -> Result<NewUser, Error> {
        let sanitized = force_role(role, raw);

        serde_json::from_value(sanitized).map_err(|err| {
            debug!(%role, "rejected raw user payload: {err}");
            Error::from(err)
        })
    }

    /// Builds a user of the given `role` from registration input which has already been validated
    pub fn register(role: Role, create: dto::UserCreate) -> NewUser {
        NewUser {
            username: create.username,
            email: create.email,
            password: create.password,
            role,
        }
    }
}

/// Overwrites the "role" key of an object payload. Non-object payloads are passed through
/// untouched and fail later during deserialization.
fn force_role(role: Role, mut raw: Value) -> Value {
    if let Value::Object(ref mut fields) = raw {
        fields.insert("role".to_owned(), Value::from(role.as_str()));
    }

    raw
}

pub mod driven_ports {
    use super::*;
    use crate::domain::DrivenPortError;
    use crate::external_connections::ExternalConnectivity;

    pub trait UserReader {
        async fn user_by_id(
            &self,
            role: Role,
            id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<User>, DrivenPortError>;

        async fn user_by_username(
            &self,
            role: Role,
            username: &str,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<User>, DrivenPortError>;
    }

    pub trait UserWriter {
        /// Stores the user in its role's table, returning the new ID. Fails with
        /// [DrivenPortError::AlreadyExists] if the username or email is taken.
        async fn create_user(
            &self,
            user: &NewUser,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i32, DrivenPortError>;
    }
}



#[cfg(test)]
mod in_memory_persistence_tests {
    use super::driven_ports::{UserReader, UserWriter};
    use super::test_util::*;
    use super::*;
    use crate::domain::DrivenPortError;
    use crate::domain::test_util::Connectivity;
    use crate::external_connections::test_util::FakeExternalConnectivity;
    use speculoos::prelude::*;

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let users = InMemoryUserPersistence::new_locked();
        let mut ext_cxn = FakeExternalConnectivity::new();

        let first = users.create_user(&regular_user_default(), &mut ext_cxn).await;
        assert_that!(first).is_ok_containing(1);

        let mut second_user = regular_user_default();
        second_user.email = "other@example.com".to_owned();
        let second = users.create_user(&second_user, &mut ext_cxn).await;
        assert!(matches!(second, Err(DrivenPortError::AlreadyExists)));
    }

    #[tokio::test]
    async fn same_username_allowed_in_other_role_table() {
        let users = InMemoryUserPersistence::new_locked();
        let mut ext_cxn = FakeExternalConnectivity::new();

        let mut admin = regular_user_default();
        admin.role = Role::Admin;
        users
            .create_user(&regular_user_default(), &mut ext_cxn)
            .await
            .expect("first insert should succeed");
        let admin_result = users.create_user(&admin, &mut ext_cxn).await;
        assert_that!(admin_result).is_ok_containing(2);

        let fetched = users.user_by_username(Role::Admin, "jdoe", &mut ext_cxn).await;
        assert_that!(fetched)
            .is_ok()
            .is_some()
            .map(|user| &user.id)
            .is_equal_to(2);
    }

    #[tokio::test]
    async fn propagates_port_error() {
        let mut raw = InMemoryUserPersistence::new();
        raw.connectivity = Connectivity::Disconnected;
        let users = std::sync::RwLock::new(raw);
        let mut ext_cxn = FakeExternalConnectivity::new();

        let fetched = users.user_by_id(Role::RegularUser, 1, &mut ext_cxn).await;
        assert!(matches!(fetched, Err(DrivenPortError::CommsFailure(_))));
    }
}
