use crate::domain;
use crate::domain::DrivenPortError;
use crate::domain::user::{NewUser, Role, User};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use sqlx::{FromRow, query_as};

#[derive(FromRow)]
struct UserRow {
    id: i32,
    username: String,
    email: String,
    password: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = DrivenPortError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let role: Role = value
            .role
            .parse()
            .map_err(|err| DrivenPortError::CommsFailure(anyhow::Error::new(err)))?;

        Ok(User {
            id: value.id,
            username: value.username,
            email: value.email,
            password: value.password,
            role,
        })
    }
}

pub struct DbReadUsers;

impl domain::user::driven_ports::UserReader for DbReadUsers {
    async fn user_by_id(
        &self,
        role: Role,
        id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<User>, DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let query = format!("SELECT * FROM {} u WHERE u.id = $1", role.table());
        let user = query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(cxn.borrow_connection())
            .await
            .map_err(|err| super::port_error("fetching a user by id", err))?;

        user.map(User::try_from).transpose()
    }

    async fn user_by_username(
        &self,
        role: Role,
        username: &str,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<User>, DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let query = format!("SELECT * FROM {} u WHERE u.username = $1", role.table());
        let user = query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_optional(cxn.borrow_connection())
            .await
            .map_err(|err| super::port_error("fetching a user by username", err))?;

        user.map(User::try_from).transpose()
    }
}

pub struct DbWriteUsers;

impl domain::user::driven_ports::UserWriter for DbWriteUsers {
    async fn create_user(
        &self,
        user: &NewUser,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i32, DrivenPortError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let query = format!(
            "INSERT INTO {}(username, email, password, role) VALUES ($1, $2, $3, $4) RETURNING id",
            user.role.table()
        );
        let new_id = query_as::<_, super::NewId>(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.role.as_str())
            .fetch_one(cxn.borrow_connection())
            .await
            .map_err(|err| super::port_error("inserting a new user", err))?;

        Ok(new_id.id)
    }
}
