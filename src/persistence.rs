pub mod db_category_driven_ports;
pub mod db_todo_driven_ports;
pub mod db_user_driven_ports;

use crate::domain::DrivenPortError;
use crate::external_connections;
use crate::external_connections::ConnectionHandle;
use sqlx::pool::PoolConnection;
use sqlx::{FromRow, PgConnection, PgPool, Postgres};
use tracing::error;

/// Owns the clients used to reach external systems so storage adapters can stay agnostic of
/// where their connections come from
#[derive(Clone)]
pub struct ExternalConnectivity {
    db: PgPool,
}

impl ExternalConnectivity {
    pub fn new(db: PgPool) -> Self {
        ExternalConnectivity { db }
    }
}

/// A handle from ExternalConnectivity which holds a connection checked out of the pool
pub struct PoolConnectionHandle {
    active_connection: PoolConnection<Postgres>,
}

impl ConnectionHandle for PoolConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection {
        &mut self.active_connection
    }
}

impl external_connections::ExternalConnectivity for ExternalConnectivity {
    type DbHandle<'cxn_borrow> = PoolConnectionHandle;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error> {
        let handle = PoolConnectionHandle {
            active_connection: self.db.acquire().await?,
        };

        Ok(handle)
    }
}

/// Utility DTO for retrieving the ID of a newly inserted record
#[derive(FromRow)]
struct NewId {
    id: i32,
}

/// Sorts a database failure into the port error callers can act on. Key violations become
/// [DrivenPortError::AlreadyExists], dangling foreign keys and missing rows become
/// [DrivenPortError::DoesNotExist], and everything else is a communication failure.
fn port_error(action: &str, err: sqlx::Error) -> DrivenPortError {
    match err {
        sqlx::Error::RowNotFound => DrivenPortError::DoesNotExist,
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            DrivenPortError::AlreadyExists
        }
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            DrivenPortError::DoesNotExist
        }
        other => {
            error!("Storage failure while {action}: {other}");
            DrivenPortError::CommsFailure(anyhow::Error::new(other).context(format!("while {action}")))
        }
    }
}
