use sqlx::PgConnection;

/// Something which can lend out a live database connection
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}

/// Access to the systems storage adapters talk to. Adapters ask for a connection per operation
/// rather than holding one, so the same adapter works against a pool or a single connection.
pub trait ExternalConnectivity {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}
