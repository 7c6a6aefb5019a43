use crate::db::{Credentials, DatabaseConnector, TYPE_STATE_QUERY, TypeState, TypeStateConnection};
use crate::error::PageError;
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use tracing::debug;

/// Opens one unpooled MySQL connection per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

impl MySqlConnector {
    fn options(credentials: &Credentials) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&credentials.host)
            .port(credentials.port)
            .database(&credentials.database)
            .username(&credentials.username)
            .password(&credentials.password)
    }
}

#[async_trait]
impl DatabaseConnector for MySqlConnector {
    async fn connect(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn TypeStateConnection>, PageError> {
        let conn = MySqlConnection::connect_with(&Self::options(credentials))
            .await
            .map_err(|e| PageError::Connection(e.to_string()))?;
        debug!(host = %credentials.host, database = %credentials.database, "mysql connection opened");
        Ok(Box::new(MySqlTypeStates { conn }))
    }
}

struct MySqlTypeStates {
    conn: MySqlConnection,
}

#[async_trait]
impl TypeStateConnection for MySqlTypeStates {
    async fn fetch_type_states(&mut self) -> Result<Vec<TypeState>, PageError> {
        sqlx::query_as::<_, TypeState>(TYPE_STATE_QUERY)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| PageError::Query(e.to_string()))
    }

    async fn close(self: Box<Self>) -> Result<(), PageError> {
        self.conn
            .close()
            .await
            .map_err(|e| PageError::Connection(e.to_string()))
    }
}
