//! Database module: credentials, row models and the MySQL connector.
//!
//! Layout:
//! - `models.rs`: `Credentials` and the `tblTypeState` row
//! - `mysql.rs`: single-connection MySQL access through sqlx

pub mod models;
pub mod mysql;

pub use models::{Credentials, TypeState};
pub use mysql::MySqlConnector;

use crate::error::PageError;
use async_trait::async_trait;

/// The one query this service runs.
pub const TYPE_STATE_QUERY: &str = "SELECT * FROM tblTypeState LIMIT 30";

/// Upper bound on rendered rows, matching the query's `LIMIT`.
pub const ROW_LIMIT: usize = 30;

/// Opens a fresh connection for one request.
#[async_trait]
pub trait DatabaseConnector: Send + Sync {
    async fn connect(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn TypeStateConnection>, PageError>;
}

/// An open connection owned by a single request.
#[async_trait]
pub trait TypeStateConnection: Send {
    /// Run [`TYPE_STATE_QUERY`]. An empty vector means the table had no rows.
    async fn fetch_type_states(&mut self) -> Result<Vec<TypeState>, PageError>;

    /// Release the connection.
    async fn close(self: Box<Self>) -> Result<(), PageError>;
}
