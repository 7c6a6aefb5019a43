use crate::config::ConnectionConfig;
use crate::error::PageError;
use crate::secrets::Secret;
use serde_json::Value;
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};
use std::fmt;

/// Everything needed to open one connection. Used once, then dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Merge the static connection settings with the secret's `password`.
    pub fn assemble(config: &ConnectionConfig, secret: &Secret) -> Result<Self, PageError> {
        let password = match secret.get("password") {
            Some(Value::String(p)) => p.clone(),
            Some(_) => {
                return Err(PageError::MalformedSecret(
                    "`password` is not a string".to_string(),
                ));
            }
            None => {
                return Err(PageError::MalformedSecret(
                    "missing `password` field".to_string(),
                ));
            }
        };

        Ok(Self {
            host: config.host.clone(),
            port: config.port,
            database: config.database.clone(),
            username: config.username.clone(),
            password,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One row of `tblTypeState`.
///
/// `id` is wide enough for both `INT` and `INT UNSIGNED` identifier columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeState {
    pub id: i128,
    pub abbreviation: Option<String>,
    pub name: Option<String>,
}

impl<'r> FromRow<'r, MySqlRow> for TypeState {
    fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
        let id = widen_id(row.try_get::<i64, _>("idTypeState"), || {
            row.try_get::<u64, _>("idTypeState")
        })?;
        Ok(Self {
            id,
            abbreviation: row.try_get("dsAbbreviation")?,
            name: row.try_get("dsType")?,
        })
    }
}

/// sqlx refuses to decode an unsigned column as `i64`; retry as `u64` on a
/// type mismatch only.
fn widen_id<F>(signed: Result<i64, sqlx::Error>, unsigned: F) -> Result<i128, sqlx::Error>
where
    F: FnOnce() -> Result<u64, sqlx::Error>,
{
    match signed {
        Ok(id) => Ok(i128::from(id)),
        Err(sqlx::Error::ColumnDecode { .. }) => unsigned().map(i128::from),
        Err(e) => Err(e),
    }
}
