pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod render;
pub mod router;
pub mod secrets;

pub use config::Config;
pub use error::PageError;
pub use handlers::ResultPageHandler;
