pub mod result_page;

pub use result_page::{ResultPageHandler, result_page_handler, stylesheet_handler};
