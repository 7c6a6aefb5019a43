use crate::handlers::{ResultPageHandler, result_page_handler, stylesheet_handler};
use axum::{Router, routing::get};
use std::sync::Arc;

#[derive(Clone)]
pub struct PageState {
    pub handler: Arc<ResultPageHandler>,
}

impl PageState {
    pub fn new(handler: ResultPageHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

pub fn page_router(state: PageState) -> Router {
    Router::new()
        .route("/", get(result_page_handler))
        .route("/style.css", get(stylesheet_handler))
        .with_state(state)
}
