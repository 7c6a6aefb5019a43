use crate::config::{ConnectionConfig, Timeouts};
use crate::db::{Credentials, DatabaseConnector};
use crate::error::PageError;
use crate::render::{HtmlRenderer, STYLESHEET};
use crate::router::PageState;
use crate::secrets::SecretProvider;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Runs one fetch, connect, query, render, close sequence per request.
///
/// Nothing is shared between invocations except the immutable settings and
/// the collaborators; each call fetches its own secret and opens its own
/// connection.
pub struct ResultPageHandler {
    connection: ConnectionConfig,
    timeouts: Timeouts,
    secrets: Arc<dyn SecretProvider>,
    connector: Arc<dyn DatabaseConnector>,
    renderer: HtmlRenderer,
}

impl ResultPageHandler {
    pub fn new(
        connection: ConnectionConfig,
        timeouts: Timeouts,
        secrets: Arc<dyn SecretProvider>,
        connector: Arc<dyn DatabaseConnector>,
        renderer: HtmlRenderer,
    ) -> Self {
        Self {
            connection,
            timeouts,
            secrets,
            connector,
            renderer,
        }
    }

    pub fn renderer(&self) -> &HtmlRenderer {
        &self.renderer
    }

    /// Produce the result page, or the first fault that stopped the sequence.
    pub async fn handle(&self) -> Result<String, PageError> {
        let cfg = &self.connection;

        let secret = within(
            self.timeouts.secret,
            self.secrets.fetch(&cfg.secret_id, &cfg.region),
            PageError::SecretRetrieval,
        )
        .await?;
        debug!(secret_id = %cfg.secret_id, region = %cfg.region, "secret fetched");

        let credentials = Credentials::assemble(cfg, &secret)?;
        drop(secret);

        let mut conn = within(
            self.timeouts.connect,
            self.connector.connect(&credentials),
            PageError::Connection,
        )
        .await?;
        drop(credentials);
        debug!(host = %cfg.host, port = cfg.port, database = %cfg.database, "connected");

        // On query failure `conn` is dropped here, which tears the socket down.
        let rows = within(
            self.timeouts.query,
            conn.fetch_type_states(),
            PageError::Query,
        )
        .await?;
        debug!(rows = rows.len(), "query executed");

        let page = self.renderer.render_results(&rows)?;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close database connection");
        }
        info!(rows = rows.len(), "result page rendered");
        Ok(page)
    }
}

/// Bound `fut` by `limit`, reporting expiry as the step's own fault kind.
async fn within<T, F>(
    limit: Duration,
    fut: F,
    on_timeout: fn(String) -> PageError,
) -> Result<T, PageError>
where
    F: Future<Output = Result<T, PageError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .unwrap_or_else(|_| Err(on_timeout(format!("timed out after {}s", limit.as_secs_f64()))))
}

/// GET / -> the result table, or a complete error page with a 5xx status.
pub async fn result_page_handler(State(state): State<PageState>) -> Response {
    let handler = &state.handler;
    match handler.handle().await {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            error!(code = err.code(), error = %err, "result page failed");
            match handler.renderer().render_error(&err) {
                Ok(page) => (err.status(), Html(page)).into_response(),
                Err(render_err) => {
                    error!(error = %render_err, "failed to render error page");
                    err.into_response()
                }
            }
        }
    }
}

/// GET /style.css
pub async fn stylesheet_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}
