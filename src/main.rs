use mimalloc::MiMalloc;
use rds_result_page::Config;
use rds_result_page::db::MySqlConnector;
use rds_result_page::handlers::ResultPageHandler;
use rds_result_page::render::HtmlRenderer;
use rds_result_page::router::{PageState, page_router};
use rds_result_page::secrets::AwsSecretsProvider;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        db_host = %cfg.db_host,
        db_port = cfg.db_port,
        db_name = %cfg.db_name,
        db_user = %cfg.db_user,
        secret_name = %cfg.secret_name,
        aws_region = %cfg.aws_region,
        loglevel = %cfg.loglevel
    );

    let secrets = AwsSecretsProvider::from_env().await;
    let handler = ResultPageHandler::new(
        cfg.connection(),
        cfg.timeouts(),
        Arc::new(secrets),
        Arc::new(MySqlConnector),
        HtmlRenderer::new()?,
    );
    let app = page_router(PageState::new(handler));

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install ctrl-c handler; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
