use todo_api::{
    application::todo_service::TodoServiceImpl,
    config::Config,
    domain::repository::TodoRepository,
    http::{routes::todos, routing},
    infrastructure::sqlite_repo::SqliteTodoRepository,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let repo = SqliteTodoRepository::connect(&config.database_url).await?;
    repo.init().await?;
    let service = TodoServiceImpl::new(repo);
    let todos_router = todos::router(todos::AppState { service: service.clone() });
    let router = routing::app(todos_router, &config.cors);

    let addr = config.addr();
    tracing::info!(%addr, cors = ?config.cors, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    service.repository().close().await;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
