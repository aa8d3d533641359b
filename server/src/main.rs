use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;

use common::application::Application;
use common::error::{ApiError, ApiResult};
use server::{app, AppState};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let cfg = {
        let _guard = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .finish()
            .set_default();

        Application::init("application.yaml").await?
    };

    tracing_subscriber::fmt()
        .with_max_level(
            cfg.log_level
                .parse::<tracing::Level>()
                .unwrap_or(tracing::Level::DEBUG),
        )
        .init();

    let addr = cfg
        .socket_addr()
        .parse::<SocketAddr>()
        .map_err(|e| ApiError::Error(format!("监听地址错误: {}", e)))?;
    let router = app(Arc::new(AppState::new(&cfg)));

    info!("server run at: {}", addr);
    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await
        .map_err(|e| ApiError::Error(e.to_string()))
}
