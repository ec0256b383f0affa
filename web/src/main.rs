#![deny(missing_docs)]

//! # LLM Ops Web Binary
//!
//! Entry point for the Actix Web server.

use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use llmops_core::ApiToolRepository;
use llmops_web::config::ServerConfig;
use llmops_web::{app_state, health_check, routes, ToolService};
use log::{error, info};
use std::net::TcpListener;
use std::sync::Arc;

fn build_server(
    listener: TcpListener,
    repository: Arc<dyn ApiToolRepository>,
) -> std::io::Result<actix_web::dev::Server> {
    let state: web::Data<ToolService> = app_state(repository);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(health_check)
            .configure(routes::configure)
    })
    .listen(listener)?
    .run())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let config = ServerConfig::parse();
    let repository = config.repository().map_err(|e| {
        error!("failed to initialise storage: {e}");
        std::io::Error::other(e.to_string())
    })?;

    let listener = TcpListener::bind(&config.bind)?;
    info!("listening on {}", listener.local_addr()?);
    let server = build_server(listener, repository)?;

    if std::env::var("LLMOPS_ONESHOT").is_ok() {
        server.handle().stop(true).await;
    }

    server.await
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmops_core::MemoryRepository;

    #[actix_web::test]
    async fn test_build_server_start_stop() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let server = build_server(listener, Arc::new(MemoryRepository::default())).unwrap();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        handle.stop(true).await;
    }
}
