use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use gallery_blog::{
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    handlers::not_found::not_found,
    routes::configure_routes,
    settings::{AppConfig, LogFormat},
    storage::local::LocalMediaStore,
    telemetry::init_tracing,
    AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => {
            init_tracing(cfg.log_format);
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            init_tracing(LogFormat::Pretty);
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config)
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    LocalMediaStore::new(config.media_root.clone(), config.media_url.clone())
        .ensure_root()
        .await
        .context("Failed to prepare media directory")?;

    let app_state = web::Data::new(AppState::new(&config, pool));
    let max_upload_bytes = config.max_upload_bytes;
    let server_addr = config.server_addr();

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(|cfg| configure_routes(cfg, max_upload_bytes))
            .default_service(web::to(not_found))
    })
    .workers(config.worker_count)
    .disable_signals()
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run();

    let handle = server.handle();

    tokio::select! {
        res = server => res.context("HTTP server failed")?,
        _ = shutdown_signal() => handle.stop(true).await,
    }

    Ok(())
}
