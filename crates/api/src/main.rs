use taskboard_api::config::ServerConfig;
use taskboard_api::router::build_app_router;
use taskboard_api::state::AppState;
use taskboard_http::serve::serve;
use taskboard_http::telemetry::init_tracing;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing("taskboard_api=debug,tower_http=debug");

    let config = ServerConfig::from_env().expect("Invalid server configuration");
    let addr = config.bind_addr().expect("Invalid bind address");
    tracing::info!(%addr, origins = config.cors_origins.len(), "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = taskboard_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    taskboard_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    taskboard_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    if config.seed_demo_data {
        match taskboard_db::seed::seed_demo_data(&pool).await {
            Ok((0, 0)) => tracing::info!("Database already populated, skipping demo data"),
            Ok((categories, tasks)) => tracing::info!(categories, tasks, "Seeded demo data"),
            Err(e) => tracing::error!(error = %e, "Failed to seed demo data"),
        }
    }

    let app = build_app_router(AppState::new(pool.clone()), &config);
    serve(app, addr).await.expect("Server error");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}
