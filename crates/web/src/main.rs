use taskboard_http::serve::serve;
use taskboard_http::telemetry::init_tracing;
use taskboard_web::config::WebConfig;
use taskboard_web::router::build_web_router;
use taskboard_web::state::WebState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing("taskboard_web=debug,tower_http=debug");

    let config = WebConfig::from_env().expect("Invalid web configuration");
    let addr = config.bind_addr().expect("Invalid bind address");
    tracing::info!(%addr, api_base_url = %config.api_base_url, "Loaded web configuration");

    let app = build_web_router(WebState::new(config));
    serve(app, addr).await.expect("Server error");
    tracing::info!("Web server stopped");
}
