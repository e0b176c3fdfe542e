use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod clock;
mod config;
mod error;
mod guard;
mod handlers;
mod models;
mod routes;
mod services;

use clock::SystemClock;
use config::Config;
use services::food::{FoodLookup, OpenFoodFactsClient};
use services::registry::ProfileRegistry;
use services::weather::OpenWeatherClient;

#[derive(Clone)]
pub struct AppState {
    pub registry: ProfileRegistry,
    pub food: Arc<dyn FoodLookup>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hydrate_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();

    let weather = OpenWeatherClient::new(&config).expect("Failed to build weather client");
    let food = OpenFoodFactsClient::new(&config).expect("Failed to build food client");

    // Profiles live only in memory and are lost on restart
    let registry = ProfileRegistry::new(Arc::new(weather), Arc::new(SystemClock));

    let state = AppState {
        registry,
        food: Arc::new(food),
    };

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .expect("FRONTEND_URL must be a valid header value"),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static(guard::USER_ID_HEADER),
        ]);

    let app = routes::build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
