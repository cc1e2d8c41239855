//! HTTP router.
//!
//! Routes:
//! - `GET /` service info
//! - `GET /api/health`
//! - `POST /api/chat`
//!
//! Layers (outermost first): request tracing, CORS.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::handlers;
use crate::api::types::ApiState;

/// Build the API router with CORS restricted to `cors_origins`.
pub fn api_router(state: ApiState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat));

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api)
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Bind `addr` and serve until the task is cancelled or ctrl-c is pressed.
pub async fn serve(addr: &str, router: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
}
