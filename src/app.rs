use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full router over an initialized `AppState`
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut satellites = satellite_routes();
    if config.security.protect_satellites {
        satellites = satellites.route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));
    }

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_public_routes())
        // Protected
        .merge(auth_routes(state.clone()))
        .merge(satellites);

    // Global middleware
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new().route("/token", post(auth::token_post))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::auth;

    Router::new()
        .route("/users/me/", get(auth::whoami))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn satellite_routes() -> Router<AppState> {
    use handlers::satellites;

    Router::new()
        // Collection
        .route(
            "/satellites/",
            get(satellites::collection_get).post(satellites::collection_post),
        )
        // Individual records
        .route(
            "/satellites/:id",
            get(satellites::record_get)
                .put(satellites::record_put)
                .patch(satellites::record_patch)
                .delete(satellites::record_delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Satellite API",
        "version": version,
        "endpoints": {
            "token": "POST /token (public - form username/password)",
            "me": "GET /users/me/ (bearer token)",
            "satellites": "GET|POST /satellites/, GET|PUT|PATCH|DELETE /satellites/:id",
            "health": "GET /health",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
