//! Axum router configuration with middleware.
//!
//! API routes live under `/api/`. Every request gets an `x-request-id`
//! (UUID v7) that is recorded on its trace span and echoed in the response.

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

use poolside_core::message::MessageCategory;

use crate::http::handlers;
use crate::http::response::message;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route(
            "/profile",
            get(handlers::auth::get_profile).put(handlers::auth::update_profile),
        );

    let schedule_routes = Router::new()
        .route(
            "/",
            get(handlers::schedule::list_schedules).post(handlers::schedule::create_schedule),
        )
        .route("/availability", get(handlers::schedule::availability))
        .route(
            "/{id}",
            get(handlers::schedule::get_schedule)
                .put(handlers::schedule::update_schedule)
                .delete(handlers::schedule::delete_schedule),
        );

    let reservation_routes = Router::new()
        .route(
            "/",
            get(handlers::reservation::list_reservations)
                .post(handlers::reservation::create_reservation),
        )
        .route(
            "/my-reservations",
            get(handlers::reservation::my_reservations),
        )
        .route("/{id}", get(handlers::reservation::get_reservation))
        .route("/{id}/cancel", put(handlers::reservation::cancel_reservation))
        .route(
            "/{id}/confirm-payment",
            put(handlers::reservation::confirm_payment),
        )
        .route(
            "/{id}/complete",
            put(handlers::reservation::complete_reservation),
        );

    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route("/{id}", get(handlers::user::get_user));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/schedules", schedule_routes)
        .nest("/reservations", reservation_routes)
        .nest("/users", user_routes);

    Router::new()
        .nest("/api", api_routes)
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .with_state(state)
}

/// Allow the configured origins with credentials, or any origin when none are set.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(allowed).allow_credentials(true)
    }
}

/// Time-sortable request ids.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// GET / - API banner.
async fn welcome() -> Response {
    message(MessageCategory::AppWelcome)
}

/// Unknown paths and unsupported methods on known paths.
async fn route_not_found() -> Response {
    message(MessageCategory::AppRouteNotFound)
}

/// GET /health - Liveness plus a database round trip (no auth required).
async fn health_check(State(state): State<AppState>) -> Response {
    let database_ok = sqlx::query("SELECT 1")
        .execute(&state.db_pool.reader)
        .await
        .inspect_err(|e| tracing::error!("health check query failed: {e}"))
        .is_ok();

    let (status, label) = if database_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(serde_json::json!({
            "status": label,
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
        .into_response()
}
