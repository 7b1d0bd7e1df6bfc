//! HTTP adapters - REST API implementations.
//!
//! Each concern has its own router; [`app_router`] assembles them together
//! with the room WebSocket endpoint.

pub mod guest;
pub mod health;
pub mod room;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::{websocket_router, WebSocketState};
use crate::application::handlers::guest::SignInGuestHandler;

pub use guest::guest_routes;
pub use health::health_routes;
pub use room::{room_routes, RoomHandlers};

/// Build the full application router.
///
/// CORS is permissive when `cors_origins` is empty.
pub fn app_router(
    rooms: RoomHandlers,
    websocket: WebSocketState,
    cors_origins: &[String],
) -> Router {
    let api_v1 = Router::new()
        .merge(room_routes(rooms))
        .merge(guest_routes(SignInGuestHandler::new()));

    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1)
        .merge(websocket_router(websocket))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origins_are_dropped() {
        // Building must not panic on header-invalid input
        let _ = cors_layer(&["http://ok.example".to_string(), "bad\norigin".to_string()]);
        let _ = cors_layer(&[]);
    }
}
