//! HTTP adapter for guest sign-in.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::application::handlers::guest::SignInGuestHandler;

#[derive(Debug, Clone, Serialize)]
pub struct GuestSignInResponse {
    pub uuid: String,
}

/// GET /api/v1/guest/sign-in - Issue a guest id
pub async fn sign_in_guest(State(handler): State<SignInGuestHandler>) -> Json<GuestSignInResponse> {
    Json(GuestSignInResponse {
        uuid: handler.handle().to_string(),
    })
}

/// Creates the guest router, mounted under `/api/v1`.
pub fn guest_routes(handler: SignInGuestHandler) -> Router {
    Router::new()
        .route("/guest/sign-in", get(sign_in_guest))
        .with_state(handler)
}
