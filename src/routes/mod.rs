pub mod reset;
pub mod settings;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Settings
        .route(
            "/api/v1/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/api/v1/settings/preview", get(settings::preview))
        // Host-facing hooks
        .route("/api/v1/hooks/password-reset", post(reset::password_reset))
}
