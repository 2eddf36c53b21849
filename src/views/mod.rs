pub mod settings;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        // Settings
        .route(
            "/settings",
            get(settings::settings_page).post(settings::save_settings),
        )
        // HTMX partials
        .route("/htmx/settings/preview", get(settings::preview_partial))
}
