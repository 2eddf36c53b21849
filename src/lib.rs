pub mod config;
pub mod email;
pub mod error;
pub mod hooks;
pub mod routes;
pub mod settings;
pub mod state;
pub mod store;
pub mod views;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::render::BrandedResetEmail;
use crate::email::Mailer;
use crate::hooks::HookRegistry;
use crate::settings::{LogSettingsWrite, SettingsStore};
use crate::state::{AppState, SharedState};
use crate::store::OptionStore;

pub fn build_app(options: Arc<dyn OptionStore>, config: Config) -> Router {
    // One settings store per process, shared by reference with the handlers.
    let settings = Arc::new(SettingsStore::new(options));

    // Subscribe the built-in handlers to the host events.
    let mut hooks = HookRegistry::new();
    hooks.register_reset_filter(Arc::new(BrandedResetEmail));
    hooks.register_write_hook(Arc::new(LogSettingsWrite));

    // Build mailer
    let mailer = config.smtp.as_ref().and_then(|smtp| {
        match Mailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("SMTP configured");
                Some(Arc::new(mailer))
            }
            Err(e) => {
                tracing::warn!("SMTP not available: {e}");
                None
            }
        }
    });

    let state: SharedState = Arc::new(AppState {
        config,
        settings,
        hooks,
        mailer,
    });

    Router::new()
        .merge(routes::api_routes())
        .merge(views::view_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
