use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::email::context::{build_reset_url, client_ip, ResetContext};
use crate::error::AppError;
use crate::state::SharedState;

/// Reset event delivered by the host's authentication subsystem. The token is
/// consumed as-is; generating and validating it is the host's job.
#[derive(Deserialize)]
pub struct PasswordResetEvent {
    pub login: String,
    pub email: String,
    pub token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn password_reset(
    State(state): State<SharedState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(event): Json<PasswordResetEvent>,
) -> Result<Json<MessageResponse>, AppError> {
    // A missing login only degrades the rendered text; without an address or
    // a token there is nothing to send.
    if event.email.is_empty() || event.token.is_empty() {
        return Err(AppError::BadRequest(
            "email and token are required".to_string(),
        ));
    }

    let settings = state.settings.read().await?;

    let reset_url = build_reset_url(&state.config.base_url, &event.token, &event.login);
    let ctx = ResetContext {
        login: event.login,
        reset_url,
        ip: client_ip(&headers, Some(peer.ip())),
        site_name: state.config.site_name.clone(),
        site_domain: state.config.site_domain(),
    };

    let rendered = state.hooks.on_password_reset_requested(&settings, &ctx);

    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = mailer.send_reset(&event.email, &rendered).await {
                tracing::error!("Failed to send password reset email: {e}");
            }
        }
        None => {
            tracing::warn!(
                subject = %rendered.subject,
                "SMTP not configured; skipping password reset email delivery"
            );
        }
    }

    Ok(Json(MessageResponse {
        message: "Password reset notification processed".to_string(),
    }))
}
