use axum::extract::State;
use axum::response::Html;
use axum::Json;

use crate::email::render::render_preview;
use crate::error::AppError;
use crate::settings::EmailSettings;
use crate::state::SharedState;

pub async fn get_settings(
    State(state): State<SharedState>,
) -> Result<Json<EmailSettings>, AppError> {
    let settings = state.settings.read().await?;
    Ok(Json(settings))
}

pub async fn update_settings(
    State(state): State<SharedState>,
    Json(input): Json<serde_json::Value>,
) -> Result<Json<EmailSettings>, AppError> {
    if !input.is_object() {
        return Err(AppError::BadRequest(
            "Expected a JSON object of settings fields".to_string(),
        ));
    }

    let effective = state.settings.write(&input).await?;
    state.hooks.on_settings_write(&effective);

    Ok(Json(effective))
}

pub async fn preview(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let settings = state.settings.read().await?;
    Ok(Html(render_preview(&settings)))
}
