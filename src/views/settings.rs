use std::collections::HashMap;

use askama::Template;
use axum::extract::{Form, Query, State};
use axum::response::{Html, IntoResponse, Redirect};
use serde::Deserialize;

use crate::email::render::render_preview;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "settings/email.html")]
#[allow(dead_code)]
struct EmailSettingsTemplate {
    updated: bool,
    logo_url: String,
    logo_max_height: u32,
    button_color: String,
    email_subject: String,
    show_ip_address: bool,
    preview: String,
}

#[derive(Deserialize)]
pub struct SettingsPageQuery {
    #[serde(rename = "settings-updated")]
    pub settings_updated: Option<String>,
}

pub async fn settings_page(
    State(state): State<SharedState>,
    Query(query): Query<SettingsPageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.settings.read().await?;

    // The form shows the effective subject, matching what the renderer sends.
    let email_subject = if settings.email_subject.is_empty() {
        format!("Password Reset for: {}", state.config.site_domain())
    } else {
        settings.email_subject.clone()
    };

    let template = EmailSettingsTemplate {
        updated: query.settings_updated.is_some(),
        logo_url: settings.logo_url.clone(),
        logo_max_height: settings.logo_max_height,
        button_color: settings.button_color.clone(),
        email_subject,
        show_ip_address: settings.show_ip_address,
        preview: render_preview(&settings),
    };
    let page = template
        .render()
        .map_err(|e| AppError::Internal(format!("Failed to render settings page: {e}")))?;
    Ok(Html(page))
}

pub async fn save_settings(
    State(state): State<SharedState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let raw = serde_json::Value::Object(
        form.into_iter()
            .map(|(key, value)| (key, serde_json::Value::String(value)))
            .collect(),
    );

    let effective = state.settings.write(&raw).await?;
    state.hooks.on_settings_write(&effective);

    Ok(Redirect::to("/settings?settings-updated=1"))
}

pub async fn preview_partial(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.settings.read().await?;
    Ok(Html(render_preview(&settings)))
}
