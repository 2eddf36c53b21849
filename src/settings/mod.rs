pub mod sanitize;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hooks::SettingsWriteHook;
use crate::store::{OptionStore, StoreError};

pub const OPTION_NAME: &str = "password_reset_email";

pub const DEFAULT_BUTTON_COLOR: &str = "#0073aa";

/// The persisted preference record controlling password-reset email
/// appearance. Every field has a default so the record is fully resolvable
/// even if it was never saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSettings {
    /// Empty means "no logo".
    #[serde(default)]
    pub logo_url: String,
    #[serde(default = "default_logo_max_height")]
    pub logo_max_height: u32,
    #[serde(default = "default_button_color")]
    pub button_color: String,
    /// Subject template; may contain the literal `{site_domain}` token.
    /// Empty means "derive from the site domain at render time".
    #[serde(default)]
    pub email_subject: String,
    #[serde(default = "default_show_ip")]
    pub show_ip_address: bool,
}

fn default_logo_max_height() -> u32 {
    60
}

fn default_button_color() -> String {
    DEFAULT_BUTTON_COLOR.to_string()
}

fn default_show_ip() -> bool {
    true
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            logo_url: String::new(),
            logo_max_height: default_logo_max_height(),
            button_color: default_button_color(),
            email_subject: String::new(),
            show_ip_address: default_show_ip(),
        }
    }
}

/// Read/write access to the single settings record. Constructed once per
/// process and shared by reference.
pub struct SettingsStore {
    options: Arc<dyn OptionStore>,
}

impl SettingsStore {
    pub fn new(options: Arc<dyn OptionStore>) -> Self {
        Self { options }
    }

    /// The effective record: stored values merged with defaults. An absent or
    /// malformed stored record is equivalent to the all-default record.
    pub async fn read(&self) -> Result<EmailSettings, StoreError> {
        let settings = match self.options.get(OPTION_NAME).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => EmailSettings::default(),
        };
        Ok(settings)
    }

    /// Sanitize each recognized key of `raw` independently, merge the result
    /// over the prior effective record, persist, and return the new record.
    ///
    /// A single malformed field never aborts the write: an invalid height is
    /// replaced with the default, an invalid color keeps the prior value, and
    /// unrecognized keys are ignored. The checkbox field is rewritten on
    /// every call (absent means unchecked).
    pub async fn write(&self, raw: &Value) -> Result<EmailSettings, StoreError> {
        let mut settings = self.read().await?;

        if let Some(value) = raw.get("logo_url").and_then(Value::as_str) {
            settings.logo_url = sanitize::logo_url(value);
        }

        if let Some(value) = raw.get("logo_max_height") {
            settings.logo_max_height = sanitize::logo_height(value);
        }

        if let Some(value) = raw.get("button_color").and_then(Value::as_str) {
            if let Some(color) = sanitize::hex_color(value) {
                settings.button_color = color;
            }
        }

        if let Some(value) = raw.get("email_subject").and_then(Value::as_str) {
            settings.email_subject = sanitize::plain_text(value);
        }

        settings.show_ip_address = raw
            .get("show_ip_address")
            .is_some_and(sanitize::truthy);

        self.options
            .set(OPTION_NAME, serde_json::to_value(&settings).map_err(|e| {
                StoreError::from(format!("Failed to serialize settings: {e}"))
            })?)
            .await?;

        Ok(settings)
    }
}

/// `settings.write` observer: records the new effective record in the log.
pub struct LogSettingsWrite;

impl SettingsWriteHook for LogSettingsWrite {
    fn id(&self) -> &str {
        "log_settings_write"
    }

    fn on_write(&self, settings: &EmailSettings) {
        tracing::info!(
            logo_url = %settings.logo_url,
            logo_max_height = settings.logo_max_height,
            button_color = %settings.button_color,
            show_ip_address = settings.show_ip_address,
            "password reset email settings updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::store::memory::MemoryOptions;

    use super::*;

    fn store() -> SettingsStore {
        SettingsStore::new(Arc::new(MemoryOptions::new()))
    }

    #[tokio::test]
    async fn read_yields_defaults_when_nothing_was_saved() {
        let settings = store().read().await.unwrap();
        assert_eq!(settings, EmailSettings::default());
        assert_eq!(settings.logo_max_height, 60);
        assert_eq!(settings.button_color, "#0073aa");
        assert!(settings.show_ip_address);
    }

    #[tokio::test]
    async fn write_then_read_round_trips_valid_input() {
        let store = store();
        let written = store
            .write(&json!({
                "logo_url": "https://example.com/logo.png",
                "logo_max_height": 80,
                "button_color": "#ff0000",
                "email_subject": "Reset for {site_domain}",
                "show_ip_address": "1",
            }))
            .await
            .unwrap();
        assert_eq!(store.read().await.unwrap(), written);
        assert_eq!(written.logo_url, "https://example.com/logo.png");
        assert_eq!(written.logo_max_height, 80);
        assert_eq!(written.button_color, "#ff0000");
        assert_eq!(written.email_subject, "Reset for {site_domain}");
        assert!(written.show_ip_address);
    }

    #[tokio::test]
    async fn invalid_height_writes_as_default() {
        let store = store();
        for bad in [json!(0), json!(-7), json!("abc")] {
            let settings = store
                .write(&json!({ "logo_max_height": bad }))
                .await
                .unwrap();
            assert_eq!(settings.logo_max_height, 60);
        }
    }

    #[tokio::test]
    async fn invalid_color_keeps_prior_value() {
        let store = store();
        store
            .write(&json!({ "button_color": "#123456", "show_ip_address": "1" }))
            .await
            .unwrap();
        let settings = store
            .write(&json!({ "button_color": "red", "show_ip_address": "1" }))
            .await
            .unwrap();
        assert_eq!(settings.button_color, "#123456");
        assert_eq!(store.read().await.unwrap().button_color, "#123456");
    }

    #[tokio::test]
    async fn absent_checkbox_writes_false() {
        let store = store();
        let settings = store
            .write(&json!({ "logo_max_height": 50 }))
            .await
            .unwrap();
        assert!(!settings.show_ip_address);
    }

    #[tokio::test]
    async fn unrecognized_keys_are_ignored() {
        let store = store();
        let settings = store
            .write(&json!({ "favorite_color": "blue", "show_ip_address": true }))
            .await
            .unwrap();
        assert_eq!(
            settings,
            EmailSettings {
                show_ip_address: true,
                ..EmailSettings::default()
            }
        );
    }

    #[tokio::test]
    async fn one_invalid_field_does_not_abort_the_others() {
        let store = store();
        let settings = store
            .write(&json!({
                "button_color": "not-a-color",
                "logo_max_height": 90,
                "email_subject": "<b>Hello</b> there",
            }))
            .await
            .unwrap();
        assert_eq!(settings.button_color, "#0073aa");
        assert_eq!(settings.logo_max_height, 90);
        assert_eq!(settings.email_subject, "Hello there");
    }

    #[tokio::test]
    async fn malformed_stored_record_reads_as_defaults() {
        let options = Arc::new(MemoryOptions::new());
        options
            .set(OPTION_NAME, json!("not an object"))
            .await
            .unwrap();
        let store = SettingsStore::new(options);
        assert_eq!(store.read().await.unwrap(), EmailSettings::default());
    }
}
