use std::sync::Arc;

use crate::config::Config;
use crate::email::Mailer;
use crate::hooks::HookRegistry;
use crate::settings::SettingsStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub settings: Arc<SettingsStore>,
    pub hooks: HookRegistry,
    pub mailer: Option<Arc<Mailer>>,
}
