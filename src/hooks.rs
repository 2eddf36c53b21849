use std::sync::Arc;

use crate::email::context::ResetContext;
use crate::email::render::RenderedEmail;
use crate::settings::EmailSettings;

/// Filter on the `password_reset.requested` event. Each registered filter
/// receives the email produced so far and returns the (possibly replaced)
/// email to pass along the chain.
pub trait ResetEmailFilter: Send + Sync {
    fn id(&self) -> &str;
    fn apply(
        &self,
        email: RenderedEmail,
        settings: &EmailSettings,
        ctx: &ResetContext,
    ) -> RenderedEmail;
}

/// Observer of the `settings.write` event.
pub trait SettingsWriteHook: Send + Sync {
    fn id(&self) -> &str;
    fn on_write(&self, settings: &EmailSettings);
}

/// Event subscription registry standing in for the host platform's hook
/// system. Handlers are registered at startup and dispatched per request.
#[derive(Default)]
pub struct HookRegistry {
    reset_filters: Vec<Arc<dyn ResetEmailFilter>>,
    write_hooks: Vec<Arc<dyn SettingsWriteHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_reset_filter(&mut self, filter: Arc<dyn ResetEmailFilter>) {
        self.reset_filters.push(filter);
    }

    pub fn register_write_hook(&mut self, hook: Arc<dyn SettingsWriteHook>) {
        self.write_hooks.push(hook);
    }

    /// Dispatch `password_reset.requested`: start from the host's plain
    /// default email and fold every registered filter over it.
    pub fn on_password_reset_requested(
        &self,
        settings: &EmailSettings,
        ctx: &ResetContext,
    ) -> RenderedEmail {
        let mut email = RenderedEmail::host_default(ctx);
        for filter in &self.reset_filters {
            tracing::debug!(filter = filter.id(), "applying password reset email filter");
            email = filter.apply(email, settings, ctx);
        }
        email
    }

    /// Dispatch `settings.write` to every registered observer.
    pub fn on_settings_write(&self, settings: &EmailSettings) {
        for hook in &self.write_hooks {
            hook.on_write(settings);
        }
    }
}
