use crate::hooks::ResetEmailFilter;
use crate::settings::EmailSettings;

use super::context::ResetContext;
use super::escape::{esc_attr, esc_html, esc_url, strip_tracking_params};

const PREVIEW_LOGIN: &str = "sample_user";
const PREVIEW_RESET_URL: &str =
    "https://yoursite.com/auth/reset-password?token=sample&login=sample_user";
const PREVIEW_IP: &str = "192.168.1.1";
const PREVIEW_SITE_NAME: &str = "Your Site";

/// A rendered email: subject line plus HTML body, handed to the mail
/// transport as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_body: String,
}

impl RenderedEmail {
    /// The unbranded message the host would send with no filters registered.
    pub fn host_default(ctx: &ResetContext) -> Self {
        Self {
            subject: format!("[{}] Password Reset", ctx.site_name),
            html_body: format!(
                "Someone has requested a password reset for the account {}.\r\n\
                 To reset your password, visit the following address:\r\n{}\r\n",
                ctx.login, ctx.reset_url
            ),
        }
    }
}

enum ButtonLink<'a> {
    /// A clickable link to the given reset URL.
    Live(&'a str),
    /// An inert `href="#"` button; the string is only displayed as text.
    Inert(&'a str),
}

/// Render the outgoing notification for one reset event. Tracking parameters
/// are stripped from the reset URL here, not by the caller.
pub fn render_notification(settings: &EmailSettings, ctx: &ResetContext) -> RenderedEmail {
    let reset_url = strip_tracking_params(&ctx.reset_url);
    let ip = if settings.show_ip_address {
        ctx.ip.as_deref()
    } else {
        None
    };
    RenderedEmail {
        subject: render_subject(settings, &ctx.site_domain),
        html_body: render_body(
            settings,
            &ctx.site_name,
            &ctx.login,
            &ButtonLink::Live(&reset_url),
            ip,
        ),
    }
}

/// Render the admin preview: same layout as the live notification, with
/// placeholder values and a non-clickable button. Never fails.
pub fn render_preview(settings: &EmailSettings) -> String {
    let ip = if settings.show_ip_address {
        Some(PREVIEW_IP)
    } else {
        None
    };
    render_body(
        settings,
        PREVIEW_SITE_NAME,
        PREVIEW_LOGIN,
        &ButtonLink::Inert(PREVIEW_RESET_URL),
        ip,
    )
}

/// Subject line: the configured template with every `{site_domain}` token
/// substituted, or the domain-derived default when no template is set.
pub fn render_subject(settings: &EmailSettings, site_domain: &str) -> String {
    if settings.email_subject.is_empty() {
        format!("Password Reset for: {site_domain}")
    } else {
        settings.email_subject.replace("{site_domain}", site_domain)
    }
}

/// The shared body layout. Both render paths go through here so the preview
/// cannot drift from the real email.
fn render_body(
    settings: &EmailSettings,
    site_name: &str,
    login: &str,
    button: &ButtonLink<'_>,
    ip: Option<&str>,
) -> String {
    let logo_block = logo_block(settings, site_name);

    let (href, link_text) = match button {
        ButtonLink::Live(url) => (esc_url(url), esc_html(url)),
        ButtonLink::Inert(url) => ("#".to_string(), esc_html(url)),
    };

    let ip_block = match ip {
        Some(ip) => format!(
            r#"
    <p style="font-size: 16px; color: #555; margin-top: 30px;">
        This request was made from IP address: {}
    </p>"#,
            esc_html(ip)
        ),
        None => String::new(),
    };

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: auto; border: 1px solid #ddd; padding: 20px;">{logo_block}
    <p style="font-size: 16px; color: #555;">
        We received a request to reset the password for your account associated with <strong>{login}</strong>.
        If you did not request a password reset, please ignore this email.
    </p>
    <p style="font-size: 16px; color: #555;">
        Click the button below to reset your password:
    </p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{href}" style="background-color: {color}; color: #fff; padding: 12px 25px; border-radius: 5px; text-decoration: none; font-size: 16px;">
            Reset Password
        </a>
    </p>
    <p style="font-size: 16px; color: #555;">
        If the button above doesn't work, copy and paste this link into your browser:<br>
        <a href="{href}">{link_text}</a>
    </p>{ip_block}
</div>"#,
        login = esc_html(login),
        color = esc_attr(&settings.button_color),
    )
}

fn logo_block(settings: &EmailSettings, site_name: &str) -> String {
    if settings.logo_url.is_empty() {
        return String::new();
    }
    let src = esc_url(&settings.logo_url);
    if src.is_empty() {
        return String::new();
    }
    format!(
        r#"
    <div style="text-align: center; margin-bottom: 30px;">
        <img src="{src}" alt="{alt}" style="height: {height}px; max-height: {height}px; width: auto; display: block; margin: 0 auto;" height="{height}">
    </div>"#,
        alt = esc_attr(site_name),
        height = settings.logo_max_height,
    )
}

/// `password_reset.requested` filter: replaces the host's default message
/// with the branded rendering.
pub struct BrandedResetEmail;

impl ResetEmailFilter for BrandedResetEmail {
    fn id(&self) -> &str {
        "branded_reset_email"
    }

    fn apply(
        &self,
        _email: RenderedEmail,
        settings: &EmailSettings,
        ctx: &ResetContext,
    ) -> RenderedEmail {
        render_notification(settings, ctx)
    }
}
