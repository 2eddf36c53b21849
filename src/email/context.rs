use std::net::IpAddr;

use axum::http::HeaderMap;
use url::Url;

/// Per-event data needed to render one password-reset email.
#[derive(Debug, Clone)]
pub struct ResetContext {
    pub login: String,
    pub reset_url: String,
    pub ip: Option<String>,
    pub site_name: String,
    pub site_domain: String,
}

/// Resolve the requester's address: forwarded-for header first, then
/// real-ip, then the direct connection. `None` when nothing resolves.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> Option<String> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        for candidate in xff.split(',') {
            if let Ok(ip) = candidate.trim().parse::<IpAddr>() {
                return Some(ip.to_string());
            }
        }
    }

    if let Some(real) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if let Ok(ip) = real.trim().parse::<IpAddr>() {
            return Some(ip.to_string());
        }
    }

    peer.map(|ip| ip.to_string())
}

/// Build the reset link with the token embedded, login percent-encoded.
pub fn build_reset_url(base_url: &str, token: &str, login: &str) -> String {
    match Url::parse(base_url).and_then(|u| u.join("/auth/reset-password")) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_pair("token", token)
                .append_pair("login", login);
            url.to_string()
        }
        Err(_) => format!(
            "{}/auth/reset-password?token={token}",
            base_url.trim_end_matches('/')
        ),
    }
}
