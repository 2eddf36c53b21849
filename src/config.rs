use std::net::IpAddr;

use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub site_name: String,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("RESETMAIL_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid RESETMAIL_HOST: {e}"))?;

        let port: u16 = env_or("RESETMAIL_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid RESETMAIL_PORT: {e}"))?;

        let base_url = env_or("RESETMAIL_BASE_URL", &format!("http://{host}:{port}"));

        let site_name = env_or("RESETMAIL_SITE_NAME", &domain_of(&base_url));

        let log_level = env_or("RESETMAIL_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("RESETMAIL_SMTP_HOST").ok(),
            std::env::var("RESETMAIL_SMTP_PORT").ok(),
            std::env::var("RESETMAIL_SMTP_USER").ok(),
            std::env::var("RESETMAIL_SMTP_PASS").ok(),
            std::env::var("RESETMAIL_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid RESETMAIL_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            host,
            port,
            base_url,
            site_name,
            log_level,
            smtp,
        })
    }

    /// Host portion of the base URL, used for subject lines and defaults.
    pub fn site_domain(&self) -> String {
        domain_of(&self.base_url)
    }
}

fn domain_of(base_url: &str) -> String {
    Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "localhost".to_string())
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
