use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const DEFAULT_LOGO_HEIGHT: u32 = 60;

/// Normalize a logo URL for use in an `src` attribute. Anything that is not
/// an absolute http(s) URL comes back empty, which renders as "no logo".
pub fn logo_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url.to_string(),
        _ => String::new(),
    }
}

/// Coerce a raw height value to a positive pixel count, substituting the
/// default for anything below 1 or non-numeric.
pub fn logo_height(input: &Value) -> u32 {
    let parsed = match input {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(h) if h >= 1 => u32::try_from(h).unwrap_or(DEFAULT_LOGO_HEIGHT),
        _ => DEFAULT_LOGO_HEIGHT,
    }
}

/// Validate a 3- or 6-digit hex color. Returns `None` on anything else so the
/// caller can keep the prior value.
pub fn hex_color(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if HEX_COLOR_RE.is_match(trimmed) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Strip HTML tags and collapse whitespace, leaving plain single-line text.
pub fn plain_text(input: &str) -> String {
    let stripped = TAG_RE.replace_all(input, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// Checkbox semantics: present-and-truthy only.
pub fn truthy(input: &Value) -> bool {
    match input {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(s.trim(), "" | "0" | "false" | "off"),
        Value::Null => false,
        _ => true,
    }
}
