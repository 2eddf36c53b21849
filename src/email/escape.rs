use url::Url;

const TRACKING_PARAMS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
];

/// Escape a value for HTML text position.
pub fn esc_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape a value for an HTML attribute position.
pub fn esc_attr(s: &str) -> String {
    esc_html(s)
}

/// Validate and escape a URL for an `href`/`src` attribute. Only absolute
/// http(s) URLs survive; everything else comes back empty.
pub fn esc_url(s: &str) -> String {
    match Url::parse(s.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => esc_attr(url.as_str()),
        _ => String::new(),
    }
}

/// Remove tracking query parameters from a URL, leaving all other parameters
/// in place. Unparseable input is returned unchanged.
pub fn strip_tracking_params(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if parsed.query().is_none() {
        return parsed.to_string();
    }
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(key, value)| (key.as_str(), value.as_str())));
    }
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_html_escapes_markup() {
        assert_eq!(
            esc_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn esc_url_passes_https_and_escapes_ampersands() {
        assert_eq!(
            esc_url("https://example.com/reset?a=1&b=2"),
            "https://example.com/reset?a=1&amp;b=2"
        );
    }

    #[test]
    fn esc_url_rejects_unsafe_schemes() {
        assert_eq!(esc_url("javascript:alert(1)"), "");
        assert_eq!(esc_url("data:text/html,x"), "");
        assert_eq!(esc_url("/relative/path"), "");
    }

    #[test]
    fn strip_tracking_params_removes_all_utm_parameters() {
        let stripped = strip_tracking_params(
            "https://site/wp-login.php?action=rp&key=abc&login=bob&utm_source=x",
        );
        assert!(!stripped.contains("utm_"));
        assert!(stripped.contains("action=rp"));
        assert!(stripped.contains("key=abc"));
        assert!(stripped.contains("login=bob"));
    }

    #[test]
    fn strip_tracking_params_handles_every_tracking_key() {
        let stripped = strip_tracking_params(
            "https://example.com/r?utm_source=a&utm_medium=b&utm_campaign=c&utm_content=d&utm_term=e&token=t",
        );
        assert_eq!(stripped, "https://example.com/r?token=t");
    }

    #[test]
    fn strip_tracking_params_drops_the_query_when_only_tracking_remains() {
        assert_eq!(
            strip_tracking_params("https://example.com/r?utm_source=a"),
            "https://example.com/r"
        );
    }

    #[test]
    fn strip_tracking_params_leaves_clean_urls_alone() {
        assert_eq!(
            strip_tracking_params("https://example.com/r?token=t"),
            "https://example.com/r?token=t"
        );
    }
}
