use crate::config::parse_bool_env;
use axum::http::{header, HeaderMap};
use std::{env, sync::OnceLock};

pub const LANGUAGE_COOKIE: &str = "language";
pub const SESSION_COOKIE: &str = "sessionid";

/// One year.
pub const LANGUAGE_COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;
/// Two weeks.
pub const SESSION_COOKIE_MAX_AGE: u64 = 14 * 24 * 60 * 60;

#[derive(Debug, Clone)]
struct CookieConfig {
    secure: bool,
    same_site: &'static str,
    domain: Option<String>,
}

impl CookieConfig {
    fn from_env() -> Self {
        let same_site =
            parse_same_site(&env::var("COOKIE_SAMESITE").unwrap_or_else(|_| "Lax".to_string()));
        let mut secure = parse_bool_env("COOKIE_SECURE", false);
        let domain = env::var("COOKIE_DOMAIN")
            .ok()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        // Browsers require SameSite=None cookies to also be Secure.
        if same_site == "None" {
            secure = true;
        }

        Self {
            secure,
            same_site,
            domain,
        }
    }
}

fn cookie_config() -> &'static CookieConfig {
    static CONFIG: OnceLock<CookieConfig> = OnceLock::new();
    CONFIG.get_or_init(CookieConfig::from_env)
}

fn parse_same_site(value: &str) -> &'static str {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => "Strict",
        "none" => "None",
        _ => "Lax",
    }
}

/// Render a `Set-Cookie` value. The language cookie stays readable from
/// scripts, the session cookie does not.
pub fn build_cookie(name: &str, value: &str, max_age_seconds: u64, http_only: bool) -> String {
    let config = cookie_config();
    let mut cookie = format!(
        "{name}={value}; Path=/; Max-Age={max_age_seconds}; SameSite={}",
        config.same_site
    );

    if http_only {
        cookie.push_str("; HttpOnly");
    }

    if config.secure {
        cookie.push_str("; Secure");
    }

    if let Some(domain) = &config.domain {
        cookie.push_str("; Domain=");
        cookie.push_str(domain);
    }

    cookie
}

pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie_header| {
            cookie_header.split(';').find_map(|cookie| {
                let (key, value) = cookie.trim().split_once('=')?;
                if key.trim() == name {
                    Some(value.trim().to_string())
                } else {
                    None
                }
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("a=1; language=en; b=2"),
        );
        assert_eq!(extract_cookie(&headers, "language").as_deref(), Some("en"));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn extracts_across_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("sessionid=abc.def"));
        assert_eq!(
            extract_cookie(&headers, SESSION_COOKIE).as_deref(),
            Some("abc.def")
        );
    }

    #[test]
    fn language_cookie_lives_one_year() {
        let cookie = build_cookie(LANGUAGE_COOKIE, "en", LANGUAGE_COOKIE_MAX_AGE, false);
        assert!(cookie.starts_with("language=en; Path=/; Max-Age=31536000"));
        assert!(!cookie.contains("HttpOnly"));
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = build_cookie(SESSION_COOKIE, "x", SESSION_COOKIE_MAX_AGE, true);
        assert!(cookie.contains("HttpOnly"));
    }
}
