use crate::utils::session::SessionKey;
use std::env;

pub const DEFAULT_SITE_URL: &str = "https://edebai.com.tr";

/// Process-wide settings shared with handlers through an `Extension` layer.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Absolute origin used for sitemap and robots links, without trailing slash.
    pub base_url: String,
    /// Bearer token guarding `/admin`. `None` locks the admin API entirely.
    pub admin_token: Option<String>,
    pub upload_dir: String,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("SITE_URL")
            .ok()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

        let admin_token = env::var("ADMIN_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());

        Self {
            base_url,
            admin_token,
            upload_dir,
        }
    }

    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Load the session signing key from `SESSION_SECRET`, or generate a random
/// one for this process.
pub fn session_key_from_env() -> anyhow::Result<SessionKey> {
    match env::var("SESSION_SECRET") {
        Ok(secret) if secret.len() >= 32 => Ok(SessionKey::new(secret.into_bytes())),
        Ok(_) => Err(anyhow::anyhow!(
            "SESSION_SECRET must be at least 32 characters long"
        )),
        Err(_) => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
            SessionKey::generate()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url_joins_origin_and_path() {
        let config = SiteConfig {
            base_url: "https://example.org".to_string(),
            admin_token: None,
            upload_dir: "./uploads".to_string(),
        };
        assert_eq!(
            config.absolute_url("/makale/merhaba/"),
            "https://example.org/makale/merhaba/"
        );
    }
}
