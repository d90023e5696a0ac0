use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::app::Result;

/// Forum location and bookmark roots.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root; relative links and bookmarks resolve against it.
    pub base_url: String,

    /// Path the login form posts to.
    pub login_path: String,

    /// Pages Tab/Shift+Tab cycle through, in order. The first is the start page.
    pub bookmarks: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://m.newsmth.net/".to_string(),
            login_path: "/user/login".to_string(),
            bookmarks: vec![
                "/".to_string(),
                "/hot/1".to_string(),
                "/hot/2".to_string(),
                "/hot/3".to_string(),
                "/board/Python".to_string(),
                "/article/Python/1".to_string(),
            ],
        }
    }
}

impl SiteConfig {
    pub fn base(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn login_url(&self) -> Result<String> {
        Ok(self.base()?.join(&self.login_path)?.to_string())
    }

    /// Bookmarks as absolute URLs.
    pub fn bookmark_urls(&self) -> Result<Vec<String>> {
        let base = self.base()?;
        self.bookmarks
            .iter()
            .map(|b| Ok(base.join(b)?.to_string()))
            .collect()
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "smth/0.1.0".to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
