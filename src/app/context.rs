use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, SmthError};
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::nav::NavigationController;

pub struct AppContext {
    pub config: Arc<Config>,
    pub fetcher: Arc<dyn Fetcher>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.http)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    /// A navigation controller for a `width` x `height` viewport.
    pub fn controller(&self, width: usize, height: usize) -> Result<NavigationController> {
        NavigationController::new(
            self.fetcher.clone(),
            &self.config.site,
            self.config.layout.width_rule,
            width,
            height,
        )
    }

    /// Post the login form. The session cookie stays in the fetcher's
    /// cookie store for the rest of the run.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = self.config.site.login_url()?;
        tracing::info!("Logging in as {}", username);

        self.fetcher
            .post_form(
                &url,
                &[("id", username), ("passwd", password), ("save", "on")],
            )
            .await
            .map_err(|e| SmthError::Login(e.to_string()))?;

        Ok(())
    }

    /// `<data_dir>/smth/smth.log`, creating the directory.
    pub fn default_log_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SmthError::Other("Could not find data directory".into()))?;
        let smth_dir = data_dir.join("smth");
        std::fs::create_dir_all(&smth_dir)?;
        Ok(smth_dir.join("smth.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::tests::StubFetcher;

    #[tokio::test]
    async fn test_login_posts_form() {
        let fetcher = Arc::new(StubFetcher::default());
        let ctx = AppContext::with_fetcher(Config::default(), fetcher.clone());

        ctx.login("alice", "secret").await.unwrap();
        assert_eq!(
            fetcher.requests(),
            vec!["POST https://m.newsmth.net/user/login".to_string()]
        );
    }

    #[tokio::test]
    async fn test_controller_uses_site_config() {
        let ctx = AppContext::with_fetcher(Config::default(), Arc::new(StubFetcher::default()));
        let nav = ctx.controller(80, 23).unwrap();

        assert_eq!(nav.bookmarks().len(), 6);
        assert!(nav.history().is_empty());
    }
}
