pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

/// HTTP transport. Errors cover both network failures and non-success
/// statuses; callers decide how to degrade.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>>;

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Vec<u8>>;
}
