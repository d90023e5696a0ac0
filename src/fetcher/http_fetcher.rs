use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use crate::app::Result;
use crate::config::HttpConfig;
use crate::fetcher::Fetcher;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// reqwest-backed fetcher.
///
/// The client keeps a cookie store, so a session cookie set by the login
/// POST is sent with every later request of the same run.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("text/html"))
            .send()
            .await?;

        response.error_for_status_ref()?;

        Ok(response.bytes().await?.to_vec())
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Vec<u8>> {
        tracing::debug!("POST {}", url);

        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form.iter().copied())
            .finish();

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
            .body(body)
            .send()
            .await?;

        response.error_for_status_ref()?;

        Ok(response.bytes().await?.to_vec())
    }
}
