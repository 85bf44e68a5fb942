use crate::fetch::HttpClient;
use async_trait::async_trait;

/// An [`HttpClient`] wrapper that injects the MTA `x-api-key` header.
///
/// The subway feeds no longer require a key, but deployments that still carry
/// one wrap the client here so the credential stays out of every call site.
pub struct ApiKey<C> {
    inner: C,
    key: String,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, key: String) -> Self {
        Self { inner, key }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        // An unparsable key value is sent as no key at all; the feed answers
        // 401 and the fetch layer logs it like any other failed feed.
        if let Ok(value) = self.key.parse() {
            req.headers_mut().insert("x-api-key", value);
        }
        self.inner.execute(req).await
    }
}
