use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam between the refresh pipeline and the network; tests substitute a
/// canned-response implementation here.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
