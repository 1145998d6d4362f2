pub mod client;
pub mod response;

use async_trait::async_trait;
use url::Url;

/// Best-effort network fetch. Failures and non-2xx answers are `None`.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch_text(&self, url: &Url) -> Option<String>;
}

/// Names of the cookies the client holds for a URL.
#[async_trait]
pub trait CookieSource: Send + Sync {
    async fn cookie_names(&self, url: &Url) -> Vec<String>;
}
