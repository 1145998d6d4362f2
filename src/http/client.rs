//! HTTP client with rate limiting and a browser-like, credential-free profile

use crate::core::rate_limit::RateLimiter;
use crate::http::response::HttpResponse;
use crate::http::{CookieSource, Fetch};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, redirect::Policy, Client};
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};
use url::Url;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct HttpClient {
    client: Client,
    limiter: RateLimiter,
}

impl HttpClient {
    pub fn new(limiter: RateLimiter, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));

        // No cookie store: nothing the page's origin set is ever sent back.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(Policy::limited(10))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, limiter })
    }

    /// Fetches the top-level document, keeping every response header.
    pub async fn fetch_document(&self, url: &Url) -> Result<HttpResponse> {
        self.limiter.wait().await;
        let start = Instant::now();

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().clone();

        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body_bytes = response.bytes().await?;
        let body_len = body_bytes.len();

        let mut hasher = Sha256::new();
        hasher.update(&body_bytes);
        let body_hash = format!("{:x}", hasher.finalize());

        Ok(HttpResponse {
            url: final_url,
            status,
            headers,
            body_len,
            body_hash,
            body: body_bytes.to_vec(),
            elapsed_ms: start.elapsed().as_millis(),
        })
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch_text(&self, url: &Url) -> Option<String> {
        self.limiter.wait().await;

        let response = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!("Fetch of {} answered {}", url, response.status());
            return None;
        }
        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Body read failed for {}: {}", url, e);
                None
            }
        }
    }
}

/// Cookie names captured from the document response, standing in for the
/// client-side cookie jar.
#[derive(Debug, Clone, Default)]
pub struct ResponseCookies {
    names: Vec<String>,
}

impl ResponseCookies {
    pub fn from_response(resp: &HttpResponse) -> Self {
        Self {
            names: resp.set_cookie_names(),
        }
    }
}

#[async_trait]
impl CookieSource for ResponseCookies {
    async fn cookie_names(&self, _url: &Url) -> Vec<String> {
        self.names.clone()
    }
}
