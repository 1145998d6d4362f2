//! Turns one document response into a session fingerprint and schedules
//! the signals that resolve later.

use crate::fingerprint::builder::detect_builder;
use crate::fingerprint::record::FingerprintRecord;
use crate::fingerprint::security;
use crate::fingerprint::server_header::decompose_server_header;
use crate::fingerprint::store::{Field, FieldUpdate, FingerprintStore, MergePolicy};
use crate::fingerprint::technology::{self, PoweredBy};
use crate::http::{CookieSource, Fetch};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Headers copied verbatim into `FingerprintRecord::headers`.
const RECORDED_HEADERS: &[&str] = &["x-powered-by", "x-aspnet-version", "x-aspnetmvc-version"];

/// Synchronous part of fingerprinting: header and `Set-Cookie` rules applied
/// in arrival order. Later headers overwrite earlier ones for the same field.
pub fn compose_headers(headers: &[(String, String)]) -> FingerprintRecord {
    let mut record = FingerprintRecord::default();

    for (name, value) in headers {
        let name = name.to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if RECORDED_HEADERS.contains(&name.as_str()) {
            record.headers.insert(name.clone(), value.to_string());
        }

        match name.as_str() {
            "server" => {
                record.server = Some(value.to_string());
                record.server_components = Some(decompose_server_header(value));
            }
            "strict-transport-security" => record.security = Some(security::from_hsts(value)),
            "x-powered-by" => match technology::identify_from_powered_by(value) {
                Some(PoweredBy::Technology(tech)) => record.technology = Some(tech),
                Some(PoweredBy::Security(sec)) => record.security = Some(sec),
                None => {}
            },
            "x-aspnetmvc-version" => technology::merge_aspnet_mvc(&mut record.technology, value),
            "x-aspnet-version" => technology::merge_aspnet_runtime(&mut record.technology, value),
            "set-cookie" => {
                if let Some(tech) = technology::identify_from_cookie(value) {
                    record.technology = Some(tech);
                }
            }
            "x-safe-firewall" => {
                if let Some(sec) = security::from_safe_firewall(value) {
                    record.security = Some(sec);
                }
            }
            "x-xss-protection" => record.security = Some(security::from_xss_protection(value)),
            _ => {}
        }
    }

    record
}

pub struct Composer {
    store: FingerprintStore,
    fetcher: Arc<dyn Fetch>,
    cookies: Arc<dyn CookieSource>,
    settle_delay: Duration,
}

impl Composer {
    pub fn new(store: FingerprintStore, fetcher: Arc<dyn Fetch>, cookies: Arc<dyn CookieSource>) -> Self {
        Self {
            store,
            fetcher,
            cookies,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Resets the session to the composed baseline and spawns the deferred
    /// signals: cookie lookup, builder refetch, and the delayed baseline push.
    pub async fn on_document(&self, session: &str, url: &Url, headers: &[(String, String)]) -> JoinSet<()> {
        let record = compose_headers(headers);
        tracing::debug!(
            "Composed baseline fingerprint for {}: server={:?}",
            url,
            record.server
        );
        self.store.begin_document(session, record).await;

        let mut tasks = JoinSet::new();

        {
            let store = self.store.clone();
            let cookies = Arc::clone(&self.cookies);
            let session = session.to_string();
            let url = url.clone();
            tasks.spawn(async move {
                let names = cookies.cookie_names(&url).await;
                if names.is_empty() {
                    return;
                }
                if let Some(tech) = technology::identify_from_cookie(&names.join(";")) {
                    store
                        .merge(&session, FieldUpdate::new(Field::Technology(tech), MergePolicy::Always))
                        .await;
                }
            });
        }

        {
            let store = self.store.clone();
            let fetcher = Arc::clone(&self.fetcher);
            let session = session.to_string();
            let url = url.clone();
            tasks.spawn(async move {
                let Some(body) = fetcher.fetch_text(&url).await else {
                    return;
                };
                if let Some(builder) = detect_builder(&body) {
                    store
                        .merge(&session, FieldUpdate::new(Field::Builder(builder), MergePolicy::FillIfEmpty))
                        .await;
                }
            });
        }

        {
            let store = self.store.clone();
            let session = session.to_string();
            let delay = self.settle_delay;
            tasks.spawn(async move {
                tokio::time::sleep(delay).await;
                store.announce(&session).await;
            });
        }

        tasks
    }
}
