//! PageSift Core Engine
//!
//! Orchestrates one run: document fetch, fingerprinting, source harvesting,
//! classification with concurrent script fetches, and the final report.

use crate::core::context::Context;
use crate::core::rate_limit::RateLimiter;
use crate::fingerprint::{Composer, FingerprintStore};
use crate::harvest::Harvest;
use crate::http::client::{HttpClient, ResponseCookies};
use crate::http::Fetch;
use crate::reporting::model::{DocumentMeta, ScanReport, ScanStats};
use crate::scan::{CategoryMap, Classifier};
use crate::taxonomy::Taxonomy;
use crate::transport::channel::ChannelTransport;
use crate::transport::dispatch::Hub;
use crate::transport::{Message, Reply, Transport};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use url::Url;

/// Counts of what went over the push channel during a run.
#[derive(Debug, Default)]
struct PushStats {
    scan_updates: usize,
    fingerprint_updates: usize,
}

pub struct Engine {
    ctx: Context,
    taxonomy: Arc<Taxonomy>,
}

impl Engine {
    pub fn new(ctx: Context) -> anyhow::Result<Self> {
        let taxonomy = Arc::new(Taxonomy::new()?);
        Ok(Self { ctx, taxonomy })
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        tracing::info!("Starting PageSift scan against {}", self.ctx.target);
        if self.ctx.rate_limit > 0 {
            tracing::info!("Rate limit: {} req/sec", self.ctx.rate_limit);
        }

        let (channel, rx) = ChannelTransport::new();
        let transport: Arc<dyn Transport> = Arc::new(channel);
        let listener = tokio::spawn(listen(rx));

        let client = Arc::new(HttpClient::new(RateLimiter::new(self.ctx.rate_limit), self.ctx.timeout)?);

        // -------------------------------------------------
        // Document fetch (MANDATORY)
        // -------------------------------------------------
        let document = client.fetch_document(&self.ctx.target).await?;
        tracing::info!(
            "Document: status={} time={}ms size={} server={}",
            document.status,
            document.elapsed_ms,
            document.body_len,
            document.header("server").unwrap_or("-")
        );
        if !document.is_success() {
            tracing::warn!("Document answered HTTP {}; scanning what was returned", document.status);
        }

        let classifier = Classifier::new(Arc::clone(&self.taxonomy), Arc::clone(&transport))
            .with_emit_interval(self.ctx.emit_interval);
        let hub = Hub::new(
            Arc::new(Mutex::new(classifier)),
            FingerprintStore::new(Arc::clone(&transport)),
        );
        drop(transport);

        // -------------------------------------------------
        // Fingerprinting (PASSIVE)
        // -------------------------------------------------
        let mut fingerprint_tasks = if self.ctx.fingerprint {
            let fetcher: Arc<dyn Fetch> = client.clone();
            let composer = Composer::new(
                hub.fingerprints().clone(),
                fetcher,
                Arc::new(ResponseCookies::from_response(&document)),
            )
            .with_settle_delay(self.ctx.settle_delay);
            composer
                .on_document(&self.ctx.session, &document.url, &document.headers)
                .await
        } else {
            JoinSet::new()
        };

        // -------------------------------------------------
        // Harvest & scan
        // -------------------------------------------------
        let harvest = Harvest::from_document(&document.body_text(), &document.url);

        if self.ctx.fingerprint {
            let requested = harvest
                .script_urls
                .iter()
                .map(|u| u.as_str())
                .chain(harvest.attributes.iter().map(String::as_str));
            for url in requested {
                hub.fingerprints().observe_request(&self.ctx.session, url).await;
            }
        }

        {
            let mut classifier = hub.classifier().lock().await;
            classifier.begin_cycle();
            for source in harvest.page_sources().iter().chain(&harvest.attributes) {
                classifier.feed(source);
            }
        }

        let mut stats = ScanStats::default();
        if self.ctx.fetch_scripts && !harvest.script_urls.is_empty() {
            tracing::info!(
                "Fetching {} external scripts (concurrency {})",
                harvest.script_urls.len(),
                self.ctx.concurrency
            );
            let fetcher: Arc<dyn Fetch> = client.clone();
            let counts = scan_scripts(
                Arc::clone(hub.classifier()),
                fetcher,
                &harvest.script_urls,
                self.ctx.concurrency,
            )
            .await;
            stats.scripts_fetched = counts.fetched;
            stats.scripts_failed = counts.failed;
        }

        let summary = hub.classifier().lock().await.finish_cycle();
        stats.sources_scanned = summary.sources;
        stats.sources_skipped = summary.skipped;
        stats.findings_added = summary.added;
        stats.updates_emitted = summary.emitted;

        while let Some(joined) = fingerprint_tasks.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("Fingerprint task failed: {}", e);
            }
        }

        // -------------------------------------------------
        // Final state, pulled the way a UI would
        // -------------------------------------------------
        let results = match hub.handle(Message::GetResults).await {
            Some(Reply::Results(results)) => results,
            _ => CategoryMap::default(),
        };
        let fingerprint = if self.ctx.fingerprint {
            match hub
                .handle(Message::GetFingerprints {
                    session: self.ctx.session.clone(),
                })
                .await
            {
                Some(Reply::Fingerprints(record)) => record,
                _ => None,
            }
        } else {
            None
        };
        let badge = hub.classifier().lock().await.badge();
        hub.fingerprints().end_session(&self.ctx.session).await;

        // Closing the last sender ends the listener.
        drop(hub);
        match listener.await {
            Ok(pushes) => tracing::debug!(
                "Pushed {} scan updates and {} fingerprint updates",
                pushes.scan_updates,
                pushes.fingerprint_updates
            ),
            Err(e) => tracing::warn!("Push listener failed: {}", e),
        }

        let report = ScanReport {
            target: self.ctx.target.to_string(),
            session: self.ctx.session.clone(),
            document: DocumentMeta {
                url: document.url.to_string(),
                status: document.status,
                body_len: document.body_len,
                body_sha256: document.body_hash.clone(),
                elapsed_ms: document.elapsed_ms,
            },
            stats,
            badge,
            results,
            fingerprint,
        };

        tracing::info!(
            "PageSift scan completed: {} categories with findings",
            report.badge.count
        );
        crate::reporting::emit(&report, self.ctx.output_format, self.ctx.output_file.as_deref())?;

        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptCounts {
    pub fetched: usize,
    pub failed: usize,
}

/// Fetches distinct script URLs with bounded fan-out and scans each body as
/// soon as it arrives. Scans run on the blocking pool so pending fetches
/// keep moving; a failed fetch only drops that source.
pub async fn scan_scripts(
    classifier: Arc<Mutex<Classifier>>,
    fetcher: Arc<dyn Fetch>,
    urls: &[Url],
    concurrency: usize,
) -> ScriptCounts {
    let mut seen = HashSet::new();
    let distinct: Vec<Url> = urls.iter().filter(|url| seen.insert(url.as_str())).cloned().collect();

    let mut counts = ScriptCounts::default();
    let mut scans = JoinSet::new();
    let mut bodies = stream::iter(distinct)
        .map(|url| {
            let fetcher = Arc::clone(&fetcher);
            async move {
                let body = fetcher.fetch_text(&url).await;
                (url, body)
            }
        })
        .buffer_unordered(concurrency.max(1));

    while let Some((url, body)) = bodies.next().await {
        match body {
            Some(body) => {
                counts.fetched += 1;
                let classifier = Arc::clone(&classifier);
                scans.spawn_blocking(move || {
                    let added = classifier.blocking_lock().feed(&body);
                    tracing::debug!("Scanned {} ({} bytes, {} new findings)", url, body.len(), added);
                });
            }
            None => {
                counts.failed += 1;
                tracing::debug!("Script unavailable: {}", url);
            }
        }
    }

    while let Some(joined) = scans.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("Script scan task failed: {}", e);
        }
    }
    counts
}

async fn listen(mut rx: UnboundedReceiver<Message>) -> PushStats {
    let mut stats = PushStats::default();
    while let Some(msg) = rx.recv().await {
        match msg {
            Message::ScanUpdate { results } => {
                stats.scan_updates += 1;
                tracing::debug!(
                    "Scan update: {} categories with findings",
                    results.non_empty_categories()
                );
            }
            Message::UpdateFingerprints { session, fingerprints } => {
                stats.fingerprint_updates += 1;
                tracing::debug!(
                    "Fingerprint update for {}: server={:?} technology={:?}",
                    session,
                    fingerprints.server,
                    fingerprints.technology.as_ref().map(|t| t.name.as_str())
                );
            }
            other => tracing::debug!("Unexpected push message: {:?}", other),
        }
    }
    stats
}
