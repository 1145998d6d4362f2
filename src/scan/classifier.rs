//! Multi-category classification over raw text sources.

use crate::reporting::badge::Badge;
use crate::scan::cadence::{EmitGate, DEFAULT_EMIT_INTERVAL};
use crate::scan::chunk::{self, CHUNK_OVERLAP, MAX_CHUNK_SIZE};
use crate::scan::filter;
use crate::scan::store::{CategoryMap, ResultStore};
use crate::taxonomy::{PatternRule, Span, Taxonomy};
use crate::transport::{self, Message, Transport};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Scanning,
}

/// Totals for one scan cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub sources: usize,
    pub skipped: usize,
    pub added: usize,
    pub emitted: usize,
}

pub struct Classifier {
    taxonomy: Arc<Taxonomy>,
    store: ResultStore,
    seen: HashSet<Vec<u8>>,
    transport: Arc<dyn Transport>,
    emit_interval: Duration,
    chunk_size: usize,
    chunk_overlap: usize,
    phase: Phase,
    gate: EmitGate,
    summary: CycleSummary,
}

impl Classifier {
    pub fn new(taxonomy: Arc<Taxonomy>, transport: Arc<dyn Transport>) -> Self {
        Self {
            taxonomy,
            store: ResultStore::new(),
            seen: HashSet::new(),
            transport,
            emit_interval: DEFAULT_EMIT_INTERVAL,
            chunk_size: MAX_CHUNK_SIZE,
            chunk_overlap: CHUNK_OVERLAP,
            phase: Phase::Idle,
            gate: EmitGate::new(DEFAULT_EMIT_INTERVAL, Instant::now()),
            summary: CycleSummary::default(),
        }
    }

    pub fn with_emit_interval(mut self, interval: Duration) -> Self {
        self.emit_interval = interval;
        self
    }

    pub fn with_chunking(mut self, size: usize, overlap: usize) -> Self {
        self.chunk_size = size.max(1);
        self.chunk_overlap = overlap;
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Scans a batch of sources as one cycle and emits a final snapshot.
    pub fn scan<S: AsRef<str>>(&mut self, sources: &[S]) -> CycleSummary {
        self.begin_cycle();
        for source in sources {
            self.feed(source.as_ref());
        }
        self.finish_cycle()
    }

    /// Clears findings and the seen set, then scans the fresh sources.
    pub fn refresh<S: AsRef<str>>(&mut self, sources: &[S]) -> CycleSummary {
        tracing::info!("Refreshing scan with {} sources", sources.len());
        self.store.clear();
        self.seen.clear();
        self.scan(sources)
    }

    pub fn begin_cycle(&mut self) {
        self.phase = Phase::Scanning;
        self.gate = EmitGate::new(self.emit_interval, Instant::now());
        self.summary = CycleSummary::default();
    }

    /// Scans one source within the current cycle. Returns the number of
    /// new findings it produced.
    pub fn feed(&mut self, source: &str) -> usize {
        if self.phase == Phase::Idle {
            self.begin_cycle();
        }
        if source.trim().is_empty() || !self.seen.insert(Sha256::digest(source.as_bytes()).to_vec()) {
            self.summary.skipped += 1;
            return 0;
        }
        self.summary.sources += 1;

        let added = self.classify(source);
        self.summary.added += added;

        if added > 0 && self.gate.try_acquire(Instant::now()) {
            self.emit();
        }
        added
    }

    /// Unconditional snapshot closing the cycle.
    pub fn finish_cycle(&mut self) -> CycleSummary {
        self.emit();
        self.gate.mark(Instant::now());
        self.phase = Phase::Idle;
        tracing::debug!(
            "Scan cycle done: sources={} skipped={} added={}",
            self.summary.sources,
            self.summary.skipped,
            self.summary.added
        );
        self.summary
    }

    pub fn results(&self) -> CategoryMap {
        self.store.snapshot()
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn badge(&self) -> Badge {
        Badge::from_count(self.store.non_empty_categories())
    }

    fn emit(&mut self) {
        self.summary.emitted += 1;
        transport::push(
            self.transport.as_ref(),
            Message::ScanUpdate {
                results: self.store.snapshot(),
            },
        );
    }

    fn classify(&mut self, source: &str) -> usize {
        let taxonomy = Arc::clone(&self.taxonomy);
        let rules: Vec<&PatternRule> = taxonomy.rules().iter().chain(taxonomy.hash_rules()).collect();
        let windows = chunk::windows(source, self.chunk_size, self.chunk_overlap);
        // Per-rule resume point, carried from one chunk into the next.
        let mut cursors = vec![0; rules.len()];

        let mut added = 0;
        for (i, window) in windows.iter().enumerate() {
            // A chunk owns match starts up to where the next chunk begins;
            // the overlap lets those matches be seen whole.
            let owned_end = windows.get(i + 1).map_or(window.end, |next| next.start);
            for (rule, cursor) in rules.iter().zip(cursors.iter_mut()) {
                let span = Span {
                    from: window.start.max(*cursor),
                    owned_end,
                    limit: window.end,
                };
                added += self.apply_rule(rule, &taxonomy, source, span, cursor);
            }
        }
        added
    }

    fn apply_rule(
        &mut self,
        rule: &PatternRule,
        taxonomy: &Taxonomy,
        source: &str,
        span: Span,
        cursor: &mut usize,
    ) -> usize {
        let store = &mut self.store;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut hits = rule.hits(source, span);
            let mut added = 0;
            for hit in hits.by_ref() {
                if filter::apply(rule.route, &hit, taxonomy, store) {
                    added += 1;
                }
            }
            (added, hits.position())
        }));
        match outcome {
            Ok((added, resume)) => {
                *cursor = resume;
                added
            }
            Err(_) => {
                tracing::warn!("Pattern {} failed on a chunk; skipped", rule.name);
                *cursor = span.owned_end;
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{Category, Guard, Route};
    use crate::transport::channel::testing::RecordingTransport;

    fn classifier() -> (Classifier, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let tax = Arc::new(Taxonomy::new().unwrap());
        let c = Classifier::new(tax, transport.clone());
        (c, transport)
    }

    fn snapshots(transport: &RecordingTransport) -> Vec<CategoryMap> {
        transport
            .messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::ScanUpdate { results } => Some(results),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_phone_in_chinese_context() {
        let (mut c, _) = classifier();
        c.scan(&["联系电话13912345678"]);
        assert_eq!(c.results().get(Category::Phone), ["13912345678"]);

        let (mut c, _) = classifier();
        c.scan(&["139123456780"]);
        assert!(c.results().get(Category::Phone).is_empty());
    }

    #[test]
    fn test_ip_routing() {
        let (mut c, _) = classifier();
        c.scan(&["bind 0.0.0.0 mask 255.255.255.255 gw 192.168.1.100 (内部)"]);
        let results = c.results();
        assert!(results.get(Category::Ip).is_empty());
        assert_eq!(results.get(Category::InternalIp), ["192.168.1.100"]);
    }

    #[test]
    fn test_credential_filtering() {
        let (mut c, _) = classifier();
        c.scan(&[r#"var user_id = "abc"; var admin_password = "s3cr3t!";"#]);
        let creds = c.results();
        let creds = creds.get(Category::Credential);
        assert!(creds.iter().any(|v| v.contains("admin_password")));
        assert!(!creds.iter().any(|v| v.contains("user_id")));
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let (mut c, _) = classifier();
        let src = r#"fetch("/api/v1/users"); mail("ops@target.com")"#;
        c.scan(&[src]);
        let first = c.results();
        let summary = c.scan(&[src]);
        assert_eq!(summary.skipped, 1);
        assert_eq!(c.results(), first);
        assert!(first.get(Category::AbsoluteApi).contains(&"/api/v1/users".to_string()));
    }

    #[test]
    fn test_duplicate_source_in_one_batch_is_skipped() {
        let (mut c, _) = classifier();
        let summary = c.scan(&["13912345678", "13912345678"]);
        assert_eq!(summary.sources, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_refresh_may_shrink() {
        let (mut c, _) = classifier();
        c.scan(&["call 13912345678", "mail ops@target.com"]);
        assert_eq!(c.results().get(Category::Phone).len(), 1);
        c.refresh(&["mail ops@target.com"]);
        let results = c.results();
        assert!(results.get(Category::Phone).is_empty());
        assert_eq!(results.get(Category::Email), ["ops@target.com"]);
    }

    #[test]
    fn test_match_straddling_chunk_boundary_found_once() {
        let (c, _) = classifier();
        let mut c = c.with_chunking(64, 32);
        let mut src = "x ".repeat(28);
        src.push_str("tel 13912345678 end");
        src.push_str(&" y".repeat(40));
        c.scan(&[src]);
        assert_eq!(c.results().get(Category::Phone), ["13912345678"]);
        assert_eq!(c.store().len(Category::Phone), 1);
    }

    #[test]
    fn test_url_straddling_chunk_edge_is_whole() {
        let (c, _) = classifier();
        let mut c = c.with_chunking(64, 32);
        let src = format!("{}https://admin.target.com/login/panel", " ".repeat(40));
        c.scan(&[src]);
        assert_eq!(c.results().get(Category::Url), ["https://admin.target.com/login/panel"]);
    }

    #[test]
    fn test_email_across_overlap_is_whole() {
        let (c, _) = classifier();
        let mut c = c.with_chunking(64, 32);
        let src = format!("{}operations@target.com{}", " ".repeat(60), " ".repeat(60));
        c.scan(&[src]);
        assert_eq!(c.results().get(Category::Email), ["operations@target.com"]);
    }

    fn explode(_: char) -> bool {
        panic!("guard blew up")
    }

    #[test]
    fn test_failing_rule_only_skips_itself() {
        let transport = Arc::new(RecordingTransport::default());
        let mut tax = Taxonomy::new().unwrap();
        tax.push_rule(
            "EXPLODING",
            r"[0-9]+",
            Route::Phone,
            Guard {
                reject_prev: Some(explode),
                reject_next: Some(explode),
            },
        );
        let mut c = Classifier::new(Arc::new(tax), transport.clone()).with_chunking(32, 8);
        let src = format!("call 13912345678 {} mail ops@target.com", "-".repeat(40));
        c.scan(&[src]);

        let results = c.results();
        assert_eq!(results.get(Category::Phone), ["13912345678"]);
        assert_eq!(results.get(Category::Email), ["ops@target.com"]);
        assert_eq!(snapshots(&transport).last(), Some(&results));
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_final_snapshot_dominates_partials() {
        let (c, transport) = classifier();
        let mut c = c.with_emit_interval(Duration::ZERO);
        c.scan(&["13912345678", "ops@target.com", "8.8.8.8"]);
        let snaps = snapshots(&transport);
        assert!(snaps.len() >= 2);
        let last = snaps.last().unwrap();
        assert!(snaps.iter().all(|s| last.dominates(s)));
        // phones, emails, the email's domain and ips
        assert_eq!(last.non_empty_categories(), 4);
    }

    #[test]
    fn test_cycle_always_ends_with_emit() {
        let (mut c, transport) = classifier();
        let summary = c.scan(&["nothing interesting here"]);
        assert_eq!(summary.added, 0);
        assert_eq!(snapshots(&transport).len(), 1);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_badge_counts_categories() {
        let (mut c, _) = classifier();
        assert_eq!(c.badge().count, 0);
        c.scan(&["13912345678 8.8.8.8"]);
        assert_eq!(c.badge().count, 2);
    }
}
