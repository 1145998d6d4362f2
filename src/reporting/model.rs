use crate::fingerprint::FingerprintRecord;
use crate::reporting::badge::Badge;
use crate::scan::CategoryMap;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DocumentMeta {
    pub url: String,
    pub status: u16,
    pub body_len: usize,
    pub body_sha256: String,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub sources_scanned: usize,
    pub sources_skipped: usize,
    pub findings_added: usize,
    pub updates_emitted: usize,
    pub scripts_fetched: usize,
    pub scripts_failed: usize,
}

/// Final state of one run, as handed to the renderers.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: String,
    pub session: String,
    pub document: DocumentMeta,
    pub stats: ScanStats,
    pub badge: Badge,
    pub results: CategoryMap,
    pub fingerprint: Option<FingerprintRecord>,
}
