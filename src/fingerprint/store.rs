//! Session-keyed fingerprint store.
//!
//! All mutation goes through [`FingerprintStore::merge`] (or the document and
//! analytics entry points built on the same lock), so concurrent signal
//! handlers never lose each other's writes. Every change pushes the full
//! merged record.

use crate::fingerprint::analytics::AnalyticsProvider;
use crate::fingerprint::record::{AnalyticsProfile, BuilderProfile, FingerprintRecord, SecurityProfile, TechProfile};
use crate::transport::{self, Message, SessionId, Transport};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Write only when the field is still empty.
    FillIfEmpty,
    /// Overwrite with the new non-null value.
    Always,
    /// Overwrite when empty or when the names disagree.
    IfDifferentName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Technology(TechProfile),
    Security(SecurityProfile),
    Analytics(AnalyticsProfile),
    Builder(BuilderProfile),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub field: Field,
    pub policy: MergePolicy,
}

impl FieldUpdate {
    pub fn new(field: Field, policy: MergePolicy) -> Self {
        Self { field, policy }
    }
}

trait Named {
    fn name(&self) -> &str;
}

impl Named for TechProfile {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for SecurityProfile {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for AnalyticsProfile {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for BuilderProfile {
    fn name(&self) -> &str {
        &self.name
    }
}

fn apply<T: Named + PartialEq>(slot: &mut Option<T>, value: T, policy: MergePolicy) -> bool {
    let write = match (&*slot, policy) {
        (None, _) => true,
        (Some(_), MergePolicy::FillIfEmpty) => false,
        (Some(current), MergePolicy::Always) => *current != value,
        (Some(current), MergePolicy::IfDifferentName) => current.name() != value.name(),
    };
    if write {
        *slot = Some(value);
    }
    write
}

#[derive(Debug, Default)]
struct SessionState {
    record: FingerprintRecord,
    analytics_seen: HashSet<AnalyticsProvider>,
}

#[derive(Clone)]
pub struct FingerprintStore {
    sessions: Arc<Mutex<HashMap<SessionId, SessionState>>>,
    transport: Arc<dyn Transport>,
}

impl FingerprintStore {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            transport,
        }
    }

    /// A new top-level document replaces the session's record and forgets
    /// which analytics providers were already observed. No push: the
    /// baseline is announced after the settle delay.
    pub async fn begin_document(&self, session: &str, record: FingerprintRecord) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(
            session.to_string(),
            SessionState {
                record,
                analytics_seen: HashSet::new(),
            },
        );
    }

    /// Atomic read-modify-write of one field. Creates the record lazily.
    pub async fn merge(&self, session: &str, update: FieldUpdate) -> bool {
        let mut sessions = self.sessions.lock().await;
        let state = sessions.entry(session.to_string()).or_default();
        let record = &mut state.record;

        let changed = match update.field {
            Field::Technology(t) => apply(&mut record.technology, t, update.policy),
            Field::Security(s) => apply(&mut record.security, s, update.policy),
            Field::Analytics(a) => apply(&mut record.analytics, a, update.policy),
            Field::Builder(b) => apply(&mut record.builder, b, update.policy),
        };
        if changed {
            self.push_locked(session, &state.record);
        }
        changed
    }

    /// Analytics observation of an outgoing request. Only the first sighting
    /// of each provider per session is recorded.
    pub async fn observe_request(&self, session: &str, url: &str) -> bool {
        let Some(provider) = AnalyticsProvider::match_url(url) else {
            return false;
        };
        let mut sessions = self.sessions.lock().await;
        let state = sessions.entry(session.to_string()).or_default();
        if !state.analytics_seen.insert(provider) {
            return false;
        }
        tracing::debug!("Analytics request observed: {:?} ({})", provider, url);
        state.record.analytics = Some(provider.profile());
        self.push_locked(session, &state.record);
        true
    }

    /// Pushes the current record as-is (the post-settle baseline).
    pub async fn announce(&self, session: &str) {
        let sessions = self.sessions.lock().await;
        if let Some(state) = sessions.get(session) {
            self.push_locked(session, &state.record);
        }
    }

    pub async fn get(&self, session: &str) -> Option<FingerprintRecord> {
        let sessions = self.sessions.lock().await;
        sessions.get(session).map(|s| s.record.clone())
    }

    pub async fn end_session(&self, session: &str) {
        self.sessions.lock().await.remove(session);
    }

    fn push_locked(&self, session: &str, record: &FingerprintRecord) {
        transport::push(
            self.transport.as_ref(),
            Message::UpdateFingerprints {
                session: session.to_string(),
                fingerprints: record.clone(),
            },
        );
    }
}
