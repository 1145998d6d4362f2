//! Answers pull requests from the presentation side.

use crate::fingerprint::store::{Field, FieldUpdate, FingerprintStore, MergePolicy};
use crate::scan::Classifier;
use crate::transport::{Message, Reply};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct Hub {
    classifier: Arc<Mutex<Classifier>>,
    fingerprints: FingerprintStore,
}

impl Hub {
    pub fn new(classifier: Arc<Mutex<Classifier>>, fingerprints: FingerprintStore) -> Self {
        Self {
            classifier,
            fingerprints,
        }
    }

    pub fn classifier(&self) -> &Arc<Mutex<Classifier>> {
        &self.classifier
    }

    pub fn fingerprints(&self) -> &FingerprintStore {
        &self.fingerprints
    }

    /// `None` for push-only message types.
    pub async fn handle(&self, msg: Message) -> Option<Reply> {
        match msg {
            Message::GetResults => {
                let classifier = self.classifier.lock().await;
                Some(Reply::Results(classifier.results()))
            }
            Message::RefreshScan { sources } => {
                let mut classifier = self.classifier.lock().await;
                classifier.refresh(&sources);
                Some(Reply::Results(classifier.results()))
            }
            Message::GetFingerprints { session } => Some(Reply::Fingerprints(self.fingerprints.get(&session).await)),
            Message::GetConfig => {
                let classifier = self.classifier.lock().await;
                Some(Reply::Config(classifier.taxonomy().to_config()))
            }
            Message::UpdateBuilder { session, builder } => {
                let changed = self
                    .fingerprints
                    .merge(
                        &session,
                        FieldUpdate::new(Field::Builder(builder), MergePolicy::IfDifferentName),
                    )
                    .await;
                Some(Reply::Ack { ok: changed })
            }
            Message::ScanUpdate { .. } | Message::UpdateFingerprints { .. } => {
                tracing::debug!("Ignoring push message sent as a request");
                None
            }
        }
    }
}
