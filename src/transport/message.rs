//! Wire messages exchanged with the presentation layer.

use crate::fingerprint::record::{BuilderProfile, FingerprintRecord};
use crate::scan::store::CategoryMap;
use crate::taxonomy::TaxonomyConfig;
use serde::{Deserialize, Serialize};

/// Opaque identifier of one browsing context: a browser tab, or one CLI run.
pub type SessionId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Push: full snapshot of the current result store.
    ScanUpdate { results: CategoryMap },
    /// Push: full merged fingerprint record for a session.
    UpdateFingerprints {
        session: SessionId,
        fingerprints: FingerprintRecord,
    },
    GetResults,
    RefreshScan { sources: Vec<String> },
    GetFingerprints { session: SessionId },
    GetConfig,
    UpdateBuilder {
        session: SessionId,
        builder: BuilderProfile,
    },
}

/// Answer to a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Results(CategoryMap),
    Fingerprints(Option<FingerprintRecord>),
    Config(TaxonomyConfig),
    Ack { ok: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        let json = serde_json::to_value(Message::GetResults).unwrap();
        assert_eq!(json["type"], "GET_RESULTS");

        let json = serde_json::to_value(Message::RefreshScan {
            sources: vec!["a".into()],
        })
        .unwrap();
        assert_eq!(json["type"], "REFRESH_SCAN");
        assert_eq!(json["sources"][0], "a");
    }

    #[test]
    fn test_parse_update_builder() {
        let raw = r#"{"type":"UPDATE_BUILDER","session":"tab-1","builder":{"name":"Vite","description":"detected in page"}}"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        match msg {
            Message::UpdateBuilder { session, builder } => {
                assert_eq!(session, "tab-1");
                assert_eq!(builder.name, "Vite");
            }
            other => panic!("unexpected message {:?}", other),
        }
    }
}
