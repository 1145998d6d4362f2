use crate::fingerprint::record::BuilderProfile;
use lazy_static::lazy_static;
use regex::Regex;

const HASHED_CHUNK: &str = r"(?:chunk|main|app|vendor|common)s?(?:[-.][a-f0-9]{8,20})+.(?:css|js)";

lazy_static! {
    static ref HASHED_CHUNK_RE: Option<Regex> = match Regex::new(HASHED_CHUNK) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Builder pattern failed to compile: {}", e);
            None
        }
    };
}

/// Webpack-style hashed chunk names in a document body.
pub fn detect_builder(body: &str) -> Option<BuilderProfile> {
    if !HASHED_CHUNK_RE.as_ref()?.is_match(body) {
        return None;
    }
    Some(BuilderProfile {
        name: "Webpack".into(),
        description: "Webpack bundler identified from hashed chunk file names".into(),
        version: Some("Webpack".into()),
    })
}
