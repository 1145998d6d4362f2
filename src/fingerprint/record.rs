//! Structured per-session fingerprint, in the wire shape pushed with
//! `UPDATE_FINGERPRINTS`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintRecord {
    pub server: Option<String>,
    pub server_components: Option<ServerComponents>,
    pub headers: BTreeMap<String, String>,
    pub technology: Option<TechProfile>,
    pub security: Option<SecurityProfile>,
    pub analytics: Option<AnalyticsProfile>,
    pub builder: Option<BuilderProfile>,
}

impl FingerprintRecord {
    pub fn is_empty(&self) -> bool {
        self.server.is_none()
            && self.headers.is_empty()
            && self.technology.is_none()
            && self.security.is_none()
            && self.analytics.is_none()
            && self.builder.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerComponents {
    pub web_server: Option<WebServer>,
    pub os: Option<OsInfo>,
    pub extensions: Vec<Extension>,
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebServer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
}

impl WebServer {
    pub fn named(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            sub_type: None,
            version,
            component: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionKind {
    Ssl,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub kind: ExtensionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechProfile {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

impl TechProfile {
    pub fn new(name: impl Into<String>, description: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version,
            framework: None,
            runtime: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityProfile {
    pub name: String,
    pub description: String,
    pub version: Option<String>,
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsProfile {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let record = FingerprintRecord {
            server: Some("nginx".into()),
            server_components: Some(ServerComponents {
                web_server: Some(WebServer::named("Nginx", None)),
                extensions: vec![Extension {
                    name: "OpenSSL".into(),
                    version: Some("1.1.1".into()),
                    kind: ExtensionKind::Ssl,
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["serverComponents"]["webServer"]["name"], "Nginx");
        assert_eq!(json["serverComponents"]["extensions"][0]["type"], "ssl");
        assert!(json["serverComponents"]["webServer"].get("subType").is_none());
        assert!(json["builder"].is_null());
    }
}
