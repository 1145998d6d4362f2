//! `Server` header decomposition.

use crate::fingerprint::record::{Component, Extension, ExtensionKind, Module, OsInfo, ServerComponents, WebServer};

const KNOWN_SERVERS: &[&str] = &["apache", "nginx", "iis", "litespeed", "resin", "cloudflare"];

// First match per token wins.
const OS_MARKERS: &[(&str, &str)] = &[
    ("win", "Windows"),
    ("linux", "Linux"),
    ("ubuntu", "Ubuntu"),
    ("debian", "Debian"),
    ("centos", "CentOS"),
    ("unix", "Unix"),
];

pub fn decompose_server_header(raw: &str) -> ServerComponents {
    let mut components = ServerComponents::default();

    for part in raw.split_whitespace() {
        if part.len() >= 2 && part.starts_with('(') && part.ends_with(')') {
            let os = &part[1..part.len() - 1];
            let lower = os.to_lowercase();
            if let Some((_, name)) = OS_MARKERS.iter().find(|(marker, _)| lower.contains(marker)) {
                components.os = Some(OsInfo {
                    name: name.to_string(),
                    version: os.to_string(),
                });
            }
            continue;
        }

        let (name, version) = split_token(part);
        let lower = name.to_lowercase();

        if KNOWN_SERVERS.iter().any(|s| lower.contains(s)) {
            known_server(&mut components, &lower, version);
        } else if let Some(version) = version {
            named_component(&mut components, part, name, version);
        } else if components.web_server.is_none() {
            components.web_server = Some(WebServer::named(lower, None));
        }
    }

    components
}

fn split_token(part: &str) -> (&str, Option<String>) {
    match part.split_once('/') {
        Some((name, rest)) => {
            let version = rest.split('/').next().unwrap_or(rest);
            (name, Some(version.to_string()))
        }
        None => (part, None),
    }
}

fn known_server(components: &mut ServerComponents, lower: &str, version: Option<String>) {
    if lower.contains("cloudflare") {
        components.web_server = Some(WebServer {
            name: "Cloudflare".into(),
            sub_type: Some("Proxy".into()),
            version: None,
            component: None,
        });
        return;
    }

    if lower.contains("apache") {
        let variant = if lower.contains("coyote") {
            Some(("Tomcat", "Coyote"))
        } else if lower.contains("jserv") {
            Some(("JServ", "JServ"))
        } else {
            None
        };
        components.web_server = Some(match variant {
            Some((sub_type, component)) => WebServer {
                name: "Apache".into(),
                sub_type: Some(sub_type.into()),
                version: None,
                component: Some(Component {
                    name: component.into(),
                    version,
                }),
            },
            None => WebServer::named("Apache", version),
        });
        return;
    }

    components.web_server = Some(WebServer::named(capitalize(lower), version));
    if lower.contains("iis") && components.os.is_none() {
        components.os = Some(OsInfo {
            name: "Windows".into(),
            version: "windows".into(),
        });
    }
}

fn named_component(components: &mut ServerComponents, part: &str, name: &str, version: String) {
    let lower_part = part.to_lowercase();
    let lower_name = name.to_lowercase();

    if lower_part.contains("server") {
        components.web_server = Some(WebServer::named(name, Some(version)));
    } else if name == "OpenSSL" {
        components.extensions.push(Extension {
            name: name.into(),
            version: Some(version),
            kind: ExtensionKind::Ssl,
        });
    } else if let Some(module) = name.strip_prefix("mod_") {
        components.modules.push(Module {
            name: module.into(),
            version: Some(version),
        });
    } else if lower_name.contains("www") {
        components.web_server = Some(WebServer::named(name, Some(version)));
    } else {
        components.extensions.push(Extension {
            name: name.into(),
            version: Some(version),
            kind: ExtensionKind::Other,
        });
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
