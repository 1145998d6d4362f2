//! Server-side technology identification from `X-Powered-By`, cookies and
//! the ASP.NET version headers.
//!
//! Both identifiers walk an ordered rule list and stop at the first match.

use crate::fingerprint::record::{SecurityProfile, TechProfile};

/// Outcome of an `X-Powered-By` rule.
#[derive(Debug, Clone, PartialEq)]
pub enum PoweredBy {
    Technology(TechProfile),
    Security(SecurityProfile),
}

struct HeaderRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    security: Option<&'static str>,
}

const POWERED_BY_RULES: &[HeaderRule] = &[
    HeaderRule {
        name: "ASP.NET",
        matches: |v| v.contains("asp.net"),
        security: None,
    },
    HeaderRule {
        name: "Java",
        matches: |v| v.contains("java"),
        security: None,
    },
    HeaderRule {
        name: "Janusec",
        matches: |v| v.contains("janusec"),
        security: Some("Janusec application gateway identified via X-Powered-By"),
    },
    HeaderRule {
        name: "WAF",
        matches: |v| v.contains("waf"),
        security: Some("Web application firewall identified via X-Powered-By"),
    },
];

/// Version is whatever follows the first `/`.
fn slash_version(value: &str) -> Option<String> {
    value
        .split('/')
        .nth(1)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn identify_from_powered_by(value: &str) -> Option<PoweredBy> {
    let lower = value.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if lower.starts_with("php/") {
        let version = slash_version(value);
        let description = format!(
            "PHP server-side language identified via X-Powered-By, version {}",
            version.as_deref().unwrap_or("unknown")
        );
        return Some(PoweredBy::Technology(TechProfile::new("PHP", description, version)));
    }

    let rule = POWERED_BY_RULES.iter().find(|r| (r.matches)(&lower))?;
    let version = slash_version(value);
    Some(match rule.security {
        Some(description) => PoweredBy::Security(SecurityProfile {
            name: rule.name.into(),
            description: description.into(),
            version,
            provider: Some("X-Powered-By".into()),
            extra: None,
        }),
        None => {
            let description = match &version {
                Some(v) => format!("{} server-side stack identified via X-Powered-By, version {}", rule.name, v),
                None => format!("{} server-side stack identified via X-Powered-By", rule.name),
            };
            PoweredBy::Technology(TechProfile::new(rule.name, description, version))
        }
    })
}

struct CookieRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    description: &'static str,
}

fn contains_then(haystack: &str, first: &str, then: &str) -> bool {
    haystack
        .find(first)
        .map(|idx| haystack[idx + first.len()..].contains(then))
        .unwrap_or(false)
}

const COOKIE_RULES: &[CookieRule] = &[
    CookieRule {
        name: "PHP",
        matches: |v| v.contains("phpsessid"),
        description: "PHP server-side language identified via session cookie",
    },
    CookieRule {
        name: "ASP.NET",
        matches: |v| v.contains("asp.net_sessionid") || v.contains("aspsessionid"),
        description: "ASP.NET server-side stack identified via session cookie",
    },
    CookieRule {
        name: "Java",
        matches: |v| v.contains("jsessionid") || v.contains("sessionid") || v.contains("jeesite"),
        description: "Java server-side stack identified via session cookie",
    },
    CookieRule {
        name: "Django",
        matches: |v| contains_then(v, "sessionid", "django"),
        description: "Django (Python) framework identified via session cookie",
    },
    CookieRule {
        name: "Rails",
        matches: |v| contains_then(v, "_session_id=", "rack"),
        description: "Ruby on Rails framework identified via session cookie",
    },
    CookieRule {
        name: "Laravel",
        matches: |v| v.contains("laravel_session"),
        description: "Laravel (PHP) framework identified via session cookie",
    },
];

/// Accepts a raw `Set-Cookie` value or a `;`-joined list of cookie names.
pub fn identify_from_cookie(value: &str) -> Option<TechProfile> {
    let lower = value.to_lowercase();
    COOKIE_RULES
        .iter()
        .find(|r| (r.matches)(&lower))
        .map(|r| TechProfile::new(r.name, r.description, Some(r.name.to_string())))
}

/// `X-AspNetMvc-Version`: creates `ASP.NET MVC` or upgrades plain `ASP.NET`.
pub fn merge_aspnet_mvc(technology: &mut Option<TechProfile>, mvc_version: &str) {
    match technology {
        None => {
            *technology = Some(TechProfile {
                name: "ASP.NET MVC".into(),
                description: String::new(),
                version: Some(mvc_version.to_string()),
                framework: Some("MVC".into()),
                runtime: None,
            });
        }
        Some(tech) if tech.name == "ASP.NET" => {
            tech.name = "ASP.NET MVC".into();
            tech.framework = Some("MVC".into());
            tech.version = Some(mvc_version.to_string());
        }
        Some(_) => return,
    }
    refresh_aspnet_description(technology);
}

/// `X-AspNet-Version`: records the .NET runtime on either ASP.NET variant.
pub fn merge_aspnet_runtime(technology: &mut Option<TechProfile>, runtime: &str) {
    match technology {
        None => {
            *technology = Some(TechProfile {
                name: "ASP.NET".into(),
                description: String::new(),
                version: None,
                framework: None,
                runtime: Some(runtime.to_string()),
            });
        }
        Some(tech) if tech.name.contains("ASP.NET") => {
            tech.runtime = Some(runtime.to_string());
        }
        Some(_) => return,
    }
    refresh_aspnet_description(technology);
}

fn refresh_aspnet_description(technology: &mut Option<TechProfile>) {
    let Some(tech) = technology else {
        return;
    };
    let mut description = format!("{} identified via response headers", tech.name);
    if let Some(version) = &tech.version {
        description.push_str(&format!(", version {}", version));
    }
    if let Some(runtime) = &tech.runtime {
        description.push_str(&format!(", running on .NET Framework {}", runtime));
    }
    tech.description = description;
}
