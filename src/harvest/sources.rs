use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// `src=`/`href=` values ending in `.js`, matched over raw markup so that
/// references outside `<script>` tags are found too.
const SCRIPT_REF: &str = r#"(?:src|href)=['"]([^'"]+\.js(?:\?[^\s'"]*)?)['"]"#;

lazy_static! {
    static ref SCRIPT_REF_RE: Option<Regex> = match Regex::new(SCRIPT_REF) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Script reference pattern failed: {}", e);
            None
        }
    };
}

const RESOURCE_SELECTORS: &[(&str, &str)] = &[
    (r#"a[href^="http"]"#, "href"),
    ("script[src]", "src"),
    ("link[href]", "href"),
];

const DATA_ATTRIBUTES: &[&str] = &["api", "url", "endpoint", "server", "config"];

/// Everything a loaded document exposes for scanning.
#[derive(Debug, Default, Clone)]
pub struct Harvest {
    pub markup: String,
    pub inline_scripts: Vec<String>,
    pub script_urls: Vec<Url>,
    pub attributes: Vec<String>,
}

/// Drops values that cannot carry findings.
pub fn keep_source(source: &str) -> bool {
    source.trim().chars().count() > 3
        && !source.starts_with("data:")
        && !source.starts_with("blob:")
        && !source.starts_with("javascript:")
}

fn push_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, value: String) {
    if keep_source(&value) && seen.insert(value.clone()) {
        out.push(value);
    }
}

impl Harvest {
    pub fn from_document(body: &str, base: &Url) -> Self {
        let document = Html::parse_document(body);
        let mut harvest = Harvest {
            markup: body.to_string(),
            ..Default::default()
        };

        if let Ok(sel) = Selector::parse("script:not([src])") {
            for el in document.select(&sel) {
                let text: String = el.text().collect();
                if keep_source(&text) {
                    harvest.inline_scripts.push(text);
                }
            }
        }

        let mut seen_urls = HashSet::new();
        if let Ok(sel) = Selector::parse("script[src]") {
            for el in document.select(&sel) {
                if let Some(src) = el.value().attr("src") {
                    harvest.add_script(base, src.trim(), &mut seen_urls);
                }
            }
        }
        if let Some(re) = SCRIPT_REF_RE.as_ref() {
            for cap in re.captures_iter(body) {
                if let Some(m) = cap.get(1) {
                    harvest.add_script(base, m.as_str(), &mut seen_urls);
                }
            }
        }

        let mut seen_attrs = HashSet::new();
        for (selector, attr) in RESOURCE_SELECTORS {
            let Ok(sel) = Selector::parse(selector) else {
                continue;
            };
            for el in document.select(&sel) {
                if let Some(value) = el.value().attr(attr) {
                    // Element properties report resolved URLs.
                    let value = base.join(value.trim()).map(String::from).unwrap_or_else(|_| value.to_string());
                    push_unique(&mut harvest.attributes, &mut seen_attrs, value);
                }
            }
        }

        if let Ok(sel) = Selector::parse("meta[content]") {
            for el in document.select(&sel) {
                if let Some(content) = el.value().attr("content") {
                    push_unique(&mut harvest.attributes, &mut seen_attrs, content.to_string());
                }
            }
        }

        for name in DATA_ATTRIBUTES {
            let Ok(sel) = Selector::parse(&format!("[data-{}]", name)) else {
                continue;
            };
            let attr = format!("data-{}", name);
            for el in document.select(&sel) {
                if let Some(value) = el.value().attr(&attr) {
                    push_unique(&mut harvest.attributes, &mut seen_attrs, value.to_string());
                }
            }
        }

        tracing::debug!(
            "Harvested {} inline scripts, {} script URLs, {} attribute values",
            harvest.inline_scripts.len(),
            harvest.script_urls.len(),
            harvest.attributes.len()
        );
        harvest
    }

    fn add_script(&mut self, base: &Url, reference: &str, seen: &mut HashSet<String>) {
        if reference.is_empty() || !keep_source(reference) {
            return;
        }
        match base.join(reference) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                if seen.insert(url.to_string()) {
                    self.script_urls.push(url);
                }
            }
            Ok(_) => {}
            Err(e) => tracing::debug!("Unresolvable script reference {}: {}", reference, e),
        }
    }

    /// Markup and inline scripts, in document order.
    pub fn page_sources(&self) -> Vec<String> {
        std::iter::once(&self.markup)
            .chain(&self.inline_scripts)
            .filter(|s| keep_source(s))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head>
<meta name="api-base" content="https://api.target.com/v2">
<meta charset="utf-8" content="x">
<link rel="stylesheet" href="/css/site.css">
<script src="/static/js/app.3f2a9c1b.js"></script>
<script src="//cdn.target.com/lib.js?v=1"></script>
<script>var token = "abc12345";</script>
</head><body>
<a href="https://docs.target.com/help">help</a>
<a href="/relative">skip</a>
<a href="javascript:void(0)">noop</a>
<div data-api="/api/internal/users" data-config="data:text/plain,xx"></div>
<img src="data:image/png;base64,AAAA">
<a href="/download/tool.js">tool</a>
</body></html>"#;

    fn harvest() -> Harvest {
        Harvest::from_document(PAGE, &Url::parse("https://www.target.com/index.html").unwrap())
    }

    #[test]
    fn test_script_urls_resolved_and_unique() {
        let h = harvest();
        let urls: Vec<String> = h.script_urls.iter().map(Url::to_string).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.target.com/static/js/app.3f2a9c1b.js",
                "https://cdn.target.com/lib.js?v=1",
                "https://www.target.com/download/tool.js",
            ]
        );
    }

    #[test]
    fn test_inline_scripts() {
        let h = harvest();
        assert_eq!(h.inline_scripts, vec![r#"var token = "abc12345";"#]);
        let sources = h.page_sources();
        assert_eq!(sources.len(), 2);
        assert!(sources[0].starts_with("<!doctype html>"));
    }

    #[test]
    fn test_attribute_values() {
        let h = harvest();
        assert!(h.attributes.contains(&"https://docs.target.com/help".to_string()));
        assert!(h.attributes.contains(&"https://www.target.com/css/site.css".to_string()));
        assert!(h.attributes.contains(&"https://api.target.com/v2".to_string()));
        assert!(h.attributes.contains(&"/api/internal/users".to_string()));
        assert!(!h.attributes.iter().any(|a| a.ends_with("/relative")));
        assert!(!h.attributes.iter().any(|a| a.starts_with("data:") || a == "x"));
    }

    #[test]
    fn test_keep_source() {
        assert!(!keep_source("  ab  "));
        assert!(!keep_source("blob:https://x/1"));
        assert!(!keep_source("javascript:alert(1)"));
        assert!(keep_source("/api"));
    }
}
