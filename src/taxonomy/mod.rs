//! Pattern taxonomy: categories, compiled detection rules and the tables
//! the validators consult.

pub mod patterns;
pub mod tables;

use anyhow::Context as _;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "domains")]
    Domain,
    #[serde(rename = "internalDomains")]
    InternalDomain,
    #[serde(rename = "absoluteApis")]
    AbsoluteApi,
    #[serde(rename = "apis")]
    Api,
    #[serde(rename = "moduleFiles")]
    ModuleFile,
    #[serde(rename = "docFiles")]
    DocFile,
    #[serde(rename = "imageFiles")]
    ImageFile,
    #[serde(rename = "jsFiles")]
    JsFile,
    #[serde(rename = "vueFiles")]
    VueFile,
    #[serde(rename = "ips")]
    Ip,
    #[serde(rename = "internalIps")]
    InternalIp,
    #[serde(rename = "phones")]
    Phone,
    #[serde(rename = "emails")]
    Email,
    #[serde(rename = "idcards")]
    IdCard,
    #[serde(rename = "urls")]
    Url,
    #[serde(rename = "githubUrls")]
    GithubUrl,
    #[serde(rename = "jwts")]
    Jwt,
    #[serde(rename = "awsKeys")]
    AwsKey,
    #[serde(rename = "idKeys")]
    IdKey,
    #[serde(rename = "companies")]
    Company,
    #[serde(rename = "credentials")]
    Credential,
    #[serde(rename = "cookies")]
    Cookie,
}

impl Category {
    pub const ALL: [Category; 22] = [
        Category::Domain,
        Category::InternalDomain,
        Category::AbsoluteApi,
        Category::Api,
        Category::ModuleFile,
        Category::DocFile,
        Category::ImageFile,
        Category::JsFile,
        Category::VueFile,
        Category::Ip,
        Category::InternalIp,
        Category::Phone,
        Category::Email,
        Category::IdCard,
        Category::Url,
        Category::GithubUrl,
        Category::Jwt,
        Category::AwsKey,
        Category::IdKey,
        Category::Company,
        Category::Credential,
        Category::Cookie,
    ];

    /// Human-readable label used by the text report.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Domain => "Domains",
            Category::InternalDomain => "Internal Domains",
            Category::AbsoluteApi => "Absolute API Paths",
            Category::Api => "API Paths",
            Category::ModuleFile => "Module Files",
            Category::DocFile => "Document Files",
            Category::ImageFile => "Image/Media Files",
            Category::JsFile => "JS Files",
            Category::VueFile => "Vue Files",
            Category::Ip => "IP Addresses",
            Category::InternalIp => "Internal IPs",
            Category::Phone => "Phone Numbers",
            Category::Email => "Emails",
            Category::IdCard => "ID Card Numbers",
            Category::Url => "URLs",
            Category::GithubUrl => "GitHub URLs",
            Category::Jwt => "JWT Tokens",
            Category::AwsKey => "AWS Access Keys",
            Category::IdKey => "Cloud/Platform Keys",
            Category::Company => "Companies",
            Category::Credential => "Credentials",
            Category::Cookie => "Cookies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    Md5,
    Sha1,
    Sha256,
}

impl HashKind {
    pub const ALL: [HashKind; 3] = [HashKind::Md5, HashKind::Sha1, HashKind::Sha256];

    pub fn hex_len(&self) -> usize {
        match self {
            HashKind::Md5 => 32,
            HashKind::Sha1 => 40,
            HashKind::Sha256 => 64,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashKind::Md5 => "MD5",
            HashKind::Sha1 => "SHA1",
            HashKind::Sha256 => "SHA256",
        }
    }
}

/// Which validator a raw match is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Domain,
    DomainResource,
    Ip,
    IpResource,
    Path,
    Phone,
    Email,
    IdCard,
    Url,
    Jwt,
    AwsKey,
    IdKey(&'static str),
    IdKeyGeneric,
    Company,
    Credential,
    Cookie,
    Hash(HashKind),
}

/// Characters that may not sit directly before or after a match. Evaluated
/// against the whole source, so chunk edges never fake a boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Guard {
    pub reject_prev: Option<fn(char) -> bool>,
    pub reject_next: Option<fn(char) -> bool>,
}

impl Guard {
    pub const NONE: Guard = Guard {
        reject_prev: None,
        reject_next: None,
    };

    fn admits(&self, prev: Option<char>, next: Option<char>) -> bool {
        let prev_ok = match (self.reject_prev, prev) {
            (Some(reject), Some(c)) => !reject(c),
            _ => true,
        };
        let next_ok = match (self.reject_next, next) {
            (Some(reject), Some(c)) => !reject(c),
            _ => true,
        };
        prev_ok && next_ok
    }
}

fn digit_or_dot(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn alnum(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn after_host(c: char) -> bool {
    c.is_ascii_alphanumeric() || "._=>();!}-".contains(c)
}

fn law_suffix(c: char) -> bool {
    c == '法'
}

/// A raw match plus its surrounding characters in the full source.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'s> {
    pub text: &'s str,
    pub prev: Option<char>,
    pub next: Option<char>,
}

pub struct PatternRule {
    pub name: &'static str,
    pub source: &'static str,
    pub route: Route,
    regex: Regex,
    guard: Guard,
}

impl PatternRule {
    fn compile(name: &'static str, source: &'static str, route: Route, guard: Guard) -> Option<Self> {
        match Regex::new(source) {
            Ok(regex) => Some(Self {
                name,
                source,
                route,
                regex,
                guard,
            }),
            Err(e) => {
                tracing::warn!("Skipping pattern {}: {}", name, e);
                None
            }
        }
    }

    /// Fresh scan-forward cursor over one span of `source`.
    pub fn hits<'s>(&'s self, source: &'s str, span: Span) -> Hits<'s> {
        let limit = span.limit.min(source.len());
        Hits {
            rule: self,
            source,
            haystack: &source[..limit],
            owned_end: span.owned_end.min(limit),
            pos: span.from,
        }
    }
}

/// What one rule application over a chunk may report. Matches must start in
/// `from..owned_end` and are searched in `source[..limit]`; the text before
/// `from` stays visible so word boundaries hold across chunk cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub from: usize,
    pub owned_end: usize,
    pub limit: usize,
}

/// A lone window: it owns every start inside it and sees nothing past it.
impl From<Range<usize>> for Span {
    fn from(window: Range<usize>) -> Self {
        Span {
            from: window.start,
            owned_end: window.end,
            limit: window.end,
        }
    }
}

pub struct Hits<'s> {
    rule: &'s PatternRule,
    source: &'s str,
    haystack: &'s str,
    owned_end: usize,
    pos: usize,
}

impl Hits<'_> {
    /// Where the following chunk's application must resume so that no match
    /// is reported twice or from its middle.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'s> Iterator for Hits<'s> {
    type Item = Hit<'s>;

    fn next(&mut self) -> Option<Hit<'s>> {
        while self.pos < self.owned_end {
            let m = match self.rule.regex.find_at(self.haystack, self.pos) {
                Some(m) if m.start() < self.owned_end => m,
                _ => {
                    self.pos = self.owned_end;
                    return None;
                }
            };

            // Runs into the cut while the source goes on: the real match is
            // longer than what this chunk can see. Skip past all of it.
            if m.end() == self.haystack.len() && self.haystack.len() < self.source.len() {
                self.pos = m.end();
                return None;
            }

            let prev = self.source[..m.start()].chars().next_back();
            let next = self.source[m.end()..].chars().next();
            if self.rule.guard.admits(prev, next) && !m.as_str().is_empty() {
                self.pos = m.end();
                return Some(Hit {
                    text: m.as_str(),
                    prev,
                    next,
                });
            }
            // Rejected at this start: retry one character further on.
            let step = self.source[m.start()..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
            self.pos = m.start() + step;
        }
        None
    }
}

/// The compiled registry. Built once and shared read-only.
pub struct Taxonomy {
    rules: Vec<PatternRule>,
    hash_rules: Vec<PatternRule>,
    skip_libraries: Vec<Regex>,
    pub(crate) domain_filter: Regex,
    pub(crate) image_ext: Regex,
    pub(crate) js_ext: Regex,
    pub(crate) doc_ext: Regex,
    pub(crate) font_ext: Regex,
    pub(crate) vue_ext: Regex,
}

impl Taxonomy {
    pub fn new() -> anyhow::Result<Self> {
        use patterns as p;

        let mut specs: Vec<(&'static str, &'static str, Route, Guard)> = vec![
            (
                "DOMAIN",
                p::DOMAIN,
                Route::Domain,
                Guard {
                    reject_prev: None,
                    reject_next: Some(after_host),
                },
            ),
            ("DOMAIN_RESOURCE", p::DOMAIN_RESOURCE, Route::DomainResource, Guard::NONE),
            (
                "IP",
                p::IP,
                Route::Ip,
                Guard {
                    reject_prev: Some(digit_or_dot),
                    reject_next: Some(digit_or_dot),
                },
            ),
            ("IP_RESOURCE", p::IP_RESOURCE, Route::IpResource, Guard::NONE),
            ("API", p::API, Route::Path, Guard::NONE),
            (
                "PHONE",
                p::PHONE,
                Route::Phone,
                Guard {
                    reject_prev: Some(digit_or_dot),
                    reject_next: Some(digit),
                },
            ),
            ("EMAIL", p::EMAIL, Route::Email, Guard::NONE),
            (
                "IDCARD",
                p::ID_CARD,
                Route::IdCard,
                Guard {
                    reject_prev: Some(digit),
                    reject_next: Some(digit),
                },
            ),
            ("URL", p::URL, Route::Url, Guard::NONE),
            ("JWT", p::JWT, Route::Jwt, Guard::NONE),
            ("AWS_KEY", p::AWS_KEY, Route::AwsKey, Guard::NONE),
            (
                "COMPANY",
                p::COMPANY,
                Route::Company,
                Guard {
                    reject_prev: None,
                    reject_next: Some(law_suffix),
                },
            ),
            ("CREDENTIALS", p::CREDENTIALS, Route::Credential, Guard::NONE),
            ("COOKIE", p::COOKIE, Route::Cookie, Guard::NONE),
        ];
        for (label, source) in p::ID_KEYS {
            specs.push((
                "ID_KEY",
                source,
                Route::IdKey(label),
                Guard {
                    reject_prev: Some(alnum),
                    reject_next: None,
                },
            ));
        }
        specs.push(("ID_KEY_GENERIC", p::ID_KEY_GENERIC, Route::IdKeyGeneric, Guard::NONE));

        let rules = specs
            .into_iter()
            .filter_map(|(name, source, route, guard)| PatternRule::compile(name, source, route, guard))
            .collect();

        let word_edges = Guard {
            reject_prev: Some(word),
            reject_next: Some(word),
        };
        let hash_rules = [
            (HashKind::Md5, p::HASH_MD5),
            (HashKind::Sha1, p::HASH_SHA1),
            (HashKind::Sha256, p::HASH_SHA256),
        ]
        .into_iter()
        .filter_map(|(kind, source)| PatternRule::compile(kind.as_str(), source, Route::Hash(kind), word_edges))
        .collect();

        let skip_libraries = tables::SKIP_LIBRARY_PATTERNS
            .iter()
            .filter_map(|src| match Regex::new(src) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Skipping library rule {}: {}", src, e);
                    None
                }
            })
            .collect();

        Ok(Self {
            rules,
            hash_rules,
            skip_libraries,
            domain_filter: Regex::new(p::DOMAIN_FILTER).context("domain filter pattern")?,
            image_ext: Regex::new(p::IMAGE_EXT).context("image extension pattern")?,
            js_ext: Regex::new(p::JS_EXT).context("js extension pattern")?,
            doc_ext: Regex::new(p::DOC_EXT).context("document extension pattern")?,
            font_ext: Regex::new(p::FONT_EXT).context("font extension pattern")?,
            vue_ext: Regex::new(p::VUE_EXT).context("vue extension pattern")?,
        })
    }

    /// Category rules in application order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// The nested hash sub-table.
    pub fn hash_rules(&self) -> &[PatternRule] {
        &self.hash_rules
    }

    /// True when the bare filename belongs to a vendored library.
    pub fn is_third_party(&self, filename: &str) -> bool {
        self.skip_libraries.iter().any(|re| re.is_match(filename))
    }

    /// Pattern sources for external display (`GET_CONFIG`).
    pub fn to_config(&self) -> TaxonomyConfig {
        let mut patterns: BTreeMap<String, String> = BTreeMap::new();
        for rule in &self.rules {
            let key = match rule.route {
                Route::IdKey(label) => format!("ID_KEY[{}]", label),
                _ => rule.name.to_string(),
            };
            patterns.insert(key, rule.source.to_string());
        }

        TaxonomyConfig {
            patterns,
            hash: self
                .hash_rules
                .iter()
                .map(|r| (r.name.to_string(), r.source.to_string()))
                .collect(),
            skip_js_patterns: tables::SKIP_LIBRARY_PATTERNS.iter().map(|s| s.to_string()).collect(),
            domain_whitelist: tables::DOMAIN_WHITELIST.iter().map(|s| s.to_string()).collect(),
            domain_blacklist: tables::DOMAIN_BLACKLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
impl Taxonomy {
    /// Appends a rule after the built-in ones.
    pub(crate) fn push_rule(&mut self, name: &'static str, source: &'static str, route: Route, guard: Guard) {
        self.rules.extend(PatternRule::compile(name, source, route, guard));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TaxonomyConfig {
    pub patterns: BTreeMap<String, String>,
    pub hash: BTreeMap<String, String>,
    pub skip_js_patterns: Vec<String>,
    pub domain_whitelist: Vec<String>,
    pub domain_blacklist: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule<'t>(tax: &'t Taxonomy, name: &str) -> &'t PatternRule {
        tax.rules().iter().find(|r| r.name == name).unwrap()
    }

    fn all_hits<'s>(rule: &'s PatternRule, text: &'s str) -> Vec<&'s str> {
        rule.hits(text, (0..text.len()).into()).map(|h| h.text).collect()
    }

    #[test]
    fn test_every_pattern_compiles() {
        let tax = Taxonomy::new().unwrap();
        assert_eq!(tax.rules().len(), 14 + patterns::ID_KEYS.len() + 1);
        assert_eq!(tax.hash_rules().len(), 3);
    }

    #[test]
    fn test_phone_guard_rejects_longer_digit_runs() {
        let tax = Taxonomy::new().unwrap();
        let phone = rule(&tax, "PHONE");
        assert_eq!(all_hits(phone, "联系电话13912345678"), vec!["13912345678"]);
        assert!(all_hits(phone, "139123456780").is_empty());
        assert!(all_hits(phone, "v1.13912345678").is_empty());
    }

    #[test]
    fn test_ip_guard_skips_version_strings() {
        let tax = Taxonomy::new().unwrap();
        let ip = rule(&tax, "IP");
        assert!(all_hits(ip, "version 1.2.3.4.5").is_empty());
        assert_eq!(all_hits(ip, "host 10.0.0.1:8080 up"), vec!["10.0.0.1:8080"]);
    }

    #[test]
    fn test_domain_prefers_full_host() {
        let tax = Taxonomy::new().unwrap();
        let domain = rule(&tax, "DOMAIN");
        assert_eq!(all_hits(domain, "see api.example.com.cn now"), vec!["api.example.com.cn"]);
        assert!(all_hits(domain, "window.top;").is_empty());
    }

    #[test]
    fn test_hash_is_anchored_on_boundaries() {
        let tax = Taxonomy::new().unwrap();
        let md5 = tax.hash_rules().iter().find(|r| r.route == Route::Hash(HashKind::Md5)).unwrap();
        let hex64 = "a".repeat(16) + &"0123456789abcdef".repeat(3);
        assert!(all_hits(md5, &hex64).is_empty());
        assert_eq!(all_hits(md5, "md5=d41d8cd98f00b204e9800998ecf8427e;").len(), 1);
    }

    #[test]
    fn test_guard_reads_outside_the_window() {
        let tax = Taxonomy::new().unwrap();
        let phone = rule(&tax, "PHONE");
        let text = "1391234567890";
        // The digit after the window's phone-shaped run is still a digit.
        let hits: Vec<_> = phone.hits(text, (0..12).into()).collect();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_spans_hand_over_without_repeats() {
        let tax = Taxonomy::new().unwrap();
        let email = rule(&tax, "EMAIL");
        // Match sits at 30..51.
        let text = format!("{}operations@target.com and {}", " ".repeat(30), " ".repeat(30));

        // The first chunk sees no complete match and hands over at its
        // owned end; the second reports the whole address.
        let mut hits = email.hits(
            &text,
            Span {
                from: 0,
                owned_end: 24,
                limit: 40,
            },
        );
        assert!(hits.next().is_none());
        assert_eq!(hits.position(), 24);
        let second: Vec<_> = email
            .hits(
                &text,
                Span {
                    from: 24,
                    owned_end: text.len(),
                    limit: text.len(),
                },
            )
            .map(|h| h.text)
            .collect();
        assert_eq!(second, vec!["operations@target.com"]);

        // A match cut by the chunk end is skipped whole, never reported
        // from a fragment.
        let mut hits = email.hits(
            &text,
            Span {
                from: 0,
                owned_end: 35,
                limit: 49,
            },
        );
        assert!(hits.next().is_none());
        assert_eq!(hits.position(), 49);
        let rest: Vec<_> = email
            .hits(
                &text,
                Span {
                    from: 49,
                    owned_end: text.len(),
                    limit: text.len(),
                },
            )
            .collect();
        assert!(rest.is_empty());

        let mut hits = email.hits(
            &text,
            Span {
                from: 0,
                owned_end: 40,
                limit: 60,
            },
        );
        assert_eq!(hits.next().map(|h| h.text), Some("operations@target.com"));
        assert_eq!(hits.position(), 51);
    }

    #[test]
    fn test_third_party_filenames() {
        let tax = Taxonomy::new().unwrap();
        assert!(tax.is_third_party("jquery-3.6.0.min.js"));
        assert!(tax.is_third_party("vue.min.js"));
        assert!(tax.is_third_party("echarts.min.js"));
        assert!(!tax.is_third_party("app.8f3a2c1d.js"));
    }

    #[test]
    fn test_config_lists_hash_sub_table() {
        let tax = Taxonomy::new().unwrap();
        let config = tax.to_config();
        assert!(config.patterns.contains_key("PHONE"));
        assert!(config.patterns.contains_key("ID_KEY[Aliyun AccessKey]"));
        assert_eq!(config.hash.len(), 3);
        assert!(config.hash.contains_key("SHA256"));
    }
}
