//! Per-category validators.
//!
//! Each validator decides whether a raw match becomes a finding, normalizes
//! it and writes it into the store. The return value is true only when a new
//! entry was added.

use crate::scan::store::ResultStore;
use crate::taxonomy::tables;
use crate::taxonomy::{Category, HashKind, Hit, Route, Taxonomy};
use std::net::Ipv4Addr;
use url::Url;

pub fn apply(route: Route, hit: &Hit<'_>, tax: &Taxonomy, store: &mut ResultStore) -> bool {
    match route {
        Route::Domain => domain(hit.text, tax, store),
        Route::DomainResource => domain(&host_of(hit.text), tax, store),
        Route::Ip => ip(hit.text, store),
        Route::IpResource => ip(&host_of(hit.text), store),
        Route::Path => path(hit.text, tax, store),
        Route::Phone => store.insert(Category::Phone, hit.text),
        Route::Email => email(hit.text, store),
        Route::IdCard => id_card(hit.text, store),
        Route::Url => url(hit.text, store),
        Route::Jwt => store.insert(Category::Jwt, strip_quotes(hit.text)),
        Route::AwsKey => store.insert(Category::AwsKey, hit.text),
        Route::IdKey(label) => store.insert(Category::IdKey, format!("{}: {}", label, hit.text)),
        Route::IdKeyGeneric => id_key_pair(hit.text, store),
        Route::Company => store.insert(Category::Company, hit.text),
        Route::Credential => credential(hit.text, store),
        Route::Cookie => cookie(hit.text, store),
        Route::Hash(kind) => hash(kind, hit.text, store),
    }
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

fn in_table(table: &[&str], value: &str) -> bool {
    table.iter().any(|entry| entry.eq_ignore_ascii_case(value))
}

/// `"//cdn.example.com:8080/a.js"` → `cdn.example.com:8080`.
fn host_of(quoted: &str) -> String {
    let inner = strip_quotes(quoted);
    let rest = match inner.find("//") {
        Some(idx) if inner[..idx].chars().all(|c| c.is_ascii_alphanumeric() || c == ':') => &inner[idx + 2..],
        _ => inner,
    };
    rest.split(['/', '?', '#']).next().unwrap_or(rest).to_string()
}

fn strip_port(host: &str) -> &str {
    host.split(':').next().unwrap_or(host)
}

fn is_whitelisted(host: &str) -> bool {
    let host = strip_port(host).to_ascii_lowercase();
    tables::DOMAIN_WHITELIST
        .iter()
        .any(|entry| host == *entry || host.ends_with(&format!(".{}", entry)))
}

fn is_internal_host(host: &str) -> bool {
    strip_port(host)
        .split('.')
        .any(|label| in_table(tables::INTERNAL_HOST_LABELS, label))
}

fn domain(host: &str, tax: &Taxonomy, store: &mut ResultStore) -> bool {
    if !tax.domain_filter.is_match(host) || in_table(tables::DOMAIN_BLACKLIST, host) {
        return false;
    }
    if strip_port(host).split('.').any(|label| label.starts_with("this")) {
        return false;
    }
    if is_internal_host(host) {
        return store.insert(Category::InternalDomain, host);
    }
    if is_whitelisted(host) {
        return false;
    }
    store.insert(Category::Domain, host)
}

fn ip(candidate: &str, store: &mut ResultStore) -> bool {
    let addr_part = strip_port(candidate);
    let Ok(addr) = addr_part.parse::<Ipv4Addr>() else {
        return false;
    };
    if tables::RESERVED_IPS.contains(&addr_part) {
        return false;
    }
    if addr.is_private() || addr.is_loopback() {
        store.insert(Category::InternalIp, candidate)
    } else {
        store.insert(Category::Ip, candidate)
    }
}

fn path(raw: &str, tax: &Taxonomy, store: &mut ResultStore) -> bool {
    let path = strip_quotes(raw);
    if path.is_empty() || in_table(tables::FILTERED_CONTENT_TYPES, path) {
        return false;
    }

    // `word/...` form: a leading segment ending in a MIME top-level type.
    if !path.starts_with('/') && !path.starts_with("./") && !path.starts_with("../") {
        let head = path.split('/').next().unwrap_or(path).to_ascii_lowercase();
        if head.ends_with("text") || head.ends_with("application") {
            return false;
        }
    }

    let without_query = path.split(['?', '#']).next().unwrap_or(path);
    let filename = without_query.rsplit('/').next().unwrap_or(without_query);
    if !filename.is_empty() && tax.is_third_party(filename) {
        return false;
    }
    if tax.font_ext.is_match(path) {
        return false;
    }

    let category = if tax.image_ext.is_match(path) {
        Category::ImageFile
    } else if tax.js_ext.is_match(path) {
        Category::JsFile
    } else if tax.vue_ext.is_match(path) {
        Category::VueFile
    } else if tax.doc_ext.is_match(path) {
        Category::DocFile
    } else if path.starts_with("./") || path.starts_with("../") {
        Category::ModuleFile
    } else if path.starts_with('/') {
        Category::AbsoluteApi
    } else {
        Category::Api
    };
    store.insert(category, path)
}

fn email(candidate: &str, store: &mut ResultStore) -> bool {
    let lower = candidate.to_ascii_lowercase();
    let asset = [".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp"]
        .iter()
        .any(|ext| lower.ends_with(ext));
    if asset {
        return false;
    }
    store.insert(Category::Email, candidate)
}

fn id_card(candidate: &str, store: &mut ResultStore) -> bool {
    let (month, day) = match candidate.len() {
        18 => (&candidate[10..12], &candidate[12..14]),
        15 => (&candidate[8..10], &candidate[10..12]),
        _ => return false,
    };
    let plausible = matches!(month.parse::<u8>(), Ok(1..=12)) && matches!(day.parse::<u8>(), Ok(1..=31));
    plausible && store.insert(Category::IdCard, candidate)
}

fn url(candidate: &str, store: &mut ResultStore) -> bool {
    let Ok(parsed) = Url::parse(candidate) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    if in_table(tables::GITHUB_HOSTS, host) {
        return store.insert(Category::GithubUrl, candidate);
    }
    if is_whitelisted(host) {
        return false;
    }
    store.insert(Category::Url, candidate)
}

/// Splits `key = value` / `"key": 'value'` into trimmed key and value.
fn split_pair(text: &str) -> Option<(String, &str)> {
    let idx = text.find([':', '='])?;
    let key = strip_quotes(text[..idx].trim()).to_ascii_lowercase();
    let value = text[idx + 1..].trim();
    Some((key, value))
}

fn is_placeholder(value: &str) -> bool {
    let bare = strip_quotes(value).trim();
    if in_table(tables::PLACEHOLDER_VALUES, bare) {
        return true;
    }
    let mut chars = bare.chars();
    match chars.next() {
        // Masks such as `******` or `xxxxxxxx`.
        Some(first) => (first == '*' || first == 'x' || first == 'X') && chars.all(|c| c == first),
        None => true,
    }
}

fn has_sensitive_stem(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    tables::SENSITIVE_STEMS.iter().any(|stem| lower.contains(stem))
}

fn credential(raw: &str, store: &mut ResultStore) -> bool {
    let text = raw.trim();
    let Some((key, value)) = split_pair(text) else {
        return false;
    };
    if !has_sensitive_stem(&key) || in_table(tables::VALUES_BLACKLIST, &key) {
        return false;
    }
    if strip_quotes(value).starts_with('+') || is_placeholder(value) {
        return false;
    }
    store.insert(Category::Credential, text)
}

fn cookie(raw: &str, store: &mut ResultStore) -> bool {
    let text = raw.trim();
    let Some((_, value)) = split_pair(text) else {
        return false;
    };
    let bare = strip_quotes(value);
    let lower = bare.to_ascii_lowercase();
    if ["this", "self", "null", "localstorage"]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return false;
    }
    if is_placeholder(bare) {
        return false;
    }
    store.insert(Category::Cookie, text)
}

fn id_key_pair(raw: &str, store: &mut ResultStore) -> bool {
    let text = raw.trim();
    let Some((key, value)) = split_pair(text) else {
        return false;
    };
    if in_table(tables::ID_KEY_BLACKLIST, &key) {
        return false;
    }
    let bare = strip_quotes(value);
    if is_placeholder(bare) || bare.to_ascii_lowercase().starts_with("your") {
        return false;
    }
    store.insert(Category::IdKey, text)
}

fn hash(kind: HashKind, candidate: &str, store: &mut ResultStore) -> bool {
    if candidate.len() != kind.hex_len() || !candidate.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    if candidate.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let mut chars = candidate.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c.eq_ignore_ascii_case(&first)) {
            return false;
        }
    }
    store.insert_hash(kind, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(text: &str) -> Hit<'_> {
        Hit {
            text,
            prev: None,
            next: None,
        }
    }

    fn run(route: Route, text: &str) -> ResultStore {
        let tax = Taxonomy::new().unwrap();
        let mut store = ResultStore::new();
        apply(route, &hit(text), &tax, &mut store);
        store
    }

    #[test]
    fn test_domain_whitelist_and_blacklist() {
        assert!(run(Route::Domain, "api.github.com").is_empty());
        assert!(run(Route::Domain, "window.top").is_empty());
        assert!(run(Route::Domain, "this.options.top").is_empty());
        assert!(run(Route::Domain, "api.target.com").contains(Category::Domain, "api.target.com"));
    }

    #[test]
    fn test_internal_domain_exempt_from_whitelist() {
        let store = run(Route::Domain, "oa.corp.qq.com");
        assert!(store.contains(Category::InternalDomain, "oa.corp.qq.com"));
        assert_eq!(store.len(Category::Domain), 0);
    }

    #[test]
    fn test_domain_resource_extracts_host() {
        let store = run(Route::DomainResource, "\"https://cdn.target.com:8443/static/a.js\"");
        assert!(store.contains(Category::Domain, "cdn.target.com:8443"));
        let store = run(Route::DomainResource, "'//img.target.cn/x.png'");
        assert!(store.contains(Category::Domain, "img.target.cn"));
    }

    #[test]
    fn test_ip_classification() {
        assert!(run(Route::Ip, "0.0.0.0").is_empty());
        assert!(run(Route::Ip, "255.255.255.255").is_empty());
        assert!(run(Route::Ip, "192.168.1.100").contains(Category::InternalIp, "192.168.1.100"));
        assert!(run(Route::Ip, "8.8.8.8:53").contains(Category::Ip, "8.8.8.8:53"));
        assert!(run(Route::IpResource, "\"http://10.1.2.3:8080/api\"").contains(Category::InternalIp, "10.1.2.3:8080"));
    }

    #[test]
    fn test_path_routing() {
        assert!(run(Route::Path, "\"/api/v1/users\"").contains(Category::AbsoluteApi, "/api/v1/users"));
        assert!(run(Route::Path, "'user/list'").contains(Category::Api, "user/list"));
        assert!(run(Route::Path, "\"./components/Header\"").contains(Category::ModuleFile, "./components/Header"));
        assert!(run(Route::Path, "\"/static/app.js?v=2\"").contains(Category::JsFile, "/static/app.js?v=2"));
        assert!(run(Route::Path, "\"/views/Home.vue\"").contains(Category::VueFile, "/views/Home.vue"));
        assert!(run(Route::Path, "\"/files/report.pdf\"").contains(Category::DocFile, "/files/report.pdf"));
        assert!(run(Route::Path, "\"/img/logo.png\"").contains(Category::ImageFile, "/img/logo.png"));
    }

    #[test]
    fn test_path_exclusions() {
        assert!(run(Route::Path, "\"text/html\"").is_empty());
        assert!(run(Route::Path, "\"application/json\"").is_empty());
        assert!(run(Route::Path, "\"yyyy/MM/dd\"").is_empty());
        assert!(run(Route::Path, "\"/lib/jquery-3.6.0.min.js\"").is_empty());
        assert!(run(Route::Path, "\"/css/main.css\"").is_empty());
    }

    #[test]
    fn test_credential_filter() {
        assert!(run(Route::Credential, "user_id = \"abc\"").is_empty());
        let store = run(Route::Credential, "admin_password = \"s3cr3t!\"");
        assert!(store.contains(Category::Credential, "admin_password = \"s3cr3t!\""));
        assert!(run(Route::Credential, "password: \"\"").is_empty());
        assert!(run(Route::Credential, "password: \"+value\"").is_empty());
        assert!(run(Route::Credential, "pwd = \"******\"").is_empty());
    }

    #[test]
    fn test_cookie_filter() {
        assert!(run(Route::Cookie, "token: this").is_empty());
        assert!(run(Route::Cookie, "token = null").is_empty());
        assert!(run(Route::Cookie, "token=\"localStorage\"").is_empty());
        let store = run(Route::Cookie, "JSESSIONID=8A3F0C21B9");
        assert!(store.contains(Category::Cookie, "JSESSIONID=8A3F0C21B9"));
    }

    #[test]
    fn test_id_key_generic_blacklist() {
        assert!(run(Route::IdKeyGeneric, "rowKey: \"id-field\"").is_empty());
        assert!(run(Route::IdKeyGeneric, "size = 'medium1'").is_empty());
        assert!(run(Route::IdKeyGeneric, "secretKey: \"your-secret-key\"").is_empty());
        let store = run(Route::IdKeyGeneric, "accessKeySecret: \"q8Zx2LmN0pR4\"");
        assert!(store.contains(Category::IdKey, "accessKeySecret: \"q8Zx2LmN0pR4\""));
    }

    #[test]
    fn test_provider_keys_are_labelled() {
        let store = run(Route::IdKey("Aliyun AccessKey"), "LTAI5tQ9xWz3Yb8Kc2Pd");
        assert!(store.contains(Category::IdKey, "Aliyun AccessKey: LTAI5tQ9xWz3Yb8Kc2Pd"));
    }

    #[test]
    fn test_id_card_dates() {
        assert!(run(Route::IdCard, "11010519491231002X").contains(Category::IdCard, "11010519491231002X"));
        assert!(run(Route::IdCard, "110105491300123").is_empty());
    }

    #[test]
    fn test_url_routing() {
        let store = run(Route::Url, "https://github.com/org/repo");
        assert!(store.contains(Category::GithubUrl, "https://github.com/org/repo"));
        assert!(run(Route::Url, "https://www.baidu.com/s?wd=1").is_empty());
        assert!(run(Route::Url, "https://admin.target.com/login").contains(Category::Url, "https://admin.target.com/login"));
    }

    #[test]
    fn test_hash_filters_trivial_runs() {
        let tax = Taxonomy::new().unwrap();
        let mut store = ResultStore::new();
        assert!(!apply(Route::Hash(HashKind::Md5), &hit(&"0".repeat(32)), &tax, &mut store));
        assert!(!apply(Route::Hash(HashKind::Md5), &hit(&"a".repeat(32)), &tax, &mut store));
        assert!(apply(
            Route::Hash(HashKind::Md5),
            &hit("d41d8cd98f00b204e9800998ecf8427e"),
            &tax,
            &mut store
        ));
        assert_eq!(store.hash_len(HashKind::Md5), 1);
    }

    #[test]
    fn test_email_rejects_retina_assets() {
        assert!(run(Route::Email, "logo@2x.png").is_empty());
        assert!(run(Route::Email, "ops@target.com").contains(Category::Email, "ops@target.com"));
    }
}
