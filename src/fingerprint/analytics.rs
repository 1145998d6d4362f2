use crate::fingerprint::record::AnalyticsProfile;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsProvider {
    Baidu,
    Yahoo,
    Google,
}

impl AnalyticsProvider {
    pub const ALL: [AnalyticsProvider; 3] = [
        AnalyticsProvider::Baidu,
        AnalyticsProvider::Yahoo,
        AnalyticsProvider::Google,
    ];

    fn host(&self) -> &'static str {
        match self {
            AnalyticsProvider::Baidu => "hm.baidu.com",
            AnalyticsProvider::Yahoo => "analytics.yahoo.com",
            AnalyticsProvider::Google => "www.google-analytics.com",
        }
    }

    fn path_prefix(&self) -> &'static str {
        match self {
            AnalyticsProvider::Baidu => "/hm.js",
            _ => "/",
        }
    }

    /// Provider whose collection endpoint `url` points at, if any.
    pub fn match_url(url: &str) -> Option<AnalyticsProvider> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        Self::ALL
            .into_iter()
            .find(|p| host.eq_ignore_ascii_case(p.host()) && parsed.path().starts_with(p.path_prefix()))
    }

    pub fn profile(&self) -> AnalyticsProfile {
        let (name, version) = match self {
            AnalyticsProvider::Baidu => ("Baidu Tongji", "Baidu Analytics"),
            AnalyticsProvider::Yahoo => ("Yahoo Analytics", "Yahoo Analytics"),
            AnalyticsProvider::Google => ("Google Analytics", "Google Analytics"),
        };
        AnalyticsProfile {
            name: name.into(),
            description: format!(
                "{} identified from an outgoing request; visitor data is reported to a third party",
                name
            ),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_urls() {
        assert_eq!(
            AnalyticsProvider::match_url("https://hm.baidu.com/hm.js?abc123"),
            Some(AnalyticsProvider::Baidu)
        );
        assert_eq!(AnalyticsProvider::match_url("https://hm.baidu.com/other.js"), None);
        assert_eq!(
            AnalyticsProvider::match_url("http://www.google-analytics.com/analytics.js"),
            Some(AnalyticsProvider::Google)
        );
        assert_eq!(
            AnalyticsProvider::match_url("https://analytics.yahoo.com/x"),
            Some(AnalyticsProvider::Yahoo)
        );
        assert_eq!(AnalyticsProvider::match_url("https://cdn.example.com/a.js"), None);
        assert_eq!(AnalyticsProvider::match_url("not a url"), None);
    }
}
