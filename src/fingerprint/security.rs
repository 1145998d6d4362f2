use crate::fingerprint::record::SecurityProfile;

pub fn from_hsts(value: &str) -> SecurityProfile {
    let max_age = value
        .split(';')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .map(|v| v.trim_matches('"'))
        .find(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or("unknown")
        .to_string();

    SecurityProfile {
        name: "HSTS".into(),
        description: format!(
            "HSTS policy enabled via Strict-Transport-Security, max-age={} seconds",
            max_age
        ),
        version: Some(max_age),
        provider: Some("Strict-Transport-Security".into()),
        extra: None,
    }
}

pub fn from_xss_protection(value: &str) -> SecurityProfile {
    let enabled = value.trim_start().starts_with('1');
    let block = if value.contains("mode=block") {
        " with blocking mode"
    } else {
        ""
    };
    SecurityProfile {
        name: "XSS Protection".into(),
        description: format!(
            "XSS filter {} via X-XSS-Protection{}",
            if enabled { "enabled" } else { "disabled" },
            block
        ),
        version: Some(if enabled { "1" } else { "0" }.into()),
        provider: Some("X-XSS-Protection".into()),
        extra: None,
    }
}

/// `X-Safe-Firewall: zhuji.360.cn 1.0.8.8 F1W1` (360 host firewall).
pub fn from_safe_firewall(value: &str) -> Option<SecurityProfile> {
    if !value.contains("zhuji.360.cn") {
        return None;
    }
    let mut parts = value.split_whitespace().map(str::to_string);
    let provider = parts.next();
    let version = parts.next();
    let extra = parts.next();
    Some(SecurityProfile {
        name: "360 Host Firewall".into(),
        description: format!(
            "360 host firewall identified via X-Safe-Firewall, version {}, extra {}",
            version.as_deref().unwrap_or("unknown"),
            extra.as_deref().unwrap_or("none")
        ),
        version,
        provider,
        extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsts_max_age() {
        let s = from_hsts("max-age=31536000; includeSubDomains");
        assert_eq!(s.version.as_deref(), Some("31536000"));
        assert_eq!(s.provider.as_deref(), Some("Strict-Transport-Security"));
        assert_eq!(from_hsts("includeSubDomains").version.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_xss_protection() {
        let s = from_xss_protection("1; mode=block");
        assert_eq!(s.version.as_deref(), Some("1"));
        assert!(s.description.contains("blocking"));
        assert_eq!(from_xss_protection("0").version.as_deref(), Some("0"));
    }

    #[test]
    fn test_safe_firewall() {
        let s = from_safe_firewall("zhuji.360.cn 1.0.8.8 F1W1").unwrap();
        assert_eq!(s.provider.as_deref(), Some("zhuji.360.cn"));
        assert_eq!(s.version.as_deref(), Some("1.0.8.8"));
        assert_eq!(s.extra.as_deref(), Some("F1W1"));
        assert!(from_safe_firewall("other-firewall 2.0").is_none());
    }
}
