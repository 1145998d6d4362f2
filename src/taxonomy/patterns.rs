//! Regex sources for every category.
//!
//! The `regex` crate has no look-around. Constraints that would need
//! `(?<!…)`/`(?!…)` live in the boundary guards declared next to each rule
//! in `taxonomy::Taxonomy::new`.

macro_rules! tlds {
    () => {
        "wang|club|xyz|vip|top|beer|work|ren|technology|fashion|luxe|yoga|red|love|online|ltd|chat|group|pub|run|city|live|kim|pet|space|site|tech|host|fun|store|pink|ski|design|ink|wiki|video|email|company|plus|center|cool|fund|gold|guru|life|show|team|today|world|zone|social|bio|black|blue|green|lotto|organic|poker|promo|vote|archi|voto|fit|cn|website|press|icu|art|law|shop|band|media|cab|cash|cafe|games|link|fan|net|cc|com|fans|cloud|info|pro|mobi|asia|studio|biz|vin|news|fyi|tax|tv|market|shopping|mba|sale|co|org"
    };
}

macro_rules! octet {
    () => {
        r"(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])"
    };
}

macro_rules! dotted_quad {
    () => {
        concat!(r"(?:", octet!(), r"\.){3}", octet!())
    };
}

macro_rules! credential_stems {
    () => {
        "pwd|pass|user|admin|root|sys|test"
    };
}

pub const DOMAIN: &str = concat!(
    r"\b(?:[a-z0-9%-]+\.)*[a-z0-9%-]{2,}\.(?:",
    tlds!(),
    r")(?::[0-9]{1,5})?\b"
);

pub const DOMAIN_RESOURCE: &str = concat!(
    r#"["'](?:(?:[a-z0-9]+:)?//)?(?:[a-z0-9%-]+\.)+(?:"#,
    tlds!(),
    r#")(?::[0-9]{1,5})?(?:[/?#][^\s"']*)?["']"#
);

/// Sanity check applied to a host extracted from a domain match.
pub const DOMAIN_FILTER: &str = r"^(?:[a-zA-Z0-9%-]+\.)+[a-z]{2,10}(?::[0-9]{1,5})?$";

pub const IP: &str = concat!(dotted_quad!(), r"(?::[0-9]{1,5})?");

pub const IP_RESOURCE: &str = concat!(
    r#"["'](?:(?:[a-zA-Z0-9%-]+:)?//)?"#,
    dotted_quad!(),
    r#"(?::[0-9]{1,5}|/)?[^\s"']*["']"#
);

pub const API: &str = r#"["'`](?:/|\.\./|\./)[^/>< )(},'"\\][^\^>< )({},'"\\]*?["'`]|["'`][a-zA-Z0-9_]+/[^\^>< )({},'"\\]*?["'`]"#;

pub const PHONE: &str =
    r"(?:13[0-9]|14[01456879]|15[0-35-9]|16[2567]|17[0-8]|18[0-9]|19[0-35-9])[0-9]{8}";

pub const EMAIL: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(?:\.[a-zA-Z]{2,})?";

pub const ID_CARD: &str = r"[0-9]{6}(?:18|19|20)[0-9]{2}(?:0[1-9]|1[0-2])(?:[0-2][0-9]|3[01])[0-9]{3}[0-9Xx]|[0-9]{8}(?:0[1-9]|1[0-2])(?:[0-2][0-9]|3[01])[0-9]{3}";

pub const URL: &str = r#"(?i)(?:https?|wss?|ftp)://(?:(?:[\w-]+\.)+[a-z]{2,}|(?:[0-9]{1,3}\.){3}[0-9]{1,3})(?::[0-9]{2,5})?(?:/[^\s>)}<'"]*)?"#;

pub const JWT: &str = r#"["'](?:ey[A-Za-z0-9_-]{10,}\.[A-Za-z0-9._-]{10,}|ey[A-Za-z0-9_/+-]{10,}\.[A-Za-z0-9._/+-]{10,})["']"#;

pub const AWS_KEY: &str = r"AKIA[0-9A-Z]{16}";

pub const COMPANY: &str = r"(?:[\x{4e00}-\x{9fa5}（）]{4,15}公司|[\x{4e00}-\x{9fa5}]{2,15}(?:软件|科技|集团))";

pub const CREDENTIALS: &str = concat!(
    r#"(?:"[A-Za-z0-9_]*(?:"#,
    credential_stems!(),
    r#")[A-Za-z0-9_]*"|'[A-Za-z0-9_]*(?:"#,
    credential_stems!(),
    r#")[A-Za-z0-9_]*'|\b[A-Za-z0-9_]*(?:"#,
    credential_stems!(),
    r#")[A-Za-z0-9_]*)\s*[:=]\s*(?:"[^,\s"(]*"|'[^,\s'(]*'|[0-9\s]+)"#
);

pub const COOKIE: &str = r#"\b(?:token|PHPSESSID|JSESSIONID)\s*[:=]\s*["']?[a-zA-Z0-9]+["']?"#;

/// Provider-prefixed cloud and platform keys, recorded under `idKeys` with
/// the provider label.
pub const ID_KEYS: &[(&str, &str)] = &[
    ("Aliyun AccessKey", r"LTAI[A-Za-z0-9]{12,20}"),
    ("Tencent SecretId", r"AKID[A-Za-z0-9]{13,20}"),
    ("Google API Key", r"AIza[0-9A-Za-z_-]{35}"),
    ("GitHub Token", r"gh[pousr]_[A-Za-z0-9]{36}"),
    ("Slack Token", r"xox[baprs]-[0-9A-Za-z-]{10,48}"),
];

/// Catch-all `*key*|*secret*|*oss*|*bucket*` assignment.
pub const ID_KEY_GENERIC: &str = r#"(?i)["']?\b[\w-]*(?:key|secret|oss|bucket)[\w-]*["']?\s*[:=]\s*["'][^"'\s]{6,128}["']"#;

pub const HASH_MD5: &str = r"\b[a-fA-F0-9]{32}\b";
pub const HASH_SHA1: &str = r"\b[a-fA-F0-9]{40}\b";
pub const HASH_SHA256: &str = r"\b[a-fA-F0-9]{64}\b";

// Path classification, applied to the unquoted API match.
pub const IMAGE_EXT: &str = r"(?i)\.(?:jpg|jpeg|png|gif|bmp|webp|svg|ico|mp3|mp4|m4a|wav)(?:\?[^'`]*)?$";
pub const JS_EXT: &str = r"(?i)\.(?:js|jsx|ts|tsx|less)(?:\?[^'`]*)?$";
pub const DOC_EXT: &str = r"(?i)\.(?:pdf|doc|docx|xls|xlsx|ppt|exe|apk|zip|7z|dll|dmg|pptx|txt|rar|md|swf|csv)(?:\?[^'`]*)?$";
pub const FONT_EXT: &str = r"(?i)\.(?:ttf|eot|woff|woff2|otf|css)(?:\?[^'`]*)?$";
pub const VUE_EXT: &str = r"(?i)\.vue(?:\?[^'`]*)?$";
