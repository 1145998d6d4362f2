//! Static membership tables consulted by the validators.

/// Registrable domains that are never reported as leaked hosts.
pub const DOMAIN_WHITELIST: &[&str] = &[
    "github.com",
    "360.net",
    "bing.com",
    "csdn.net",
    "bilibili.com",
    "google.com",
    "youtube.com",
    "microsoft.com",
    "apple.com",
    "mozilla.org",
    "aliyun.com",
    "feishu.cn",
    "mklab.cn",
    "cnnvd.org.cn",
    "qq.com",
    "baidu.com",
];

/// Code expressions that happen to parse as a host name.
pub const DOMAIN_BLACKLIST: &[&str] = &[
    "el.datepicker.today",
    "obj.style.top",
    "window.top",
    "mydragdiv.style.top",
    "container.style.top",
];

/// Whole host labels that mark a host as internal infrastructure.
pub const INTERNAL_HOST_LABELS: &[&str] = &[
    "internal", "intranet", "corp", "local", "lan", "dev", "test", "uat", "staging", "oa", "vpn",
];

pub const GITHUB_HOSTS: &[&str] = &[
    "github.com",
    "www.github.com",
    "gist.github.com",
    "raw.githubusercontent.com",
    "gist.githubusercontent.com",
    "api.github.com",
];

pub const RESERVED_IPS: &[&str] = &["0.0.0.0", "255.255.255.255"];

/// Literal path values that look like API paths but are MIME types, editor
/// module ids, vendor pseudo-paths or date formats.
pub const FILTERED_CONTENT_TYPES: &[&str] = &[
    "application/msword",
    "application/vnd.ms-word.document.macroenabled.12",
    "application/vnd.ms-word.template.macroenabled.12",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.template",
    "application/vnd.ms-excel",
    "application/vnd.ms-excel.sheet.macroenabled.12",
    "application/vnd.ms-excel.template.macroenabled.12",
    "application/vnd.ms-excel.addin.macroenabled.12",
    "application/vnd.ms-excel.sheet.binary.macroenabled.12",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.template",
    "application/x-xliff+xml",
    "application/pdf",
    "application/zip",
    "application/x-7z-compressed",
    "application/x-rar-compressed",
    "application/x-tar",
    "application/x-gzip",
    "application/x-bzip2",
    "application/x-xz",
    "application/x-zstd",
    "application/x-apple-diskimage",
    "application/gzip",
    "attributors/attribute/direction",
    "attributors/class/align",
    "attributors/class/background",
    "attributors/class/color",
    "attributors/class/direction",
    "attributors/class/font",
    "attributors/class/size",
    "attributors/style/align",
    "attributors/style/background",
    "attributors/style/color",
    "attributors/style/direction",
    "attributors/style/font",
    "attributors/style/size",
    "attributors/style/text-align",
    "attributors/style/text-decoration",
    "attributors/style/text-transform",
    "attributors/style/white-space",
    "attributors/style/word-break",
    "attributors/style/word-spacing",
    "attributors/style/writing-mode",
    "audio/mpeg",
    "audio/mp3",
    "audio/aac",
    "audio/ogg",
    "audio/mp4",
    "audio/adts",
    "audio/webm",
    "audio/x-pn-realaudio-plugin",
    "audio/x-mpegurl",
    "audio/x-caf",
    "audio/wav",
    "audio/flac",
    "blots/",
    "blots/block",
    "blots/block/embed",
    "blots/break",
    "blots/container",
    "blots/cursor",
    "blots/embed",
    "blots/inline",
    "blots/scroll",
    "blots/text",
    "core/theme",
    "core/module",
    "css/",
    "css/lib",
    "css/plugin",
    "formats/",
    "formats/align",
    "formats/background",
    "formats/color",
    "formats/direction",
    "formats/font",
    "formats/size",
    "formats/text-align",
    "formats/indent",
    "formats/blockquote",
    "formats/code-block",
    "formats/header",
    "formats/list",
    "formats/bold",
    "formats/code",
    "formats/italic",
    "formats/link",
    "formats/script",
    "formats/strike",
    "formats/underline",
    "formats/image",
    "formats/video",
    "formats/list/item",
    "formats/ins",
    "formats/divider",
    "image/",
    "image/jpeg",
    "image/gif",
    "image/bmp",
    "image/png",
    "image/x-png",
    "image/webp",
    "image/svg+xml",
    "image/x-emf",
    "image/x-wmf",
    "image/x-icon",
    "image/tiff",
    "image/heic",
    "js/",
    "js/lib",
    "js/plugin",
    "modules/",
    "modules/formula",
    "modules/syntax",
    "modules/toolbar",
    "modules/history",
    "modules/clipboard",
    "modules/keyboard",
    "modules/imageresize",
    "multipart/form-data",
    "node_modules/",
    "pause/break",
    "partial/ajax",
    "text/yaml",
    "text/markdown",
    "text/plain",
    "text/csv",
    "text/html",
    "text/xml",
    "text/css",
    "text/javascript",
    "text/json",
    "text/x-yaml",
    "text/tab-separated-values",
    "themes/",
    "themes/bubble",
    "themes/snow",
    "ui/icons",
    "ui/picker",
    "ui/icon-picker",
    "ui/color-picker",
    "ui/tooltip",
    "video/mp2t",
    "video/mp4",
    "video/ogg",
    "video/webm",
    "video/x-msvideo",
    "video/x-matroska",
    "video/x-ms-asf",
    "video/quicktime",
    "video/x-mpegurl",
    "video/mpegurl",
    "chrome/",
    "firefox/",
    "edge/",
    "examples/element-ui",
    "static/js/",
    "static/css/",
    "stylesheet/less",
    "jpg/jpeg/png/pdf",
    "yyyy/mm/dd",
    "dd/mm/yyyy",
    "mm/dd/yy",
    "yy/mm/dd",
    "m/d/y",
    "xx/xx",
    "zrender/vml/vml",
];

/// Filename rules for vendored third-party libraries. Matched against the
/// last path segment only.
pub const SKIP_LIBRARY_PATTERNS: &[&str] = &[
    r"(?i)jquery(?:[.-]?\d*\.?\d*\.?\d*)?(?:[.-]cookie)?(?:[.-]fancybox)?(?:[.-]validate)?(?:[.-]artdialog)?(?:[.-]blockui)?(?:[.-]pack)?(?:[.-]base64)?(?:[.-]md5)?(?:[.-]min)?\.js$",
    r"(?i)(?:vue|vue-router|vuex)[.-]?\d*\.?\d*\.?\d*(?:\.min)?\.js$",
    r"(?i)(?:react|react-dom)[.-]?\d*\.?\d*\.?\d*(?:\.min)?\.js$",
    r"(?i)bootstrap(?:\.bundle)?[.-]?\d*\.?\d*\.?\d*(?:\.min)?\.js$",
    r"(?i)(?:layui|layer|liger|h-ui|element-ui|ueditor|kindeditor|ant-design)[.-]?\d*\.?\d*\.?\d*(?:[.-]all)?(?:\.admin)?(?:\.config)?(?:[.-]min)?\.js$",
    r"(?i)(?:echarts|chart|highcharts)[.-]?\d*\.?\d*\.?\d*(?:\.min)?\.js$",
    r"(?i)(?:lodash|moment|tableexport|axios|plupload|pqgrid)[.-]?\d*\.?\d*\.?\d*(?:\.full)?(?:\.min)?\.js$",
    r"(?i)(?:polyfill|modernizr|device|less|isotope\.pkgd|lhgdialog|kendo\.web|seajs-style|seajs-text|tinymce|jsencrypt|backbone|select2|underscore|ext-all|ext-unigui-min|exporter|v5_float_4)[.-]?\d*\.?\d*\.?\d*(?:[.-]dev)?(?:[.-]min)?\.js$",
    r"(?i)(?:datepicker|datetimepicker|wdatepicker|laydate)[.-]?\d*\.?\d*\.?\d*(?:\.min)?\.js$",
    r"(?i)(?:zh|en|zh-cn|zh-tw|ja|ko)[.-]?\d*\.?\d*\.?\d*(?:\.min)?\.js$",
];

/// Substrings a credential or cookie match must contain (case-insensitive).
pub const SENSITIVE_STEMS: &[&str] = &[
    "pwd", "pass", "user", "admin", "root", "sys", "test", "token", "sessid",
];

/// Key names that contain a sensitive stem but are ordinary identifiers.
pub const VALUES_BLACKLIST: &[&str] = &[
    "user_id",
    "userid",
    "user-id",
    "user_type",
    "usertype",
    "user_agent",
    "useragent",
    "user_info",
    "userinfo",
    "user_list",
    "userlist",
    "user_name_label",
    "username_label",
    "usercount",
    "user_count",
    "users",
    "sys_id",
    "sysid",
    "system",
    "systype",
    "sys_type",
    "test_id",
    "testid",
    "tests",
    "testing",
    "is_admin",
    "isadmin",
    "admin_id",
    "adminid",
    "root_id",
    "rootid",
    "root_path",
    "rootpath",
    "rootdir",
    "passive",
    "bypass",
    "compass",
    "pass_type",
    "passtype",
    "pwd_type",
    "pwdtype",
    "password_type",
    "passwordtype",
    "show_password",
    "showpassword",
    "password_visible",
    "passwordvisible",
];

/// Generic field names that match the catch-all secret key pattern.
pub const ID_KEY_BLACKLIST: &[&str] = &[
    "size",
    "row",
    "rows",
    "key",
    "keys",
    "keycode",
    "keyword",
    "keywords",
    "keyframes",
    "keyboard",
    "sortkey",
    "rowkey",
    "row-key",
    "row_key",
    "datakey",
    "nodekey",
    "node-key",
    "valuekey",
    "labelkey",
    "childrenkey",
    "expandedkeys",
    "checkedkeys",
    "selectedkeys",
    "hotkey",
    "monkey",
    "cachekey",
    "storagekey",
];

/// Values that only stand in for a real secret.
pub const PLACEHOLDER_VALUES: &[&str] = &[
    "",
    "null",
    "nil",
    "none",
    "undefined",
    "true",
    "false",
    "string",
    "value",
    "key",
    "secret",
    "password",
    "test",
    "xxx",
    "xxxx",
    "xxxxxx",
    "******",
    "changeme",
    "placeholder",
];
