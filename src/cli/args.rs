use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// PageSift – passive exposure scanner for web pages
#[derive(Parser, Debug)]
#[command(
    name = "pagesift",
    version = "0.1.0",
    about = "PageSift – passive exposure scanner for web pages",
    long_about = r#"
PageSift loads a page the way a browser would, collects every piece of text
the page exposes and sorts what it finds into categories:

SENSITIVE CONTENT:
  • Domains and internal host names
  • API paths, module paths and referenced files (js/vue/docs/images)
  • Public and private IP addresses
  • Phone numbers, e-mail addresses and ID card numbers
  • JWTs, AWS access keys and cloud/platform keys
  • Hard-coded credentials and session cookies
  • MD5 / SHA1 / SHA256 digests

SERVER FINGERPRINT:
  • Web server, OS, SSL library and modules from the Server header
  • Server-side language/framework from X-Powered-By, ASP.NET and cookies
  • Security middleware (HSTS, XSS protection, WAF, host firewalls)
  • Analytics services and bundler (Webpack) detection

Only passive observation: the page, its scripts and one refetch of the
document. No credentials or cookies are ever sent.
"#,
    after_help = r#"EXAMPLES:

  pagesift -t https://example.com
  pagesift -t https://example.com --format json -o findings.json
  pagesift -t https://example.com --no-fingerprint --concurrency 16
  pagesift -t https://example.com --rate 5 --timeout 20 -v
  pagesift --show-config
"#
)]
pub struct Cli {
    // ═══════════════════════════════════════════════════════════════════
    // TARGET
    // ═══════════════════════════════════════════════════════════════════
    /// Page URL to scan
    #[arg(short = 't', long, required_unless_present = "show_config", help_heading = "Target")]
    pub target: Option<String>,

    /// Session identifier used in pushed fingerprint messages
    #[arg(long, default_value = "cli", help_heading = "Target")]
    pub session: String,

    // ═══════════════════════════════════════════════════════════════════
    // FETCHING
    // ═══════════════════════════════════════════════════════════════════
    /// Concurrent external script fetches
    #[arg(long, default_value_t = 8, help_heading = "Fetching")]
    pub concurrency: usize,

    /// Requests per second (0 = unlimited)
    #[arg(long, default_value_t = 0, help_heading = "Fetching")]
    pub rate: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, help_heading = "Fetching")]
    pub timeout: u64,

    /// Do not fetch and scan external scripts
    #[arg(long, help_heading = "Fetching")]
    pub no_scripts: bool,

    // ═══════════════════════════════════════════════════════════════════
    // ANALYSIS
    // ═══════════════════════════════════════════════════════════════════
    /// Skip server fingerprinting
    #[arg(long, help_heading = "Analysis")]
    pub no_fingerprint: bool,

    /// Delay before the baseline fingerprint is announced (ms)
    #[arg(long, default_value_t = 500, help_heading = "Analysis")]
    pub settle_ms: u64,

    /// Minimum spacing of partial scan updates (ms)
    #[arg(long, default_value_t = 100, help_heading = "Analysis")]
    pub emit_ms: u64,

    /// Print the pattern configuration as JSON and exit
    #[arg(long, help_heading = "Analysis")]
    pub show_config: bool,

    // ═══════════════════════════════════════════════════════════════════
    // OUTPUT
    // ═══════════════════════════════════════════════════════════════════
    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help_heading = "Output")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, help_heading = "Output")]
    pub output: Option<PathBuf>,

    /// Only warnings and the report
    #[arg(short, long, conflicts_with = "verbose", help_heading = "Output")]
    pub quiet: bool,

    /// Debug logging
    #[arg(short, long, help_heading = "Output")]
    pub verbose: bool,

    /// Suppress the banner
    #[arg(long, help_heading = "Output")]
    pub no_banner: bool,
}
