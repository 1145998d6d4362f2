//! Global context for scan execution

use crate::cli::args::{Cli, OutputFormat};
use anyhow::Context as _;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub struct Context {
    pub target: Url,
    pub session: String,
    pub concurrency: usize,
    pub rate_limit: u32,
    pub timeout: Duration,
    pub fetch_scripts: bool,
    pub fingerprint: bool,
    pub settle_delay: Duration,
    pub emit_interval: Duration,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let raw = cli
            .target
            .ok_or_else(|| anyhow::anyhow!("a target URL is required"))?;
        let target = Url::parse(raw.trim()).with_context(|| format!("invalid target URL: {}", raw))?;
        if !matches!(target.scheme(), "http" | "https") {
            anyhow::bail!("unsupported scheme {}: only http and https targets are scanned", target.scheme());
        }

        Ok(Self {
            target,
            session: cli.session,
            concurrency: cli.concurrency.max(1),
            rate_limit: cli.rate,
            timeout: Duration::from_secs(cli.timeout.max(1)),
            fetch_scripts: !cli.no_scripts,
            fingerprint: !cli.no_fingerprint,
            settle_delay: Duration::from_millis(cli.settle_ms),
            emit_interval: Duration::from_millis(cli.emit_ms),
            output_format: cli.format,
            output_file: cli.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn ctx(args: &[&str]) -> anyhow::Result<Context> {
        let mut argv = vec!["pagesift"];
        argv.extend_from_slice(args);
        Context::from_cli(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn test_maps_flags() {
        let c = ctx(&["-t", "https://example.com/app", "--no-scripts", "--concurrency", "0", "--settle-ms", "0"]).unwrap();
        assert_eq!(c.target.as_str(), "https://example.com/app");
        assert!(!c.fetch_scripts);
        assert!(c.fingerprint);
        assert_eq!(c.concurrency, 1);
        assert_eq!(c.settle_delay, Duration::ZERO);
    }

    #[test]
    fn test_rejects_bad_targets() {
        assert!(ctx(&["-t", "not a url"]).is_err());
        assert!(ctx(&["-t", "ftp://example.com/"]).is_err());
    }
}
