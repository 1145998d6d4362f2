pub mod badge;
pub mod json;
pub mod model;
pub mod text;

use crate::cli::args::OutputFormat;
use anyhow::Context as _;
use model::ScanReport;
use std::path::Path;

pub fn render(report: &ScanReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => json::render(report),
        OutputFormat::Text => Ok(text::render(report)),
    }
}

/// Writes to `path` when given, stdout otherwise.
pub fn emit(report: &ScanReport, format: OutputFormat, path: Option<&Path>) -> anyhow::Result<()> {
    let rendered = render(report, format)?;
    match path {
        Some(path) => {
            std::fs::write(path, rendered).with_context(|| format!("writing report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::badge::Badge;
    use super::model::{DocumentMeta, ScanReport, ScanStats};
    use crate::fingerprint::record::{ServerComponents, WebServer};
    use crate::fingerprint::FingerprintRecord;
    use crate::scan::store::ResultStore;
    use crate::taxonomy::Category;

    pub fn sample_report() -> ScanReport {
        let mut store = ResultStore::new();
        store.insert(Category::Phone, "13912345678");
        ScanReport {
            target: "https://target.example/".into(),
            session: "cli".into(),
            document: DocumentMeta {
                url: "https://target.example/".into(),
                status: 200,
                body_len: 42,
                body_sha256: "00".into(),
                elapsed_ms: 12,
            },
            stats: ScanStats::default(),
            badge: Badge::from_count(store.non_empty_categories()),
            results: store.snapshot(),
            fingerprint: Some(FingerprintRecord {
                server: Some("nginx/1.18.0".into()),
                server_components: Some(ServerComponents {
                    web_server: Some(WebServer::named("Nginx", Some("1.18.0".into()))),
                    ..Default::default()
                }),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_emit_to_file() {
        let path = std::env::temp_dir().join(format!("pagesift-report-{}.json", std::process::id()));
        super::emit(&sample_report(), crate::cli::args::OutputFormat::Json, Some(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("13912345678"));
        let _ = std::fs::remove_file(path);
    }
}
