use crate::reporting::model::ScanReport;
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    scan_metadata: ScanMetadata,
    #[serde(flatten)]
    report: &'a ScanReport,
}

#[derive(Serialize)]
struct ScanMetadata {
    tool: String,
    version: String,
    scan_date: String,
    report_format: String,
}

pub fn render(report: &ScanReport) -> anyhow::Result<String> {
    let report = Report {
        scan_metadata: ScanMetadata {
            tool: "PageSift".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            scan_date: chrono::Utc::now().to_rfc3339(),
            report_format: "application/json".to_string(),
        },
        report,
    };

    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::tests::sample_report;

    #[test]
    fn test_render_shape() {
        let json: serde_json::Value = serde_json::from_str(&render(&sample_report()).unwrap()).unwrap();
        assert_eq!(json["scan_metadata"]["tool"], "PageSift");
        assert_eq!(json["results"]["phones"][0], "13912345678");
        assert_eq!(json["badge"]["color"], "#4dabf7");
        assert_eq!(json["fingerprint"]["serverComponents"]["webServer"]["name"], "Nginx");
    }
}
