use crate::fingerprint::FingerprintRecord;
use crate::reporting::model::ScanReport;
use crate::taxonomy::{Category, HashKind};
use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

// ==============================
// BOX CONFIGURATION
// ==============================

const BOX_WIDTH: usize = 70;
const INNER_WIDTH: usize = BOX_WIDTH - 2;

fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn top_border() -> String {
    format!("╔{}╗", "═".repeat(INNER_WIDTH))
}

fn middle_border() -> String {
    format!("╠{}╣", "═".repeat(INNER_WIDTH))
}

fn bottom_border() -> String {
    format!("╚{}╝", "═".repeat(INNER_WIDTH))
}

/// Left-aligned box line; CJK content is measured by display width.
fn box_line(content: &str) -> String {
    let padded = format!(" {} ", content);
    let padding = INNER_WIDTH.saturating_sub(visual_width(&padded));
    format!("║{}{}║", padded, " ".repeat(padding))
}

fn box_line_centered(content: &str) -> String {
    let padded = format!(" {} ", content);
    let width = visual_width(&padded);
    if width >= INNER_WIDTH {
        return box_line(content);
    }
    let left = (INNER_WIDTH - width) / 2;
    let right = INNER_WIDTH - width - left;
    format!("║{}{}{}║", " ".repeat(left), padded, " ".repeat(right))
}

// ==============================
// MAIN REPORT RENDERER
// ==============================

pub fn render(report: &ScanReport) -> String {
    let mut out = String::new();

    // ------------------------------
    // SUMMARY BOX
    // ------------------------------
    let _ = writeln!(out, "\n{}", top_border());
    let _ = writeln!(out, "{}", box_line_centered("PAGESIFT SCAN SUMMARY"));
    let _ = writeln!(out, "{}", middle_border());
    let _ = writeln!(out, "{}", box_line(&format!("Target:     {}", report.target)));
    let _ = writeln!(
        out,
        "{}",
        box_line(&format!(
            "Document:   HTTP {}  {} bytes  {} ms",
            report.document.status, report.document.body_len, report.document.elapsed_ms
        ))
    );
    let _ = writeln!(
        out,
        "{}",
        box_line(&format!(
            "Sources:    {} scanned, {} duplicate",
            report.stats.sources_scanned, report.stats.sources_skipped
        ))
    );
    let _ = writeln!(
        out,
        "{}",
        box_line(&format!(
            "Scripts:    {} fetched, {} failed",
            report.stats.scripts_fetched, report.stats.scripts_failed
        ))
    );
    let _ = writeln!(
        out,
        "{}",
        box_line(&format!("Categories: {} with findings", report.badge.count))
    );
    let _ = writeln!(out, "{}", bottom_border());

    // ------------------------------
    // FINDINGS
    // ------------------------------
    if report.badge.count == 0 {
        let _ = writeln!(out, "\nNo sensitive content found.");
    }

    for category in Category::ALL {
        let items = report.results.get(category);
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n[+] {} ({})", category.label(), items.len());
        for item in items {
            let _ = writeln!(out, "   {}", item);
        }
    }

    for kind in HashKind::ALL {
        let items = report.results.hashes(kind);
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n[+] {} Hashes ({})", kind.as_str(), items.len());
        for item in items {
            let _ = writeln!(out, "   {}", item);
        }
    }

    if let Some(fp) = &report.fingerprint {
        render_fingerprint(&mut out, fp);
    }

    out
}

fn render_fingerprint(out: &mut String, fp: &FingerprintRecord) {
    let _ = writeln!(out, "\n{}", "═".repeat(BOX_WIDTH));
    let _ = writeln!(out, "SERVER FINGERPRINT");
    let _ = writeln!(out, "{}", "═".repeat(BOX_WIDTH));

    if fp.is_empty() {
        let _ = writeln!(out, "   No fingerprint signals");
        return;
    }

    if let Some(server) = &fp.server {
        let _ = writeln!(out, "   Server:     {}", server);
    }
    if let Some(components) = &fp.server_components {
        if let Some(ws) = &components.web_server {
            let mut line = ws.name.clone();
            if let Some(sub) = &ws.sub_type {
                line.push_str(&format!(" {}", sub));
            }
            if let Some(v) = &ws.version {
                line.push_str(&format!(" {}", v));
            }
            if let Some(c) = &ws.component {
                line.push_str(&format!(" ({} {})", c.name, c.version.as_deref().unwrap_or("")));
            }
            let _ = writeln!(out, "   Web server: {}", line.trim_end());
        }
        if let Some(os) = &components.os {
            let _ = writeln!(out, "   OS:         {} ({})", os.name, os.version);
        }
        for ext in &components.extensions {
            let _ = writeln!(
                out,
                "   Extension:  {} {} [{:?}]",
                ext.name,
                ext.version.as_deref().unwrap_or("-"),
                ext.kind
            );
        }
        for module in &components.modules {
            let _ = writeln!(
                out,
                "   Module:     {} {}",
                module.name,
                module.version.as_deref().unwrap_or("-")
            );
        }
    }
    if let Some(t) = &fp.technology {
        let _ = writeln!(out, "   Technology: {}  ({})", t.name, t.description);
    }
    if let Some(s) = &fp.security {
        let _ = writeln!(out, "   Security:   {}  ({})", s.name, s.description);
    }
    if let Some(a) = &fp.analytics {
        let _ = writeln!(out, "   Analytics:  {}", a.name);
    }
    if let Some(b) = &fp.builder {
        let _ = writeln!(out, "   Builder:    {}", b.name);
    }
    for (name, value) in &fp.headers {
        let _ = writeln!(out, "   Header:     {}: {}", name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::tests::sample_report;

    #[test]
    fn test_box_lines_have_fixed_width() {
        assert_eq!(visual_width(&box_line("联系电话 13912345678")), BOX_WIDTH);
        assert_eq!(visual_width(&box_line_centered("x")), BOX_WIDTH);
    }

    #[test]
    fn test_render_lists_non_empty_categories() {
        let text = render(&sample_report());
        assert!(text.contains("Phone Numbers (1)"));
        assert!(text.contains("13912345678"));
        assert!(!text.contains("Emails ("));
        assert!(text.contains("Web server: Nginx 1.18.0"));
    }
}
