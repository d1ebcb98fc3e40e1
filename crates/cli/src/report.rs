use crate::batch::BatchSummary;
use sonus_span_engine::ConsolidationReport;

/// One line per document plus a total, for terminal output
pub fn render_summary(summary: &BatchSummary) -> String {
    let mut out = String::new();

    for doc in &summary.processed {
        let target = match &doc.output {
            Some(path) => format!(" -> {}", path.display()),
            None => " (dry run)".to_string(),
        };
        out.push_str(&format!(
            "ok     {}{target}: {}\n",
            doc.input.display(),
            describe(&doc.report)
        ));
    }
    for doc in &summary.failed {
        out.push_str(&format!("failed {}: {}\n", doc.input.display(), doc.reason));
    }

    out.push_str(&format!(
        "{} document(s): {} processed, {} failed; {}",
        summary.documents(),
        summary.processed.len(),
        summary.failed.len(),
        describe(&summary.total)
    ));
    out
}

fn describe(report: &ConsolidationReport) -> String {
    format!(
        "{} change(s) (merged {}, vacuous {}, arbitrated {}, deduplicated {}, disjoint {}, pattern {}, speaker {})",
        report.total_changes(),
        report.merged,
        report.vacuous_removed,
        report.arbitrated,
        report.deduplicated,
        report.disjoint_merged,
        report.pattern_wrapped,
        report.speaker_scrubbed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{FailedDocument, ProcessedDocument};
    use std::path::PathBuf;

    #[test]
    fn renders_documents_and_total() {
        let report = ConsolidationReport {
            merged: 2,
            ..ConsolidationReport::default()
        };
        let summary = BatchSummary {
            dry_run: false,
            processed: vec![ProcessedDocument {
                input: PathBuf::from("in/a.xml"),
                output: Some(PathBuf::from("out/a.xml")),
                report,
            }],
            failed: vec![FailedDocument {
                input: PathBuf::from("in/b.xml"),
                reason: "Failed to load in/b.xml".to_string(),
            }],
            total: report,
        };

        let text = render_summary(&summary);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ok     in/a.xml -> out/a.xml: 2 change(s)"));
        assert!(lines[1].starts_with("failed in/b.xml"));
        assert!(lines[2].starts_with("2 document(s): 1 processed, 1 failed"));
    }
}
