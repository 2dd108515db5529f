// Plain-text summary of a completed scan

use crate::scan::ScanSummary;
use std::collections::BTreeMap;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

pub const DEFAULT_TOP_WORDS: usize = 10;

/// The `limit` most frequent words, highest count first, ties alphabetical.
pub fn top_words(summary: &ScanSummary, limit: usize) -> Vec<(&str, usize)> {
    let mut words: Vec<(&str, usize)> = summary
        .word_frequencies
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    words.truncate(limit);
    words
}

/// External resource counts keyed by the tag that loads them.
pub fn resources_by_tag(summary: &ScanSummary) -> BTreeMap<&str, usize> {
    let mut by_tag: BTreeMap<&str, usize> = BTreeMap::new();
    for resource in &summary.external_resources {
        *by_tag.entry(resource.source_tag.as_str()).or_default() += 1;
    }
    by_tag
}

pub fn generate_scan_report(summary: &ScanSummary, top_n: usize) -> String {
    let mut report = String::new();
    report.push_str(RULE);
    report.push('\n');
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Target: {}\n", summary.url));
    report.push_str(&format!(
        "  Status: {} ({} ms)\n",
        summary.status_code,
        summary.response_time.as_millis()
    ));
    report.push_str(&format!(
        "  External resources: {}\n",
        summary.external_resources.len()
    ));
    for (tag, count) in resources_by_tag(summary) {
        report.push_str(&format!("    <{}> {}\n", tag, count));
    }
    report.push_str(&format!("  Privacy policy: {}\n", summary.privacy_policy_url));
    report.push_str(&format!(
        "  Words: {} total, {} distinct\n",
        summary.total_words(),
        summary.word_frequencies.len()
    ));

    report.push('\n');
    report.push_str(RULE);
    report.push('\n');

    let top = top_words(summary, top_n);
    if !top.is_empty() {
        report.push_str(&format!("## Top {} words\n", top.len()));
        let width = top.iter().map(|(word, _)| word.chars().count()).max().unwrap_or(0);
        for (word, count) in top {
            report.push_str(&format!("  {:<width$}  {}\n", word, count, width = width));
        }
        report.push('\n');
    }

    report.push_str("## Artifacts\n");
    report.push_str(&format!("  {}\n", summary.resources_path.display()));
    report.push_str(&format!("  {}\n", summary.frequencies_path.display()));

    report
}
