//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays free of presentation concerns
//! - output changes are localized

use crate::domain::{ConfidenceInterval, ScoreSummary};
use crate::report::EntryScore;

/// One-line PER summary, e.g. `PER: 12.50% [95% CI 10.00%, 15.00%]`.
pub fn format_summary_line(summary: &ScoreSummary, ci: &ConfidenceInterval) -> String {
    format!(
        "PER: {} [{}% CI {}, {}]",
        pct(summary.error_rate),
        fmt_level(ci.confidence_level),
        pct(ci.lower_bound),
        pct(ci.upper_bound),
    )
}

/// Full run summary: headline, counts, and bootstrap details.
pub fn format_run_summary(summary: &ScoreSummary, ci: &ConfidenceInterval, region: Option<&str>) -> String {
    let mut out = String::new();

    out.push_str("=== g2peval - phone error rate ===\n");
    if let Some(region) = region {
        out.push_str(&format!("Region: {region}\n"));
    }
    out.push_str(&format_summary_line(summary, ci));
    out.push('\n');
    out.push_str(&format!(
        "Entries: {} | ref phones: {} | edits: {} (ins={} del={} sub={})\n",
        summary.entries,
        summary.reference_length,
        summary.edits(),
        summary.insertions,
        summary.deletions,
        summary.substitutions,
    ));
    out.push_str(&format!(
        "Bootstrap: {} resamples over entries | std err {}\n",
        ci.resamples,
        pct(ci.standard_error),
    ));

    out
}

/// Table of the worst entries.
pub fn format_worst_entries(rows: &[EntryScore]) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        out.push_str("No entries with errors.\n");
        return out;
    }

    out.push_str("Worst entries:\n");
    out.push_str(
        format!(
            "{:<20} {:>6} {:>8} {:<28} {:<28}\n",
            "word", "edits", "rate", "reference", "hypothesis"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<20} {:-<6} {:-<8} {:-<28} {:-<28}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        let rate = r.error_rate.map(pct).unwrap_or_else(|| "n/a".to_string());
        out.push_str(
            format!(
                "{:<20} {:>6} {:>8} {:<28} {:<28}\n",
                truncate(&r.orthography, 20),
                r.edits,
                rate,
                truncate(&r.reference.join(" "), 28),
                truncate(&r.hypothesis.join(" "), 28),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn pct(v: f64) -> String {
    format!("{:.2}%", v * 100.0)
}

fn fmt_level(level: f64) -> String {
    let p = level * 100.0;
    if (p - p.round()).abs() < 1e-9 {
        format!("{}", p.round() as i64)
    } else {
        format!("{p:.1}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ScoreSummary {
        ScoreSummary {
            entries: 4,
            matches: 14,
            insertions: 1,
            deletions: 0,
            substitutions: 1,
            reference_length: 16,
            error_rate: 0.125,
        }
    }

    fn ci(level: f64) -> ConfidenceInterval {
        ConfidenceInterval {
            point_estimate: 0.125,
            lower_bound: 0.0625,
            upper_bound: 0.25,
            confidence_level: level,
            resamples: 1000,
            standard_error: 0.05,
        }
    }

    #[test]
    fn summary_line() {
        assert_eq!(
            format_summary_line(&summary(), &ci(0.95)),
            "PER: 12.50% [95% CI 6.25%, 25.00%]"
        );
        assert_eq!(
            format_summary_line(&summary(), &ci(0.995)),
            "PER: 12.50% [99.5% CI 6.25%, 25.00%]"
        );
    }

    #[test]
    fn run_summary_lists_counts() {
        let text = format_run_summary(&summary(), &ci(0.95), Some("latam"));
        assert!(text.contains("Region: latam"));
        assert!(text.contains("edits: 2 (ins=1 del=0 sub=1)"));
        assert!(text.contains("1000 resamples"));
    }

    #[test]
    fn worst_entries_table() {
        let rows = vec![EntryScore {
            index: 0,
            orthography: "extraordinariamente".to_string(),
            reference: vec!["E".into(), "K".into(), "S".into()],
            hypothesis: vec!["E".into(), "S".into()],
            edits: 1,
            reference_length: 3,
            error_rate: Some(1.0 / 3.0),
        }];
        let text = format_worst_entries(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Worst entries:");
        assert!(lines[3].starts_with("extraordinariamente"));
        assert!(lines[3].contains("33.33%"));
        assert_eq!(format_worst_entries(&[]), "No entries with errors.\n");
    }

    #[test]
    fn truncate_long_words() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
