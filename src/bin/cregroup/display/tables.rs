use std::io::{self, Write};
use std::path::Path;

use conf_regroup::Group;
use conf_regroup::GroupingReport;
use conf_regroup::pipeline::{
    ConcatSummary, DetectSummary, ExtractSummary, RecoverSummary, RenumberSummary,
};

use crate::util::text::{truncate, truncate_start};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_GROUP_ROWS: usize = 15;

pub fn print_detect_summary(summary: &DetectSummary) {
    let rows = vec![
        ("Records", summary.records.to_string()),
        ("Structures", summary.structures.to_string()),
        ("Split Structures", summary.split_groups.len().to_string()),
        ("Redo Titles", summary.redo.to_string()),
        ("Good Titles", summary.good.to_string()),
        ("Redo List", path_cell(&summary.redo_titles)),
        ("Good List", path_cell(&summary.good_titles)),
    ];
    print_kv_table(&mut io::stderr().lock(), "Detection Summary", &rows);
}

pub fn print_extract_summary(summary: &ExtractSummary) {
    let mut rows = vec![
        ("Requested", summary.requested.to_string()),
        ("Extracted", summary.extracted.to_string()),
        ("Missing", summary.missing.len().to_string()),
        ("Output", path_cell(&summary.output)),
    ];
    if let Some(first) = summary.missing.first() {
        rows.push(("First Missing", first.clone()));
    }
    print_kv_table(&mut io::stderr().lock(), "Extraction Summary", &rows);
}

pub fn print_recover_summary(summary: &RecoverSummary) {
    let rows = vec![
        ("Records", summary.records.to_string()),
        ("Output", path_cell(&summary.output)),
    ];
    print_kv_table(&mut io::stderr().lock(), "Recovered Order", &rows);
}

pub fn print_concat_summary(summary: &ConcatSummary) {
    let rows = vec![
        ("Bytes Written", summary.bytes.to_string()),
        ("Output", path_cell(&summary.output)),
    ];
    print_kv_table(&mut io::stderr().lock(), "Concatenation", &rows);
}

pub fn print_renumber_summary(summary: &RenumberSummary) {
    let mut rows = vec![("Records", summary.records.to_string())];
    if let (Some(first), Some(last)) = (&summary.first_title, &summary.last_title) {
        rows.push(("Titles", format!("{first} .. {last}")));
    }
    rows.push(("Output", path_cell(&summary.output)));
    print_kv_table(&mut io::stderr().lock(), "Renumbering", &rows);
}

pub fn print_grouping_report(report: &GroupingReport) {
    let status = if report.is_clean() { "clean" } else { "PROBLEMS" };
    let mut rows = vec![
        ("Records", report.records.to_string()),
        ("Structures", report.structures.to_string()),
        ("Split Structures", report.split.len().to_string()),
        ("Duplicate Titles", report.duplicate_titles.len().to_string()),
        ("Status", status.to_string()),
    ];
    if let Some(first) = report.duplicate_titles.first() {
        rows.push(("First Duplicate", first.clone()));
    }
    if let Some(source) = report.source_records {
        rows.push(("Source Records", source.to_string()));
        rows.push(("Missing", report.missing.len().to_string()));
        rows.push(("Unexpected", report.unexpected.len().to_string()));
    }
    if let Some(first) = report.missing.first() {
        rows.push(("First Missing", first.clone()));
    }

    let mut out = io::stderr().lock();
    print_kv_table(&mut out, "Grouping Check", &rows);
    if !report.split.is_empty() {
        print_group_table(&mut out, "Still Split", &report.split);
    }
}

/// One-line account of what keeps `report` from being clean.
pub fn problem_summary(report: &GroupingReport) -> String {
    let counts = [
        (report.split.len(), "split structures"),
        (report.duplicate_titles.len(), "duplicate titles"),
        (report.missing.len(), "missing conformers"),
        (report.unexpected.len(), "unexpected conformers"),
    ];
    counts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, what)| format!("{n} {what}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_split_groups(groups: &[Group]) {
    if groups.is_empty() {
        return;
    }
    print_group_table(&mut io::stderr().lock(), "Split Structures", groups);
}

/// Number of contiguous runs the positions of `group` form.
fn run_count(group: &Group) -> usize {
    let mut sorted = group.positions.clone();
    sorted.sort_unstable();
    1 + sorted.windows(2).filter(|w| w[1] != w[0] + 1).count()
}

fn print_group_table(out: &mut impl Write, title: &str, groups: &[Group]) {
    let conf_w = 6usize;
    let runs_w = 5usize;
    let sep_overhead = 8;
    let key_w = SAFE_TABLE_WIDTH.saturating_sub(conf_w + runs_w + sep_overhead);

    let rule = |l: &str, m: &str, r: &str| {
        format!(
            "{}{l}{}{m}{}{m}{}{r}",
            INDENT,
            "─".repeat(key_w + 2),
            "─".repeat(conf_w + 2),
            "─".repeat(runs_w + 2)
        )
    };

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>conf_w$} │ {:>runs_w$} │",
        INDENT, "Structure Key", "Confs", "Runs"
    );
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for group in groups.iter().take(MAX_GROUP_ROWS) {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>conf_w$} │ {:>runs_w$} │",
            INDENT,
            truncate(group.key.as_str(), key_w),
            group.len(),
            run_count(group)
        );
    }

    if groups.len() > MAX_GROUP_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>conf_w$} │ {:>runs_w$} │",
            INDENT,
            format!("({} more structures)", groups.len() - MAX_GROUP_ROWS),
            "...",
            "..."
        );
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value"
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn path_cell(path: &Path) -> String {
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(16 + 6);
    truncate_start(&path.display().to_string(), val_w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conf_regroup::StructureKey;

    fn group(positions: &[usize]) -> Group {
        Group {
            key: StructureKey::from("k"),
            positions: positions.to_vec(),
        }
    }

    #[test]
    fn counts_contiguous_runs() {
        assert_eq!(run_count(&group(&[0, 1, 2])), 1);
        assert_eq!(run_count(&group(&[0, 1, 10, 11, 20])), 3);
    }

    #[test]
    fn problem_summary_lists_only_nonzero_counts() {
        let report = GroupingReport {
            missing: vec!["x".into()],
            unexpected: vec!["full_3".into()],
            ..GroupingReport::default()
        };
        assert_eq!(
            problem_summary(&report),
            "1 missing conformers, 1 unexpected conformers"
        );
    }

    #[test]
    fn group_table_lines_have_equal_width() {
        let mut buf = Vec::new();
        print_group_table(&mut buf, "Split Structures", &[group(&[0, 4])]);
        let text = String::from_utf8(buf).unwrap();
        let widths: Vec<usize> = text
            .lines()
            .skip(1)
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{text}");
    }
}
