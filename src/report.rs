//! Cycle report rendering for the CLI: styled text tables or JSON.

use crate::monitor::{CycleReport, ModifiedEntry};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Shown hex prefix length for fingerprints in text output.
const FINGERPRINT_PREFIX: usize = 12;

/// Serializable view of one cycle, with paths sorted for deterministic output.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeReport {
    pub scanned_at: String,
    pub file_count: usize,
    pub added: Vec<String>,
    pub deleted: Vec<String>,
    pub modified: Vec<ModifiedEntry>,
    pub notified: bool,
    pub persisted: bool,
}

impl ChangeReport {
    pub fn from_cycle(report: &CycleReport) -> Self {
        let mut added: Vec<String> = report.changes.added.iter().cloned().collect();
        added.sort_unstable();
        let mut deleted: Vec<String> = report.changes.deleted.iter().cloned().collect();
        deleted.sort_unstable();

        Self {
            scanned_at: report.scanned_at.to_rfc3339(),
            file_count: report.file_count,
            added,
            deleted,
            modified: report.modified_detail.clone(),
            notified: report.notified,
            persisted: report.persisted,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Format a section heading with bold/underline. Respects NO_COLOR and TTY.
fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn fingerprint_prefix(hex: &str) -> String {
    format!("{}...", &hex[..hex.len().min(FINGERPRINT_PREFIX)])
}

/// Format a change report as human-readable text.
pub fn format_report_text(report: &ChangeReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Integrity Scan")));
    out.push_str(&format!("  Scanned at: {}\n", report.scanned_at));
    out.push_str(&format!("  Files scanned: {}\n", report.file_count));
    out.push_str(&format!(
        "  Persisted: {}\n\n",
        if report.persisted { "yes" } else { "no" }
    ));

    if report.is_empty() {
        out.push_str("No changes detected.\n");
        return out;
    }

    if !report.modified.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Modified")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path", "Previous", "Current"]);
        for entry in &report.modified {
            table.add_row(vec![
                entry.path.clone(),
                fingerprint_prefix(entry.previous.as_str()),
                fingerprint_prefix(entry.current.as_str()),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }

    if !report.added.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Added")));
        for path in &report.added {
            out.push_str(&format!("  {}\n", path));
        }
        out.push('\n');
    }

    if !report.deleted.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Deleted")));
        for path in &report.deleted {
            out.push_str(&format!("  {}\n", path));
        }
        out.push('\n');
    }

    out
}
