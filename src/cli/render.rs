//! Plain-text rendering of topics for the terminal.
//!
//! Sections appear in a fixed order (overview, key points, examples, use
//! cases, notes, practice tip) and empty ones are skipped.

use std::fmt::Write;

use crate::domain::{ContentRecord, SectionItem};

const RULE_WIDTH: usize = 64;

/// Notice shown for outline items whose detail has not been written
pub const PENDING_NOTICE: &str = "Detailed content is still being written.";

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n── {} ──", title);
}

fn bullets(out: &mut String, title: &str, marker: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    heading(out, title);
    for line in lines {
        let _ = writeln!(out, "  {} {}", marker, line);
    }
}

/// Render a full record
pub fn render_record(record: &ContentRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "═".repeat(RULE_WIDTH));
    let _ = writeln!(out, "  {}", record.title);
    let _ = writeln!(out, "  id: {}", record.id);
    let _ = writeln!(out, "{}", "═".repeat(RULE_WIDTH));

    heading(&mut out, "Overview");
    let _ = writeln!(out, "  {}", record.overview);

    bullets(&mut out, "Key points", "•", &record.key_points);

    if !record.examples.is_empty() {
        heading(&mut out, "Examples");
        for (index, example) in record.examples.iter().enumerate() {
            let _ = writeln!(out, "\n  Example {}: {}", index + 1, example.title);
            for line in example.code.lines() {
                let _ = writeln!(out, "    {}", line);
            }
            if let Some(explanation) = &example.explanation {
                let _ = writeln!(out, "  → {}", explanation);
            }
        }
    }

    bullets(&mut out, "Use cases", "•", &record.use_cases);
    bullets(&mut out, "Notes", "⚠", &record.notes);

    if let Some(tip) = &record.practice_tip {
        heading(&mut out, "Practice tip");
        let _ = writeln!(out, "  {}", tip);
    }

    out
}

/// Render an outline item that has no record
pub fn render_summary(item: &SectionItem) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "═".repeat(RULE_WIDTH));
    let _ = writeln!(out, "  {}", item.name);
    let _ = writeln!(out, "  id: {}", item.id);
    let _ = writeln!(out, "{}", "═".repeat(RULE_WIDTH));

    if let Some(description) = &item.description {
        let _ = writeln!(out, "\n  {}", description);
    }
    let _ = writeln!(out, "\n  {}", PENDING_NOTICE);

    out
}

/// Shorten `text` to at most `width` characters, ending in "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
