//! Markdown quality report for a correction run.

use std::fs;
use std::path::Path;

use chrono::Utc;

use crate::domain::Entity;
use crate::engine::ledger::CorrectionSummary;
use crate::error::Result;

/// Record counts of one dataset before and after correction.
#[derive(Debug, Clone, Copy)]
pub struct EntityCounts {
    pub entity: Entity,
    pub before: usize,
    pub after: usize,
}

impl EntityCounts {
    pub fn new(entity: Entity, before: usize, after: usize) -> Self {
        Self {
            entity,
            before,
            after,
        }
    }
}

pub fn write_markdown(
    path: &Path,
    counts: &[EntityCounts],
    summary: &CorrectionSummary,
) -> Result<()> {
    fs::write(path, render_markdown(counts, summary))?;
    Ok(())
}

pub fn render_markdown(counts: &[EntityCounts], summary: &CorrectionSummary) -> String {
    let mut lines = Vec::new();

    lines.push("# Data Quality Report".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Generated: {}",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(String::new());

    lines.push("## Record counts".to_string());
    lines.push(String::new());
    lines.push("| Dataset | Before | After | Removed |".to_string());
    lines.push("|---------|--------|-------|---------|".to_string());
    for count in counts {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            count.entity,
            count.before,
            count.after,
            count.before.saturating_sub(count.after)
        ));
    }
    lines.push(String::new());

    lines.push(format!("## Corrections applied: {}", summary.total));
    lines.push(String::new());
    if summary.total == 0 {
        lines.push("No corrections were necessary.".to_string());
        lines.push(String::new());
    } else {
        lines.push("### By correction type".to_string());
        lines.push(String::new());
        for (kind, count) in &summary.by_kind {
            lines.push(format!("- {}: {}", kind, count));
        }
        lines.push(String::new());

        lines.push("### By dataset".to_string());
        lines.push(String::new());
        for (entity, count) in &summary.by_entity {
            lines.push(format!("- {}: {}", entity, count));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
