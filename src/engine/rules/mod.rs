//! Per-entity correction rules.
//!
//! Every rule takes the record set by value, appends one ledger entry per
//! mutation to the shared accumulator, and returns the (possibly reduced)
//! record set. Each entity module chains its rules in a fixed order behind a
//! single `apply` function. Values a rule cannot fix are left untouched, with
//! nothing logged.

pub mod customers;
pub mod products;
pub mod sales;
pub mod shipments;

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Entity, Keyed};
use crate::engine::ledger::{CorrectionEntry, CorrectionKind};
use crate::engine::matching::best_match;

/// Keeps the first record per id and drops later duplicates.
pub(crate) fn drop_duplicate_ids<R: Keyed>(
    records: Vec<R>,
    entity: Entity,
    log: &mut Vec<CorrectionEntry>,
) -> Vec<R> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());

    for record in records {
        if seen.insert(record.id()) {
            kept.push(record);
        } else {
            log.push(CorrectionEntry::new(
                entity,
                record.id(),
                "id",
                "duplicated",
                "removed",
                CorrectionKind::Deduplication,
            ));
        }
    }

    kept
}

/// Canonical vocabulary term for a value that is not already a member, if a
/// confident fuzzy match exists.
pub(crate) fn standardize_against(
    raw: &str,
    vocabulary: &[String],
    threshold: f64,
) -> Option<String> {
    if raw.trim().is_empty() || vocabulary.iter().any(|term| term == raw) {
        return None;
    }
    best_match(raw, vocabulary, threshold).map(|term| term.to_string())
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Parses the date formats seen in the source systems, day-first for the
/// ambiguous slash/dash forms.
pub(crate) fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d-%m-%Y"))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
                .map(|dt| dt.date())
                .ok()
        })
}

/// ISO form of a parseable date, `None` when the text cannot be parsed.
pub(crate) fn to_iso_date(raw: &str) -> Option<String> {
    parse_flexible_date(raw).map(|date| date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
    }

    impl Keyed for Row {
        fn id(&self) -> u32 {
            self.id
        }
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let rows = vec![Row { id: 1 }, Row { id: 2 }, Row { id: 1 }, Row { id: 3 }];
        let mut log = Vec::new();

        let kept = drop_duplicate_ids(rows, Entity::Customers, &mut log);

        assert_eq!(kept, vec![Row { id: 1 }, Row { id: 2 }, Row { id: 3 }]);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].record_id, 1);
        assert_eq!(log[0].old_value, "duplicated");
        assert_eq!(log[0].new_value, "removed");
        assert_eq!(log[0].correction, CorrectionKind::Deduplication);
    }

    #[test]
    fn standardize_skips_members_and_blanks() {
        let vocabulary = vec!["Concluída".to_string(), "Pendente".to_string()];
        assert_eq!(standardize_against("Concluída", &vocabulary, 0.6), None);
        assert_eq!(standardize_against("  ", &vocabulary, 0.6), None);
        assert_eq!(
            standardize_against("concluida", &vocabulary, 0.6),
            Some("Concluída".to_string())
        );
    }

    #[test]
    fn flexible_date_accepts_source_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_flexible_date("2024-03-05"), Some(expected));
        assert_eq!(parse_flexible_date("2024/03/05"), Some(expected));
        assert_eq!(parse_flexible_date("05/03/2024"), Some(expected));
        assert_eq!(parse_flexible_date("05-03-2024"), Some(expected));
        assert_eq!(parse_flexible_date("2024-03-05T08:30:00"), Some(expected));
        assert_eq!(parse_flexible_date("2024-03-05 08:30:00"), Some(expected));
    }

    #[test]
    fn unparseable_text_yields_none() {
        assert_eq!(parse_flexible_date("not-a-date"), None);
        assert_eq!(parse_flexible_date("2024-13-40"), None);
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(to_iso_date("15/08/1990"), Some("1990-08-15".to_string()));
        assert_eq!(to_iso_date("soon"), None);
    }

    #[test]
    fn blank_detection_covers_none_and_whitespace() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some("  ".to_string())));
        assert!(!is_blank(&Some("SP".to_string())));
    }
}
