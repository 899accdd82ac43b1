//! Append-only audit ledger of every correction the engine applies.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Entity;
use crate::error::Result;

/// The correction applied, one tag per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrectionKind {
    Deduplication,
    EmailCorrection,
    PhoneCorrection,
    StateStandardization,
    NameInference,
    DateStandardization,
    NegativePriceCorrection,
    AutoCategorization,
    DefaultCategorization,
    CategoryStandardization,
    NegativeStockCorrection,
    BooleanStandardization,
    InvalidQuantityCorrection,
    NegativeTotalCorrection,
    CalculationCorrection,
    OrphanReferenceRemoval,
    FutureDateCorrection,
    StatusStandardization,
    DefaultCarrier,
    DateConsistencyCorrection,
    ShippingDateInference,
}

impl CorrectionKind {
    pub fn tag(&self) -> &'static str {
        match self {
            CorrectionKind::Deduplication => "DEDUPLICATION",
            CorrectionKind::EmailCorrection => "EMAIL_CORRECTION",
            CorrectionKind::PhoneCorrection => "PHONE_CORRECTION",
            CorrectionKind::StateStandardization => "STATE_STANDARDIZATION",
            CorrectionKind::NameInference => "NAME_INFERENCE",
            CorrectionKind::DateStandardization => "DATE_STANDARDIZATION",
            CorrectionKind::NegativePriceCorrection => "NEGATIVE_PRICE_CORRECTION",
            CorrectionKind::AutoCategorization => "AUTO_CATEGORIZATION",
            CorrectionKind::DefaultCategorization => "DEFAULT_CATEGORIZATION",
            CorrectionKind::CategoryStandardization => "CATEGORY_STANDARDIZATION",
            CorrectionKind::NegativeStockCorrection => "NEGATIVE_STOCK_CORRECTION",
            CorrectionKind::BooleanStandardization => "BOOLEAN_STANDARDIZATION",
            CorrectionKind::InvalidQuantityCorrection => "INVALID_QUANTITY_CORRECTION",
            CorrectionKind::NegativeTotalCorrection => "NEGATIVE_TOTAL_CORRECTION",
            CorrectionKind::CalculationCorrection => "CALCULATION_CORRECTION",
            CorrectionKind::OrphanReferenceRemoval => "ORPHAN_REFERENCE_REMOVAL",
            CorrectionKind::FutureDateCorrection => "FUTURE_DATE_CORRECTION",
            CorrectionKind::StatusStandardization => "STATUS_STANDARDIZATION",
            CorrectionKind::DefaultCarrier => "DEFAULT_CARRIER",
            CorrectionKind::DateConsistencyCorrection => "DATE_CONSISTENCY_CORRECTION",
            CorrectionKind::ShippingDateInference => "SHIPPING_DATE_INFERENCE",
        }
    }
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One applied correction. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    pub recorded_at: DateTime<Utc>,
    pub entity: Entity,
    pub record_id: u32,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    pub correction: CorrectionKind,
}

impl CorrectionEntry {
    pub fn new(
        entity: Entity,
        record_id: u32,
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        correction: CorrectionKind,
    ) -> Self {
        Self {
            recorded_at: Utc::now(),
            entity,
            record_id,
            field: field.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
            correction,
        }
    }
}

/// Aggregated view of a ledger, for console output and the JSON artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionSummary {
    pub total: usize,
    pub by_kind: BTreeMap<String, usize>,
    pub by_entity: BTreeMap<String, usize>,
    pub by_field: BTreeMap<String, usize>,
}

/// Append-only log of corrections, held for the lifetime of an engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrectionLedger {
    entries: Vec<CorrectionEntry>,
}

impl CorrectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single correction.
    pub fn record(
        &mut self,
        entity: Entity,
        record_id: u32,
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        correction: CorrectionKind,
    ) {
        self.entries.push(CorrectionEntry::new(
            entity, record_id, field, old_value, new_value, correction,
        ));
    }

    /// Merges the entries produced by a rule pass.
    pub fn extend(&mut self, entries: Vec<CorrectionEntry>) {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[CorrectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Totals by correction kind, entity and `entity.field`.
    pub fn summary(&self) -> CorrectionSummary {
        let mut by_kind = BTreeMap::new();
        let mut by_entity = BTreeMap::new();
        let mut by_field = BTreeMap::new();

        for entry in &self.entries {
            *by_kind.entry(entry.correction.to_string()).or_insert(0) += 1;
            *by_entity.entry(entry.entity.to_string()).or_insert(0) += 1;
            *by_field
                .entry(format!("{}.{}", entry.entity, entry.field))
                .or_insert(0) += 1;
        }

        CorrectionSummary {
            total: self.entries.len(),
            by_kind,
            by_entity,
            by_field,
        }
    }

    /// Serializes all entries as CSV. Writes nothing when the ledger is
    /// empty.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }

        let mut csv_writer = csv::Writer::from_writer(writer);
        for entry in &self.entries {
            csv_writer.serialize(entry)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> CorrectionLedger {
        let mut ledger = CorrectionLedger::new();
        ledger.record(
            Entity::Customers,
            1,
            "email",
            "ana@gmail",
            "ana@gmail.com",
            CorrectionKind::EmailCorrection,
        );
        ledger.record(
            Entity::Customers,
            2,
            "email",
            "rui@yahoo",
            "rui@yahoo.com",
            CorrectionKind::EmailCorrection,
        );
        ledger.record(
            Entity::Products,
            7,
            "price",
            "-29.99",
            "29.99",
            CorrectionKind::NegativePriceCorrection,
        );
        ledger
    }

    #[test]
    fn summary_counts_by_kind_entity_and_field() {
        let summary = sample_ledger().summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_kind["EMAIL_CORRECTION"], 2);
        assert_eq!(summary.by_kind["NEGATIVE_PRICE_CORRECTION"], 1);
        assert_eq!(summary.by_entity["customers"], 2);
        assert_eq!(summary.by_entity["products"], 1);
        assert_eq!(summary.by_field["customers.email"], 2);
        assert_eq!(summary.by_field["products.price"], 1);
    }

    #[test]
    fn extend_appends_without_dropping() {
        let mut ledger = sample_ledger();
        let extra = vec![CorrectionEntry::new(
            Entity::Sales,
            3,
            "quantity",
            "-2",
            "1",
            CorrectionKind::InvalidQuantityCorrection,
        )];
        ledger.extend(extra);
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.entries()[3].entity, Entity::Sales);
    }

    #[test]
    fn empty_ledger_writes_no_csv_bytes() {
        let mut buffer = Vec::new();
        CorrectionLedger::new().write_csv(&mut buffer).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn csv_export_carries_tags_and_header() {
        let mut buffer = Vec::new();
        sample_ledger().write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("recorded_at,entity,record_id,field,old_value,new_value,correction"));
        assert!(text.contains("EMAIL_CORRECTION"));
        assert!(text.contains("customers"));
        assert_eq!(text.lines().count(), 4);
    }
}
