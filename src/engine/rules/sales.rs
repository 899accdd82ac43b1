//! Sale corrections: quantity and total repair, orphan reference removal,
//! future-date clamping and status standardization.

use std::collections::HashSet;

use chrono::Utc;

use crate::config::EngineConfig;
use crate::domain::{Customer, Entity, Product, Sale};
use crate::engine::ledger::{CorrectionEntry, CorrectionKind};
use crate::vocab::REMOVED_MARKER;

use super::{parse_flexible_date, standardize_against};

/// Runs the sale rules in order and returns the corrected records plus the
/// ledger entries they produced. Customers and products are the reference
/// sets for the foreign-key checks.
pub fn apply(
    records: &[Sale],
    customers: &[Customer],
    products: &[Product],
    config: &EngineConfig,
) -> (Vec<Sale>, Vec<CorrectionEntry>) {
    let mut log = Vec::new();

    let records = fix_invalid_quantities(records.to_vec(), &mut log);
    let records = fix_negative_totals(records, &mut log);
    let records = recompute_totals(records, &mut log);
    let records = remove_orphans(records, customers, products, &mut log);
    let records = clamp_future_dates(records, &mut log);
    let records = standardize_statuses(records, config, &mut log);

    (records, log)
}

fn fix_invalid_quantities(mut records: Vec<Sale>, log: &mut Vec<CorrectionEntry>) -> Vec<Sale> {
    for record in &mut records {
        if record.quantity <= 0 {
            log.push(CorrectionEntry::new(
                Entity::Sales,
                record.id,
                "quantity",
                record.quantity.to_string(),
                "1",
                CorrectionKind::InvalidQuantityCorrection,
            ));
            record.quantity = 1;
        }
    }
    records
}

fn fix_negative_totals(mut records: Vec<Sale>, log: &mut Vec<CorrectionEntry>) -> Vec<Sale> {
    for record in &mut records {
        if record.total < 0.0 {
            let fixed = record.total.abs();
            log.push(CorrectionEntry::new(
                Entity::Sales,
                record.id,
                "total",
                record.total.to_string(),
                fixed.to_string(),
                CorrectionKind::NegativeTotalCorrection,
            ));
            record.total = fixed;
        }
    }
    records
}

/// Overwrites totals more than a cent away from quantity times unit price.
fn recompute_totals(mut records: Vec<Sale>, log: &mut Vec<CorrectionEntry>) -> Vec<Sale> {
    for record in &mut records {
        let expected = round2(record.quantity as f64 * record.unit_price);
        if (record.total - expected).abs() > 0.01 {
            log.push(CorrectionEntry::new(
                Entity::Sales,
                record.id,
                "total",
                record.total.to_string(),
                expected.to_string(),
                CorrectionKind::CalculationCorrection,
            ));
            record.total = expected;
        }
    }
    records
}

/// Removes sales whose customer or product no longer exists. Both keys are
/// checked on every record, one ledger entry per dangling key; the record is
/// removed once.
fn remove_orphans(
    records: Vec<Sale>,
    customers: &[Customer],
    products: &[Product],
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Sale> {
    let customer_ids: HashSet<u32> = customers.iter().map(|c| c.id).collect();
    let product_ids: HashSet<u32> = products.iter().map(|p| p.id).collect();

    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        let mut orphan = false;

        if !customer_ids.contains(&record.customer_id) {
            log.push(CorrectionEntry::new(
                Entity::Sales,
                record.id,
                "customer_id",
                record.customer_id.to_string(),
                REMOVED_MARKER,
                CorrectionKind::OrphanReferenceRemoval,
            ));
            orphan = true;
        }
        if !product_ids.contains(&record.product_id) {
            log.push(CorrectionEntry::new(
                Entity::Sales,
                record.id,
                "product_id",
                record.product_id.to_string(),
                REMOVED_MARKER,
                CorrectionKind::OrphanReferenceRemoval,
            ));
            orphan = true;
        }

        if !orphan {
            kept.push(record);
        }
    }
    kept
}

fn clamp_future_dates(mut records: Vec<Sale>, log: &mut Vec<CorrectionEntry>) -> Vec<Sale> {
    let today = Utc::now().date_naive();
    for record in &mut records {
        let raw = match record.sale_date.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => continue,
        };

        if let Some(date) = parse_flexible_date(&raw) {
            if date > today {
                let iso = today.format("%Y-%m-%d").to_string();
                log.push(CorrectionEntry::new(
                    Entity::Sales,
                    record.id,
                    "sale_date",
                    raw.as_str(),
                    iso.as_str(),
                    CorrectionKind::FutureDateCorrection,
                ));
                record.sale_date = Some(iso);
            }
        }
    }
    records
}

fn standardize_statuses(
    mut records: Vec<Sale>,
    config: &EngineConfig,
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Sale> {
    for record in &mut records {
        let raw = match record.status.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => continue,
        };

        if let Some(fixed) = standardize_against(&raw, &config.sale_statuses, config.fuzzy_threshold)
        {
            log.push(CorrectionEntry::new(
                Entity::Sales,
                record.id,
                "status",
                raw.as_str(),
                fixed.as_str(),
                CorrectionKind::StatusStandardization,
            ));
            record.status = Some(fixed);
        }
    }
    records
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
