//! Shipment corrections: carrier defaulting, orphan reference removal, date
//! consistency, status standardization and ship-date inference.

use std::collections::HashSet;

use chrono::Duration;

use crate::config::EngineConfig;
use crate::domain::{Entity, Sale, Shipment};
use crate::engine::ledger::{CorrectionEntry, CorrectionKind};
use crate::vocab::{NULL_MARKER, REMOVED_MARKER};

use super::{is_blank, parse_flexible_date, standardize_against};

/// Runs the shipment rules in order and returns the corrected records plus
/// the ledger entries they produced. Sales are the reference set for the
/// foreign-key check and for ship-date inference.
pub fn apply(
    records: &[Shipment],
    sales: &[Sale],
    config: &EngineConfig,
) -> (Vec<Shipment>, Vec<CorrectionEntry>) {
    let mut log = Vec::new();

    let records = fill_default_carriers(records.to_vec(), config, &mut log);
    let records = remove_orphans(records, sales, &mut log);
    let records = fix_date_order(records, &mut log);
    let records = standardize_statuses(records, config, &mut log);
    let records = infer_ship_dates(records, sales, &mut log);

    (records, log)
}

fn fill_default_carriers(
    mut records: Vec<Shipment>,
    config: &EngineConfig,
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Shipment> {
    for record in &mut records {
        if is_blank(&record.carrier) {
            log.push(CorrectionEntry::new(
                Entity::Shipments,
                record.id,
                "carrier",
                NULL_MARKER,
                config.default_carrier.as_str(),
                CorrectionKind::DefaultCarrier,
            ));
            record.carrier = Some(config.default_carrier.clone());
        }
    }
    records
}

fn remove_orphans(
    records: Vec<Shipment>,
    sales: &[Sale],
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Shipment> {
    let sale_ids: HashSet<u32> = sales.iter().map(|s| s.id).collect();

    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        if sale_ids.contains(&record.sale_id) {
            kept.push(record);
        } else {
            log.push(CorrectionEntry::new(
                Entity::Shipments,
                record.id,
                "sale_id",
                record.sale_id.to_string(),
                REMOVED_MARKER,
                CorrectionKind::OrphanReferenceRemoval,
            ));
        }
    }
    kept
}

/// A delivery recorded before its shipment is clamped to the ship date.
/// Only fires when both dates parse.
fn fix_date_order(mut records: Vec<Shipment>, log: &mut Vec<CorrectionEntry>) -> Vec<Shipment> {
    for record in &mut records {
        let shipped = record.ship_date.as_deref().and_then(parse_flexible_date);
        let delivered = record.delivered_at.as_deref().and_then(parse_flexible_date);

        if let (Some(shipped), Some(delivered)) = (shipped, delivered) {
            if delivered < shipped {
                let raw = record.delivered_at.clone().unwrap_or_default();
                let iso = shipped.format("%Y-%m-%d").to_string();
                log.push(CorrectionEntry::new(
                    Entity::Shipments,
                    record.id,
                    "delivered_at",
                    raw.as_str(),
                    iso.as_str(),
                    CorrectionKind::DateConsistencyCorrection,
                ));
                record.delivered_at = Some(iso);
            }
        }
    }
    records
}

fn standardize_statuses(
    mut records: Vec<Shipment>,
    config: &EngineConfig,
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Shipment> {
    for record in &mut records {
        let raw = match record.status.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => continue,
        };

        if let Some(fixed) =
            standardize_against(&raw, &config.delivery_statuses, config.fuzzy_threshold)
        {
            log.push(CorrectionEntry::new(
                Entity::Shipments,
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

/// Fills a blank ship date with the day after the sale, when the referenced
/// sale has a parseable date.
fn infer_ship_dates(
    mut records: Vec<Shipment>,
    sales: &[Sale],
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Shipment> {
    for record in &mut records {
        if !is_blank(&record.ship_date) {
            continue;
        }

        let sale_date = sales
            .iter()
            .find(|sale| sale.id == record.sale_id)
            .and_then(|sale| sale.sale_date.as_deref())
            .and_then(parse_flexible_date);

        if let Some(sale_date) = sale_date {
            let inferred = (sale_date + Duration::days(1))
                .format("%Y-%m-%d")
                .to_string();
            log.push(CorrectionEntry::new(
                Entity::Shipments,
                record.id,
                "ship_date",
                NULL_MARKER,
                inferred.as_str(),
                CorrectionKind::ShippingDateInference,
            ));
            record.ship_date = Some(inferred);
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(id: u32) -> Sale {
        Sale {
            id,
            customer_id: 1,
            product_id: 1,
            quantity: 1,
            unit_price: 50.0,
            total: 50.0,
            sale_date: Some("2024-01-15".to_string()),
            status: Some("Concluída".to_string()),
        }
    }

    fn shipment(id: u32) -> Shipment {
        Shipment {
            id,
            sale_id: 1,
            carrier: Some("Correios".to_string()),
            ship_date: Some("2024-01-16".to_string()),
            delivered_at: Some("2024-01-20".to_string()),
            status: Some("Entregue".to_string()),
        }
    }

    #[test]
    fn clean_records_produce_no_entries() {
        let sales = vec![sale(1)];
        let records = vec![shipment(1)];

        let (corrected, log) = apply(&records, &sales, &EngineConfig::default());

        assert_eq!(corrected, records);
        assert!(log.is_empty());
    }

    #[test]
    fn blank_carrier_gets_the_default() {
        let sales = vec![sale(1)];
        let mut missing = shipment(1);
        missing.carrier = None;
        let mut empty = shipment(2);
        empty.carrier = Some(String::new());

        let (corrected, log) = apply(&[missing, empty], &sales, &EngineConfig::default());

        assert_eq!(corrected[0].carrier.as_deref(), Some("Correios"));
        assert_eq!(corrected[1].carrier.as_deref(), Some("Correios"));
        assert_eq!(log.len(), 2);
        assert!(log
            .iter()
            .all(|e| e.correction == CorrectionKind::DefaultCarrier && e.old_value == "NULL"));
    }

    #[test]
    fn orphan_sale_reference_removes_the_shipment() {
        let sales = vec![sale(1)];
        let mut record = shipment(3);
        record.sale_id = 99;

        let (corrected, log) = apply(&[record], &sales, &EngineConfig::default());

        assert!(corrected.is_empty());
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].field, "sale_id");
        assert_eq!(log[0].new_value, "REMOVED");
        assert_eq!(log[0].correction, CorrectionKind::OrphanReferenceRemoval);
    }

    #[test]
    fn delivery_before_shipment_is_clamped_to_the_ship_date() {
        let sales = vec![sale(1)];
        let mut record = shipment(1);
        record.delivered_at = Some("2024-01-10".to_string());

        let (corrected, log) = apply(&[record], &sales, &EngineConfig::default());

        assert_eq!(corrected[0].delivered_at.as_deref(), Some("2024-01-16"));
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].old_value, "2024-01-10");
        assert_eq!(
            log[0].correction,
            CorrectionKind::DateConsistencyCorrection
        );
    }

    #[test]
    fn date_order_check_needs_both_dates_parseable() {
        let sales = vec![sale(1)];
        let mut record = shipment(1);
        record.ship_date = Some("em breve".to_string());
        record.delivered_at = Some("2024-01-10".to_string());

        let (corrected, log) = apply(&[record], &sales, &EngineConfig::default());

        assert_eq!(corrected[0].delivered_at.as_deref(), Some("2024-01-10"));
        assert!(log.is_empty());
    }

    #[test]
    fn unaccented_status_is_standardized() {
        let sales = vec![sale(1)];
        let mut record = shipment(1);
        record.status = Some("em transito".to_string());

        let (corrected, log) = apply(&[record], &sales, &EngineConfig::default());

        assert_eq!(corrected[0].status.as_deref(), Some("Em Trânsito"));
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].correction, CorrectionKind::StatusStandardization);
    }

    #[test]
    fn blank_ship_date_is_inferred_from_the_sale() {
        let sales = vec![sale(1)];
        let mut record = shipment(1);
        record.ship_date = None;

        let (corrected, log) = apply(&[record], &sales, &EngineConfig::default());

        assert_eq!(corrected[0].ship_date.as_deref(), Some("2024-01-16"));
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].old_value, "NULL");
        assert_eq!(log[0].correction, CorrectionKind::ShippingDateInference);
    }

    #[test]
    fn inference_needs_a_parseable_sale_date() {
        let mut undated = sale(2);
        undated.sale_date = None;
        let sales = vec![sale(1), undated];

        let mut record = shipment(1);
        record.sale_id = 2;
        record.ship_date = None;

        let (corrected, log) = apply(&[record], &sales, &EngineConfig::default());

        assert_eq!(corrected[0].ship_date, None);
        assert!(log.is_empty());
    }
}
