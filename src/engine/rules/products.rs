//! Product corrections: duplicate removal, price and stock clamping,
//! categorization and boolean standardization.

use crate::config::EngineConfig;
use crate::domain::{ActiveFlag, Entity, Product};
use crate::engine::ledger::{CorrectionEntry, CorrectionKind};
use crate::vocab::{FALLBACK_CATEGORY, FALSY_TOKENS, NULL_MARKER, TRUTHY_TOKENS};

use super::{drop_duplicate_ids, is_blank, standardize_against};

/// Runs the product rules in order and returns the corrected records plus
/// the ledger entries they produced.
pub fn apply(records: &[Product], config: &EngineConfig) -> (Vec<Product>, Vec<CorrectionEntry>) {
    let mut log = Vec::new();

    let records = drop_duplicate_ids(records.to_vec(), Entity::Products, &mut log);
    let records = fix_negative_prices(records, &mut log);
    let records = categorize_blank(records, config, &mut log);
    let records = standardize_categories(records, config, &mut log);
    let records = fix_negative_stock(records, &mut log);
    let records = standardize_active_flags(records, &mut log);

    (records, log)
}

fn fix_negative_prices(mut records: Vec<Product>, log: &mut Vec<CorrectionEntry>) -> Vec<Product> {
    for record in &mut records {
        if record.price < 0.0 {
            let fixed = record.price.abs();
            log.push(CorrectionEntry::new(
                Entity::Products,
                record.id,
                "price",
                record.price.to_string(),
                fixed.to_string(),
                CorrectionKind::NegativePriceCorrection,
            ));
            record.price = fixed;
        }
    }
    records
}

/// Fills blank categories by scanning the lowercased product name against
/// the keyword table. Table order is the precedence; names matching no
/// keyword fall back to the catch-all category.
fn categorize_blank(
    mut records: Vec<Product>,
    config: &EngineConfig,
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Product> {
    for record in &mut records {
        if !is_blank(&record.category) {
            continue;
        }

        let name_lower = record.name.to_lowercase();
        let matched = config
            .category_keywords
            .iter()
            .find(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|keyword| name_lower.contains(&keyword.to_lowercase()))
            })
            .map(|entry| entry.category.clone());

        let (category, kind) = match matched {
            Some(category) => (category, CorrectionKind::AutoCategorization),
            None => (
                FALLBACK_CATEGORY.to_string(),
                CorrectionKind::DefaultCategorization,
            ),
        };

        log.push(CorrectionEntry::new(
            Entity::Products,
            record.id,
            "category",
            NULL_MARKER,
            category.as_str(),
            kind,
        ));
        record.category = Some(category);
    }
    records
}

fn standardize_categories(
    mut records: Vec<Product>,
    config: &EngineConfig,
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Product> {
    for record in &mut records {
        let raw = match record.category.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => continue,
        };

        if let Some(fixed) =
            standardize_against(&raw, &config.valid_categories, config.fuzzy_threshold)
        {
            log.push(CorrectionEntry::new(
                Entity::Products,
                record.id,
                "category",
                raw.as_str(),
                fixed.as_str(),
                CorrectionKind::CategoryStandardization,
            ));
            record.category = Some(fixed);
        }
    }
    records
}

fn fix_negative_stock(mut records: Vec<Product>, log: &mut Vec<CorrectionEntry>) -> Vec<Product> {
    for record in &mut records {
        if record.stock < 0 {
            log.push(CorrectionEntry::new(
                Entity::Products,
                record.id,
                "stock",
                record.stock.to_string(),
                "0",
                CorrectionKind::NegativeStockCorrection,
            ));
            record.stock = 0;
        }
    }
    records
}

/// Maps raw boolean tokens onto `true`/`false`. Unrecognized tokens stay as
/// they are; already-boolean values are no-ops.
fn standardize_active_flags(
    mut records: Vec<Product>,
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Product> {
    for record in &mut records {
        let raw = match &record.active {
            ActiveFlag::Bool(_) => continue,
            ActiveFlag::Text(raw) => raw.clone(),
        };

        let token = raw.trim().to_lowercase();
        let value = if TRUTHY_TOKENS.contains(&token.as_str()) {
            true
        } else if FALSY_TOKENS.contains(&token.as_str()) {
            false
        } else {
            continue;
        };

        log.push(CorrectionEntry::new(
            Entity::Products,
            record.id,
            "active",
            raw.as_str(),
            value.to_string(),
            CorrectionKind::BooleanStandardization,
        ));
        record.active = ActiveFlag::Bool(value);
    }
    records
}
