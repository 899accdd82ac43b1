//! Customer corrections: duplicate removal, contact-field repair, state
//! standardization, name inference and date normalization.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EngineConfig;
use crate::domain::{Customer, Entity};
use crate::engine::ledger::{CorrectionEntry, CorrectionKind};
use crate::engine::matching::best_match;
use crate::vocab::{EMAIL_DOMAIN_FIXES, NULL_MARKER};

use super::{drop_duplicate_ids, is_blank, to_iso_date};

/// Brazilian mobile number: 2-digit area code (no zeros) followed by a
/// 9-digit subscriber number.
static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][1-9][0-9]{9}$").unwrap());

/// Runs the customer rules in order and returns the corrected records plus
/// the ledger entries they produced.
pub fn apply(
    records: &[Customer],
    config: &EngineConfig,
) -> (Vec<Customer>, Vec<CorrectionEntry>) {
    let mut log = Vec::new();

    let records = drop_duplicate_ids(records.to_vec(), Entity::Customers, &mut log);
    let records = fix_emails(records, &mut log);
    let records = normalize_phones(records, &mut log);
    let records = standardize_states(records, config, &mut log);
    let records = infer_missing_names(records, &mut log);
    let records = standardize_dates(records, &mut log);

    (records, log)
}

/// Repairs truncated email domains with the ordered fix table. A fix only
/// fires when its broken form is present and its corrected form is not, so a
/// repaired address never gets fixed twice.
fn fix_emails(mut records: Vec<Customer>, log: &mut Vec<CorrectionEntry>) -> Vec<Customer> {
    for record in &mut records {
        let email = match record.email.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => continue,
        };

        let mut fixed = email.clone();
        for (broken, correct) in EMAIL_DOMAIN_FIXES {
            if fixed.contains(broken) && !fixed.contains(correct) {
                fixed = fixed.replace(broken, correct);
            }
        }

        if fixed != email {
            log.push(CorrectionEntry::new(
                Entity::Customers,
                record.id,
                "email",
                email.as_str(),
                fixed.as_str(),
                CorrectionKind::EmailCorrection,
            ));
            record.email = Some(fixed);
        }
    }
    records
}

/// Strips formatting from phone numbers and inserts the mobile `9` into
/// 10-digit numbers, but only when the 11-digit result is a well-formed
/// mobile number. Numbers of any other length pass through unchanged.
fn normalize_phones(mut records: Vec<Customer>, log: &mut Vec<CorrectionEntry>) -> Vec<Customer> {
    for record in &mut records {
        let raw = match record.phone.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => continue,
        };

        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            continue;
        }

        let mut result = digits.clone();
        if digits.len() == 10 && digits.as_bytes()[2] != b'9' {
            let candidate = format!("{}9{}", &digits[..2], &digits[2..]);
            if MOBILE_RE.is_match(&candidate) {
                result = candidate;
            }
        }

        if result != raw {
            log.push(CorrectionEntry::new(
                Entity::Customers,
                record.id,
                "phone",
                raw.as_str(),
                result.as_str(),
                CorrectionKind::PhoneCorrection,
            ));
            record.phone = Some(result);
        }
    }
    records
}

/// Snaps state values onto the two-letter UF codes: trim and uppercase, then
/// fuzzy-match anything that is still not a valid code.
fn standardize_states(
    mut records: Vec<Customer>,
    config: &EngineConfig,
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Customer> {
    for record in &mut records {
        let raw = match record.state.as_deref() {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => continue,
        };

        let candidate = raw.trim().to_uppercase();
        let canonical = if config.valid_states.iter().any(|code| *code == candidate) {
            Some(candidate)
        } else {
            best_match(&candidate, &config.valid_states, config.fuzzy_threshold)
                .map(|code| code.to_string())
        };

        if let Some(code) = canonical {
            if code != raw {
                log.push(CorrectionEntry::new(
                    Entity::Customers,
                    record.id,
                    "state",
                    raw.as_str(),
                    code.as_str(),
                    CorrectionKind::StateStandardization,
                ));
                record.state = Some(code);
            }
        }
    }
    records
}

/// Fills blank names from the email local part: dots become spaces, words
/// get title-cased.
fn infer_missing_names(
    mut records: Vec<Customer>,
    log: &mut Vec<CorrectionEntry>,
) -> Vec<Customer> {
    for record in &mut records {
        if !is_blank(&record.name) {
            continue;
        }
        let email = match record.email.as_deref() {
            Some(value) if !value.trim().is_empty() => value,
            _ => continue,
        };

        let local_part = email.split('@').next().unwrap_or_default();
        let inferred = title_case(&local_part.replace('.', " "));
        if inferred.is_empty() {
            continue;
        }

        log.push(CorrectionEntry::new(
            Entity::Customers,
            record.id,
            "name",
            NULL_MARKER,
            inferred.as_str(),
            CorrectionKind::NameInference,
        ));
        record.name = Some(inferred);
    }
    records
}

/// Rewrites parseable dates in ISO form; unparseable text stays untouched.
fn standardize_dates(mut records: Vec<Customer>, log: &mut Vec<CorrectionEntry>) -> Vec<Customer> {
    for record in &mut records {
        let id = record.id;
        normalize_date_field(id, "birth_date", &mut record.birth_date, log);
        normalize_date_field(id, "registered_at", &mut record.registered_at, log);
    }
    records
}

fn normalize_date_field(
    record_id: u32,
    field: &str,
    value: &mut Option<String>,
    log: &mut Vec<CorrectionEntry>,
) {
    let raw = match value.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => return,
    };

    if let Some(iso) = to_iso_date(&raw) {
        if iso != raw {
            log.push(CorrectionEntry::new(
                Entity::Customers,
                record_id,
                field,
                raw.as_str(),
                iso.as_str(),
                CorrectionKind::DateStandardization,
            ));
            *value = Some(iso);
        }
    }
}

/// Uppercases the first letter of every word, lowercases the rest. Any
/// non-alphabetic character starts a new word.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            result.push(c);
            prev_alpha = false;
        }
    }
    result
}
