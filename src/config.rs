use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ScrubberError};
use crate::vocab;

/// One category and the name keywords that select it. Order inside
/// [`EngineConfig::category_keywords`] is the matching precedence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryKeywords {
    pub category: String,
    pub keywords: Vec<String>,
}

/// Tunable surface of the correction engine. Defaults come from
/// [`crate::vocab`]; a TOML file may override any subset of the fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fuzzy_threshold: f64,
    pub default_carrier: String,
    pub valid_states: Vec<String>,
    pub valid_categories: Vec<String>,
    pub sale_statuses: Vec<String>,
    pub delivery_statuses: Vec<String>,
    pub category_keywords: Vec<CategoryKeywords>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            fuzzy_threshold: vocab::DEFAULT_FUZZY_THRESHOLD,
            default_carrier: vocab::DEFAULT_CARRIER.to_string(),
            valid_states: to_strings(&vocab::VALID_STATES),
            valid_categories: to_strings(&vocab::VALID_CATEGORIES),
            sale_statuses: to_strings(&vocab::SALE_STATUSES),
            delivery_statuses: to_strings(&vocab::DELIVERY_STATUSES),
            category_keywords: vocab::CATEGORY_KEYWORDS
                .iter()
                .map(|(category, keywords)| CategoryKeywords {
                    category: (*category).to_string(),
                    keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Loads a TOML override file. Keys absent from the file keep their
    /// built-in defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScrubberError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: EngineConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
