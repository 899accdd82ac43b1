//! The correction engine: owns the configuration and the append-only
//! ledger, and runs the per-entity rule sets over record collections.

pub mod ledger;
pub mod matching;
pub mod rules;

use tracing::info;

use crate::config::EngineConfig;
use crate::domain::{Customer, Datasets, Product, Sale, Shipment};

use self::ledger::{CorrectionLedger, CorrectionSummary};

/// Applies the correction rules and accumulates one ledger entry per
/// mutation. Inputs are taken by shared slice and never mutated; each
/// routine returns the corrected collection. The ledger lives as long as the
/// engine and is only reset by constructing a new one.
#[derive(Debug, Default)]
pub struct CorrectionEngine {
    config: EngineConfig,
    ledger: CorrectionLedger,
}

impl CorrectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ledger: CorrectionLedger::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ledger(&self) -> &CorrectionLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> CorrectionLedger {
        self.ledger
    }

    pub fn summary(&self) -> CorrectionSummary {
        self.ledger.summary()
    }

    pub fn correct_customers(&mut self, records: &[Customer]) -> Vec<Customer> {
        let (corrected, entries) = rules::customers::apply(records, &self.config);
        info!(
            "Corrected customers: {} in, {} out, {} corrections",
            records.len(),
            corrected.len(),
            entries.len()
        );
        self.ledger.extend(entries);
        corrected
    }

    pub fn correct_products(&mut self, records: &[Product]) -> Vec<Product> {
        let (corrected, entries) = rules::products::apply(records, &self.config);
        info!(
            "Corrected products: {} in, {} out, {} corrections",
            records.len(),
            corrected.len(),
            entries.len()
        );
        self.ledger.extend(entries);
        corrected
    }

    /// Customers and products must already be corrected so the foreign-key
    /// checks run against the surviving ids.
    pub fn correct_sales(
        &mut self,
        records: &[Sale],
        customers: &[Customer],
        products: &[Product],
    ) -> Vec<Sale> {
        let (corrected, entries) = rules::sales::apply(records, customers, products, &self.config);
        info!(
            "Corrected sales: {} in, {} out, {} corrections",
            records.len(),
            corrected.len(),
            entries.len()
        );
        self.ledger.extend(entries);
        corrected
    }

    /// Sales must already be corrected so orphan removal and ship-date
    /// inference see the surviving sales.
    pub fn correct_shipments(&mut self, records: &[Shipment], sales: &[Sale]) -> Vec<Shipment> {
        let (corrected, entries) = rules::shipments::apply(records, sales, &self.config);
        info!(
            "Corrected shipments: {} in, {} out, {} corrections",
            records.len(),
            corrected.len(),
            entries.len()
        );
        self.ledger.extend(entries);
        corrected
    }

    /// Corrects all four collections in dependency order: customers and
    /// products first, then sales against the survivors, then shipments
    /// against the surviving sales.
    pub fn correct_datasets(&mut self, data: &Datasets) -> Datasets {
        let customers = self.correct_customers(&data.customers);
        let products = self.correct_products(&data.products);
        let sales = self.correct_sales(&data.sales, &customers, &products);
        let shipments = self.correct_shipments(&data.shipments, &sales);

        Datasets {
            customers,
            products,
            sales,
            shipments,
        }
    }
}
