//! File-level glue around the engine: CSV import/export and the Markdown
//! quality report. No correction logic lives here.

pub mod csv;
pub mod report;

pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const PRODUCTS_FILE: &str = "products.csv";
pub const SALES_FILE: &str = "sales.csv";
pub const SHIPMENTS_FILE: &str = "shipments.csv";
pub const LEDGER_FILE: &str = "corrections.csv";
pub const SUMMARY_FILE: &str = "correction_summary.json";
pub const REPORT_FILE: &str = "quality_report.md";
