pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod sampledata;
pub mod vocab;

pub use config::EngineConfig;
pub use engine::ledger::{CorrectionEntry, CorrectionKind, CorrectionLedger, CorrectionSummary};
pub use engine::CorrectionEngine;
pub use error::{Result, ScrubberError};
