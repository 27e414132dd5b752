// src/extractors/mod.rs
pub mod composition;
pub mod numeric;
pub mod record;

// Re-export key extraction types for convenience
pub use composition::CompositionRow;
pub use record::{ExtractionRecord, ReportExtractor};
