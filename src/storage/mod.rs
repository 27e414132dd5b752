// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};

use crate::extractors::ExtractionRecord;
use crate::utils::error::StorageError;

const SHEET_NAME: &str = "Rentabilidades";
const WORKBOOK_FILE: &str = "rentabilidades.xlsx";
const COMPOSITION_SHEET: &str = "Composição";

// Header rows match the record's field names in their defined order.
// Derived numeric helper values used for sorting and filtering are never
// exported.
const SCALAR_HEADERS: [&str; 5] = ["Arquivo", "Código", "Rent. Mês", "Rent. Ano", "%CDI Ano"];
const COMPOSITION_HEADERS: [&str; 6] = [
    "Arquivo",
    "Estratégia",
    "Composição",
    "Saldo Bruto",
    "Mês Atual",
    "Ano",
];

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the result workbook: one sheet with one data row per
    /// document, scalar fields only, plus an optional second sheet with
    /// the flattened composition rows.
    pub fn save_workbook(
        &self,
        records: &[ExtractionRecord],
        include_composition: bool,
    ) -> Result<PathBuf, StorageError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(SHEET_NAME)?;

            for (col, header) in SCALAR_HEADERS.iter().enumerate() {
                sheet.write_string_with_format(0, col as u16, *header, &bold)?;
            }

            for (i, record) in records.iter().enumerate() {
                let row = (i + 1) as u32;
                sheet.write_string(row, 0, record.source_name.as_str())?;
                sheet.write_string(row, 1, record.code.as_str())?;
                sheet.write_string(row, 2, record.monthly_return.as_deref().unwrap_or(""))?;
                sheet.write_string(row, 3, record.yearly_return.as_deref().unwrap_or(""))?;
                sheet.write_string(
                    row,
                    4,
                    record.benchmark_ratio_yearly.as_deref().unwrap_or(""),
                )?;
            }
        }

        if include_composition {
            let sheet = workbook.add_worksheet();
            sheet.set_name(COMPOSITION_SHEET)?;

            for (col, header) in COMPOSITION_HEADERS.iter().enumerate() {
                sheet.write_string_with_format(0, col as u16, *header, &bold)?;
            }

            let mut row = 1u32;
            for record in records {
                for comp in &record.composition {
                    sheet.write_string(row, 0, record.source_name.as_str())?;
                    sheet.write_string(row, 1, comp.strategy.as_str())?;
                    sheet.write_string(row, 2, comp.share_of_portfolio.as_str())?;
                    sheet.write_string(row, 3, comp.gross_balance.as_str())?;
                    sheet.write_string(row, 4, comp.month_figure.as_str())?;
                    sheet.write_string(row, 5, comp.year_figure.as_str())?;
                    row += 1;
                }
            }
        }

        let file_path = self.base_dir.join(WORKBOOK_FILE);
        workbook.save(&file_path)?;

        tracing::info!("Saved workbook to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about the run in JSON format
    pub fn save_run_metadata(
        &self,
        records: &[ExtractionRecord],
        decode_failures: usize,
    ) -> Result<PathBuf, StorageError> {
        let rows_discarded: usize = records.iter().map(|r| r.rows_discarded).sum();

        let metadata = serde_json::json!({
            "dataset": SHEET_NAME,
            "documents": records.len(),
            "decode_failures": decode_failures,
            "rows_discarded": rows_discarded,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let file_path = self.base_dir.join("run_metadata.json");
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves one document's full record, composition included, as a JSON
    /// file under `debug/`. Used only when debug mode is on.
    pub fn save_record_debug(&self, record: &ExtractionRecord) -> Result<PathBuf, StorageError> {
        let debug_dir = self.base_dir.join("debug");
        if !debug_dir.exists() {
            fs::create_dir_all(&debug_dir).map_err(StorageError::IoError)?;
        }

        let file_path = debug_dir.join(format!("{}.json", record.source_name));

        let record_str = serde_json::to_string_pretty(record)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, record_str).map_err(StorageError::IoError)?;

        Ok(file_path)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::CompositionRow;

    fn temp_output_dir(prefix: &str) -> PathBuf {
        let mut out = std::env::temp_dir();
        out.push(format!("{}-{}", prefix, std::process::id()));
        out
    }

    fn sample_record() -> ExtractionRecord {
        ExtractionRecord {
            source_name: "XPerformance - 123456.pdf".to_string(),
            code: "123456".to_string(),
            monthly_return: Some("1,23%".to_string()),
            yearly_return: Some("45,67%".to_string()),
            benchmark_ratio_yearly: Some("105,50%".to_string()),
            composition: vec![CompositionRow {
                strategy: "Renda Fixa".to_string(),
                share_of_portfolio: "25,00%".to_string(),
                gross_balance: "R$ 250.000,00".to_string(),
                month_figure: "0,80%".to_string(),
                year_figure: "9,10%".to_string(),
            }],
            rows_discarded: 1,
        }
    }

    #[test]
    fn writes_workbook_and_metadata() -> Result<(), StorageError> {
        let dir = temp_output_dir("rentab-storage");
        let storage = StorageManager::new(&dir)?;
        let records = vec![sample_record()];

        let workbook_path = storage.save_workbook(&records, true)?;
        assert!(workbook_path.exists());
        assert!(workbook_path.ends_with("rentabilidades.xlsx"));

        let metadata_path = storage.save_run_metadata(&records, 0)?;
        let metadata = fs::read_to_string(&metadata_path)?;
        assert!(metadata.contains("\"documents\": 1"));
        assert!(metadata.contains("\"rows_discarded\": 1"));

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn debug_dump_lands_under_debug_dir() -> Result<(), StorageError> {
        let dir = temp_output_dir("rentab-storage-debug");
        let storage = StorageManager::new(&dir)?;

        let path = storage.save_record_debug(&sample_record())?;
        assert!(path.exists());
        assert!(path.parent().unwrap().ends_with("debug"));

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }
}
