// src/main.rs
mod extractors;
mod pdf;
mod storage;
mod utils;
mod view;

use std::path::PathBuf;

use clap::Parser;
use rayon::prelude::*;

use extractors::{ExtractionRecord, ReportExtractor};
use pdf::models::document_name;
use pdf::reader;
use storage::StorageManager;
use utils::AppError;
use view::BenchmarkFilter;

/// Command Line Interface for the XP performance report extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report PDF files, or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory for the spreadsheet and run metadata
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Filter records by the yearly %CDI ratio
    #[arg(short, long, value_enum, default_value = "todos")]
    filter: BenchmarkFilter,

    /// Add a second sheet with the per-strategy composition rows
    #[arg(short, long)]
    composition: bool,

    /// Number of extraction worker threads (defaults to all cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Debug mode - save per-document extraction JSON files
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Discover the report files
    let paths = reader::collect_report_paths(&args.inputs)?;
    if paths.is_empty() {
        return Err(AppError::Config(
            "No PDF report files found in the given inputs".to_string(),
        ));
    }
    tracing::info!("Found {} report file(s)", paths.len());

    // 4. Bound the worker pool if requested
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .map_err(|e| AppError::Config(e.to_string()))?;
    }

    // 5. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 6. Extract every document. Extraction is a pure function of one
    //    document's text, so the batch runs in parallel with no shared
    //    state; collect() keeps the input order.
    let extractor = ReportExtractor::new();
    let results: Vec<(ExtractionRecord, bool)> = paths
        .par_iter()
        .map(|path| match reader::read_report(path) {
            Ok(doc) => (extractor.extract(&doc.source_name, &doc.text), true),
            Err(e) => {
                tracing::warn!("Failed to decode {}: {}", path.display(), e);
                // The document stays in the result set with an empty
                // record; only the identifier-derived code can be filled.
                (extractor.extract(&document_name(path), ""), false)
            }
        })
        .collect();

    let decode_failures = results.iter().filter(|(_, decoded)| !decoded).count();
    let records: Vec<ExtractionRecord> = results.into_iter().map(|(record, _)| record).collect();

    // 7. Optional per-document debug dumps
    if args.debug {
        for record in &records {
            match storage.save_record_debug(record) {
                Ok(path) => tracing::debug!("Saved debug dump to {}", path.display()),
                Err(e) => tracing::error!("Failed to save debug dump: {}", e),
            }
        }
    }

    // 8. Nothing found is a valid outcome, not an error
    if !records.iter().any(|r| r.has_any_field()) {
        tracing::warn!("No data found in any of the {} report(s)", records.len());
        return Ok(());
    }

    // 9. Filter, sort and present
    let mut selected = view::apply_filter(records.clone(), args.filter);
    view::sort_by_monthly_desc(&mut selected);
    print!("{}", view::render_table(&selected));

    // 10. Export the workbook and the run metadata
    match storage.save_workbook(&selected, args.composition) {
        Ok(path) => tracing::info!("Saved results to {}", path.display()),
        Err(e) => tracing::error!("Failed to save workbook: {}", e),
    }
    match storage.save_run_metadata(&records, decode_failures) {
        Ok(path) => tracing::info!("Saved run metadata to {}", path.display()),
        Err(e) => tracing::error!("Failed to save run metadata: {}", e),
    }

    tracing::info!(
        "Processing finished. Documents: {}, decode failures: {}, exported: {}",
        records.len(),
        decode_failures,
        selected.len()
    );

    Ok(())
}
