// src/pdf/reader.rs
use std::path::{Path, PathBuf};

use crate::pdf::models::{document_name, ReportDocument};
use crate::utils::error::PdfError;

/// Decodes one report PDF into its full text. Decode failures surface as
/// `PdfError`; the caller decides how to report them, the batch is never
/// aborted on behalf of a single document.
pub fn read_report(path: &Path) -> Result<ReportDocument, PdfError> {
    tracing::debug!("Decoding report: {}", path.display());

    let text = pdf_extract::extract_text(path)?;
    tracing::debug!(
        "Decoded {} characters from {}",
        text.len(),
        path.display()
    );

    Ok(ReportDocument::new(document_name(path), text))
}

/// Expands the CLI inputs into the list of report files to process.
/// Directories contribute their immediate `.pdf` children; explicitly
/// named files are taken as-is. The result is sorted so a rerun walks the
/// documents in the same order.
pub fn collect_report_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in std::fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() && has_pdf_extension(&path) {
                    paths.push(path);
                }
            }
        } else {
            paths.push(input.clone());
        }
    }

    paths.sort();
    Ok(paths)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(prefix: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("{}-{}", prefix, std::process::id()));
        dir
    }

    #[test]
    fn collects_pdfs_from_directory_sorted() -> Result<(), std::io::Error> {
        let dir = temp_dir("rentab-reader-collect");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("b.pdf"), b"x")?;
        fs::write(dir.join("a.PDF"), b"x")?;
        fs::write(dir.join("notas.txt"), b"x")?;

        let paths = collect_report_paths(&[dir.clone()])?;
        let names: Vec<String> = paths.iter().map(|p| document_name(p)).collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn explicit_files_are_kept_verbatim() -> Result<(), std::io::Error> {
        let file = PathBuf::from("relatorio.pdf");
        let paths = collect_report_paths(&[file.clone()])?;
        assert_eq!(paths, vec![file]);
        Ok(())
    }

    #[test]
    fn unreadable_pdf_is_an_error() {
        let dir = temp_dir("rentab-reader-bad");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("quebrado.pdf");
        fs::write(&path, b"not a pdf at all").unwrap();

        assert!(read_report(&path).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
