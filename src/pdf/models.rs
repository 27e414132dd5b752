// src/pdf/models.rs
use std::path::Path;

/// One source report: its opaque identifier (the file name) plus the full
/// decoded text, all pages joined with newlines.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub source_name: String,
    pub text: String,
}

impl ReportDocument {
    pub fn new(source_name: String, text: String) -> Self {
        Self { source_name, text }
    }
}

/// Document identifier for a path: the file name when there is one, the
/// whole path otherwise.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn document_name_is_the_file_name() {
        let path = PathBuf::from("/tmp/relatorios/XPerformance - 123456.pdf");
        assert_eq!(document_name(&path), "XPerformance - 123456.pdf");
    }
}
