//! Files picked for upload to the cost service.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions accepted by the document import.
pub const UPLOAD_EXTENSIONS: [&str; 6] = ["xls", "xlsx", "pdf", "doc", "docx", "csv"];

/// Extensions the service can turn into charts.
pub const CHART_SOURCE_EXTENSIONS: [&str; 4] = ["csv", "xlsx", "xls", "json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Spreadsheet,
    Pdf,
    Document,
    Unknown,
}

impl FileKind {
    /// Classify by extension, case-insensitively.
    pub fn from_name(file_name: &str) -> Self {
        let extension = Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        match extension.as_deref() {
            Some("xls" | "xlsx" | "csv") => FileKind::Spreadsheet,
            Some("pdf") => FileKind::Pdf,
            Some("doc" | "docx") => FileKind::Document,
            _ => FileKind::Unknown,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FileKind::Spreadsheet => "📊",
            FileKind::Pdf => "📕",
            FileKind::Document => "📄",
            FileKind::Unknown => "📁",
        }
    }
}

/// A file queued for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub kind: FileKind,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let size_bytes = fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            kind: FileKind::from_name(&name),
            name,
            size_bytes,
        })
    }

    /// Size in megabytes with two decimals.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(FileKind::from_name("quotes.XLSX"), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_name("history.csv"), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_name("contract.pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_name("spec.docx"), FileKind::Document);
        assert_eq!(FileKind::from_name("notes.txt"), FileKind::Unknown);
        assert_eq!(FileKind::from_name("README"), FileKind::Unknown);
    }

    #[test]
    fn size_label_is_megabytes() {
        let file = SelectedFile {
            path: PathBuf::from("a.pdf"),
            name: "a.pdf".to_string(),
            size_bytes: 1_572_864,
            kind: FileKind::Pdf,
        };
        assert_eq!(file.size_label(), "1.50 MB");
    }

    #[test]
    fn reads_size_from_disk() {
        let path = std::env::temp_dir().join("drillcost-selected-file-test.csv");
        std::fs::write(&path, b"category,item,cost\n").unwrap();
        let file = SelectedFile::from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(file.name, "drillcost-selected-file-test.csv");
        assert_eq!(file.size_bytes, 19);
        assert_eq!(file.kind, FileKind::Spreadsheet);
    }
}
