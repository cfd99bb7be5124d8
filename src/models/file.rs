//! File conversion planning model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A file selected for conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Lower-cased text after the last `.`, if any
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// How a file will be turned into a PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// jpg/jpeg/png: the image is placed on a page
    Image,
    /// doc/docx/txt/html: simulated conversion
    Document,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "Image"),
            Self::Document => write!(f, "Document"),
        }
    }
}

/// Placement of an image on an A4 page, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Scale applied to the source dimensions (1.0 when it already fits)
    pub scale: f64,
}

/// A planned conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPlan {
    pub source: FileInfo,
    pub kind: SourceKind,
    pub output_name: String,
    /// Present for images when pixel dimensions are known
    pub layout: Option<PageLayout>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(FileInfo::new("Report.DOCX", 10).extension().as_deref(), Some("docx"));
        assert_eq!(FileInfo::new("archive.tar.gz", 10).extension().as_deref(), Some("gz"));
        assert_eq!(FileInfo::new("README", 10).extension(), None);
        assert_eq!(FileInfo::new(".bashrc", 10).extension(), None);
    }
}
