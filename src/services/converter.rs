//! PDF conversion planning and image compression helpers
//!
//! No document is rendered here. The converter decides whether a file is
//! supported, what the output is called and, for images, where the picture
//! lands on an A4 page.

use tracing::debug;

use crate::config::settings::LatencySettings;
use crate::error::{ConvertError, PupilError};
use crate::models::{ConversionPlan, FileInfo, PageLayout, SourceKind};
use crate::services::task::{simulated_delay, CancelToken};

/// Extensions accepted for conversion
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["doc", "docx", "txt", "jpg", "jpeg", "png", "html"];

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A4 page, millimetres
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// Printable box inside the page margins
pub const CONTENT_WIDTH_MM: f64 = 180.0;
pub const CONTENT_HEIGHT_MM: f64 = 250.0;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human readable size in base-1024 units
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Replace the last extension with `.pdf`
pub fn pdf_output_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => format!("{}.pdf", stem),
        _ => name.to_string(),
    }
}

/// Decide how `file` would be converted
pub fn plan_conversion(
    file: &FileInfo,
    image_size: Option<(u32, u32)>,
) -> Result<ConversionPlan, ConvertError> {
    if file.name.trim().is_empty() {
        return Err(ConvertError::NoFileSelected);
    }

    let extension = file.extension().unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ConvertError::UnsupportedFormat { extension });
    }

    let kind = if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        SourceKind::Image
    } else {
        SourceKind::Document
    };

    let layout = match (kind, image_size) {
        (SourceKind::Image, Some((width, height))) => Some(fit_to_page(width as f64, height as f64)),
        _ => None,
    };

    Ok(ConversionPlan {
        source: file.clone(),
        kind,
        output_name: pdf_output_name(&file.name),
        layout,
    })
}

/// Scale an image down into the content box and centre it on the page
///
/// Images that already fit keep their size.
pub fn fit_to_page(width: f64, height: f64) -> PageLayout {
    let scale = if width > CONTENT_WIDTH_MM || height > CONTENT_HEIGHT_MM {
        (CONTENT_WIDTH_MM / width).min(CONTENT_HEIGHT_MM / height)
    } else {
        1.0
    };

    let (width, height) = (width * scale, height * scale);
    PageLayout {
        x: (PAGE_WIDTH_MM - width) / 2.0,
        y: (PAGE_HEIGHT_MM - height) / 2.0,
        width,
        height,
        scale,
    }
}

/// Download name for a compressed image
pub fn compressed_file_name(name: &str) -> String {
    format!("compressed_{}", name)
}

/// Encoder quality for a slider percentage
pub fn quality_fraction(percent: u8) -> f64 {
    f64::from(percent.min(100)) / 100.0
}

/// Plans conversions, simulating processing time for documents
#[derive(Debug, Clone)]
pub struct FileConverter {
    latency: LatencySettings,
}

impl FileConverter {
    pub fn new(latency: LatencySettings) -> Self {
        Self { latency }
    }

    pub async fn convert(
        &self,
        file: &FileInfo,
        image_size: Option<(u32, u32)>,
        token: &CancelToken,
    ) -> Result<ConversionPlan, PupilError> {
        let plan = plan_conversion(file, image_size)?;
        if plan.kind == SourceKind::Document {
            simulated_delay(self.latency.pdf(), token).await?;
        }
        debug!(source = %file.name, output = %plan.output_name, kind = %plan.kind, "conversion planned");
        Ok(plan)
    }
}
