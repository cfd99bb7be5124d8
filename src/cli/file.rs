//! File conversion CLI commands

use std::path::{Path, PathBuf};

use clap::Subcommand;

use super::{CliContext, Status};
use crate::display::{Field, PresentContext, Presentable};
use crate::error::{PupilError, PupilResult};
use crate::models::FileInfo;
use crate::services::converter::{compressed_file_name, format_file_size, quality_fraction};
use crate::services::validation::{validate, FieldKind};
use crate::services::FileConverter;

/// File subcommands
#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// Show a byte count in human readable units
    Size {
        bytes: u64,
    },
    /// Plan the PDF conversion of a file
    Convert {
        /// File to convert; size is read from disk when it exists
        path: PathBuf,
        /// Size in bytes, for files that are not on disk
        #[arg(long)]
        size: Option<u64>,
        /// Image width in pixels
        #[arg(long, requires = "height")]
        width: Option<u32>,
        /// Image height in pixels
        #[arg(long, requires = "width")]
        height: Option<u32>,
    },
    /// Show the download name and encoder quality for a compressed image
    CompressName {
        name: String,
        /// Quality in percent (1-100)
        #[arg(short, long, default_value = "80")]
        quality: String,
    },
}

/// A simple labelled answer
struct Summary {
    title: &'static str,
    fields: Vec<Field>,
}

impl Presentable for Summary {
    fn title(&self) -> String {
        self.title.to_string()
    }

    fn fields(&self, _ctx: &PresentContext) -> Vec<Field> {
        self.fields.clone()
    }
}

fn file_info(path: &Path, size: Option<u64>) -> PupilResult<FileInfo> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let size_bytes = match size {
        Some(size) => size,
        None if path.is_file() => std::fs::metadata(path)
            .map_err(|e| PupilError::Io(format!("Failed to read {}: {}", path.display(), e)))?
            .len(),
        None => 0,
    };

    Ok(FileInfo::new(name, size_bytes))
}

/// Handle a file command
pub async fn handle_file_command(ctx: &CliContext, cmd: FileCommands) -> PupilResult<Status> {
    match cmd {
        FileCommands::Size { bytes } => ctx.emit(Ok(Summary {
            title: "File Size",
            fields: vec![
                Field::new("Bytes", bytes.to_string()),
                Field::new("Size", format_file_size(bytes)),
            ],
        })),

        FileCommands::Convert {
            path,
            size,
            width,
            height,
        } => {
            let file = file_info(&path, size)?;
            let image_size = width.zip(height);
            let converter = FileConverter::new(ctx.settings.latency);
            let outcome = converter.convert(&file, image_size, &ctx.cancel).await;
            ctx.emit(outcome)
        }

        FileCommands::CompressName { name, quality } => {
            let outcome = validate(FieldKind::Quality, &quality)
                .map(|parsed| {
                    let percent = parsed.as_count().unwrap_or(100).min(100) as u8;
                    Summary {
                        title: "Image Compression",
                        fields: vec![
                            Field::new("Download Name", compressed_file_name(&name)),
                            Field::new("Quality", format!("{}%", percent)),
                            Field::new("Encoder Quality", quality_fraction(percent).to_string()),
                        ],
                    }
                })
                .map_err(Into::into);
            ctx.emit(outcome)
        }
    }
}
