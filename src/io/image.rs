//! PNG decoding into pixel grids and encoding of generated grids

use crate::color::codec::to_rgba8;
use crate::io::configuration::SUPPORTED_EXTENSION;
use crate::io::error::{MarkovError, Result};
use crate::synthesis::PixelGrid;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::path::{Path, PathBuf};

/// Decoded source image with the format it was stored in
#[derive(Debug, Clone)]
pub struct SourceImage {
    path: PathBuf,
    format: ImageFormat,
    grid: PixelGrid,
}

impl SourceImage {
    /// Decode an image file, detecting its format from the contents
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or read
    /// - The contents are not a PNG image
    /// - The image data cannot be decoded
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let reader = ImageReader::open(&path_buf)
            .and_then(ImageReader::with_guessed_format)
            .map_err(|e| MarkovError::FileSystem {
                path: path_buf.clone(),
                operation: "open image",
                source: e,
            })?;

        let format = reader.format();
        let format = ensure_supported(&path_buf, format)?;

        let decoded = reader.decode().map_err(|e| MarkovError::ImageLoad {
            path: path_buf.clone(),
            source: e,
        })?;

        Ok(Self {
            path: path_buf,
            format,
            grid: normalize(&decoded),
        })
    }

    /// Wrap an already decoded image
    pub fn from_dynamic(image: &DynamicImage, format: ImageFormat) -> Self {
        Self {
            path: PathBuf::new(),
            format,
            grid: normalize(image),
        }
    }

    /// Path the image was read from (empty for in-memory images)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected file format
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Decoded pixels
    pub const fn grid(&self) -> &PixelGrid {
        &self.grid
    }
}

fn ensure_supported(path: &Path, format: Option<ImageFormat>) -> Result<ImageFormat> {
    match format {
        Some(ImageFormat::Png) => Ok(ImageFormat::Png),
        Some(other) => Err(MarkovError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: other
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("unknown")
                .to_string(),
        }),
        None => Err(MarkovError::UnsupportedFormat {
            path: path.to_path_buf(),
            format: "unknown".to_string(),
        }),
    }
}

/// Convert any decoded image to an 8-bit RGBA grid
///
/// Pixels go through 16-bit RGBA first so every channel depth takes the same
/// narrowing path.
pub fn normalize(image: &DynamicImage) -> PixelGrid {
    let wide = image.to_rgba16();
    let narrow = RgbaImage::from_fn(wide.width(), wide.height(), |x, y| {
        to_rgba8(*wide.get_pixel(x, y))
    });
    PixelGrid::from_image(narrow)
}

/// Whether a path carries the supported image extension
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SUPPORTED_EXTENSION))
}

/// Encode a grid to `output_path` in `format`, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn write_image(grid: &PixelGrid, format: ImageFormat, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MarkovError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    grid.as_image()
        .save_with_format(output_path, format)
        .map_err(|e| MarkovError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
