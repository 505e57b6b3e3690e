use eframe::egui;
use egui::{Pos2, Rect, Vec2};
use image::{ImageError, RgbaImage};
use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Blank border kept around a fitted image on every side (one inch at 96 DPI).
pub const IMAGE_MARGIN: f32 = 96.0;

/// Extensions offered by the open dialog's image filter.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

// ============================================================================
// ERRORS
// ============================================================================

/// Error type for image loading
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Decode(ImageError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "{}", e),
            LoadError::Decode(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Decode(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<ImageError> for LoadError {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::IoError(io) => LoadError::Io(io),
            other => LoadError::Decode(other),
        }
    }
}

// ============================================================================
// DECODE + FIT
// ============================================================================

/// Decode any raster the `image` crate understands into RGBA.
pub fn decode_image(path: &Path) -> Result<RgbaImage, LoadError> {
    let reader = image::io::Reader::open(path)?.with_guessed_format()?;
    Ok(reader.decode()?.to_rgba8())
}

/// Largest aspect-preserving rectangle for a `pixel_size` bitmap inside
/// `surface` minus `margin` on every side, centered in the remaining area.
///
/// The available area is clamped at zero, so a surface smaller than twice the
/// margin yields an empty rectangle at the margin corner. A degenerate bitmap
/// (zero width or height) also fits to an empty rectangle.
pub fn fit_image(surface: Vec2, pixel_size: [u32; 2], margin: f32) -> Rect {
    let avail_w = (surface.x - 2.0 * margin).max(0.0);
    let avail_h = (surface.y - 2.0 * margin).max(0.0);

    let [px_w, px_h] = pixel_size;
    let (w, h) = if px_w == 0 || px_h == 0 {
        (0.0, 0.0)
    } else {
        let aspect = px_w as f32 / px_h as f32;
        (avail_w.min(avail_h * aspect), avail_h.min(avail_w / aspect))
    };

    let left = margin + (avail_w - w) / 2.0;
    let top = margin + (avail_h - h) / 2.0;
    Rect::from_min_size(Pos2::new(left, top), Vec2::new(w, h))
}

/// File name shown next to the "Select Image" button.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

// ============================================================================
// FILE DIALOG
// ============================================================================

/// Show the native open dialog. `None` when the user cancels.
pub fn pick_image_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Image files", IMAGE_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_file()
}
