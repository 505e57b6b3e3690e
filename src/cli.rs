// ============================================================================
// Startup arguments
// ============================================================================
//
//   spraypaint                          (empty canvas)
//   spraypaint photo.png                (open photo.png on the first frame)
//   spraypaint photo.png --brush-size 20 --color Red
//
// Overrides apply to this session only; they are not written back to the
// settings file unless the user changes the controls.

use std::path::PathBuf;

use clap::Parser;

use crate::components::colors::NamedColor;
use crate::components::tools::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::settings::AppSettings;

/// SprayPaint: paint dots over an image.
#[derive(Parser, Debug, Default)]
#[command(name = "spraypaint", version, about = "Paint and erase dots over an image")]
pub struct CliArgs {
    /// Image to open on startup.
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Brush size for this session.
    #[arg(short = 's', long, value_name = "SIZE",
          value_parser = clap::value_parser!(u32).range(MIN_BRUSH_SIZE as i64..=MAX_BRUSH_SIZE as i64))]
    pub brush_size: Option<u32>,

    /// Brush color: Black, Red, Green or Blue. Other names fall back to Black.
    #[arg(short, long, value_name = "NAME")]
    pub color: Option<String>,
}

impl CliArgs {
    /// Settings with any command-line overrides layered on top.
    pub fn apply_to(&self, settings: &AppSettings) -> AppSettings {
        let mut merged = settings.clone();
        if let Some(size) = self.brush_size {
            merged.brush_size = size as f32;
        }
        if let Some(name) = &self.color {
            merged.brush_color = NamedColor::from_name(name);
        }
        merged
    }
}
