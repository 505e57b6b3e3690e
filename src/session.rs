use std::path::Path;
use std::sync::Arc;

use eframe::egui;
use egui::Pos2;
use image::RgbaImage;

use crate::canvas::{BackgroundImage, CanvasState, Mark, MarkId, PointerEvent};
use crate::components::history::MarkHistory;
use crate::components::tools::{GestureState, ToolMode, ToolProperties};
use crate::io::{self, IMAGE_MARGIN, LoadError};

/// The paint session controller.
///
/// Owns the surface display list, the mark history, and the gesture flags.
/// All methods run synchronously on the UI thread.
pub struct PaintSession {
    pub canvas: CanvasState,
    pub tools: ToolProperties,
    history: MarkHistory,
    gesture: GestureState,
    next_mark_id: u64,
    image_generation: u64,
}

impl PaintSession {
    pub fn new(width: f32, height: f32, tools: ToolProperties) -> Self {
        Self {
            canvas: CanvasState::new(width, height),
            tools,
            history: MarkHistory::new(),
            gesture: GestureState::default(),
            next_mark_id: 1,
            image_generation: 0,
        }
    }

    pub fn history(&self) -> &MarkHistory {
        &self.history
    }

    pub fn is_painting(&self) -> bool {
        self.gesture.is_painting()
    }

    pub fn is_erasing(&self) -> bool {
        self.gesture.is_erasing()
    }

    pub fn selected_image_name(&self) -> Option<&str> {
        self.canvas.background().map(|img| img.name.as_str())
    }

    // ------------------------------------------------------------------
    // Image loading
    // ------------------------------------------------------------------

    /// Decode `path` and make it the only element on the surface.
    ///
    /// The mark history is emptied whether or not decoding succeeds. On
    /// failure the display list is left as it was.
    pub fn load_image(&mut self, path: &Path) -> Result<(), LoadError> {
        let result = io::decode_image(path).map(|pixels| {
            self.install_image(io::display_name(path), pixels);
        });
        self.history.clear();
        match &result {
            Ok(()) => {
                if let Some(r) = self.canvas.image_bounds() {
                    crate::log_info!(
                        "Loaded {} fitted to ({:.1}, {:.1}) {:.1}x{:.1}",
                        path.display(),
                        r.min.x,
                        r.min.y,
                        r.width(),
                        r.height()
                    );
                }
            }
            Err(e) => {
                crate::log_err!("Error loading image {}: {}", path.display(), e);
            }
        }
        result
    }

    /// Fit an already-decoded bitmap into the current surface, replacing
    /// the display list and emptying the history.
    pub fn set_image(&mut self, name: impl Into<String>, pixels: RgbaImage) {
        self.install_image(name.into(), pixels);
        self.history.clear();
    }

    fn install_image(&mut self, name: String, pixels: RgbaImage) {
        let rect = io::fit_image(
            self.canvas.size(),
            [pixels.width(), pixels.height()],
            IMAGE_MARGIN,
        );
        self.image_generation += 1;
        self.canvas.replace_with_image(BackgroundImage {
            name,
            rect,
            pixels: Arc::new(pixels),
            generation: self.image_generation,
        });
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<MarkId> {
        match event {
            PointerEvent::Down { pos, primary, ctrl } => self.pointer_down(pos, primary, ctrl),
            PointerEvent::Move(pos) => self.pointer_move(pos),
            PointerEvent::Up => {
                self.pointer_up();
                None
            }
        }
    }

    /// Primary-button press: start a gesture, latch the eraser flag from
    /// Ctrl, and place a mark if the press is on the image.
    pub fn pointer_down(&mut self, pos: Pos2, primary: bool, ctrl: bool) -> Option<MarkId> {
        if !primary {
            return None;
        }
        self.gesture.begin(ctrl);
        self.place_mark(pos)
    }

    /// Samples are not interpolated: a fast drag leaves gaps.
    pub fn pointer_move(&mut self, pos: Pos2) -> Option<MarkId> {
        if !self.gesture.is_painting() {
            return None;
        }
        self.place_mark(pos)
    }

    pub fn pointer_up(&mut self) {
        self.gesture.end();
    }

    fn place_mark(&mut self, pos: Pos2) -> Option<MarkId> {
        if !self.canvas.is_inside_image(pos) {
            return None;
        }
        let id = MarkId(self.next_mark_id);
        self.next_mark_id += 1;
        let mark = self.tools.create_mark(id, pos, self.gesture.mode());
        self.canvas.push_mark(mark);
        self.history.push(id);
        Some(id)
    }

    pub fn mode(&self) -> ToolMode {
        self.gesture.mode()
    }

    // ------------------------------------------------------------------
    // Undo
    // ------------------------------------------------------------------

    /// Remove the most recent mark from history and surface. No-op when empty.
    pub fn undo(&mut self) -> Option<Mark> {
        let id = self.history.pop()?;
        let removed = self.canvas.remove_mark(id);
        crate::log_info!("Undo mark {:?}; {} remaining", id, self.history.len());
        removed
    }

    /// Eraser-toggle press: pops one mark, then reports the latched eraser
    /// flag so the button can restyle itself.
    pub fn toggle_eraser(&mut self) -> bool {
        self.undo();
        self.gesture.is_erasing()
    }
}
