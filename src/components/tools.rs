use crate::canvas::{Mark, MarkId, MarkShape};
use crate::components::colors::{ColorsPanel, ERASER_COLOR, NamedColor};
use eframe::egui;
use egui::{Color32, Pos2, Rect, Vec2};

pub const MIN_BRUSH_SIZE: f32 = 1.0;
pub const MAX_BRUSH_SIZE: f32 = 50.0;
pub const DEFAULT_BRUSH_SIZE: f32 = 10.0;

/// Eraser toggle fill while the last gesture was an erase.
pub const ERASER_ACTIVE_FILL: Color32 = Color32::from_rgb(128, 128, 128);
/// Eraser toggle fill otherwise (#3498db).
pub const ERASER_IDLE_FILL: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Paint,
    Erase,
}

impl ToolMode {
    /// Ctrl held at pointer-down selects the eraser for that gesture.
    pub fn from_modifier(ctrl: bool) -> Self {
        if ctrl { ToolMode::Erase } else { ToolMode::Paint }
    }
}

// ============================================================================
// ToolProperties — brush size + color read from the host controls
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolProperties {
    pub size: f32,
    pub color: NamedColor,
}

impl Default for ToolProperties {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            color: NamedColor::Black,
        }
    }
}

impl ToolProperties {
    /// Build a square-bounded mark centered on `pos`.
    ///
    /// Paint marks are ellipses in the selected color; erase marks are
    /// squares in the fixed eraser color.
    pub fn create_mark(&self, id: MarkId, pos: Pos2, mode: ToolMode) -> Mark {
        let (shape, fill) = match mode {
            ToolMode::Paint => (MarkShape::Ellipse, self.color.color()),
            ToolMode::Erase => (MarkShape::Square, ERASER_COLOR),
        };
        let half = self.size / 2.0;
        Mark {
            id,
            shape,
            rect: Rect::from_min_size(pos - Vec2::splat(half), Vec2::splat(self.size)),
            fill,
        }
    }
}

// ============================================================================
// GestureState — pointer-down → move* → pointer-up
// ============================================================================

/// Two latched flags: `painting` between down and up, `erasing` sampled at down.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureState {
    painting: bool,
    erasing: bool,
}

impl GestureState {
    pub fn begin(&mut self, ctrl: bool) {
        self.painting = true;
        self.erasing = ToolMode::from_modifier(ctrl) == ToolMode::Erase;
    }

    /// `erasing` stays latched until the next `begin`.
    pub fn end(&mut self) {
        self.painting = false;
    }

    pub fn is_painting(&self) -> bool {
        self.painting
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    pub fn mode(&self) -> ToolMode {
        if self.erasing { ToolMode::Erase } else { ToolMode::Paint }
    }
}

// ============================================================================
// ToolsPanel — toolbar controls
// ============================================================================

/// Button presses raised by the toolbar during one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolAction {
    SelectImage,
    Undo,
    ToggleEraser,
}

pub struct ToolsPanel {
    pub brush_size: f32,
    pub colors: ColorsPanel,
    /// Fill of the eraser toggle, refreshed only when it is pressed.
    pub eraser_fill: Color32,
}

impl Default for ToolsPanel {
    fn default() -> Self {
        Self::new(ToolProperties::default())
    }
}

impl ToolsPanel {
    pub fn new(props: ToolProperties) -> Self {
        Self {
            brush_size: props.size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE),
            colors: ColorsPanel::new(props.color),
            eraser_fill: ERASER_IDLE_FILL,
        }
    }

    pub fn properties(&self) -> ToolProperties {
        ToolProperties {
            size: self.brush_size,
            color: self.colors.selected,
        }
    }

    pub fn set_eraser_highlight(&mut self, erasing: bool) {
        self.eraser_fill = if erasing { ERASER_ACTIVE_FILL } else { ERASER_IDLE_FILL };
    }

    pub fn show(&mut self, ui: &mut egui::Ui, selected_image: Option<&str>) -> Vec<ToolAction> {
        let mut actions = Vec::new();
        ui.horizontal(|ui| {
            if ui.button("Select Image").clicked() {
                actions.push(ToolAction::SelectImage);
            }
            let label = match selected_image {
                Some(name) => format!("Selected Image: {}", name),
                None => "No image selected".to_string(),
            };
            ui.label(label);

            ui.separator();
            ui.add(
                egui::Slider::new(&mut self.brush_size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE)
                    .text("Brush size"),
            );

            ui.separator();
            ui.label("Color");
            self.colors.show(ui);

            ui.separator();
            if ui.button("Undo").clicked() {
                actions.push(ToolAction::Undo);
            }
            let eraser = egui::Button::new(
                egui::RichText::new("Eraser").color(Color32::WHITE),
            )
            .fill(self.eraser_fill);
            if ui
                .add(eraser)
                .on_hover_text("Hold Ctrl while dragging to erase")
                .clicked()
            {
                actions.push(ToolAction::ToggleEraser);
            }
        });
        actions
    }
}
