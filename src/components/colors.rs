use eframe::egui;
use egui::Color32;

/// Fill used for erase marks.
pub const ERASER_COLOR: Color32 = Color32::WHITE;

// ============================================================================
// NamedColor — closed set of brush colors offered by the color list
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NamedColor {
    #[default]
    Black,
    Red,
    Green,
    Blue,
}

impl NamedColor {
    pub fn all() -> &'static [NamedColor] {
        &[
            NamedColor::Black,
            NamedColor::Red,
            NamedColor::Green,
            NamedColor::Blue,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            NamedColor::Black => "Black",
            NamedColor::Red => "Red",
            NamedColor::Green => "Green",
            NamedColor::Blue => "Blue",
        }
    }

    /// Parse a list entry. Anything outside the closed set maps to Black.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Black" => NamedColor::Black,
            "Red" => NamedColor::Red,
            "Green" => NamedColor::Green,
            "Blue" => NamedColor::Blue,
            _ => NamedColor::Black,
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            NamedColor::Black => Color32::from_rgb(0, 0, 0),
            NamedColor::Red => Color32::from_rgb(255, 0, 0),
            // Web-standard green, not full-intensity lime
            NamedColor::Green => Color32::from_rgb(0, 128, 0),
            NamedColor::Blue => Color32::from_rgb(0, 0, 255),
        }
    }
}

// ============================================================================
// ColorsPanel — drop-down list of named brush colors
// ============================================================================

#[derive(Default)]
pub struct ColorsPanel {
    pub selected: NamedColor,
}

impl ColorsPanel {
    pub fn new(selected: NamedColor) -> Self {
        Self { selected }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        egui::ComboBox::from_id_source("brush_color_combo")
            .width(90.0)
            .selected_text(self.selected.name())
            .show_ui(ui, |ui| {
                for color in NamedColor::all() {
                    ui.horizontal(|ui| {
                        let (swatch, _) =
                            ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                        ui.painter().rect_filled(swatch, 2.0, color.color());
                        ui.selectable_value(&mut self.selected, *color, color.name());
                    });
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_is_pure_red() {
        assert_eq!(NamedColor::from_name("Red").color(), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn unknown_or_missing_selection_is_black() {
        assert_eq!(NamedColor::from_name("Magenta"), NamedColor::Black);
        assert_eq!(NamedColor::from_name(""), NamedColor::Black);
        assert_eq!(NamedColor::default().color(), Color32::BLACK);
        assert_eq!(NamedColor::from_name("red").color(), Color32::BLACK);
    }

    #[test]
    fn names_parse_back() {
        for color in NamedColor::all() {
            assert_eq!(NamedColor::from_name(color.name()), *color);
        }
    }
}
