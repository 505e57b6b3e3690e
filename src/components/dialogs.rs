use eframe::egui;

// ============================================================================
// ERROR DIALOG
// ============================================================================

/// Modal message box for failures the user needs to acknowledge.
#[derive(Default)]
pub struct ErrorDialog {
    pub open: bool,
    title: String,
    message: String,
}

impl ErrorDialog {
    pub fn open_with(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.open = true;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Show the dialog if open. Enter, Esc or OK dismisses it.
    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let mut should_close =
            ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter))
                || ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape));

        egui::Window::new(self.title.as_str())
            .id(egui::Id::new("error_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("\u{26A0}")
                            .size(22.0)
                            .color(ui.visuals().error_fg_color),
                    );
                    ui.label(self.message.as_str());
                });
                ui.add_space(8.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.open = false;
        }
    }
}
