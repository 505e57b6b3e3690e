use std::path::PathBuf;

use eframe::egui;

use crate::canvas::Canvas;
use crate::components::dialogs::ErrorDialog;
use crate::components::tools::{ToolAction, ToolProperties, ToolsPanel};
use crate::io;
use crate::session::PaintSession;
use crate::settings::AppSettings;

pub struct SprayPaintApp {
    session: PaintSession,
    canvas: Canvas,
    tools_panel: ToolsPanel,
    error_dialog: ErrorDialog,
    /// Settings as read from disk, before command-line overrides.
    stored_settings: AppSettings,
    /// Control values the session started with (overrides applied).
    session_start: ToolProperties,

    /// Image passed on the command line, opened once the surface has a size.
    pending_startup_file: Option<PathBuf>,
    first_frame: bool,
}

impl SprayPaintApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        stored_settings: AppSettings,
        session_settings: &AppSettings,
        startup_file: Option<PathBuf>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let props = session_settings.tool_properties();
        Self {
            session: PaintSession::new(0.0, 0.0, props),
            canvas: Canvas::new(),
            tools_panel: ToolsPanel::new(props),
            error_dialog: ErrorDialog::default(),
            stored_settings,
            session_start: props,
            pending_startup_file: startup_file,
            first_frame: true,
        }
    }

    fn handle_open_file(&mut self) {
        if let Some(path) = io::pick_image_path() {
            self.open_file_by_path(path);
        }
    }

    fn open_file_by_path(&mut self, path: PathBuf) {
        if let Err(e) = self.session.load_image(&path) {
            self.error_dialog
                .open_with("Error", format!("Error loading image: {}", e));
        }
    }

    fn handle_tool_action(&mut self, action: ToolAction) {
        match action {
            ToolAction::SelectImage => self.handle_open_file(),
            ToolAction::Undo => {
                self.session.undo();
            }
            ToolAction::ToggleEraser => {
                let erasing = self.session.toggle_eraser();
                self.tools_panel.set_eraser_highlight(erasing);
            }
        }
    }
}

impl eframe::App for SprayPaintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let actions = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                ui.add_space(4.0);
                let actions = self
                    .tools_panel
                    .show(ui, self.session.selected_image_name());
                ui.add_space(4.0);
                actions
            })
            .inner;

        // Controls are read at event time, so sync before any pointer input
        self.session.tools = self.tools_panel.properties();

        // Modal dialog blocks canvas input while it is up
        let dialog_open = self.error_dialog.open;
        let events = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.canvas.show(ui, &mut self.session.canvas))
            .inner;

        // The surface now has its real size, so a startup image fits correctly
        if self.first_frame {
            self.first_frame = false;
            if let Some(path) = self.pending_startup_file.take() {
                self.open_file_by_path(path);
            }
        }

        if !dialog_open {
            for action in actions {
                self.handle_tool_action(action);
            }
            for event in events {
                self.session.handle_pointer(event);
            }
        }

        self.error_dialog.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self
            .stored_settings
            .commit_session(self.session_start, self.tools_panel.properties())
        {
            self.stored_settings.save();
        }
        crate::log_info!("Session closed");
    }
}
