use eframe::egui;
use egui::{Color32, Pos2, Rect, Vec2};
use image::RgbaImage;
use std::sync::Arc;

// ============================================================================
// DISPLAY LIST
// ============================================================================

/// Identity of a mark, stable for the lifetime of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkShape {
    /// Paint dab.
    Ellipse,
    /// Eraser dab.
    Square,
}

/// One painted or erased unit. Never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub id: MarkId,
    pub shape: MarkShape,
    /// Surface-space bounds; center is the pointer position that placed it.
    pub rect: Rect,
    pub fill: Color32,
}

impl Mark {
    pub fn center(&self) -> Pos2 {
        self.rect.center()
    }
}

/// Decoded bitmap placed into its fitted rectangle.
#[derive(Clone)]
pub struct BackgroundImage {
    pub name: String,
    pub rect: Rect,
    pub pixels: Arc<RgbaImage>,
    /// Bumped on every load so the widget knows to re-upload the texture.
    pub generation: u64,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("name", &self.name)
            .field("rect", &self.rect)
            .field("pixels", &(self.pixels.width(), self.pixels.height()))
            .field("generation", &self.generation)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub enum Element {
    Image(BackgroundImage),
    Mark(Mark),
}

impl Element {
    pub fn as_mark(&self) -> Option<&Mark> {
        match self {
            Element::Mark(m) => Some(m),
            Element::Image(_) => None,
        }
    }
}

// ============================================================================
// CANVAS STATE — the drawable surface and its ordered children
// ============================================================================

/// Drawable surface: a size plus an ordered display list
/// (background image first, then marks in placement order).
#[derive(Clone, Debug, Default)]
pub struct CanvasState {
    pub width: f32,
    pub height: f32,
    elements: Vec<Element>,
}

impl CanvasState {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Track the host panel size. Already-placed elements keep their positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn marks(&self) -> impl Iterator<Item = &Mark> + '_ {
        self.elements.iter().filter_map(Element::as_mark)
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        match self.elements.first() {
            Some(Element::Image(img)) => Some(img),
            _ => None,
        }
    }

    /// Drop every child and make `image` the only element.
    pub fn replace_with_image(&mut self, image: BackgroundImage) {
        self.elements.clear();
        self.elements.push(Element::Image(image));
    }

    pub fn push_mark(&mut self, mark: Mark) {
        self.elements.push(Element::Mark(mark));
    }

    /// Remove the mark with this identity wherever it sits in the list.
    pub fn remove_mark(&mut self, id: MarkId) -> Option<Mark> {
        let idx = self
            .elements
            .iter()
            .position(|e| matches!(e, Element::Mark(m) if m.id == id))?;
        match self.elements.remove(idx) {
            Element::Mark(m) => Some(m),
            Element::Image(_) => None,
        }
    }

    /// Bounds of the first element, when that element is the background image.
    pub fn image_bounds(&self) -> Option<Rect> {
        self.background().map(|img| img.rect)
    }

    /// Inclusive hit test against the first element's rectangle.
    /// Fails closed when no image heads the display list.
    pub fn is_inside_image(&self, pos: Pos2) -> bool {
        match self.image_bounds() {
            Some(r) => pos.x >= r.min.x && pos.x <= r.max.x && pos.y >= r.min.y && pos.y <= r.max.y,
            None => false,
        }
    }
}

// ============================================================================
// POINTER EVENTS — raw host input translated into surface coordinates
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down {
        pos: Pos2,
        primary: bool,
        ctrl: bool,
    },
    Move(Pos2),
    Up,
}

// ============================================================================
// CANVAS WIDGET
// ============================================================================

/// Renders a [`CanvasState`] and collects the pointer events that hit it.
pub struct Canvas {
    pub background: Color32,
    texture: Option<egui::TextureHandle>,
    texture_generation: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            background: Color32::from_gray(245),
            texture: None,
            texture_generation: 0,
        }
    }

    /// Lay out the canvas over all available space, draw the display list,
    /// and return this frame's pointer events in surface coordinates.
    ///
    /// The surface size is written back into `state` before anything else so
    /// image fitting always sees the current panel size.
    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut CanvasState) -> Vec<PointerEvent> {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        state.resize(rect.width(), rect.height());

        painter.rect_filled(rect, 0.0, self.background);

        let origin = rect.min.to_vec2();
        for element in state.elements() {
            match element {
                Element::Image(img) => {
                    let tex = self.texture_for(ui.ctx(), img);
                    painter.image(
                        tex,
                        img.rect.translate(origin),
                        Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
                Element::Mark(mark) => {
                    let r = mark.rect.translate(origin);
                    match mark.shape {
                        MarkShape::Ellipse => {
                            // Marks are always square, so the ellipse is a circle
                            painter.circle_filled(r.center(), r.width() * 0.5, mark.fill);
                        }
                        MarkShape::Square => {
                            painter.rect_filled(r, 0.0, mark.fill);
                        }
                    }
                }
            }
        }

        Self::collect_pointer_events(ui, rect)
    }

    fn texture_for(&mut self, ctx: &egui::Context, img: &BackgroundImage) -> egui::TextureId {
        if self.texture.is_none() || self.texture_generation != img.generation {
            let size = [img.pixels.width() as usize, img.pixels.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.pixels.as_raw());
            self.texture = Some(ctx.load_texture(
                "background_image",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
            self.texture_generation = img.generation;
        }
        match &self.texture {
            Some(tex) => tex.id(),
            None => egui::TextureId::default(),
        }
    }

    fn collect_pointer_events(ui: &egui::Ui, rect: Rect) -> Vec<PointerEvent> {
        let ctx = ui.ctx();
        let layer = ui.layer_id();
        // Clone first: `layer_id_at` locks the context, which `input` already holds
        let events = ui.input(|i| i.events.clone());
        translate_pointer_events(&events, rect, |pos| {
            ctx.layer_id_at(pos).map_or(true, |top| top == layer)
        })
    }
}

/// Convert raw host events into surface-space [`PointerEvent`]s for a canvas
/// occupying `rect` in screen space.
///
/// A press counts only when it lands inside `rect` and `uncovered` says no
/// popup or window sits above it there. Moves and releases pass through
/// unconditionally so a drag that leaves the panel still ends.
pub fn translate_pointer_events(
    events: &[egui::Event],
    rect: Rect,
    uncovered: impl Fn(Pos2) -> bool,
) -> Vec<PointerEvent> {
    let origin = rect.min.to_vec2();
    let mut out = Vec::new();
    for event in events {
        match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed: true,
                modifiers,
            } => {
                if rect.contains(*pos) && uncovered(*pos) {
                    out.push(PointerEvent::Down {
                        pos: *pos - origin,
                        primary: *button == egui::PointerButton::Primary,
                        ctrl: modifiers.ctrl,
                    });
                }
            }
            egui::Event::PointerButton { pressed: false, .. } => out.push(PointerEvent::Up),
            egui::Event::PointerMoved(pos) => out.push(PointerEvent::Move(*pos - origin)),
            _ => {}
        }
    }
    out
}
