use std::path::{Path, PathBuf};

use egui::{Color32, Pos2, pos2};
use image::{Rgba, RgbaImage};
use spraypaint::canvas::{Element, MarkShape};
use spraypaint::components::colors::NamedColor;
use spraypaint::components::tools::ToolProperties;
use spraypaint::io::LoadError;
use spraypaint::session::PaintSession;

fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(w, h, Rgba([200, 180, 160, 255]))
        .save(&path)
        .unwrap();
    path
}

fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"\x00\x01not an image at all").unwrap();
    path
}

fn session() -> PaintSession {
    PaintSession::new(400.0, 300.0, ToolProperties::default())
}

fn image_center(s: &PaintSession) -> Pos2 {
    s.canvas.image_bounds().unwrap().center()
}

#[test]
fn load_fit_paint_undo_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "photo.png", 80, 60);

    let mut s = session();
    s.load_image(&png).unwrap();

    let bounds = s.canvas.image_bounds().unwrap();
    assert!((bounds.min - pos2(128.0, 96.0)).length() < 1e-3);
    assert!((bounds.max - pos2(272.0, 204.0)).length() < 1e-3);
    assert_eq!(s.selected_image_name(), Some("photo.png"));

    let c = image_center(&s);
    assert!(s.pointer_down(c, true, false).is_some());
    for dx in [5.0, 10.0, 15.0] {
        assert!(s.pointer_move(pos2(c.x + dx, c.y)).is_some());
    }
    s.pointer_up();
    assert_eq!(s.history().len(), 4);
    assert_eq!(s.canvas.len(), 5);

    let fourth = s.history().last().unwrap();
    let removed = s.undo().unwrap();
    assert_eq!(removed.id, fourth);
    assert!((removed.center() - pos2(c.x + 15.0, c.y)).length() < 1e-3);
    assert_eq!(s.history().len(), 3);
    assert!(s.canvas.marks().all(|m| m.id != fourth));
    assert_eq!(s.canvas.len(), 4);
    assert!(matches!(s.canvas.elements()[0], Element::Image(_)));
}

#[test]
fn undo_on_empty_history_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "a.png", 10, 10);
    let mut s = session();
    assert!(s.undo().is_none());

    s.load_image(&png).unwrap();
    assert!(s.undo().is_none());
    assert_eq!(s.canvas.len(), 1);
}

#[test]
fn dragging_out_and_back_in() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "a.png", 40, 30);
    let mut s = session();
    s.load_image(&png).unwrap();

    let c = image_center(&s);
    s.pointer_down(c, true, false);
    assert_eq!(s.pointer_move(pos2(5.0, 5.0)), None);
    assert_eq!(s.pointer_move(pos2(395.0, 295.0)), None);
    assert_eq!(s.history().len(), 1);

    assert!(s.pointer_move(pos2(c.x - 20.0, c.y + 10.0)).is_some());
    assert_eq!(s.history().len(), 2);
}

#[test]
fn loading_again_clears_marks_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_png(dir.path(), "first.png", 40, 30);
    let second = write_png(dir.path(), "second.png", 30, 40);
    let mut s = session();
    s.load_image(&first).unwrap();
    let c = image_center(&s);
    s.pointer_down(c, true, false);
    s.pointer_move(pos2(c.x + 1.0, c.y));
    s.pointer_up();

    s.load_image(&second).unwrap();
    assert!(s.history().is_empty());
    assert_eq!(s.canvas.len(), 1);
    assert_eq!(s.selected_image_name(), Some("second.png"));

    // Portrait image is limited by the 108-unit available height
    let b = s.canvas.image_bounds().unwrap();
    assert!((b.height() - 108.0).abs() < 1e-3);
    assert!((b.width() - 81.0).abs() < 1e-3);
}

#[test]
fn failed_load_still_clears_history_but_keeps_surface() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "ok.png", 40, 30);
    let bad = write_garbage(dir.path(), "broken.jpg");
    let mut s = session();
    s.load_image(&png).unwrap();
    let c = image_center(&s);
    s.pointer_down(c, true, false);
    s.pointer_up();
    assert_eq!(s.history().len(), 1);

    let err = s.load_image(&bad).unwrap_err();
    assert!(matches!(err, LoadError::Decode(_)));
    assert!(s.history().is_empty());

    // Previous image and its mark remain on screen but are no longer undoable
    assert_eq!(s.selected_image_name(), Some("ok.png"));
    assert_eq!(s.canvas.marks().count(), 1);
    assert!(s.undo().is_none());
    assert_eq!(s.canvas.marks().count(), 1);
}

#[test]
fn failed_first_load_leaves_empty_surface() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session();
    assert!(matches!(
        s.load_image(&dir.path().join("missing.png")),
        Err(LoadError::Io(_))
    ));
    assert!(s.canvas.is_empty());
    assert_eq!(s.pointer_down(pos2(200.0, 150.0), true, false), None);
}

#[test]
fn color_choice_and_eraser_gesture() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "a.png", 40, 30);
    let mut s = session();
    s.load_image(&png).unwrap();
    let c = image_center(&s);

    s.tools.color = NamedColor::from_name("Red");
    s.pointer_down(c, true, false);
    s.pointer_up();
    s.tools.color = NamedColor::from_name("Chartreuse");
    s.pointer_down(c, true, false);
    s.pointer_up();
    s.pointer_down(c, true, true);
    s.pointer_up();

    let marks: Vec<_> = s.canvas.marks().collect();
    assert_eq!(marks[0].fill, Color32::from_rgb(255, 0, 0));
    assert_eq!(marks[0].shape, MarkShape::Ellipse);
    assert_eq!(marks[1].fill, Color32::BLACK);
    assert_eq!(marks[2].fill, Color32::WHITE);
    assert_eq!(marks[2].shape, MarkShape::Square);

    // Eraser button pops the eraser mark and reports the latched erase flag
    assert!(s.toggle_eraser());
    assert_eq!(s.history().len(), 2);
}
