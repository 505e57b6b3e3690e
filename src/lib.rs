//! SprayPaint: load an image, paint or erase dots over it, undo one mark at a time.

#[macro_use]
pub mod logger;
pub mod app;
pub mod canvas;
pub mod cli;
pub mod components;
pub mod io;
pub mod session;
pub mod settings;
