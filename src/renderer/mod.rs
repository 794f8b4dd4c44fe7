//! Rendering module
//!
//! [`shapes`] turns a snapshot into a display list; the canvas backend draws
//! that list in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{Cloud, Color, Shape, TextAlign, clouds, scene};
