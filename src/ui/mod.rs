//! User interface module
//!
//! GPUI views and components for the converter window.

pub mod components;
pub mod theme;

pub use theme::Theme;
