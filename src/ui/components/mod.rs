//! UI components

mod about;
mod converter;
mod header;
mod status_bar;

pub use about::AboutBox;
pub use converter::ConverterView;
pub(crate) use header::Header;
pub(crate) use status_bar::{StatusBarProps, render_status_bar};
