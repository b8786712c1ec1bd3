pub mod components;
pub mod console;
pub mod screens;
pub mod theme;

pub use theme::Theme;
