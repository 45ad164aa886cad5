//! Reusable view components

pub mod analytics;
pub mod detail;
pub mod loading;
pub mod navigation;
pub mod overview;
pub mod showcase;
pub mod toasts;
