//! Renderer implementations

pub mod console;
pub mod json;

pub use console::ConsoleRenderer;
pub use json::JsonRenderer;

pub use crate::core::Renderer;
