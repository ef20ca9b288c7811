//! UI rendering module for Skycast
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod dashboard;
pub mod favorites;
pub mod format;
pub mod help_overlay;
pub mod search;
pub mod widgets;

pub use dashboard::render as render_dashboard;
pub use favorites::render as render_favorites;
pub use help_overlay::render as render_help_overlay;
pub use search::render as render_search;
