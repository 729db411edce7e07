//! Site elements for a personal portfolio/blog: header, hero, footer and
//! data-driven card grids, rendered as HTML fragments or previewed in a
//! terminal.  See `main.rs` for the module map.

pub mod app;
pub mod config;
pub mod elements;
pub mod error;
pub mod grid;
pub mod input;
pub mod keymap;
pub mod loader;
pub mod logging;
pub mod markup;
pub mod page;
pub mod source;
pub mod theme;
pub mod ui;
