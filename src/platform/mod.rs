//! Platform abstraction layer
//!
//! Browser-independent pieces of the input glue:
//! - Key to command mapping
//! - Pointer coordinate conversion and backing-store sizing
//! - Legend text shown next to the canvas

pub mod input;

pub use input::{LEGEND_LINES, backing_size, click_command, command_for_key};
