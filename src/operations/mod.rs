//! Operations module
//!
//! Listing catalog types and rendering constructed instances

pub mod list;
pub mod render;

pub use list::*;
pub use render::*;
