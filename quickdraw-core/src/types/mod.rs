//! Core data types shared across the quickdraw crates.
//!
//! Currently this is the integer geometry used to describe panel windows and
//! buffer rectangles.

pub mod geometry;

pub use geometry::{PointInt, RectInt, SizeInt};
