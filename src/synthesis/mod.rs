//! Output grid generation
//!
//! This module contains:
//! - Bounds and pixel grid types shared with the model scan
//! - The frontier of cells awaiting expansion
//! - The randomized flood-fill synthesizer

/// Pending-cell container with random or LIFO pop order
pub mod frontier;
/// Bounds, points and RGBA pixel grids
pub mod grid;
/// Flood-fill generator
pub mod synthesizer;

pub use frontier::FrontierOrder;
pub use grid::{Bounds, PixelGrid, Point};
pub use synthesizer::{Synthesis, Synthesizer};
