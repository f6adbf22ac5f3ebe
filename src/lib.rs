//! Stochastic image generation from color-adjacency Markov chains
//!
//! Every distinct (quantized) color of a source image is a state whose
//! transitions are the colors seen at its orthogonal neighbors. A new image of
//! the same size is produced by a randomized flood fill that colors each newly
//! reached pixel with a random successor of the pixel it was reached from.

#![forbid(unsafe_code)]

/// Color keys, quantization and channel normalization
pub mod color;
/// Input/output operations, configuration and error handling
pub mod io;
/// Transition model, sampler and per-image facade
pub mod model;
/// Pixel grids and the flood-fill synthesizer
pub mod synthesis;

pub use io::error::{MarkovError, Result};
