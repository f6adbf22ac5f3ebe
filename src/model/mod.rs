//! Markov chain over source colors

/// Per-image model with bounds and format
pub mod markov;
/// Uniform random draws over the model
pub mod sampler;
/// Color-adjacency state space
pub mod transitions;

pub use markov::MarkovImage;
pub use sampler::RandomSelector;
pub use transitions::TransitionModel;
