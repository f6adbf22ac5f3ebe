//! Color representation shared by the model and the synthesizer

/// Key packing, quantization and channel-depth normalization
pub mod codec;

pub use codec::{ColorKey, Threshold};
