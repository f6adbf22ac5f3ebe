//! Packing colors into 32-bit state keys and collapsing near-identical colors
//!
//! Keys hold red in the highest byte and alpha in the lowest. Quantization maps
//! each channel `v` to `floor(v / T) * T` before packing, so colors that differ
//! by less than the threshold share one Markov state.

use crate::io::error::{Result, invalid_parameter};
use image::Rgba;
use std::fmt;
use std::num::NonZeroU8;

/// Packed RGBA color used as a Markov state identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(pub u32);

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// Per-channel quantization step, never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold(NonZeroU8);

impl Threshold {
    /// Threshold that leaves every channel untouched
    pub const LOSSLESS: Self = Self(NonZeroU8::MIN);

    /// Create a threshold from a raw channel step
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is zero
    pub fn new(step: u8) -> Result<Self> {
        NonZeroU8::new(step)
            .map(Self)
            .ok_or_else(|| invalid_parameter("threshold", &step, &"must be greater than zero"))
    }

    /// Raw channel step
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    const fn apply(self, value: u8) -> u8 {
        let step = self.0.get();
        (value / step) * step
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::LOSSLESS
    }
}

/// Pack four channels into a key (R highest byte, A lowest)
pub const fn pack(channels: [u8; 4]) -> ColorKey {
    ColorKey(u32::from_be_bytes(channels))
}

/// Unpack a key into its four channels
pub const fn unpack(key: ColorKey) -> [u8; 4] {
    key.0.to_be_bytes()
}

/// Round every channel down to a multiple of the threshold
pub fn quantize(color: Rgba<u8>, threshold: Threshold) -> Rgba<u8> {
    Rgba(color.0.map(|channel| threshold.apply(channel)))
}

/// Quantize then pack a color into its state key
pub fn encode(color: Rgba<u8>, threshold: Threshold) -> ColorKey {
    pack(quantize(color, threshold).0)
}

/// Turn a state key back into a color, alpha included
pub const fn decode(key: ColorKey) -> Rgba<u8> {
    Rgba(unpack(key))
}

/// Channel types that can be narrowed to 8 bits
pub trait ChannelDepth: Copy {
    /// Truncate this channel value to the 0..=255 range
    fn to_u8(self) -> u8;
}

impl ChannelDepth for u8 {
    fn to_u8(self) -> u8 {
        self
    }
}

impl ChannelDepth for u16 {
    fn to_u8(self) -> u8 {
        (self >> 8) as u8
    }
}

impl ChannelDepth for f32 {
    // NaN saturates to 0 through the float-to-int cast
    fn to_u8(self) -> u8 {
        (self.clamp(0.0, 1.0) * 255.0) as u8
    }
}

/// Normalize a color of any supported channel depth to 8-bit channels
///
/// Lossy: low bits of wider channels are dropped.
pub fn to_rgba8<T: ChannelDepth>(color: Rgba<T>) -> Rgba<u8> {
    Rgba(color.0.map(ChannelDepth::to_u8))
}
