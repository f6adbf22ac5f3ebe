//! Uniform random draws over the transition model
//!
//! The default generator is the thread-local CSPRNG from `rand`. Tests inject a
//! seeded generator through [`RandomSelector::from_rng`].

use crate::color::codec::{decode, encode};
use crate::io::error::{MarkovError, Result, invalid_source};
use crate::model::transitions::TransitionModel;
use crate::synthesis::grid::{Bounds, Point};
use image::Rgba;
use rand::Rng;
use rand::rngs::ThreadRng;

/// Random selector for stochastic choices during synthesis
#[derive(Debug, Clone)]
pub struct RandomSelector<R = ThreadRng> {
    rng: R,
}

impl RandomSelector {
    /// Selector backed by the thread-local cryptographically secure generator
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSelector<R> {
    /// Selector backed by a caller-supplied generator
    pub const fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform index in `[0, len)`
    ///
    /// # Errors
    ///
    /// Returns an error if `len` is zero
    pub fn random_index(&mut self, len: usize) -> Result<usize> {
        if len == 0 {
            return Err(MarkovError::EmptySelection { what: "sequence" });
        }
        Ok(self.rng.random_range(0..len))
    }

    /// Uniform element of a slice
    ///
    /// # Errors
    ///
    /// Returns an error if `items` is empty
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        let index = self.random_index(items.len())?;
        items
            .get(index)
            .ok_or(MarkovError::EmptySelection { what: "sequence" })
    }

    /// Successor color for `color`, drawn by observed frequency
    ///
    /// Returns `None` when the color is not a state or has no recorded successors.
    pub fn next_color(&mut self, model: &TransitionModel, color: Rgba<u8>) -> Option<Rgba<u8>> {
        let key = encode(color, model.threshold());
        let successors = model.transitions(key)?;
        self.choose(successors).ok().map(|&next| decode(next))
    }

    /// Uniformly chosen state, independent of transition frequency
    ///
    /// # Errors
    ///
    /// Returns an error if the model has no states
    pub fn random_color(&mut self, model: &TransitionModel) -> Result<Rgba<u8>> {
        self.choose(model.distinct_keys())
            .map(|&key| decode(key))
            .map_err(|_empty| MarkovError::EmptySelection {
                what: "transition model",
            })
    }

    /// Uniform coordinate within `bounds`
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds hold no cells
    pub fn random_point(&mut self, bounds: &Bounds) -> Result<Point> {
        let column = self.random_index(bounds.width() as usize)?;
        let row = self.random_index(bounds.height() as usize)?;
        let x = bounds.min_x.checked_add_unsigned(column as u32);
        let y = bounds.min_y.checked_add_unsigned(row as u32);
        x.zip(y)
            .map(|(x, y)| Point::new(x, y))
            .ok_or_else(|| invalid_source(&"start point outside the coordinate range"))
    }
}
