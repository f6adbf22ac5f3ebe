//! Color-adjacency state space built from a source image
//!
//! Each quantized color is a state. Its transition list holds the keys of every
//! orthogonal neighbor seen in the source, in scan order and with duplicates,
//! so a uniform draw from the list reproduces the observed adjacency
//! frequencies.

use crate::color::codec::encode;
use crate::color::{ColorKey, Threshold};
use crate::io::error::Result;
use crate::synthesis::grid::PixelGrid;
use image::Rgba;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Markov state space over quantized colors
#[derive(Debug, Clone, Default)]
pub struct TransitionModel {
    transitions: HashMap<ColorKey, Vec<ColorKey>>,
    keys: Vec<ColorKey>,
    threshold: Threshold,
}

impl TransitionModel {
    /// Empty model quantizing with `threshold`
    pub fn new(threshold: Threshold) -> Self {
        Self {
            transitions: HashMap::new(),
            keys: Vec::new(),
            threshold,
        }
    }

    /// Scan every pixel of `grid` and record its in-bounds neighbors
    ///
    /// Corners contribute 2 transitions, edges 3 and interior pixels 4. Every
    /// pixel's color becomes a state even when it has no neighbors.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid bounds hold no pixels
    pub fn build_from_grid(grid: &PixelGrid, threshold: Threshold) -> Result<Self> {
        let bounds = grid.bounds();
        bounds.ensure_non_empty()?;

        let mut model = Self::new(threshold);
        for point in bounds.points() {
            let Some(color) = grid.get(point) else {
                continue;
            };
            model.register(color);
            for neighbor in point.neighbors() {
                if let Some(adjacent) = grid.get(neighbor) {
                    model.add_transition(color, adjacent);
                }
            }
        }

        debug!(
            states = model.state_count(),
            transitions = model.transition_count(),
            threshold = threshold.get(),
            "built transition model"
        );
        Ok(model)
    }

    /// Record that `to` was observed next to `from`
    pub fn add_transition(&mut self, from: Rgba<u8>, to: Rgba<u8>) {
        let target = encode(to, self.threshold);
        self.state_mut(from).push(target);
    }

    /// Make `color` a known state without recording a transition
    pub fn register(&mut self, color: Rgba<u8>) {
        self.state_mut(color);
    }

    fn state_mut(&mut self, color: Rgba<u8>) -> &mut Vec<ColorKey> {
        let key = encode(color, self.threshold);
        match self.transitions.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.keys.push(key);
                entry.insert(Vec::new())
            }
        }
    }

    /// Recorded successors of a state, `None` for unknown keys
    pub fn transitions(&self, key: ColorKey) -> Option<&[ColorKey]> {
        self.transitions.get(&key).map(Vec::as_slice)
    }

    /// Distinct states in first-encounter order
    pub fn distinct_keys(&self) -> &[ColorKey] {
        &self.keys
    }

    /// Number of distinct states
    pub fn state_count(&self) -> usize {
        self.keys.len()
    }

    /// Total number of recorded transitions across all states
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    /// Quantization threshold used for every key in this model
    pub const fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Whether no state has been recorded
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
