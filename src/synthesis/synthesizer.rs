//! Randomized flood fill over the output grid driven by the transition model
//!
//! A random cell receives a random model color. Cells are then popped from the
//! frontier and every unassigned in-bounds neighbor is colored with a successor
//! of the popped cell's color and pushed. The walk ends when the frontier is
//! empty; for sources of at least 2x2 pixels every cell is reached.

use crate::io::configuration::PROGRESS_UPDATE_INTERVAL;
use crate::io::error::{MarkovError, Result, invalid_source};
use crate::model::sampler::RandomSelector;
use crate::model::transitions::TransitionModel;
use crate::synthesis::frontier::{Frontier, FrontierOrder};
use crate::synthesis::grid::{Bounds, PixelGrid};
use bitvec::prelude::*;
use rand::Rng;
use tracing::debug;

/// Generated grid together with its coverage statistics
#[derive(Debug, Clone)]
pub struct Synthesis {
    grid: PixelGrid,
    reached: usize,
    missing_transitions: usize,
}

impl Synthesis {
    /// The generated grid
    pub const fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Take ownership of the generated grid
    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    /// Cells that received a color
    pub const fn reached(&self) -> usize {
        self.reached
    }

    /// Cells in the output grid
    pub const fn total(&self) -> usize {
        self.grid.bounds().area()
    }

    /// Cells left at the unset color
    pub const fn unreached(&self) -> usize {
        self.total().saturating_sub(self.reached)
    }

    /// Neighbor expansions skipped because the current color had no successors
    pub const fn missing_transitions(&self) -> usize {
        self.missing_transitions
    }

    /// Whether every cell received a color
    pub const fn is_complete(&self) -> bool {
        self.unreached() == 0
    }

    /// Fail unless every cell received a color
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::IncompleteCoverage`] if any cell is still unset
    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(MarkovError::IncompleteCoverage {
                unset: self.unreached(),
                total: self.total(),
            })
        }
    }
}

/// Flood-fill image generator over a read-only transition model
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    model: &'a TransitionModel,
    bounds: Bounds,
    order: FrontierOrder,
    progress_interval: usize,
}

impl<'a> Synthesizer<'a> {
    /// Generator producing grids of `bounds` from `model`
    pub const fn new(model: &'a TransitionModel, bounds: Bounds) -> Self {
        Self {
            model,
            bounds,
            order: FrontierOrder::Random,
            progress_interval: PROGRESS_UPDATE_INTERVAL,
        }
    }

    /// Use the given frontier expansion order
    #[must_use]
    pub const fn with_order(mut self, order: FrontierOrder) -> Self {
        self.order = order;
        self
    }

    /// Report progress every `interval` assigned cells (minimum 1)
    #[must_use]
    pub const fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = if interval == 0 { 1 } else { interval };
        self
    }

    /// Generate one grid
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds hold no cells or the model has no states
    pub fn run<R: Rng>(&self, selector: &mut RandomSelector<R>) -> Result<Synthesis> {
        self.run_with_progress(selector, |_, _| {})
    }

    /// Generate one grid, calling `on_progress(assigned, total)` periodically
    /// and once more when the walk finishes
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds hold no cells or the model has no states
    pub fn run_with_progress<R, F>(
        &self,
        selector: &mut RandomSelector<R>,
        mut on_progress: F,
    ) -> Result<Synthesis>
    where
        R: Rng,
        F: FnMut(usize, usize),
    {
        self.bounds.ensure_non_empty()?;
        if self.model.is_empty() {
            return Err(invalid_source(&"transition model has no states"));
        }

        let total = self.bounds.area();
        let mut grid = PixelGrid::unset(self.bounds);
        let mut assigned: BitVec = bitvec![0; total];
        let mut frontier = Frontier::new(self.order);

        let start = selector.random_point(&self.bounds)?;
        let start_color = selector.random_color(self.model)?;
        if let Some(index) = self.bounds.index_of(start) {
            grid.set(start, start_color);
            assigned.set(index, true);
            frontier.push(start);
        }
        let mut reached = 1;
        let mut missing_transitions = 0;

        while let Some(point) = frontier.pop(selector)? {
            let Some(current) = grid.get(point) else {
                continue;
            };
            for neighbor in point.neighbors() {
                let Some(index) = self.bounds.index_of(neighbor) else {
                    continue;
                };
                if assigned.get(index).as_deref() == Some(&true) {
                    continue;
                }
                let Some(next) = selector.next_color(self.model, current) else {
                    missing_transitions += 1;
                    continue;
                };
                grid.set(neighbor, next);
                assigned.set(index, true);
                frontier.push(neighbor);
                reached += 1;
                if reached % self.progress_interval == 0 {
                    on_progress(reached, total);
                }
            }
        }
        on_progress(reached, total);

        debug!(
            reached,
            total,
            missing_transitions,
            order = ?self.order,
            "flood fill finished"
        );

        Ok(Synthesis {
            grid,
            reached,
            missing_transitions,
        })
    }
}
