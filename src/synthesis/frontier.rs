//! Pending cells of the flood fill whose color is already assigned

use crate::io::error::Result;
use crate::model::sampler::RandomSelector;
use crate::synthesis::grid::Point;
use clap::ValueEnum;
use rand::Rng;

/// Order in which frontier cells are expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FrontierOrder {
    /// Pop a uniformly random pending cell
    #[default]
    Random,
    /// Pop the most recently pushed cell
    Lifo,
}

/// Stack of assigned-but-unexpanded cells
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    order: FrontierOrder,
    pending: Vec<Point>,
}

impl Frontier {
    /// Empty frontier popping in `order`
    pub const fn new(order: FrontierOrder) -> Self {
        Self {
            order,
            pending: Vec::new(),
        }
    }

    /// Add a cell for later expansion
    pub fn push(&mut self, point: Point) {
        self.pending.push(point);
    }

    /// Remove the next cell to expand, `None` once the frontier is exhausted
    ///
    /// # Errors
    ///
    /// Propagates sampler errors (never raised for a non-empty frontier)
    pub fn pop<R: Rng>(&mut self, selector: &mut RandomSelector<R>) -> Result<Option<Point>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        match self.order {
            FrontierOrder::Lifo => Ok(self.pending.pop()),
            FrontierOrder::Random => {
                let index = selector.random_index(self.pending.len())?;
                Ok(Some(self.pending.swap_remove(index)))
            }
        }
    }

    /// Number of pending cells
    pub const fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no cells are pending
    pub const fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Expansion order of this frontier
    pub const fn order(&self) -> FrontierOrder {
        self.order
    }
}
