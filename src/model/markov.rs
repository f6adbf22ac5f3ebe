//! Source-image Markov model carrying bounds and format from decode to encode

use crate::color::Threshold;
use crate::io::error::Result;
use crate::io::image::SourceImage;
use crate::model::sampler::RandomSelector;
use crate::model::transitions::TransitionModel;
use crate::synthesis::{Bounds, FrontierOrder, PixelGrid, Synthesis, Synthesizer};
use image::ImageFormat;
use rand::Rng;

/// Transition model of one source image plus what is needed to write results back
#[derive(Debug, Clone)]
pub struct MarkovImage {
    model: TransitionModel,
    bounds: Bounds,
    format: ImageFormat,
    order: FrontierOrder,
}

impl MarkovImage {
    /// Build the model from a decoded grid; results are written as PNG
    ///
    /// # Errors
    ///
    /// Returns an error if the grid holds no pixels
    pub fn from_grid(grid: &PixelGrid, threshold: Threshold) -> Result<Self> {
        Ok(Self {
            model: TransitionModel::build_from_grid(grid, threshold)?,
            bounds: grid.bounds(),
            format: ImageFormat::Png,
            order: FrontierOrder::default(),
        })
    }

    /// Build the model from a decoded file, keeping its format for re-encoding
    ///
    /// # Errors
    ///
    /// Returns an error if the image holds no pixels
    pub fn from_source(source: &SourceImage, threshold: Threshold) -> Result<Self> {
        let mut markov = Self::from_grid(source.grid(), threshold)?;
        markov.format = source.format();
        Ok(markov)
    }

    /// Use the given frontier expansion order for subsequent syntheses
    #[must_use]
    pub const fn with_order(mut self, order: FrontierOrder) -> Self {
        self.order = order;
        self
    }

    /// The underlying state space
    pub const fn model(&self) -> &TransitionModel {
        &self.model
    }

    /// Bounds shared by the source and every generated grid
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Format the source was decoded from
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Configured flood-fill generator over this model
    pub const fn synthesizer(&self) -> Synthesizer<'_> {
        Synthesizer::new(&self.model, self.bounds).with_order(self.order)
    }

    /// Generate a new grid with the source bounds
    ///
    /// # Errors
    ///
    /// Returns an error if the model has no states
    pub fn synthesize<R: Rng>(&self, selector: &mut RandomSelector<R>) -> Result<Synthesis> {
        self.synthesizer().run(selector)
    }
}
