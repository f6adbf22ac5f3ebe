//! Coordinate domain and pixel storage for source and output images
//!
//! Grids are addressed in world coordinates so that a source decoded with a
//! non-zero origin produces an output with exactly the same bounds.

use crate::io::error::{Result, invalid_source};
use image::{Rgba, RgbaImage};

/// Color of a cell that has not been assigned yet
pub const UNSET: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Orthogonal neighbor offsets: left, up, right, down
pub const ADJACENT: [[i32; 2]; 4] = [[-1, 0], [0, -1], [1, 0], [0, 1]];

const fn clamp_extent(extent: u32) -> i32 {
    if extent > i32::MAX as u32 {
        i32::MAX
    } else {
        extent as i32
    }
}

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Point {
    /// Create a point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point shifted by `[dx, dy]`, `None` if a coordinate leaves the `i32` range
    pub const fn offset(self, delta: [i32; 2]) -> Option<Self> {
        match (self.x.checked_add(delta[0]), self.y.checked_add(delta[1])) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Orthogonal neighbors in [`ADJACENT`] order
    ///
    /// Neighbors that would leave the `i32` coordinate range are skipped; no
    /// bounds can contain them.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        ADJACENT.into_iter().filter_map(move |delta| self.offset(delta))
    }
}

/// Axis-aligned rectangle with inclusive minimum and exclusive maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Lowest column (inclusive)
    pub min_x: i32,
    /// Lowest row (inclusive)
    pub min_y: i32,
    /// Column past the last one (exclusive)
    pub max_x: i32,
    /// Row past the last one (exclusive)
    pub max_y: i32,
}

impl Bounds {
    /// Create bounds from explicit corners
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds starting at the origin
    ///
    /// Sizes beyond `i32::MAX` are clamped to it.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, clamp_extent(width), clamp_extent(height))
    }

    /// Bounds of a `width` x `height` area whose top-left cell is `origin`
    ///
    /// # Errors
    ///
    /// Returns an error if the far edge lies beyond `i32::MAX`
    pub fn with_origin(origin: Point, width: u32, height: u32) -> Result<Self> {
        let far_edge = |start: i32, extent: u32| start.checked_add_unsigned(extent);
        match (far_edge(origin.x, width), far_edge(origin.y, height)) {
            (Some(max_x), Some(max_y)) => Ok(Self::new(origin.x, origin.y, max_x, max_y)),
            _ => Err(invalid_source(&format!(
                "a {width}x{height} grid at ({}, {}) exceeds the coordinate range",
                origin.x, origin.y
            ))),
        }
    }

    /// Number of columns (zero for inverted bounds)
    pub const fn width(&self) -> u32 {
        if self.max_x > self.min_x {
            self.max_x.abs_diff(self.min_x)
        } else {
            0
        }
    }

    /// Number of rows (zero for inverted bounds)
    pub const fn height(&self) -> u32 {
        if self.max_y > self.min_y {
            self.max_y.abs_diff(self.min_y)
        } else {
            0
        }
    }

    /// Number of cells
    pub const fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Whether the bounds hold no cells
    pub const fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Check if a point lies within the bounds
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x < self.max_x
            && point.y >= self.min_y
            && point.y < self.max_y
    }

    /// Row-major index of a point, `None` outside the bounds
    pub const fn index_of(&self, point: Point) -> Option<usize> {
        if !self.contains(point) {
            return None;
        }
        let column = point.x.abs_diff(self.min_x) as usize;
        let row = point.y.abs_diff(self.min_y) as usize;
        Some(row * self.width() as usize + column)
    }

    /// Every point, x outer and y inner
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let Self {
            min_x,
            min_y,
            max_x,
            max_y,
        } = *self;
        (min_x..max_x).flat_map(move |x| (min_y..max_y).map(move |y| Point::new(x, y)))
    }

    /// Fail on bounds that hold no cells
    ///
    /// # Errors
    ///
    /// Returns an error if the width or height is zero
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(invalid_source(&format!(
                "bounds {}x{} contain no pixels",
                self.width(),
                self.height()
            )));
        }
        Ok(())
    }

    const fn local(&self, point: Point) -> Option<(u32, u32)> {
        if self.contains(point) {
            Some((point.x.abs_diff(self.min_x), point.y.abs_diff(self.min_y)))
        } else {
            None
        }
    }
}

/// RGBA pixel buffer addressed by world coordinates
#[derive(Debug, Clone)]
pub struct PixelGrid {
    bounds: Bounds,
    pixels: RgbaImage,
}

impl PixelGrid {
    /// Grid of the given bounds with every cell [`UNSET`]
    pub fn unset(bounds: Bounds) -> Self {
        Self {
            bounds,
            pixels: RgbaImage::from_pixel(bounds.width(), bounds.height(), UNSET),
        }
    }

    /// Wrap a decoded image with its top-left pixel at the origin
    pub fn from_image(pixels: RgbaImage) -> Self {
        Self {
            bounds: Bounds::from_size(pixels.width(), pixels.height()),
            pixels,
        }
    }

    /// Wrap a decoded image whose top-left pixel sits at `origin`
    ///
    /// # Errors
    ///
    /// Returns an error if the image would extend past `i32::MAX`
    pub fn with_origin(pixels: RgbaImage, origin: Point) -> Result<Self> {
        let bounds = Bounds::with_origin(origin, pixels.width(), pixels.height())?;
        Ok(Self { bounds, pixels })
    }

    /// Build a grid from row-major colors
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` doesn't hold exactly `width * height` entries
    pub fn from_colors(width: u32, height: u32, colors: &[Rgba<u8>]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if colors.len() != expected {
            return Err(invalid_source(&format!(
                "expected {expected} colors for a {width}x{height} grid, got {}",
                colors.len()
            )));
        }
        let raw: Vec<u8> = colors.iter().flat_map(|color| color.0).collect();
        RgbaImage::from_raw(width, height, raw)
            .map(Self::from_image)
            .ok_or_else(|| invalid_source(&"pixel buffer does not match grid size"))
    }

    /// Coordinate domain of the grid
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Color at a point, `None` outside the bounds
    pub fn get(&self, point: Point) -> Option<Rgba<u8>> {
        let (x, y) = self.bounds.local(point)?;
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Assign a color; returns `false` if the point is outside the bounds
    pub fn set(&mut self, point: Point, color: Rgba<u8>) -> bool {
        let Some((x, y)) = self.bounds.local(point) else {
            return false;
        };
        self.pixels.get_pixel_mut_checked(x, y).is_some_and(|pixel| {
            *pixel = color;
            true
        })
    }

    /// Number of cells whose color equals [`UNSET`]
    ///
    /// This compares colors only: a cell deliberately assigned transparent
    /// black is counted too. Use `Synthesis::unreached` for the number of cells
    /// a synthesis never assigned.
    pub fn count_unset(&self) -> usize {
        self.pixels.pixels().filter(|&&pixel| pixel == UNSET).count()
    }

    /// Borrow the underlying image buffer
    pub const fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Release the underlying image buffer for encoding
    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }
}
