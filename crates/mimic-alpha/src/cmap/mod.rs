//! Colormaps and their synthesis.
//!
//! A colormap maps positions in `0..=1` to RGBA colors through a lookup table
//! with a fixed number of entries, its resolution. This module defines the
//! [`Colormap`] and [`ColormapRegistry`] traits, two concrete colormaps,
//! [`SegmentedColormap`] and [`ListedColormap`], a registry with a selection
//! of well-known colormaps, [`BuiltinColormaps`], and the means for
//! synthesizing an opaque colormap that mimics a translucent one,
//! [`build_cmap`].
//!
//!
//! # Example
//!
//! ```
//! # use mimic_alpha::cmap::{build_cmap, CmapOptions, Colormap};
//! # use mimic_alpha::error::BlendError;
//! # fn main() -> Result<(), BlendError> {
//! let options = CmapOptions::builder().background("k").build();
//! let cmap = build_cmap("jet", 0.5, &options)?;
//!
//! assert_eq!(cmap.name(), "jet_alpha");
//! assert_eq!(cmap.resolution(), 256);
//! assert_eq!(cmap.sample(1.0), [0.25, 0.0, 0.0, 1.0]);
//! # Ok(())
//! # }
//! ```

mod listed;
mod registry;
mod segmented;
mod synth;

pub use listed::ListedColormap;
pub use registry::BuiltinColormaps;
pub use segmented::{Segment, SegmentData, SegmentedColormap};
#[cfg(feature = "pyffi")]
pub use synth::py_build_cmap;
pub use synth::{build_cmap, CmapOptionBuilder, CmapOptions};

use crate::error::ColormapError;
use crate::{Color, Float};

/// A colormap.
///
/// Sampling a colormap follows the same rules as matplotlib: For positions in
/// `0..1`, the entry is `floor(position * N)`, where N is the resolution.
/// Position 1 maps to the last entry. Positions below 0 map to the under color,
/// positions above 1 map to the over color, and not-a-number maps to the bad
/// color. Under and over colors default to the first and last entries,
/// respectively. The bad color defaults to transparent black.
pub trait Colormap {
    /// Get the colormap's name.
    fn name(&self) -> &str;

    /// Get the number of entries in the colormap's lookup table.
    fn resolution(&self) -> usize;

    /// Sample the colormap at the given position.
    fn sample(&self, position: Float) -> [Float; 4];
}

impl<C: Colormap + ?Sized> Colormap for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolution(&self) -> usize {
        (**self).resolution()
    }

    fn sample(&self, position: Float) -> [Float; 4] {
        (**self).sample(position)
    }
}

/// A registry of colormaps by name.
pub trait ColormapRegistry {
    /// Look up the colormap with the given name.
    ///
    /// # Errors
    ///
    /// If the registry has no such colormap, this method returns
    /// [`ColormapError::UnknownColormap`].
    fn lookup(&self, name: &str) -> Result<Box<dyn Colormap>, ColormapError>;
}

impl<R: ColormapRegistry + ?Sized> ColormapRegistry for &R {
    fn lookup(&self, name: &str) -> Result<Box<dyn Colormap>, ColormapError> {
        (**self).lookup(name)
    }
}

// ====================================================================================================================

const TRANSPARENT: [Float; 4] = [0.0, 0.0, 0.0, 0.0];

#[inline]
fn opaque(color: &Color) -> [Float; 4] {
    let [r, g, b] = color.coordinates();
    [r, g, b, 1.0]
}

/// A lookup table with its under, over, and bad colors.
///
/// The table always has at least one entry.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LookupTable {
    entries: Vec<[Float; 4]>,
    under: Option<Color>,
    over: Option<Color>,
    bad: Option<Color>,
}

impl LookupTable {
    pub fn new(entries: Vec<[Float; 4]>) -> Result<Self, ColormapError> {
        if entries.is_empty() {
            return Err(ColormapError::ZeroResolution);
        }

        Ok(Self {
            entries,
            under: None,
            over: None,
            bad: None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[[Float; 4]] {
        &self.entries
    }

    pub fn under(&self) -> Option<Color> {
        self.under
    }

    pub fn over(&self) -> Option<Color> {
        self.over
    }

    pub fn bad(&self) -> Option<Color> {
        self.bad
    }

    pub fn set_under(&mut self, color: Option<Color>) {
        self.under = color;
    }

    pub fn set_over(&mut self, color: Option<Color>) {
        self.over = color;
    }

    pub fn set_bad(&mut self, color: Option<Color>) {
        self.bad = color;
    }

    /// Reverse the entries and swap under and over colors.
    pub fn reversed(&self) -> Self {
        Self {
            entries: self.entries.iter().rev().copied().collect(),
            under: self.over,
            over: self.under,
            bad: self.bad,
        }
    }

    pub fn sample(&self, position: Float) -> [Float; 4] {
        let (first, last) = match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return TRANSPARENT,
        };

        if position.is_nan() {
            return self.bad.as_ref().map_or(TRANSPARENT, opaque);
        } else if position < 0.0 {
            return self.under.as_ref().map_or(first, opaque);
        } else if 1.0 < position {
            return self.over.as_ref().map_or(last, opaque);
        }

        let n = self.entries.len();
        let index = ((position * n as Float).floor() as usize).min(n - 1);
        self.entries[index]
    }
}

// ====================================================================================================================
