//! # Mimic 🫧 Alpha
//!
//! Mimic-alpha computes opaque colors that look like translucent ones.
#![cfg_attr(
    not(feature = "pyffi"),
    doc = " This version of the API documentation **covers native Rust interfaces
only**. Enable the `pyffi` feature to also document the Python integration."
)]
#![cfg_attr(
    feature = "pyffi",
    doc = " This version of the API documentation **covers both Rust and Python
interfaces**. Disable the `pyffi` feature to document native Rust interfaces only."
)]
//!
//!
//! ## 1. Overview
//!
//! A color with an alpha value below one is translucent: When drawn on top of
//! some background, the background shows through. Many output formats and
//! tools handle translucency poorly or not at all. Mimic-alpha works around
//! that limitation by doing the compositing upfront, for a known, opaque
//! background. Its main abstractions are:
//!
//!   * [`Color`] is an **opaque sRGB color** with three [`Float`]
//!     coordinates. [`Color::over`] composites a color with alpha over a
//!     background color.
//!   * [`ColorValue`] and [`AlphaValue`] capture the **many forms of color and
//!     alpha inputs**, from color names such as `"tab:blue"` over grayscale
//!     levels and RGBA arrays to lists of any of these.
//!   * [`ColorParser`] resolves color tokens and coordinates. [`NamedColors`]
//!     implements the parser with matplotlib's base and Tableau colors and the
//!     CSS named colors.
//!   * [`Blender`] brings these together and **blends colors with alpha over a
//!     background**. The free functions [`blend`] and [`blend_over`] do the
//!     same with the built-in color names.
//!   * The [`cmap`] module applies the same transformation to **whole
//!     colormaps** with [`Blender::build_cmap`] and [`cmap::build_cmap`].
//!
//!
//! ## 2. Blending Colors
//!
//! Blending half-transparent red over the default white background yields
//! pink:
//!
//! ```
//! # use mimic_alpha::{blend, blend_over, Color};
//! # use mimic_alpha::error::BlendError;
//! # fn main() -> Result<(), BlendError> {
//! let pink = blend("r", 0.5)?;
//! assert_eq!(pink, vec![Color::srgb(1.0, 0.5, 0.5)]);
//!
//! let colors = blend(["r", "g"], [0.5, 0.3])?;
//! assert_eq!(colors, vec![Color::srgb(1.0, 0.5, 0.5), Color::srgb(0.7, 0.85, 0.7)]);
//!
//! let colors = blend_over([[0.0, 1.0, 1.0], [1.0, 0.0, 0.0]], 0.5, "0.5")?;
//! assert_eq!(colors[0].to_hex_format(), "#40bfbf");
//! # Ok(())
//! # }
//! ```
//!
//! Blending operates on gamma-encoded sRGB coordinates, just like most
//! compositors. Hence it approximates, but does not exactly reproduce,
//! physically correct mixing of light.
//!
//!
//! ## 3. Blending Colormaps
//!
//! [`cmap::build_cmap`] samples a colormap, blends every sample, and
//! assembles the results into a new colormap:
//!
//! ```
//! # use mimic_alpha::cmap::{build_cmap, CmapOptions, Colormap};
//! # use mimic_alpha::error::BlendError;
//! # fn main() -> Result<(), BlendError> {
//! let options = CmapOptions::builder().background("k").under("r").build();
//! let cmap = build_cmap("gray", 0.5, &options)?;
//!
//! assert_eq!(cmap.name(), "gray_alpha");
//! assert_eq!(cmap.sample(1.0), [0.5, 0.5, 0.5, 1.0]);
//! assert_eq!(cmap.sample(-1.0), [0.5, 0.0, 0.0, 1.0]);
//! # Ok(())
//! # }
//! ```
//!
//!
//! ## 4. Feature Flags
//!
//! Mimic-alpha supports two feature flags:
//!
//!   - `f64` selects the eponymous type as [`Float`]. If the feature is
//!     disabled, [`Float`] is `f32`. The feature is enabled by default.
//!   - `pyffi` enables the Python integration through
//!     [PyO3](https://pyo3.rs). It exposes [`Color`],
//!     [`SegmentedColormap`](cmap::SegmentedColormap),
//!     `color_alpha_to_rgb`, `build_cmap`, and `close_enough` through the
//!     `mimic_alpha` extension module.
#![cfg_attr(
    feature = "pyffi",
    doc = "Items that are only available in Python are decorated with <i
    class=python-only>Python only!</i>."
)]

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

mod blend;
pub mod cmap;
mod core;
pub mod error;
mod object;
mod parser;
mod value;

#[cfg(feature = "pyffi")]
pub use core::close_enough;

#[doc(hidden)]
pub use core::to_eq_bits;

#[cfg(feature = "pyffi")]
pub use blend::color_alpha_to_rgb;
pub use blend::{blend, blend_over, normalize_alpha, Blender};
pub use object::Color;
pub use parser::{ColorParser, NamedColors};
pub use value::{AlphaValue, ColorValue, Shape};

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn mimic_alpha(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(close_enough, m)?)?;
    m.add_function(wrap_pyfunction!(color_alpha_to_rgb, m)?)?;
    m.add_function(wrap_pyfunction!(cmap::py_build_cmap, m)?)?;

    m.add_class::<Color>()?;
    m.add_class::<cmap::SegmentedColormap>()?;

    Ok(())
}
