use super::{
    BuiltinColormaps, Colormap, ColormapRegistry, Segment, SegmentData, SegmentedColormap,
};
#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::blend::default_blender;
use crate::error::BlendError;
use crate::parser::ColorParser;
use crate::{AlphaValue, Blender, Color, ColorValue, Float};

#[derive(Clone, Debug, PartialEq)]
struct CmapData {
    background: ColorValue,
    under: Option<ColorValue>,
    over: Option<ColorValue>,
    bad: Option<ColorValue>,
    name: Option<String>,
    resolution: usize,
}

impl CmapData {
    pub fn new() -> Self {
        Self {
            background: ColorValue::from(Color::WHITE),
            under: None,
            over: None,
            bad: None,
            name: None,
            resolution: 256,
        }
    }
}

/// A builder of colormap options.
#[derive(Debug)]
pub struct CmapOptionBuilder(CmapData);

impl CmapOptionBuilder {
    /// Set the background color.
    pub fn background(&mut self, color: impl Into<ColorValue>) -> &mut Self {
        self.0.background = color.into();
        self
    }

    /// Set the color for positions below 0.
    pub fn under(&mut self, color: impl Into<ColorValue>) -> &mut Self {
        self.0.under = Some(color.into());
        self
    }

    /// Set the color for positions above 1.
    pub fn over(&mut self, color: impl Into<ColorValue>) -> &mut Self {
        self.0.over = Some(color.into());
        self
    }

    /// Set the color for not-a-number.
    pub fn bad(&mut self, color: impl Into<ColorValue>) -> &mut Self {
        self.0.bad = Some(color.into());
        self
    }

    /// Set the name of the synthesized colormap.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.0.name = Some(name.into());
        self
    }

    /// Set the number of entries of the synthesized colormap.
    pub fn resolution(&mut self, resolution: usize) -> &mut Self {
        self.0.resolution = resolution;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> CmapOptions {
        CmapOptions(self.0.clone())
    }
}

/// The options for synthesizing a colormap.
///
/// By default, colormaps are synthesized over a white background, without
/// under, over, or bad colors, with the source colormap's name suffixed by
/// `_alpha`, and with 256 entries.
///
/// ```
/// # use mimic_alpha::cmap::CmapOptions;
/// # use mimic_alpha::ColorValue;
/// let options = CmapOptions::builder()
///     .background("k")
///     .under("r")
///     .name("dimmed")
///     .build();
///
/// assert_eq!(options.background(), &ColorValue::from("k"));
/// assert_eq!(options.under(), Some(&ColorValue::from("r")));
/// assert_eq!(options.over(), None);
/// assert_eq!(options.name(), Some("dimmed"));
/// assert_eq!(options.resolution(), 256);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CmapOptions(CmapData);

impl Default for CmapOptions {
    fn default() -> Self {
        CmapOptions(CmapData::new())
    }
}

impl CmapOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> CmapOptionBuilder {
        CmapOptionBuilder(CmapData::new())
    }

    /// Get the background color.
    pub fn background(&self) -> &ColorValue {
        &self.0.background
    }

    /// Get the color for positions below 0.
    pub fn under(&self) -> Option<&ColorValue> {
        self.0.under.as_ref()
    }

    /// Get the color for positions above 1.
    pub fn over(&self) -> Option<&ColorValue> {
        self.0.over.as_ref()
    }

    /// Get the color for not-a-number.
    pub fn bad(&self) -> Option<&ColorValue> {
        self.0.bad.as_ref()
    }

    /// Get the name of the synthesized colormap.
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Get the number of entries of the synthesized colormap.
    pub fn resolution(&self) -> usize {
        self.0.resolution
    }
}

// ====================================================================================================================

impl<P: ColorParser> Blender<P> {
    /// Synthesize an opaque colormap that mimics the source colormap with
    /// alpha over a background.
    ///
    /// This method looks up the source colormap in the registry and samples
    /// it at as many evenly spaced positions as it has entries, covering
    /// `0..=1` inclusive. It then blends each sample with the alpha over the
    /// background, discarding the sample's own alpha, and uses the results as
    /// breakpoints of a new segmented colormap. Under, over, and bad colors are
    /// blended the same way. The source colormap is not modified.
    ///
    /// # Errors
    ///
    /// This method fails if the source colormap is unknown, if the background,
    /// alpha, or any of the under, over, and bad colors is invalid, or if the
    /// source has a single entry only, which does not yield breakpoints
    /// spanning the unit range. It never returns a partial colormap.
    pub fn build_cmap<R: ColormapRegistry + ?Sized>(
        &self,
        registry: &R,
        source: &str,
        alpha: &AlphaValue,
        options: &CmapOptions,
    ) -> Result<SegmentedColormap, BlendError> {
        let cmap = registry.lookup(source)?;
        let background = self.to_color(options.background())?;

        let count = cmap.resolution();
        let scale = count.saturating_sub(1).max(1) as Float;
        let mut data = SegmentData::default();

        for index in 0..count {
            let position = index as Float / scale;
            let sample = ColorValue::from(cmap.sample(position));
            let [r, g, b] = self.blend_one(&sample, alpha, &background)?.coordinates();

            data.red.push(Segment::continuous(position, r));
            data.green.push(Segment::continuous(position, g));
            data.blue.push(Segment::continuous(position, b));
        }

        let name = match options.name() {
            Some(name) => name.to_string(),
            None => format!("{}_alpha", source),
        };
        let mut synthesized = SegmentedColormap::new(name, data, options.resolution())?;

        let blend_override = |color: Option<&ColorValue>| {
            color
                .map(|c| self.blend_one(c, alpha, &background))
                .transpose()
        };
        synthesized.set_under(blend_override(options.under())?);
        synthesized.set_over(blend_override(options.over())?);
        synthesized.set_bad(blend_override(options.bad())?);

        Ok(synthesized)
    }
}

/// Synthesize an opaque colormap that mimics one of the built-in colormaps
/// with alpha over a background.
///
/// This function uses the built-in color names and colormaps. See
/// [`Blender::build_cmap`] for details.
///
/// ```
/// # use mimic_alpha::cmap::{build_cmap, CmapOptions, Colormap};
/// # use mimic_alpha::error::BlendError;
/// # fn main() -> Result<(), BlendError> {
/// let cmap = build_cmap("binary", 0.5, &CmapOptions::default())?;
/// assert_eq!(cmap.name(), "binary_alpha");
/// assert_eq!(cmap.sample(0.0), [1.0, 1.0, 1.0, 1.0]);
/// assert_eq!(cmap.sample(1.0), [0.5, 0.5, 0.5, 1.0]);
/// # Ok(())
/// # }
/// ```
pub fn build_cmap<A: Into<AlphaValue>>(
    source: &str,
    alpha: A,
    options: &CmapOptions,
) -> Result<SegmentedColormap, BlendError> {
    default_blender().build_cmap(&BuiltinColormaps, source, &alpha.into(), options)
}

/// Synthesize an opaque colormap that mimics one of the built-in colormaps
/// with alpha over a background. <i class=python-only>Python only!</i>
#[cfg(feature = "pyffi")]
#[pyfunction]
#[pyo3(
    name = "build_cmap",
    signature = (source, alpha, background = None, under = None, over = None, bad = None, name = None, resolution = 256)
)]
#[allow(clippy::too_many_arguments)]
pub fn py_build_cmap(
    source: &str,
    alpha: AlphaValue,
    background: Option<ColorValue>,
    under: Option<ColorValue>,
    over: Option<ColorValue>,
    bad: Option<ColorValue>,
    name: Option<String>,
    resolution: usize,
) -> PyResult<SegmentedColormap> {
    let mut builder = CmapOptions::builder();
    builder.resolution(resolution);
    if let Some(background) = background {
        builder.background(background);
    }
    if let Some(under) = under {
        builder.under(under);
    }
    if let Some(over) = over {
        builder.over(over);
    }
    if let Some(bad) = bad {
        builder.bad(bad);
    }
    if let Some(name) = name {
        builder.name(name);
    }

    Ok(build_cmap(source, alpha, &builder.build())?)
}

// ====================================================================================================================
