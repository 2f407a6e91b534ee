#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use super::{Colormap, LookupTable};
use crate::error::{ColormapError, SegmentFault};
use crate::{Color, Float};

/// A breakpoint for one channel of a segmented colormap.
///
/// A breakpoint has a position in `0..=1` and two values, one for approaching
/// the position from below and one for leaving it above. If the two values
/// differ, the channel has a discontinuity at the position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub position: Float,
    pub below: Float,
    pub above: Float,
}

impl Segment {
    /// Create a new breakpoint.
    pub const fn new(position: Float, below: Float, above: Float) -> Self {
        Self {
            position,
            below,
            above,
        }
    }

    /// Create a new breakpoint without discontinuity.
    pub const fn continuous(position: Float, value: Float) -> Self {
        Self::new(position, value, value)
    }
}

impl From<(Float, Float, Float)> for Segment {
    fn from(value: (Float, Float, Float)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

/// The breakpoints for the red, green, and blue channels of a segmented
/// colormap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentData {
    pub red: Vec<Segment>,
    pub green: Vec<Segment>,
    pub blue: Vec<Segment>,
}

impl SegmentData {
    /// Create new segment data.
    pub fn new(red: Vec<Segment>, green: Vec<Segment>, blue: Vec<Segment>) -> Self {
        Self { red, green, blue }
    }

    /// Create new segment data from tuples of position, below, and above
    /// values.
    pub fn from_tuples(
        red: &[(Float, Float, Float)],
        green: &[(Float, Float, Float)],
        blue: &[(Float, Float, Float)],
    ) -> Self {
        let convert = |tuples: &[(Float, Float, Float)]| {
            tuples.iter().copied().map(Segment::from).collect::<Vec<_>>()
        };

        Self::new(convert(red), convert(green), convert(blue))
    }

    fn channels(&self) -> [(&'static str, &[Segment]); 3] {
        [
            ("red", &self.red),
            ("green", &self.green),
            ("blue", &self.blue),
        ]
    }

    /// Validate the breakpoints.
    ///
    /// For every channel, the breakpoints must not be empty, must start at
    /// position 0 and end at position 1, and must have non-decreasing positions.
    pub fn validate(&self) -> Result<(), ColormapError> {
        for (channel, segments) in self.channels() {
            let malformed = |fault| ColormapError::MalformedSegments { channel, fault };

            let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
                return Err(malformed(SegmentFault::Empty));
            };
            if first.position != 0.0 || last.position != 1.0 {
                return Err(malformed(SegmentFault::Endpoints));
            }
            if segments.windows(2).any(|w| w[1].position < w[0].position) {
                return Err(malformed(SegmentFault::Unordered));
            }
        }

        Ok(())
    }

    /// Mirror the breakpoints, which reverses the colormap.
    #[must_use = "method returns new segment data and does not mutate original value"]
    pub fn reversed(&self) -> Self {
        let mirror = |segments: &[Segment]| {
            segments
                .iter()
                .rev()
                .map(|s| Segment::new(1.0 - s.position, s.above, s.below))
                .collect::<Vec<_>>()
        };

        Self::new(mirror(&self.red), mirror(&self.green), mirror(&self.blue))
    }
}

/// Compute the lookup table for one channel.
///
/// The first entry is the first breakpoint's value above, the last entry is
/// the last breakpoint's value below, and entries in between interpolate from
/// the previous breakpoint's value above to the next breakpoint's value below.
/// A lookup table with one entry uses the last breakpoint's value below.
fn interpolate(segments: &[Segment], resolution: usize) -> Vec<Float> {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Vec::new();
    };

    if resolution == 1 {
        return vec![last.below.clamp(0.0, 1.0)];
    }

    let scale = (resolution - 1) as Float;
    let step = 1.0 / scale;
    let mut table = Vec::with_capacity(resolution);
    table.push(first.above);

    let mut next = 1;
    for index in 1..resolution - 1 {
        let x = scale * (index as Float * step);
        while next < segments.len() - 1 && segments[next].position * scale < x {
            next += 1;
        }

        let (s0, s1) = (&segments[next - 1], &segments[next]);
        let (x0, x1) = (s0.position * scale, s1.position * scale);
        let distance = (x - x0) / (x1 - x0);
        table.push(distance * (s1.below - s0.above) + s0.above);
    }

    table.push(last.below);
    table.into_iter().map(|v| v.clamp(0.0, 1.0)).collect()
}

// ====================================================================================================================

/// A colormap built from linear segments.
///
/// Each channel's values are linearly interpolated between breakpoints. The
/// colormap computes its lookup table upon construction. It is frozen
/// afterwards, with exception of the under, over, and bad colors.
///
/// ```
/// # use mimic_alpha::cmap::{Colormap, Segment, SegmentData, SegmentedColormap};
/// # use mimic_alpha::error::ColormapError;
/// # fn main() -> Result<(), ColormapError> {
/// let ramp = vec![Segment::continuous(0.0, 0.0), Segment::continuous(1.0, 1.0)];
/// let data = SegmentData::new(ramp.clone(), ramp.clone(), ramp);
/// let cmap = SegmentedColormap::new("ramp", data, 5)?;
///
/// assert_eq!(cmap.sample(0.0), [0.0, 0.0, 0.0, 1.0]);
/// assert_eq!(cmap.sample(0.5), [0.5, 0.5, 0.5, 1.0]);
/// assert_eq!(cmap.sample(1.0), [1.0, 1.0, 1.0, 1.0]);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "mimic_alpha"))]
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentedColormap {
    name: String,
    segments: SegmentData,
    table: LookupTable,
}

impl SegmentedColormap {
    /// Create a new segmented colormap with the given name, breakpoints, and
    /// resolution.
    ///
    /// # Errors
    ///
    /// This function fails if the breakpoints are malformed or the resolution
    /// is zero.
    pub fn new(
        name: impl Into<String>,
        segments: SegmentData,
        resolution: usize,
    ) -> Result<Self, ColormapError> {
        segments.validate()?;
        if resolution == 0 {
            return Err(ColormapError::ZeroResolution);
        }

        let red = interpolate(&segments.red, resolution);
        let green = interpolate(&segments.green, resolution);
        let blue = interpolate(&segments.blue, resolution);
        let entries = red
            .into_iter()
            .zip(green)
            .zip(blue)
            .map(|((r, g), b)| [r, g, b, 1.0])
            .collect();

        Ok(Self {
            name: name.into(),
            segments,
            table: LookupTable::new(entries)?,
        })
    }

    /// Access the breakpoints.
    pub fn segments(&self) -> &SegmentData {
        &self.segments
    }

    /// Access the lookup table entries.
    pub fn entries(&self) -> &[[Float; 4]] {
        self.table.entries()
    }

    /// Get the color for positions below 0, if set.
    pub fn under(&self) -> Option<Color> {
        self.table.under()
    }

    /// Get the color for positions above 1, if set.
    pub fn over(&self) -> Option<Color> {
        self.table.over()
    }

    /// Get the color for not-a-number, if set.
    pub fn bad(&self) -> Option<Color> {
        self.table.bad()
    }

    /// Set the color for positions below 0.
    pub fn set_under(&mut self, color: Option<Color>) {
        self.table.set_under(color);
    }

    /// Set the color for positions above 1.
    pub fn set_over(&mut self, color: Option<Color>) {
        self.table.set_over(color);
    }

    /// Set the color for not-a-number.
    pub fn set_bad(&mut self, color: Option<Color>) {
        self.table.set_bad(color);
    }
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl SegmentedColormap {
    /// Get this colormap's name.
    #[cfg(feature = "pyffi")]
    #[getter(name)]
    pub fn py_name(&self) -> String {
        self.name.clone()
    }

    /// Get this colormap's number of entries. <i class=python-only>Python
    /// only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __len__(&self) -> usize {
        self.table.len()
    }

    /// Sample this colormap at the given position. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __call__(&self, position: Float) -> [Float; 4] {
        self.table.sample(position)
    }

    /// Create the reversed colormap.
    ///
    /// The reversed colormap has mirrored breakpoints, the same resolution,
    /// swapped under and over colors, and `_r` appended to its name.
    #[must_use = "method returns a new colormap and does not mutate original value"]
    pub fn reversed(&self) -> Self {
        Self {
            name: format!("{}_r", self.name),
            segments: self.segments.reversed(),
            table: self.table.reversed(),
        }
    }
}

impl Colormap for SegmentedColormap {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolution(&self) -> usize {
        self.table.len()
    }

    fn sample(&self, position: Float) -> [Float; 4] {
        self.table.sample(position)
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{interpolate, Segment, SegmentData, SegmentedColormap};
    use crate::assert_close_enough;
    use crate::cmap::Colormap;
    use crate::error::{ColormapError, SegmentFault};
    use crate::Color;

    fn ramp() -> Vec<Segment> {
        vec![Segment::continuous(0.0, 0.0), Segment::continuous(1.0, 1.0)]
    }

    #[test]
    fn test_interpolate() {
        assert_eq!(interpolate(&ramp(), 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(interpolate(&ramp(), 2), vec![0.0, 1.0]);
        assert_eq!(interpolate(&ramp(), 1), vec![1.0]);

        // A step from 0.2 to 0.8 at the midpoint
        let step = [
            Segment::continuous(0.0, 0.2),
            Segment::new(0.5, 0.2, 0.8),
            Segment::continuous(1.0, 0.8),
        ];
        assert_eq!(interpolate(&step, 4), vec![0.2, 0.2, 0.8, 0.8]);

        // Endpoints use above for the first and below for the last breakpoint.
        let edges = [Segment::new(0.0, 0.9, 0.1), Segment::new(1.0, 0.3, 0.7)];
        let table = interpolate(&edges, 3);
        assert_eq!(table.len(), 3);
        assert_close_enough!(table[0], 0.1);
        assert_close_enough!(table[1], 0.2);
        assert_close_enough!(table[2], 0.3);

        // Values are clipped.
        let wild = [Segment::continuous(0.0, -1.0), Segment::continuous(1.0, 2.0)];
        assert_eq!(interpolate(&wild, 3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_validation() {
        let good = SegmentData::new(ramp(), ramp(), ramp());
        assert_eq!(good.validate(), Ok(()));

        let empty = SegmentData::new(ramp(), vec![], ramp());
        assert_eq!(
            SegmentedColormap::new("x", empty, 256),
            Err(ColormapError::MalformedSegments {
                channel: "green",
                fault: SegmentFault::Empty
            })
        );

        let short = SegmentData::new(ramp(), ramp(), vec![Segment::continuous(0.0, 0.0)]);
        assert_eq!(
            SegmentedColormap::new("x", short, 256),
            Err(ColormapError::MalformedSegments {
                channel: "blue",
                fault: SegmentFault::Endpoints
            })
        );

        let unordered = SegmentData::from_tuples(
            &[(0.0, 0.0, 0.0), (0.7, 0.5, 0.5), (0.3, 0.5, 0.5), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
        );
        assert_eq!(
            SegmentedColormap::new("x", unordered, 256),
            Err(ColormapError::MalformedSegments {
                channel: "red",
                fault: SegmentFault::Unordered
            })
        );

        assert_eq!(
            SegmentedColormap::new("x", SegmentData::new(ramp(), ramp(), ramp()), 0),
            Err(ColormapError::ZeroResolution)
        );
    }

    #[test]
    fn test_colormap() -> Result<(), ColormapError> {
        let flat = vec![Segment::continuous(0.0, 0.5), Segment::continuous(1.0, 0.5)];
        let data = SegmentData::new(ramp(), flat, ramp());
        let mut cmap = SegmentedColormap::new("purple", data, 256)?;

        assert_eq!(cmap.name(), "purple");
        assert_eq!(cmap.resolution(), 256);
        assert_eq!(cmap.entries().len(), 256);
        assert_eq!(cmap.sample(0.0), [0.0, 0.5, 0.0, 1.0]);
        assert_eq!(cmap.sample(1.0), [1.0, 0.5, 1.0, 1.0]);
        assert_eq!(cmap.sample(-1.0), [0.0, 0.5, 0.0, 1.0]);
        assert_eq!(cmap.sample(f64::NAN), [0.0, 0.0, 0.0, 0.0]);

        cmap.set_under(Some(Color::WHITE));
        cmap.set_bad(Some(Color::BLACK));
        assert_eq!(cmap.under(), Some(Color::WHITE));
        assert_eq!(cmap.over(), None);
        assert_eq!(cmap.sample(-1.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(cmap.sample(f64::NAN), [0.0, 0.0, 0.0, 1.0]);

        let reversed = cmap.reversed();
        assert_eq!(reversed.name(), "purple_r");
        assert_eq!(reversed.resolution(), 256);
        assert_eq!(reversed.under(), None);
        assert_eq!(reversed.over(), Some(Color::WHITE));
        assert_eq!(reversed.bad(), Some(Color::BLACK));
        assert_eq!(reversed.sample(0.0), [1.0, 0.5, 1.0, 1.0]);
        assert_eq!(reversed.segments().red[0], Segment::continuous(0.0, 1.0));

        // Reversing the breakpoints yields the same table as reversing entries.
        let rebuilt = SegmentedColormap::new("again", reversed.segments().clone(), 256)?;
        for (e1, e2) in rebuilt.entries().iter().zip(reversed.entries()) {
            for (c1, c2) in e1.iter().zip(e2) {
                assert!((c1 - c2).abs() < 1e-9);
            }
        }

        Ok(())
    }
}
