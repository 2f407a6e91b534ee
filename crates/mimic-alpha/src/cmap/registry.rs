use super::{Colormap, ColormapRegistry, ListedColormap, SegmentData, SegmentedColormap};
use crate::core::{unpack, TABLEAU_COLORS};
use crate::error::ColormapError;
use crate::{Color, Float};

type Breakpoints = &'static [(Float, Float, Float)];

/// The breakpoints for matplotlib's segmented colormaps, as red, green, and
/// blue lists of position, below, and above values.
const SEGMENTED: [(&str, [Breakpoints; 3]); 12] = [
    (
        "autumn",
        [
            &[(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)],
        ],
    ),
    (
        "binary",
        [
            &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
            &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
            &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
        ],
    ),
    (
        "bone",
        [
            &[(0.0, 0.0, 0.0), (0.746032, 0.652778, 0.652778), (1.0, 1.0, 1.0)],
            &[
                (0.0, 0.0, 0.0),
                (0.365079, 0.319444, 0.319444),
                (0.746032, 0.777778, 0.777778),
                (1.0, 1.0, 1.0),
            ],
            &[(0.0, 0.0, 0.0), (0.365079, 0.444444, 0.444444), (1.0, 1.0, 1.0)],
        ],
    ),
    (
        "cool",
        [
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
            &[(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
        ],
    ),
    (
        "copper",
        [
            &[(0.0, 0.0, 0.0), (0.809524, 1.0, 1.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 0.7812, 0.7812)],
            &[(0.0, 0.0, 0.0), (1.0, 0.4975, 0.4975)],
        ],
    ),
    (
        "gray",
        [
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
        ],
    ),
    (
        "grey",
        [
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
        ],
    ),
    (
        "hot",
        [
            &[(0.0, 0.0416, 0.0416), (0.365079, 1.0, 1.0), (1.0, 1.0, 1.0)],
            &[
                (0.0, 0.0, 0.0),
                (0.365079, 0.0, 0.0),
                (0.746032, 1.0, 1.0),
                (1.0, 1.0, 1.0),
            ],
            &[(0.0, 0.0, 0.0), (0.746032, 0.0, 0.0), (1.0, 1.0, 1.0)],
        ],
    ),
    (
        "jet",
        [
            &[
                (0.0, 0.0, 0.0),
                (0.35, 0.0, 0.0),
                (0.66, 1.0, 1.0),
                (0.89, 1.0, 1.0),
                (1.0, 0.5, 0.5),
            ],
            &[
                (0.0, 0.0, 0.0),
                (0.125, 0.0, 0.0),
                (0.375, 1.0, 1.0),
                (0.64, 1.0, 1.0),
                (0.91, 0.0, 0.0),
                (1.0, 0.0, 0.0),
            ],
            &[
                (0.0, 0.5, 0.5),
                (0.11, 1.0, 1.0),
                (0.34, 1.0, 1.0),
                (0.65, 0.0, 0.0),
                (1.0, 0.0, 0.0),
            ],
        ],
    ),
    (
        "spring",
        [
            &[(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
        ],
    ),
    (
        "summer",
        [
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 0.5, 0.5), (1.0, 1.0, 1.0)],
            &[(0.0, 0.4, 0.4), (1.0, 0.4, 0.4)],
        ],
    ),
    (
        "winter",
        [
            &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)],
            &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            &[(0.0, 1.0, 1.0), (1.0, 0.5, 0.5)],
        ],
    ),
];

/// The resolution of the built-in segmented colormaps.
const RESOLUTION: usize = 256;

/// A registry with a selection of matplotlib's colormaps.
///
/// The registry provides the segmented colormaps `autumn`, `binary`, `bone`,
/// `cool`, `copper`, `gray` (also spelled `grey`), `hot`, `jet`, `spring`,
/// `summer`, and `winter` with 256 entries each, as well as the listed
/// colormap `tab10` with the ten Tableau colors. Appending `_r` to any name
/// looks up the reversed colormap.
///
/// ```
/// # use mimic_alpha::cmap::{BuiltinColormaps, Colormap, ColormapRegistry};
/// # use mimic_alpha::error::ColormapError;
/// # fn main() -> Result<(), ColormapError> {
/// let cmap = BuiltinColormaps.lookup("binary_r")?;
/// assert_eq!(cmap.name(), "binary_r");
/// assert_eq!(cmap.sample(0.0), [0.0, 0.0, 0.0, 1.0]);
/// assert!(BuiltinColormaps.lookup("viridian").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinColormaps;

impl BuiltinColormaps {
    /// Get an iterator over the names of all built-in colormaps, excluding
    /// the reversed ones.
    pub fn names() -> impl Iterator<Item = &'static str> {
        SEGMENTED
            .iter()
            .map(|(name, _)| *name)
            .chain(std::iter::once("tab10"))
    }

    /// Create the segmented colormap with the given name.
    pub fn segmented(name: &str) -> Option<Result<SegmentedColormap, ColormapError>> {
        SEGMENTED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, [red, green, blue])| {
                let data = SegmentData::from_tuples(red, green, blue);
                SegmentedColormap::new(*n, data, RESOLUTION)
            })
    }

    /// Create the listed colormap with the given name.
    pub fn listed(name: &str) -> Option<Result<ListedColormap, ColormapError>> {
        if name != "tab10" {
            return None;
        }

        let colors = TABLEAU_COLORS
            .iter()
            .map(|(_, packed)| {
                let [r, g, b] = unpack(*packed);
                Color::from_24bit(r, g, b)
            })
            .collect();
        Some(ListedColormap::new(name, colors))
    }
}

impl ColormapRegistry for BuiltinColormaps {
    fn lookup(&self, name: &str) -> Result<Box<dyn Colormap>, ColormapError> {
        let (base, reverse) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };

        if let Some(cmap) = Self::segmented(base) {
            let cmap = cmap?;
            let cmap: Box<dyn Colormap> = if reverse {
                Box::new(cmap.reversed())
            } else {
                Box::new(cmap)
            };
            return Ok(cmap);
        } else if let Some(cmap) = Self::listed(base) {
            let cmap = cmap?;
            let cmap: Box<dyn Colormap> = if reverse {
                Box::new(cmap.reversed())
            } else {
                Box::new(cmap)
            };
            return Ok(cmap);
        }

        Err(ColormapError::UnknownColormap(name.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::BuiltinColormaps;
    use crate::cmap::{Colormap, ColormapRegistry};
    use crate::error::ColormapError;
    use crate::{assert_close_enough, Color};

    #[test]
    fn test_all_builtins() -> Result<(), ColormapError> {
        for name in BuiltinColormaps::names() {
            let cmap = BuiltinColormaps.lookup(name)?;
            assert_eq!(cmap.name(), name);

            let reversed = BuiltinColormaps.lookup(&format!("{}_r", name))?;
            assert_eq!(reversed.resolution(), cmap.resolution());
            assert_eq!(reversed.sample(1.0), cmap.sample(0.0));
        }

        Ok(())
    }

    #[test]
    fn test_samples() -> Result<(), ColormapError> {
        let gray = BuiltinColormaps.lookup("gray")?;
        assert_eq!(gray.resolution(), 256);
        assert_eq!(gray.sample(0.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(gray.sample(1.0), [1.0, 1.0, 1.0, 1.0]);
        assert_close_enough!(gray.sample(0.5)[0], 128.0 / 255.0);

        let jet = BuiltinColormaps.lookup("jet")?;
        assert_eq!(jet.sample(0.0), [0.0, 0.0, 0.5, 1.0]);
        assert_eq!(jet.sample(1.0), [0.5, 0.0, 0.0, 1.0]);

        let hot = BuiltinColormaps.lookup("hot")?;
        assert_eq!(hot.sample(0.0), [0.0416, 0.0, 0.0, 1.0]);

        let tab10 = BuiltinColormaps.lookup("tab10")?;
        assert_eq!(tab10.resolution(), 10);
        let [r, g, b, _] = tab10.sample(0.0);
        assert_eq!(Color::srgb(r, g, b).to_hex_format(), "#1f77b4");
        let [r, g, b, _] = tab10.sample(1.0);
        assert_eq!(Color::srgb(r, g, b).to_hex_format(), "#17becf");

        Ok(())
    }

    #[test]
    fn test_unknown() {
        assert!(matches!(
            BuiltinColormaps.lookup("viridian"),
            Err(ColormapError::UnknownColormap(name)) if name == "viridian"
        ));
        assert!(matches!(
            BuiltinColormaps.lookup("_r"),
            Err(ColormapError::UnknownColormap(_))
        ));
    }
}
