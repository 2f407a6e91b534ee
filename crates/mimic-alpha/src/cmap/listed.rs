use super::{Colormap, LookupTable};
use crate::error::ColormapError;
use crate::{Color, Float};

/// A colormap built from an explicit list of colors.
///
/// The colormap's resolution is the number of colors. Unlike a
/// [`SegmentedColormap`](crate::cmap::SegmentedColormap), it does not
/// interpolate, and each color covers an equal share of the unit range.
///
/// ```
/// # use mimic_alpha::cmap::{Colormap, ListedColormap};
/// # use mimic_alpha::Color;
/// # use mimic_alpha::error::ColormapError;
/// # fn main() -> Result<(), ColormapError> {
/// let cmap = ListedColormap::new("traffic", vec![
///     Color::srgb(0.0, 1.0, 0.0),
///     Color::srgb(1.0, 1.0, 0.0),
///     Color::srgb(1.0, 0.0, 0.0),
/// ])?;
///
/// assert_eq!(cmap.resolution(), 3);
/// assert_eq!(cmap.sample(0.5), [1.0, 1.0, 0.0, 1.0]);
/// assert_eq!(cmap.reversed().sample(0.0), [1.0, 0.0, 0.0, 1.0]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ListedColormap {
    name: String,
    colors: Vec<Color>,
    table: LookupTable,
}

impl ListedColormap {
    /// Create a new listed colormap.
    ///
    /// # Errors
    ///
    /// This function fails if there are no colors.
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Result<Self, ColormapError> {
        if colors.is_empty() {
            return Err(ColormapError::NoColors);
        }

        let entries = colors.iter().map(super::opaque).collect();
        Ok(Self {
            name: name.into(),
            colors,
            table: LookupTable::new(entries)?,
        })
    }

    /// Access the colors.
    pub fn colors(&self) -> &[Color] {
        &self.colors
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

    /// Create the reversed colormap, with the colors in reverse order, under
    /// and over colors swapped, and `_r` appended to the name.
    #[must_use = "method returns a new colormap and does not mutate original value"]
    pub fn reversed(&self) -> Self {
        Self {
            name: format!("{}_r", self.name),
            colors: self.colors.iter().rev().copied().collect(),
            table: self.table.reversed(),
        }
    }
}

impl Colormap for ListedColormap {
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

#[cfg(test)]
mod test {
    use super::ListedColormap;
    use crate::cmap::Colormap;
    use crate::error::ColormapError;
    use crate::Color;

    #[test]
    fn test_listed() -> Result<(), ColormapError> {
        let colors: Vec<_> = (0..10).map(|i| Color::gray(i as f64 / 9.0)).collect();
        let mut cmap = ListedColormap::new("steps", colors)?;

        assert_eq!(cmap.resolution(), 10);
        assert_eq!(cmap.colors().len(), 10);
        assert_eq!(cmap.sample(0.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(cmap.sample(0.09), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(cmap.sample(0.95), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(cmap.sample(1.0), [1.0, 1.0, 1.0, 1.0]);

        cmap.set_over(Some(Color::srgb(1.0, 0.0, 0.0)));
        assert_eq!(cmap.over(), Some(Color::srgb(1.0, 0.0, 0.0)));
        assert_eq!(cmap.sample(2.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(cmap.sample(-2.0), [0.0, 0.0, 0.0, 1.0]);

        let reversed = cmap.reversed();
        assert_eq!(reversed.name(), "steps_r");
        assert_eq!(reversed.under(), Some(Color::srgb(1.0, 0.0, 0.0)));
        assert_eq!(reversed.over(), None);
        assert_eq!(reversed.colors()[0], Color::WHITE);
        assert_eq!(reversed.sample(0.0), [1.0, 1.0, 1.0, 1.0]);

        assert_eq!(
            ListedColormap::new("none", vec![]),
            Err(ColormapError::NoColors)
        );
        Ok(())
    }
}
