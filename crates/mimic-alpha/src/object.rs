#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::{format, to_eq_coordinates};
use crate::Float;

/// Create a new color from 24-bit integer coordinates.
///
/// Like [`Color::from_24bit`], this macro creates a new color from 24-bit
/// integer coordinates. However, it also is safe to use in const expressions.
#[macro_export]
macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        $crate::Color::new([
            $r as $crate::Float / 255.0,
            $g as $crate::Float / 255.0,
            $b as $crate::Float / 255.0,
        ])
    };
}

/// An opaque sRGB color.
///
/// Every color object has exactly three coordinates, red, green, and blue.
/// Colors produced by a [`ColorParser`](crate::ColorParser) have coordinates
/// in unit range. There is no alpha channel. Translucency is always resolved
/// by compositing over a background with [`Color::over`].
///
/// ## Equality Testing and Hashing
///
/// Blending involves floating point arithmetic, so two colors computed along
/// different paths rarely have identical coordinates. Hence this class
/// performs the following steps before equality testing or hashing:
///
///   * To turn coordinates into comparable entities, replace not-a-numbers with
///     positive zero;
///   * To allow for floating point error, multiply by 1e12/1e4 (depending on
///     [`Float`]) and then round;
///   * To make zeros comparable, replace negative zero with positive zero;
///   * To convince Rust that coordinates are comparable, convert to bits.
///
/// ## Coordinate Access
///
/// Rust code accesses the coordinates through `AsRef<[Float; 3]>`. Python code
/// indexes a color object with integers `0..2`.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, frozen, hash, sequence, module = "mimic_alpha")
)]
#[derive(Clone, Copy, Debug)]
pub struct Color {
    coordinates: [Float; 3],
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl Color {
    /// Instantiate a new color with the given red, green, and blue
    /// coordinates.
    ///
    /// ```
    /// # use mimic_alpha::Color;
    /// let teal = Color::new([0.0, 0.5, 0.5]);
    /// assert_eq!(teal.as_ref(), &[0.0, 0.5, 0.5]);
    /// ```
    #[cfg(feature = "pyffi")]
    #[new]
    #[inline]
    pub const fn new(coordinates: [Float; 3]) -> Self {
        Self { coordinates }
    }

    /// Instantiate a new color with the given red, green, and blue
    /// coordinates.
    ///
    /// ```
    /// # use mimic_alpha::Color;
    /// let teal = Color::new([0.0, 0.5, 0.5]);
    /// assert_eq!(teal.as_ref(), &[0.0, 0.5, 0.5]);
    /// ```
    #[cfg(not(feature = "pyffi"))]
    #[inline]
    pub const fn new(coordinates: [Float; 3]) -> Self {
        Self { coordinates }
    }

    /// Instantiate a new color with the given red, green, and blue
    /// coordinates.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn srgb(r: Float, g: Float, b: Float) -> Self {
        Self::new([r, g, b])
    }

    /// Instantiate a new color with the given red, green, and blue
    /// coordinates.
    ///
    /// ```
    /// # use mimic_alpha::Color;
    /// let fire_brick = Color::srgb(177.0/255.0, 31.0/255.0, 36.0/255.0);
    /// assert_eq!(fire_brick.to_24bit(), [177, 31, 36]);
    /// ```
    #[cfg(not(feature = "pyffi"))]
    pub fn srgb(r: Float, g: Float, b: Float) -> Self {
        Self::new([r, g, b])
    }

    /// Instantiate a new color from its 24-bit representation.
    ///
    /// This function returns a new color with the given red, green, and blue
    /// coordinates scaled by 1/255. The [`rgb`] macro does the same thing but
    /// is safe to use inside const expressions.
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    #[inline]
    pub fn from_24bit(r: u8, g: u8, b: u8) -> Self {
        rgb!(r, g, b)
    }

    /// Instantiate a new color from its 24-bit representation.
    ///
    /// This function returns a new color with the given red, green, and blue
    /// coordinates scaled by 1/255. The [`rgb`] macro does the same thing but
    /// is safe to use inside const expressions.
    ///
    /// ```
    /// # use mimic_alpha::Color;
    /// let tangerine = Color::from_24bit(0xff, 0x93, 0x00);
    /// assert_eq!(tangerine, Color::srgb(1.0, 0.5764705882352941, 0.0));
    /// ```
    #[cfg(not(feature = "pyffi"))]
    #[inline]
    pub fn from_24bit(r: u8, g: u8, b: u8) -> Self {
        rgb!(r, g, b)
    }

    /// Access the coordinates.
    ///
    /// Unlike the `AsRef<[Float; 3]>` implementation, this method returns the
    /// coordinates by value.
    #[inline]
    pub fn coordinates(&self) -> [Float; 3] {
        self.coordinates
    }

    /// Get this color's length, which is 3. <i class=python-only>Python
    /// only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __len__(&self) -> usize {
        3
    }

    /// Read coordinates by index. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __getitem__(&self, index: isize) -> PyResult<Float> {
        match index {
            -3..=-1 => Ok(self.coordinates[(3 + index) as usize]),
            0..=2 => Ok(self.coordinates[index as usize]),
            _ => Err(pyo3::exceptions::PyIndexError::new_err(
                "Invalid coordinate index",
            )),
        }
    }

    /// Convert this color to 24-bit representation.
    ///
    /// This method scales the coordinates by 255, rounds, and clamps them to
    /// the range of an unsigned byte.
    ///
    /// ```
    /// # use mimic_alpha::Color;
    /// assert_eq!(Color::srgb(1.0, 0.5, 0.0).to_24bit(), [255, 128, 0]);
    /// ```
    pub fn to_24bit(&self) -> [u8; 3] {
        let [r, g, b] = self.coordinates;
        let convert = |c: Float| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        [convert(r), convert(g), convert(b)]
    }

    /// Format this color in hashed hexadecimal notation.
    ///
    /// ```
    /// # use mimic_alpha::Color;
    /// assert_eq!(Color::from_24bit(0x1f, 0x77, 0xb4).to_hex_format(), "#1f77b4");
    /// ```
    pub fn to_hex_format(&self) -> String {
        let [r, g, b] = self.to_24bit();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Composite this color over the given background with the given alpha.
    ///
    /// This method linearly interpolates between the background and this
    /// color, channel by channel, computing `(1 - alpha) * background + alpha *
    /// self`. An alpha of 0 yields the background and an alpha of 1 yields
    /// this color. The interpolation operates on the gamma-encoded coordinates
    /// and hence only approximates physically correct compositing.
    ///
    /// This method does not validate alpha. [`Blender`](crate::Blender) does.
    ///
    /// ```
    /// # use mimic_alpha::Color;
    /// let pink = Color::srgb(1.0, 0.0, 0.0).over(&Color::WHITE, 0.5);
    /// assert_eq!(pink, Color::srgb(1.0, 0.5, 0.5));
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn over(&self, background: &Color, alpha: Float) -> Color {
        let [r1, g1, b1] = self.coordinates;
        let [r0, g0, b0] = background.coordinates;
        let mix = |fg: Float, bg: Float| (1.0 - alpha) * bg + alpha * fg;

        Self::new([mix(r1, r0), mix(g1, g0), mix(b1, b0)])
    }

    /// Convert this color to its debug representation. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!("Color({:?})", self.coordinates)
    }

    /// Convert this color to its CSS representation. <i
    /// class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __str__(&self) -> String {
        format!("{}", self)
    }
}

impl Color {
    /// The color black.
    pub const BLACK: Color = Color::new([0.0, 0.0, 0.0]);

    /// The color white, which is the default background.
    pub const WHITE: Color = Color::new([1.0, 1.0, 1.0]);

    /// Instantiate a gray with the given level for all three coordinates.
    pub const fn gray(level: Float) -> Self {
        Self::new([level, level, level])
    }
}

impl Default for Color {
    /// Create an instance of the default color, which is black.
    fn default() -> Self {
        Self::BLACK
    }
}

impl AsRef<[Float; 3]> for Color {
    /// Access this color's coordinates by reference.
    fn as_ref(&self) -> &[Float; 3] {
        &self.coordinates
    }
}

impl From<[Float; 3]> for Color {
    fn from(value: [Float; 3]) -> Self {
        Self::new(value)
    }
}

impl From<Color> for [Float; 3] {
    fn from(value: Color) -> Self {
        value.coordinates
    }
}

impl std::hash::Hash for Color {
    /// Hash this color.
    ///
    /// See [`Color::eq`] for an overview of the normalization steps applied
    /// before hashing.
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        to_eq_coordinates(&self.coordinates).hash(state);
    }
}

impl PartialEq for Color {
    /// Determine whether this color equals the other color.
    ///
    /// Equality testing and hashing normalize coordinates into bit strings
    /// first, so that equal colors also have equal hashes.
    ///
    /// ```
    /// # use mimic_alpha::Color;
    /// let almost = Color::srgb(0.1 + 0.2, 0.5, 0.0);
    /// assert_eq!(almost, Color::srgb(0.3, 0.5, -0.0));
    /// assert_ne!(almost, Color::srgb(0.3001, 0.5, 0.0));
    /// ```
    fn eq(&self, other: &Self) -> bool {
        to_eq_coordinates(&self.coordinates) == to_eq_coordinates(&other.coordinates)
    }
}

impl Eq for Color {}

impl std::fmt::Display for Color {
    /// Format this color as a CSS `color(srgb ...)` function.
    ///
    /// The formatter's precision determines the number of digits after the
    /// decimal and defaults to 5.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format(&self.coordinates, f)
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::Color;
    use crate::assert_same_color;

    #[test]
    fn test_over() {
        let red = Color::srgb(1.0, 0.0, 0.0);
        let gray = Color::gray(0.5);

        assert_same_color!(red.over(&gray, 0.0), gray);
        assert_same_color!(red.over(&gray, 1.0), red);
        assert_same_color!(red.over(&gray, 0.5), [0.75, 0.25, 0.25]);
        assert_same_color!(red.over(&Color::WHITE, 0.3), [1.0, 0.7, 0.7]);
    }

    #[test]
    fn test_24bit() {
        assert_eq!(crate::rgb!(0x80, 0, 0xff).to_24bit(), [0x80, 0, 0xff]);
        assert_eq!(Color::srgb(1.2, -0.1, 0.5).to_24bit(), [255, 0, 128]);
        assert_eq!(Color::WHITE.to_hex_format(), "#ffffff");
    }

    #[test]
    fn test_equality_and_hashing() {
        use std::collections::HashSet;

        let mut colors = HashSet::new();
        colors.insert(Color::srgb(0.1 + 0.2, 0.0, 1.0));
        colors.insert(Color::srgb(0.3, -0.0, 1.0));
        colors.insert(Color::srgb(0.3, 0.0, 0.9));

        assert_eq!(colors.len(), 2);
    }
}
