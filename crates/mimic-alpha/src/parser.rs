//! Utility module implementing the color parsing service.
//!
//! The [`ColorParser`] trait resolves the atomic parts of color inputs, i.e.,
//! string tokens, grayscale levels, and numeric coordinates, into
//! [`Color`]s. [`NamedColors`] is the default implementation. It recognizes
//! the single-letter base colors, the Tableau palette, the CSS named colors,
//! hashed hexadecimal colors, color cycle references, and grayscale strings.

use std::collections::HashMap;

use crate::core::{
    parse_cycle, parse_gray, parse_hashed, unpack, BASE_COLORS, CSS_COLORS, TABLEAU_COLORS,
};
use crate::error::{BlendError, ColorFormatError, ColorShapeError};
use crate::{Color, Float};

/// A service for resolving atomic color values.
///
/// Implementations must be free of observable side effects. The
/// [`Blender`](crate::Blender) calls them once per atomic color value.
pub trait ColorParser {
    /// Resolve the string token into a color.
    fn parse_token(&self, token: &str) -> Result<Color, ColorFormatError>;

    /// Resolve the grayscale level into a color.
    ///
    /// The default implementation accepts levels in `0..=1`.
    fn parse_gray(&self, level: Float) -> Result<Color, ColorFormatError> {
        if (0.0..=1.0).contains(&level) {
            Ok(Color::gray(level))
        } else {
            Err(ColorFormatError::OutOfRange)
        }
    }

    /// Resolve the RGB or RGBA coordinates into a color.
    ///
    /// The default implementation accepts three or four coordinates in
    /// `0..=1`. It discards the fourth coordinate, if present, without
    /// further validation against any other alpha.
    fn parse_coordinates(&self, coordinates: &[Float]) -> Result<Color, BlendError> {
        let [r, g, b] = match *coordinates {
            [r, g, b] | [r, g, b, _] => [r, g, b],
            _ => {
                return Err(ColorShapeError::InvalidRgbArgument {
                    len: coordinates.len(),
                }
                .into())
            }
        };

        if coordinates.iter().all(|c| (0.0..=1.0).contains(c)) {
            Ok(Color::new([r, g, b]))
        } else {
            Err(ColorFormatError::OutOfRange.into())
        }
    }
}

impl<P: ColorParser + ?Sized> ColorParser for &P {
    fn parse_token(&self, token: &str) -> Result<Color, ColorFormatError> {
        (**self).parse_token(token)
    }

    fn parse_gray(&self, level: Float) -> Result<Color, ColorFormatError> {
        (**self).parse_gray(level)
    }

    fn parse_coordinates(&self, coordinates: &[Float]) -> Result<Color, BlendError> {
        (**self).parse_coordinates(coordinates)
    }
}

// ====================================================================================================================

/// The default color parser.
///
/// A named colors object resolves tokens after trimming white space and
/// converting ASCII letters to lower case. In order, it tries:
///
///   * registered names, i.e., the base colors `b`, `g`, `r`, `c`, `m`, `y`,
///     `k`, and `w`, the Tableau palette `tab:blue` through `tab:cyan`, the CSS
///     named colors such as `aqua`, and any names added with
///     [`NamedColors::with_color`];
///   * hashed hexadecimal notation with 3, 4, 6, or 8 digits, dropping alpha;
///   * color cycle references `C0` through `C9`, which index the Tableau
///     palette modulo its length;
///   * grayscale levels such as `0.4`.
///
/// ```
/// # use mimic_alpha::{Color, ColorParser, NamedColors};
/// # use mimic_alpha::error::ColorFormatError;
/// # fn main() -> Result<(), ColorFormatError> {
/// let colors = NamedColors::new();
/// assert_eq!(colors.parse_token("g")?, Color::srgb(0.0, 0.5, 0.0));
/// assert_eq!(colors.parse_token("Aqua")?, colors.parse_token("#00FFFF")?);
/// assert_eq!(colors.parse_token("C1")?, colors.parse_token("tab:orange")?);
/// assert_eq!(colors.parse_token(" 0.4 ")?, Color::gray(0.4));
/// assert!(colors.parse_token("aquamarina").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct NamedColors {
    names: HashMap<String, Color>,
}

impl NamedColors {
    /// Create a new parser with the built-in color names.
    pub fn new() -> Self {
        let mut names = HashMap::with_capacity(
            BASE_COLORS.len() + TABLEAU_COLORS.len() + 1 + CSS_COLORS.len(),
        );

        for (name, coordinates) in BASE_COLORS {
            names.insert(name.to_string(), Color::new(coordinates));
        }

        for (name, packed) in TABLEAU_COLORS.into_iter().chain(CSS_COLORS) {
            let [r, g, b] = unpack(packed);
            names.insert(name.to_string(), Color::from_24bit(r, g, b));
        }

        if let Some(color) = names.get("tab:gray").copied() {
            names.insert("tab:grey".to_string(), color);
        }

        Self { names }
    }

    /// Register an additional color name.
    ///
    /// The name is matched case-insensitively and shadows any existing
    /// definition, including built-in names.
    ///
    /// ```
    /// # use mimic_alpha::{Color, ColorParser, NamedColors};
    /// let colors = NamedColors::new().with_color("brand", Color::from_24bit(0xd7, 0x28, 0x27));
    /// assert_eq!(colors.parse_token("Brand"), Ok(Color::from_24bit(0xd7, 0x28, 0x27)));
    /// ```
    #[must_use = "method returns a new parser and does not mutate original value"]
    pub fn with_color(mut self, name: &str, color: Color) -> Self {
        self.names.insert(name.trim().to_ascii_lowercase(), color);
        self
    }

    /// Look up the color with the given name.
    pub fn get(&self, name: &str) -> Option<Color> {
        self.names.get(&name.trim().to_ascii_lowercase()).copied()
    }

    /// Determine the number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Determine whether there are no registered names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for NamedColors {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorParser for NamedColors {
    fn parse_token(&self, token: &str) -> Result<Color, ColorFormatError> {
        let lowercase = token.trim().to_ascii_lowercase(); // Keep around for fn scope
        let s = lowercase.as_str();

        if let Some(color) = self.names.get(s) {
            return Ok(*color);
        } else if s.starts_with('#') {
            let [r, g, b] = parse_hashed(s)?;
            return Ok(Color::from_24bit(r, g, b));
        } else if let Some(index) = parse_cycle(s) {
            let (_, packed) = TABLEAU_COLORS[index % TABLEAU_COLORS.len()];
            let [r, g, b] = unpack(packed);
            return Ok(Color::from_24bit(r, g, b));
        }

        match parse_gray(s) {
            Some(level) => Ok(Color::gray(level?)),
            None => Err(ColorFormatError::UnknownColor(token.to_string())),
        }
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{ColorParser, NamedColors};
    use crate::error::{BlendError, ColorFormatError, ColorShapeError};
    use crate::{assert_same_color, Color};

    #[test]
    fn test_names() -> Result<(), ColorFormatError> {
        let colors = NamedColors::new();

        assert_same_color!(colors.parse_token("r")?, [1.0, 0.0, 0.0]);
        assert_same_color!(colors.parse_token("c")?, [0.0, 0.75, 0.75]);
        assert_same_color!(colors.parse_token("  W ")?, Color::WHITE);
        assert_same_color!(colors.parse_token("aqua")?, [0.0, 1.0, 1.0]);
        assert_same_color!(colors.parse_token("RebeccaPurple")?, Color::from_24bit(0x66, 0x33, 0x99));
        assert_eq!(colors.parse_token("tab:grey")?, colors.parse_token("tab:gray")?);
        assert_eq!(colors.parse_token("grey")?, colors.parse_token("gray")?);
        assert_eq!(colors.get("tab:blue"), Some(Color::from_24bit(0x1f, 0x77, 0xb4)));
        assert_eq!(colors.len(), 8 + 10 + 1 + 148);
        assert!(!colors.is_empty());

        Ok(())
    }

    #[test]
    fn test_hex_cycle_gray() -> Result<(), ColorFormatError> {
        let colors = NamedColors::new();

        assert_same_color!(colors.parse_token("#00FFFF")?, [0.0, 1.0, 1.0]);
        assert_same_color!(colors.parse_token("#0ff8")?, [0.0, 1.0, 1.0]);
        assert_eq!(colors.parse_token("C0")?, colors.parse_token("tab:blue")?);
        assert_eq!(colors.parse_token("C12")?, colors.parse_token("tab:green")?);
        assert_same_color!(colors.parse_token("0.5")?, Color::gray(0.5));
        assert_same_color!(colors.parse_token("0")?, Color::BLACK);

        assert_eq!(
            colors.parse_token("1.5"),
            Err(ColorFormatError::OutOfRange)
        );
        assert_eq!(
            colors.parse_token("#12345"),
            Err(ColorFormatError::UnexpectedCharacters)
        );
        assert_eq!(
            colors.parse_token("Aquamarina"),
            Err(ColorFormatError::UnknownColor("Aquamarina".to_string()))
        );

        Ok(())
    }

    #[test]
    fn test_with_color() {
        let brand = Color::srgb(0.1, 0.2, 0.3);
        let colors = NamedColors::new()
            .with_color(" Brand ", brand)
            .with_color("r", Color::BLACK);

        assert_eq!(colors.parse_token("BRAND"), Ok(brand));
        assert_eq!(colors.parse_token("r"), Ok(Color::BLACK));
    }

    #[test]
    fn test_gray_and_coordinates() -> Result<(), BlendError> {
        let colors = NamedColors::new();

        assert_eq!(colors.parse_gray(0.25)?, Color::gray(0.25));
        assert_eq!(colors.parse_gray(1.25), Err(ColorFormatError::OutOfRange));

        assert_eq!(colors.parse_coordinates(&[0.0, 0.5, 1.0])?, Color::srgb(0.0, 0.5, 1.0));
        assert_eq!(colors.parse_coordinates(&[0.0, 0.5, 1.0, 0.2])?, Color::srgb(0.0, 0.5, 1.0));
        assert_eq!(
            colors.parse_coordinates(&[0.0, 0.5, 1.5]),
            Err(ColorFormatError::OutOfRange.into())
        );
        assert_eq!(
            colors.parse_coordinates(&[0.0, 0.5]),
            Err(ColorShapeError::InvalidRgbArgument { len: 2 }.into())
        );

        Ok(())
    }
}
