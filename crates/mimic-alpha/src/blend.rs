//! Utility module implementing color normalization and alpha blending.
//!
//! The [`Blender`] turns loosely structured [`ColorValue`]s into lists of
//! [`Color`]s, validates [`AlphaValue`]s against the number of colors, and
//! composites each color over a background. The free functions [`blend`] and
//! [`blend_over`] do the same with the built-in color names.

use std::sync::OnceLock;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::error::{AlphaError, BlendError, ColorShapeError};
use crate::parser::{ColorParser, NamedColors};
use crate::value::{AlphaValue, ColorValue, Shape};
use crate::{Color, Float};

/// Normalize the alpha value for the given number of colors.
///
/// This function flattens the alpha value, checks that it has either one
/// element or as many elements as there are colors, and validates all
/// elements. If there is only one element, it is replicated for every color.
///
/// # Errors
///
/// The number of alphas is checked first, then whether all alphas are
/// numeric, and then whether they all fall into `0..=1`.
///
/// ```
/// # use mimic_alpha::{normalize_alpha, AlphaValue};
/// # use mimic_alpha::error::AlphaError;
/// assert_eq!(normalize_alpha(&AlphaValue::from(0.5), 3), Ok(vec![0.5, 0.5, 0.5]));
/// assert_eq!(normalize_alpha(&AlphaValue::from(["0.2", "0.4"]), 2), Ok(vec![0.2, 0.4]));
/// assert_eq!(normalize_alpha(&AlphaValue::from(1.5), 1), Err(AlphaError::OutOfRange));
/// ```
pub fn normalize_alpha(alpha: &AlphaValue, count: usize) -> Result<Vec<Float>, AlphaError> {
    let leaves = alpha.flatten();
    if leaves.len() != 1 && leaves.len() != count {
        return Err(AlphaError::Cardinality {
            alphas: leaves.len(),
            colors: count,
        });
    }

    let numbers = leaves
        .iter()
        .map(|a| a.to_number())
        .collect::<Option<Vec<_>>>()
        .ok_or(AlphaError::NotNumeric)?;

    // Also rejects not-a-number
    if !numbers.iter().all(|a| (0.0..=1.0).contains(a)) {
        return Err(AlphaError::OutOfRange);
    }

    match *numbers.as_slice() {
        [single] => Ok(vec![single; count]),
        _ => Ok(numbers),
    }
}

// ====================================================================================================================

/// A color blender.
///
/// A blender resolves color values with its [`ColorParser`] and composites
/// the resulting colors over an opaque background. It is stateless beyond the
/// parser and hence can be shared freely.
///
/// ```
/// # use mimic_alpha::{AlphaValue, Blender, Color, ColorValue};
/// # use mimic_alpha::error::BlendError;
/// # fn main() -> Result<(), BlendError> {
/// let blender = Blender::default();
/// let colors = blender.blend(
///     &ColorValue::from(["r", "g"]),
///     &AlphaValue::from([0.5, 0.3]),
///     &ColorValue::from("w"),
/// )?;
///
/// assert_eq!(colors, vec![Color::srgb(1.0, 0.5, 0.5), Color::srgb(0.7, 0.85, 0.7)]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Blender<P = NamedColors> {
    parser: P,
}

impl Default for Blender {
    /// Create a new blender with the built-in color names.
    fn default() -> Self {
        Self::new(NamedColors::new())
    }
}

impl<P: ColorParser> Blender<P> {
    /// Create a new blender with the given color parser.
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Access this blender's color parser.
    ///
    /// ```
    /// # use mimic_alpha::{Blender, Color, NamedColors};
    /// let brand = Color::from_24bit(0xd7, 0x28, 0x27);
    /// let blender = Blender::new(NamedColors::new().with_color("brand", brand));
    /// assert_eq!(blender.parser().get("brand"), Some(brand));
    /// ```
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Resolve a color value that denotes exactly one color.
    ///
    /// Tokens are parsed as color tokens, numbers as grayscale levels, and
    /// sequences must hold three or four numeric coordinates.
    pub fn to_color(&self, value: &ColorValue) -> Result<Color, BlendError> {
        match value {
            ColorValue::Token(token) => Ok(self.parser.parse_token(token)?),
            ColorValue::Number(level) => Ok(self.parser.parse_gray(*level)?),
            ColorValue::Sequence(items) => match value.classify()? {
                Shape::NumericTriple(coordinates) => self.parser.parse_coordinates(&coordinates),
                Shape::NumericQuad(coordinates) => self.parser.parse_coordinates(&coordinates),
                _ => Err(ColorShapeError::InvalidRgbArgument { len: items.len() }.into()),
            },
        }
    }

    /// Resolve a color value into a list of colors.
    ///
    /// A token, number, or single RGB(A) array results in a one-element list.
    /// A two-dimensional numeric array results in one color per row. Any other
    /// sequence results in one color per element, each resolved with
    /// [`Blender::to_color`].
    ///
    /// ```
    /// # use mimic_alpha::{Blender, Color, ColorValue};
    /// # use mimic_alpha::error::{BlendError, ColorShapeError};
    /// let blender = Blender::default();
    /// assert_eq!(
    ///     blender.to_colors(&ColorValue::from(["k", "0.5", "#fff"])),
    ///     Ok(vec![Color::BLACK, Color::gray(0.5), Color::WHITE])
    /// );
    /// assert_eq!(
    ///     blender.to_colors(&ColorValue::from([[0.0, 1.0], [1.0, 0.0]])),
    ///     Err(BlendError::Shape(ColorShapeError::InvalidRgbArray { width: 2 }))
    /// );
    /// ```
    pub fn to_colors(&self, value: &ColorValue) -> Result<Vec<Color>, BlendError> {
        match value.classify()? {
            Shape::ScalarToken(token) => Ok(vec![self.to_color(token)?]),
            Shape::NumericTriple(coordinates) => {
                Ok(vec![self.parser.parse_coordinates(&coordinates)?])
            }
            Shape::NumericQuad(coordinates) => {
                Ok(vec![self.parser.parse_coordinates(&coordinates)?])
            }
            Shape::CollectionOfTokens(items) => {
                items.iter().map(|item| self.to_color(item)).collect()
            }
            Shape::Array2D { width, data } => data
                .chunks_exact(width)
                .map(|row| self.parser.parse_coordinates(row))
                .collect(),
        }
    }

    /// Blend colors with alpha over a background.
    ///
    /// This method resolves the colors, resolves the background as a single
    /// color, normalizes alpha for the number of colors, and then computes
    /// [`Color::over`] for each color and its alpha. The result has one color
    /// per input color, in order.
    ///
    /// If the colors carry an alpha channel, it is discarded. The given alpha
    /// always wins.
    ///
    /// # Errors
    ///
    /// Any error while resolving the colors or background, or normalizing the
    /// alpha, aborts the blend and is returned unchanged.
    pub fn blend(
        &self,
        colors: &ColorValue,
        alpha: &AlphaValue,
        background: &ColorValue,
    ) -> Result<Vec<Color>, BlendError> {
        let colors = self.to_colors(colors)?;
        let background = self.to_color(background)?;
        let alphas = normalize_alpha(alpha, colors.len())?;

        Ok(colors
            .iter()
            .zip(alphas)
            .map(|(color, alpha)| color.over(&background, alpha))
            .collect())
    }

    /// Blend one color with alpha over an already resolved background.
    ///
    /// ```
    /// # use mimic_alpha::{AlphaValue, Blender, Color, ColorValue};
    /// let blender = Blender::default();
    /// let color = blender.blend_one(
    ///     &ColorValue::from([0.0, 0.0, 1.0, 0.2]),
    ///     &AlphaValue::from(0.5),
    ///     &Color::BLACK,
    /// );
    /// assert_eq!(color, Ok(Color::srgb(0.0, 0.0, 0.5)));
    /// ```
    pub fn blend_one(
        &self,
        color: &ColorValue,
        alpha: &AlphaValue,
        background: &Color,
    ) -> Result<Color, BlendError> {
        let color = self.to_color(color)?;
        let alphas = normalize_alpha(alpha, 1)?;
        let [alpha] = *alphas.as_slice() else {
            return Err(AlphaError::Cardinality {
                alphas: alphas.len(),
                colors: 1,
            }
            .into());
        };

        Ok(color.over(background, alpha))
    }
}

pub(crate) fn default_blender() -> &'static Blender {
    static BLENDER: OnceLock<Blender> = OnceLock::new();
    BLENDER.get_or_init(Blender::default)
}

/// Blend colors with alpha over white.
///
/// This function uses the built-in color names. See [`Blender::blend`] for
/// details.
///
/// ```
/// # use mimic_alpha::{blend, Color};
/// # use mimic_alpha::error::BlendError;
/// # fn main() -> Result<(), BlendError> {
/// assert_eq!(blend("r", 0.5)?, vec![Color::srgb(1.0, 0.5, 0.5)]);
/// assert_eq!(
///     blend(["r", "g"], 0.5)?,
///     vec![Color::srgb(1.0, 0.5, 0.5), Color::srgb(0.5, 0.75, 0.5)]
/// );
/// # Ok(())
/// # }
/// ```
pub fn blend<C, A>(colors: C, alpha: A) -> Result<Vec<Color>, BlendError>
where
    C: Into<ColorValue>,
    A: Into<AlphaValue>,
{
    blend_over(colors, alpha, Color::WHITE)
}

/// Blend colors with alpha over the given background.
///
/// This function uses the built-in color names. See [`Blender::blend`] for
/// details.
///
/// ```
/// # use mimic_alpha::{blend_over, Color};
/// # use mimic_alpha::error::BlendError;
/// # fn main() -> Result<(), BlendError> {
/// let colors = blend_over([[0.0, 1.0, 1.0], [1.0, 0.0, 0.0]], 0.5, "0.5")?;
/// assert_eq!(colors, vec![Color::srgb(0.25, 0.75, 0.75), Color::srgb(0.75, 0.25, 0.25)]);
/// # Ok(())
/// # }
/// ```
pub fn blend_over<C, A, B>(colors: C, alpha: A, background: B) -> Result<Vec<Color>, BlendError>
where
    C: Into<ColorValue>,
    A: Into<AlphaValue>,
    B: Into<ColorValue>,
{
    default_blender().blend(&colors.into(), &alpha.into(), &background.into())
}

/// Blend colors with alpha over a background, which defaults to white. <i
/// class=python-only>Python only!</i>
///
/// The colors may be given as a color string, a grayscale level, an RGB(A)
/// sequence, or a sequence of any of these, including two-dimensional arrays.
#[cfg(feature = "pyffi")]
#[pyfunction]
#[pyo3(signature = (colors, alpha, background = None))]
pub fn color_alpha_to_rgb(
    colors: ColorValue,
    alpha: AlphaValue,
    background: Option<ColorValue>,
) -> PyResult<Vec<Color>> {
    let background = background.unwrap_or_else(|| ColorValue::from(Color::WHITE));
    Ok(default_blender().blend(&colors, &alpha, &background)?)
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{blend, blend_over, normalize_alpha, Blender};
    use crate::error::{AlphaError, BlendError, ColorFormatError, ColorShapeError};
    use crate::{assert_same_color, AlphaValue, Color, ColorParser, ColorValue};
    use rand::Rng;

    #[test]
    fn test_scenarios() -> Result<(), BlendError> {
        let colors = blend("r", 0.5)?;
        assert_eq!(colors.len(), 1);
        assert_same_color!(colors[0], [1.0, 0.5, 0.5]);

        let colors = blend(["r", "g"], 0.5)?;
        assert_eq!(colors.len(), 2);
        assert_same_color!(colors[0], [1.0, 0.5, 0.5]);
        assert_same_color!(colors[1], [0.5, 0.75, 0.5]);

        let colors = blend(["r", "g"], [0.5, 0.3])?;
        assert_eq!(colors.len(), 2);
        assert_same_color!(colors[0], [1.0, 0.5, 0.5]);
        assert_same_color!(colors[1], [0.7, 0.85, 0.7]);

        let colors = blend_over([[0.0, 1.0, 1.0], [1.0, 0.0, 0.0]], 0.5, "0.5")?;
        assert_eq!(colors.len(), 2);
        assert_same_color!(colors[0], [0.25, 0.75, 0.75]);
        assert_same_color!(colors[1], [0.75, 0.25, 0.25]);

        Ok(())
    }

    #[test]
    fn test_input_forms() -> Result<(), BlendError> {
        assert_eq!(blend(0.2, 1.0)?, vec![Color::gray(0.2)]);
        assert_eq!(blend([0.0, 0.0, 1.0, 0.1], 1.0)?, vec![Color::srgb(0.0, 0.0, 1.0)]);
        assert_eq!(blend(Color::BLACK, 0.25)?, vec![Color::gray(0.75)]);
        assert_eq!(blend_over("tab:blue", 0.0, "C0")?, blend("tab:blue", 1.0)?);

        let mixed = ColorValue::Sequence(vec![
            ColorValue::from("b"),
            ColorValue::from(0.0),
            ColorValue::from([1.0, 0.0, 0.0, 0.5]),
        ]);
        assert_eq!(
            blend(mixed, "1")?,
            vec![Color::srgb(0.0, 0.0, 1.0), Color::BLACK, Color::srgb(1.0, 0.0, 0.0)]
        );

        Ok(())
    }

    #[test]
    fn test_alpha_extremes() -> Result<(), BlendError> {
        let mut rng = rand::rng();

        for _ in 0..100 {
            let color = Color::srgb(rng.random(), rng.random(), rng.random());
            let background = Color::srgb(rng.random(), rng.random(), rng.random());

            assert_same_color!(blend_over(color, 0.0, background)?[0], background);
            assert_same_color!(blend_over(color, 1.0, background)?[0], color);
        }

        Ok(())
    }

    #[test]
    fn test_linear_and_monotonic() -> Result<(), BlendError> {
        let mut rng = rand::rng();
        let color = Color::srgb(0.9, 0.1, 0.5);

        for _ in 0..100 {
            let a1: f64 = rng.random_range(0.0..=1.0);
            let a2: f64 = rng.random_range(0.0..=1.0);
            let [c1, c2] = [blend(color, a1)?[0], blend(color, a2)?[0]];

            // Each channel lies on the line from white to the color.
            for (index, c) in color.coordinates().iter().enumerate() {
                assert!((c1.as_ref()[index] - (1.0 - a1 * (1.0 - c))).abs() < 1e-9);
            }

            if a1 < a2 {
                assert!(c1.as_ref()[1] >= c2.as_ref()[1] - 1e-12);
            }
        }

        Ok(())
    }

    #[test]
    fn test_order_and_broadcasting() -> Result<(), BlendError> {
        let mut rng = rand::rng();
        let names = ["r", "g", "b", "c", "m", "y", "k", "w", "tab:olive", "coral"];
        let alpha: f64 = rng.random_range(0.0..=1.0);

        let colors = blend(names, alpha)?;
        assert_eq!(colors.len(), names.len());

        for (name, color) in names.iter().zip(colors.iter()) {
            assert_eq!(blend(*name, alpha)?, vec![*color]);
        }

        assert_eq!(colors, blend(names, vec![alpha; names.len()])?);
        Ok(())
    }

    #[test]
    fn test_alpha_rejections() {
        for alpha in [AlphaValue::from(1.5), AlphaValue::from(-0.1), AlphaValue::from(f64::NAN)] {
            assert_eq!(blend("r", alpha), Err(BlendError::Alpha(AlphaError::OutOfRange)));
        }

        assert_eq!(blend("r", "x"), Err(BlendError::Alpha(AlphaError::NotNumeric)));
        assert_eq!(
            blend(["r", "g"], [0.1, 0.2, 0.3, 0.4]),
            Err(BlendError::Alpha(AlphaError::Cardinality {
                alphas: 4,
                colors: 2
            }))
        );

        // Cardinality is checked before values.
        assert_eq!(
            normalize_alpha(&AlphaValue::from(["x", "y", "z"]), 2),
            Err(AlphaError::Cardinality {
                alphas: 3,
                colors: 2
            })
        );
        assert_eq!(
            normalize_alpha(&AlphaValue::from(vec![AlphaValue::from(2.0), "x".into()]), 2),
            Err(AlphaError::NotNumeric)
        );
    }

    #[test]
    fn test_shape_rejections() {
        assert_eq!(
            blend([0.1, 0.2, 0.3, 0.4, 0.5], 0.5),
            Err(BlendError::Shape(ColorShapeError::InvalidRgbArgument { len: 5 }))
        );
        assert_eq!(
            blend([[[0.0, 1.0, 1.0]], [[1.0, 0.0, 0.0]]], 0.5),
            Err(BlendError::Shape(ColorShapeError::TooManyDimensions { ndim: 3 }))
        );
        assert_eq!(
            blend(ColorValue::Sequence(vec!["r".into(), ["g", "b"].into()]), 0.5),
            Err(BlendError::Shape(ColorShapeError::InvalidRgbArgument { len: 2 }))
        );
        assert_eq!(
            blend_over("r", 0.5, ["w", "k"]),
            Err(BlendError::Shape(ColorShapeError::InvalidRgbArgument { len: 2 }))
        );
    }

    #[test]
    fn test_format_rejections() {
        assert_eq!(
            blend(["r", "nocolor"], 0.5),
            Err(BlendError::Format(ColorFormatError::UnknownColor(
                "nocolor".to_string()
            )))
        );
        assert_eq!(
            blend([0.0, 0.5, 1.5], 0.5),
            Err(BlendError::Format(ColorFormatError::OutOfRange))
        );
        assert_eq!(
            blend_over("r", 0.5, "#12"),
            Err(BlendError::Format(ColorFormatError::UnexpectedCharacters))
        );
    }

    struct Monochrome;

    impl ColorParser for Monochrome {
        fn parse_token(&self, _token: &str) -> Result<Color, ColorFormatError> {
            Ok(Color::srgb(0.0, 0.0, 1.0))
        }
    }

    #[test]
    fn test_custom_parser() -> Result<(), BlendError> {
        let blender = Blender::new(Monochrome);
        let colors = blender.blend(
            &ColorValue::from(["anything", "goes"]),
            &AlphaValue::from(0.5),
            &ColorValue::from(Color::BLACK),
        )?;

        assert_eq!(colors, vec![Color::srgb(0.0, 0.0, 0.5); 2]);
        assert_eq!(
            blender.parser().parse_token("ignored")?,
            Color::srgb(0.0, 0.0, 1.0)
        );
        assert_eq!(
            blender.blend_one(&"whatever".into(), &AlphaValue::from(0.25), &Color::WHITE)?,
            Color::srgb(0.75, 0.75, 1.0)
        );
        assert_eq!(
            blender.blend_one(&"whatever".into(), &AlphaValue::from([0.5, 0.5]), &Color::WHITE),
            Err(BlendError::Alpha(AlphaError::Cardinality {
                alphas: 2,
                colors: 1
            }))
        );

        Ok(())
    }
}
