//! Utility module with the loosely structured inputs for blending.
//!
//! Callers hand colors and alpha values to the [`Blender`](crate::Blender) in
//! many forms: a color name, a grayscale level, an RGB(A) array, a list of
//! names, a two-dimensional array of coordinates, or a mix thereof.
//! [`ColorValue`] and [`AlphaValue`] capture all of these forms as recursive
//! enumerations. [`ColorValue::classify`] determines a color value's
//! [`Shape`] exactly once, and the blender dispatches on that shape.

#[cfg(feature = "pyffi")]
use pyo3::{prelude::*, types::PyString};

use crate::error::ColorShapeError;
use crate::{Color, Float};

/// A color value, which may describe one or more colors.
///
/// ```
/// # use mimic_alpha::ColorValue;
/// let one = ColorValue::from("aqua");
/// let two = ColorValue::from(["r", "g"]);
/// let three = ColorValue::from([[0.0, 1.0, 1.0], [1.0, 0.0, 0.0], [0.5, 0.5, 0.5]]);
///
/// assert_eq!(one, ColorValue::Token("aqua".to_string()));
/// assert!(matches!(two, ColorValue::Sequence(ref items) if items.len() == 2));
/// assert!(matches!(three, ColorValue::Sequence(ref items) if items.len() == 3));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ColorValue {
    /// A color token, such as a name, hashed hexadecimal, or grayscale string.
    Token(String),
    /// A bare number, which denotes a grayscale level.
    Number(Float),
    /// A sequence of coordinates or of further color values.
    Sequence(Vec<ColorValue>),
}

/// The shape of a color value.
///
/// A color value's shape determines how the [`Blender`](crate::Blender)
/// interprets it.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape<'a> {
    /// A single token or number.
    ScalarToken(&'a ColorValue),
    /// A single color with three coordinates.
    NumericTriple([Float; 3]),
    /// A single color with four coordinates, the last being alpha.
    NumericQuad([Float; 4]),
    /// A sequence that is not a rectangular array of numbers. Every element
    /// denotes one color.
    CollectionOfTokens(&'a [ColorValue]),
    /// A rectangular array of numbers with rows of three or four coordinates.
    /// The data is stored in row-major order.
    Array2D { width: usize, data: Vec<Float> },
}

impl Shape<'_> {
    /// Determine the number of colors described by this shape.
    pub fn count(&self) -> usize {
        match self {
            Self::ScalarToken(_) | Self::NumericTriple(_) | Self::NumericQuad(_) => 1,
            Self::CollectionOfTokens(items) => items.len(),
            Self::Array2D { width, data } => data.len() / width,
        }
    }
}

impl ColorValue {
    /// Determine this color value's shape.
    ///
    /// A token or number is a scalar token. A sequence that is a rectangular
    /// array of numbers must be a one-dimensional array with three or four
    /// elements or a two-dimensional array with rows of three or four elements.
    /// Any other sequence is a collection of tokens, whose elements are
    /// interpreted one by one.
    ///
    /// # Errors
    ///
    /// This method fails for rectangular arrays of numbers with the wrong
    /// dimensions.
    ///
    /// ```
    /// # use mimic_alpha::{ColorValue, Shape};
    /// # use mimic_alpha::error::ColorShapeError;
    /// let quad = ColorValue::from([0.0, 0.5, 1.0, 0.3]);
    /// assert_eq!(quad.classify(), Ok(Shape::NumericQuad([0.0, 0.5, 1.0, 0.3])));
    ///
    /// let five = ColorValue::from([0.0, 0.5, 1.0, 0.3, 0.1]);
    /// assert_eq!(five.classify(), Err(ColorShapeError::InvalidRgbArgument { len: 5 }));
    /// ```
    pub fn classify(&self) -> Result<Shape<'_>, ColorShapeError> {
        let items = match self {
            Self::Token(_) | Self::Number(_) => return Ok(Shape::ScalarToken(self)),
            Self::Sequence(items) => items,
        };

        let Some((dims, data)) = self.numeric_shape() else {
            return Ok(Shape::CollectionOfTokens(items));
        };

        match *dims.as_slice() {
            [len @ (3 | 4)] => match *data.as_slice() {
                [r, g, b] => Ok(Shape::NumericTriple([r, g, b])),
                [r, g, b, a] => Ok(Shape::NumericQuad([r, g, b, a])),
                _ => Err(ColorShapeError::InvalidRgbArgument { len }),
            },
            [len] => Err(ColorShapeError::InvalidRgbArgument { len }),
            [_, width @ (3 | 4)] => Ok(Shape::Array2D { width, data }),
            [_, width] => Err(ColorShapeError::InvalidRgbArray { width }),
            _ => Err(ColorShapeError::TooManyDimensions { ndim: dims.len() }),
        }
    }

    /// Determine whether this color value is a rectangular array of numbers.
    /// If so, this method returns the array's dimensions and its elements in
    /// row-major order. A bare number has zero dimensions.
    pub fn numeric_shape(&self) -> Option<(Vec<usize>, Vec<Float>)> {
        let mut data = Vec::new();
        let dims = self.collect_numbers(&mut data)?;
        Some((dims, data))
    }

    fn collect_numbers(&self, data: &mut Vec<Float>) -> Option<Vec<usize>> {
        match self {
            Self::Token(_) => None,
            Self::Number(n) => {
                data.push(*n);
                Some(Vec::new())
            }
            Self::Sequence(items) => {
                let mut inner: Option<Vec<usize>> = None;
                for item in items {
                    let dims = item.collect_numbers(data)?;
                    match inner {
                        None => inner = Some(dims),
                        Some(ref expected) if *expected == dims => (),
                        Some(_) => return None, // Ragged
                    }
                }

                let mut dims = vec![items.len()];
                dims.extend(inner.unwrap_or_default());
                Some(dims)
            }
        }
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        Self::Token(value.to_string())
    }
}

impl From<String> for ColorValue {
    fn from(value: String) -> Self {
        Self::Token(value)
    }
}

impl From<Float> for ColorValue {
    fn from(value: Float) -> Self {
        Self::Number(value)
    }
}

impl From<Color> for ColorValue {
    fn from(value: Color) -> Self {
        Self::from(value.coordinates())
    }
}

impl From<&Color> for ColorValue {
    fn from(value: &Color) -> Self {
        Self::from(value.coordinates())
    }
}

impl<T: Into<ColorValue>, const N: usize> From<[T; N]> for ColorValue {
    fn from(value: [T; N]) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ColorValue>> From<Vec<T>> for ColorValue {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<ColorValue>> From<&[T]> for ColorValue {
    fn from(value: &[T]) -> Self {
        Self::Sequence(value.iter().cloned().map(Into::into).collect())
    }
}

#[cfg(feature = "pyffi")]
impl<'py> FromPyObject<'py> for ColorValue {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        if ob.is_instance_of::<PyString>() {
            return Ok(Self::Token(ob.extract()?));
        } else if let Ok(color) = ob.downcast::<Color>() {
            return Ok(Self::from(color.get()));
        } else if let Ok(number) = ob.extract::<Float>() {
            return Ok(Self::Number(number));
        }

        let items = ob
            .try_iter()?
            .map(|item| item.and_then(|i| i.extract::<ColorValue>()))
            .collect::<PyResult<Vec<_>>>()?;
        Ok(Self::Sequence(items))
    }
}

// ====================================================================================================================

/// An alpha value, which may describe one or more alphas.
///
/// An alpha value is valid if all its numbers, after flattening, are in
/// `0..=1`. Tokens are valid if they parse as such numbers.
#[derive(Clone, Debug, PartialEq)]
pub enum AlphaValue {
    Number(Float),
    Token(String),
    Sequence(Vec<AlphaValue>),
}

impl AlphaValue {
    /// Flatten this alpha value into its leaves, in depth-first order.
    ///
    /// ```
    /// # use mimic_alpha::AlphaValue;
    /// let alpha = AlphaValue::from(vec![vec![0.1, 0.2], vec![0.3]]);
    /// assert_eq!(alpha.flatten().len(), 3);
    /// ```
    pub fn flatten(&self) -> Vec<&AlphaValue> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a AlphaValue>) {
        match self {
            Self::Sequence(items) => {
                for item in items {
                    item.collect_leaves(leaves);
                }
            }
            _ => leaves.push(self),
        }
    }

    /// Convert this alpha value to a number. This method returns `None` for
    /// sequences and for tokens that do not parse as numbers.
    pub fn to_number(&self) -> Option<Float> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Token(s) => s.trim().parse().ok(),
            Self::Sequence(_) => None,
        }
    }
}

impl From<Float> for AlphaValue {
    fn from(value: Float) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AlphaValue {
    fn from(value: &str) -> Self {
        Self::Token(value.to_string())
    }
}

impl From<String> for AlphaValue {
    fn from(value: String) -> Self {
        Self::Token(value)
    }
}

impl<T: Into<AlphaValue>, const N: usize> From<[T; N]> for AlphaValue {
    fn from(value: [T; N]) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AlphaValue>> From<Vec<T>> for AlphaValue {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<AlphaValue>> From<&[T]> for AlphaValue {
    fn from(value: &[T]) -> Self {
        Self::Sequence(value.iter().cloned().map(Into::into).collect())
    }
}

#[cfg(feature = "pyffi")]
impl<'py> FromPyObject<'py> for AlphaValue {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        if ob.is_instance_of::<PyString>() {
            return Ok(Self::Token(ob.extract()?));
        } else if let Ok(number) = ob.extract::<Float>() {
            return Ok(Self::Number(number));
        }

        match ob.try_iter() {
            Ok(iter) => {
                let items = iter
                    .map(|item| item.and_then(|i| i.extract::<AlphaValue>()))
                    .collect::<PyResult<Vec<_>>>()?;
                Ok(Self::Sequence(items))
            }
            // Neither number nor sequence, so validation rejects it.
            Err(_) => Ok(Self::Token(ob.str()?.extract()?)),
        }
    }
}

// ====================================================================================================================
