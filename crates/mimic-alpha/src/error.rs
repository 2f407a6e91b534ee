//! Utility module with mimic-alpha's errors.

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// An erroneous color shape.
///
/// This error indicates a numeric color value whose dimensions are
/// incompatible with RGB or RGBA coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorShapeError {
    /// A single color with the wrong number of coordinates. For example,
    /// `[0.0, 0.5, 1.0, 1.0, 1.0]` has one coordinate too many even for RGBA.
    InvalidRgbArgument { len: usize },

    /// A list of colors whose rows have the wrong number of coordinates. For
    /// example, `[[0.0, 1.0], [1.0, 0.0]]` has rows with two coordinates only.
    InvalidRgbArray { width: usize },

    /// Numeric coordinates nested more than two levels deep.
    TooManyDimensions { ndim: usize },
}

impl std::fmt::Display for ColorShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ColorShapeError::*;

        match *self {
            InvalidRgbArgument { len } => f.write_fmt(format_args!(
                "invalid RGB argument: color should have 3 or 4 coordinates but has {}",
                len
            )),
            InvalidRgbArray { width } => f.write_fmt(format_args!(
                "invalid list or array of RGB values: rows should have 3 or 4 coordinates but have {}",
                width
            )),
            TooManyDimensions { ndim } => f.write_fmt(format_args!(
                "RGB/RGBA values must be contained in a 1D or 2D structure, not {}D",
                ndim
            )),
        }
    }
}

impl std::error::Error for ColorShapeError {}

#[cfg(feature = "pyffi")]
impl From<ColorShapeError> for PyErr {
    fn from(value: ColorShapeError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An erroneous color format.
///
/// This error indicates a color token or coordinate list that the
/// [`ColorParser`](crate::ColorParser) does not recognize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorFormatError {
    /// A token that is neither a known color name, a hashed hexadecimal color,
    /// a color cycle reference, nor a grayscale level.
    UnknownColor(String),

    /// A hashed hexadecimal color with an unexpected number of characters or
    /// with non-ASCII characters. For example, `#00` is missing a digit.
    UnexpectedCharacters,

    /// A hashed hexadecimal color with a malformed digit. For example, `#efg`.
    MalformedHex,

    /// A grayscale level or RGB(A) coordinate outside `0..=1`.
    OutOfRange,
}

impl std::fmt::Display for ColorFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ColorFormatError::*;

        match self {
            UnknownColor(token) => f.write_fmt(format_args!("{:?} is not a valid color", token)),
            UnexpectedCharacters => f.write_str(
                "hashed color should have 3, 4, 6, or 8 hexadecimal digits but does not",
            ),
            MalformedHex => f.write_str("hashed color digits should be hexadecimal but are not"),
            OutOfRange => f.write_str("color coordinates and gray levels should be within 0-1 range"),
        }
    }
}

impl std::error::Error for ColorFormatError {}

#[cfg(feature = "pyffi")]
impl From<ColorFormatError> for PyErr {
    fn from(value: ColorFormatError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An erroneous alpha value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlphaError {
    /// At least one alpha value is neither a number nor a string holding one.
    NotNumeric,

    /// At least one alpha value is outside `0..=1` or not-a-number.
    OutOfRange,

    /// The number of alpha values is neither one nor the number of colors.
    Cardinality { alphas: usize, colors: usize },
}

impl std::fmt::Display for AlphaError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use AlphaError::*;

        match *self {
            NotNumeric => f.write_str("alpha must be a float"),
            OutOfRange => f.write_str("alpha must be a float with value between 0 and 1, included"),
            Cardinality { alphas, colors } => f.write_fmt(format_args!(
                "alpha must have either one element or as many as colors ({}) but has {}",
                colors, alphas
            )),
        }
    }
}

impl std::error::Error for AlphaError {}

#[cfg(feature = "pyffi")]
impl From<AlphaError> for PyErr {
    fn from(value: AlphaError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// The reasons breakpoints for a segmented colormap may be malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentFault {
    /// The channel has no breakpoints at all.
    Empty,
    /// The first breakpoint is not at 0 or the last breakpoint is not at 1.
    Endpoints,
    /// The breakpoint positions decrease somewhere.
    Unordered,
}

/// An error while looking up or constructing a colormap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColormapError {
    /// The registry has no colormap with the given name.
    UnknownColormap(String),

    /// The breakpoints for the named channel are malformed.
    MalformedSegments {
        channel: &'static str,
        fault: SegmentFault,
    },

    /// A colormap must have at least one lookup table entry.
    ZeroResolution,

    /// A listed colormap must have at least one color.
    NoColors,
}

impl std::fmt::Display for ColormapError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ColormapError::*;

        match self {
            UnknownColormap(name) => f.write_fmt(format_args!("{:?} is not a known colormap", name)),
            MalformedSegments { channel, fault } => {
                f.write_fmt(format_args!("{} breakpoints ", channel))?;
                match fault {
                    SegmentFault::Empty => f.write_str("should not be empty"),
                    SegmentFault::Endpoints => f.write_str("must start with x=0 and end with x=1"),
                    SegmentFault::Unordered => f.write_str("must have x in increasing order"),
                }
            }
            ZeroResolution => f.write_str("colormap should have at least one entry"),
            NoColors => f.write_str("listed colormap should have at least one color"),
        }
    }
}

impl std::error::Error for ColormapError {}

#[cfg(feature = "pyffi")]
impl From<ColormapError> for PyErr {
    fn from(value: ColormapError) -> Self {
        match value {
            ColormapError::UnknownColormap(_) => {
                pyo3::exceptions::PyKeyError::new_err(value.to_string())
            }
            _ => PyValueError::new_err(value.to_string()),
        }
    }
}

// ====================================================================================================================

/// An error while blending colors or synthesizing a colormap.
///
/// This error wraps the more specific errors above without changing them.
/// [`std::error::Error::source`] returns the wrapped error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlendError {
    Shape(ColorShapeError),
    Format(ColorFormatError),
    Alpha(AlphaError),
    Colormap(ColormapError),
}

impl From<ColorShapeError> for BlendError {
    fn from(value: ColorShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<ColorFormatError> for BlendError {
    fn from(value: ColorFormatError) -> Self {
        Self::Format(value)
    }
}

impl From<AlphaError> for BlendError {
    fn from(value: AlphaError) -> Self {
        Self::Alpha(value)
    }
}

impl From<ColormapError> for BlendError {
    fn from(value: ColormapError) -> Self {
        Self::Colormap(value)
    }
}

impl std::fmt::Display for BlendError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Shape(error) => std::fmt::Display::fmt(error, f),
            Self::Format(error) => std::fmt::Display::fmt(error, f),
            Self::Alpha(error) => std::fmt::Display::fmt(error, f),
            Self::Colormap(error) => std::fmt::Display::fmt(error, f),
        }
    }
}

impl std::error::Error for BlendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shape(error) => Some(error),
            Self::Format(error) => Some(error),
            Self::Alpha(error) => Some(error),
            Self::Colormap(error) => Some(error),
        }
    }
}

#[cfg(feature = "pyffi")]
impl From<BlendError> for PyErr {
    fn from(value: BlendError) -> Self {
        match value {
            BlendError::Shape(error) => error.into(),
            BlendError::Format(error) => error.into(),
            BlendError::Alpha(error) => error.into(),
            BlendError::Colormap(error) => error.into(),
        }
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{AlphaError, BlendError, ColorFormatError, ColorShapeError, ColormapError, SegmentFault};
    use crate::{blend, blend_over};
    use std::error::Error;

    #[test]
    fn test_messages() {
        for (error, prefix) in [
            (
                ColorShapeError::InvalidRgbArgument { len: 5 },
                "invalid RGB argument",
            ),
            (
                ColorShapeError::InvalidRgbArray { width: 2 },
                "invalid list or array of RGB values",
            ),
            (
                ColorShapeError::TooManyDimensions { ndim: 3 },
                "RGB/RGBA values must be contained in a 1D or 2D structure",
            ),
        ] {
            let message = error.to_string();
            assert!(message.starts_with(prefix), "{:?} vs {:?}", message, prefix);
        }

        assert_eq!(
            AlphaError::OutOfRange.to_string(),
            "alpha must be a float with value between 0 and 1, included"
        );
        assert_eq!(AlphaError::NotNumeric.to_string(), "alpha must be a float");
        assert_eq!(
            AlphaError::Cardinality {
                alphas: 4,
                colors: 2
            }
            .to_string(),
            "alpha must have either one element or as many as colors (2) but has 4"
        );

        assert_eq!(
            ColorFormatError::UnknownColor("nocolor".to_string()).to_string(),
            "\"nocolor\" is not a valid color"
        );
        assert_eq!(
            ColormapError::MalformedSegments {
                channel: "green",
                fault: SegmentFault::Endpoints
            }
            .to_string(),
            "green breakpoints must start with x=0 and end with x=1"
        );
    }

    #[test]
    fn test_source() {
        let error = match blend("r", 2.0) {
            Ok(colors) => panic!("alpha 2.0 should be rejected, not yield {:?}", colors),
            Err(error) => error,
        };
        assert_eq!(error, BlendError::Alpha(AlphaError::OutOfRange));
        assert_eq!(error.to_string(), AlphaError::OutOfRange.to_string());
        assert_eq!(
            error
                .source()
                .and_then(|source| source.downcast_ref::<AlphaError>()),
            Some(&AlphaError::OutOfRange)
        );

        let error = BlendError::from(ColorShapeError::TooManyDimensions { ndim: 3 });
        assert_eq!(
            error
                .source()
                .and_then(|source| source.downcast_ref::<ColorShapeError>()),
            Some(&ColorShapeError::TooManyDimensions { ndim: 3 })
        );

        let Err(error) = blend_over("r", 0.5, "nocolor") else {
            panic!("unknown background should be rejected");
        };
        assert_eq!(
            error
                .source()
                .and_then(|source| source.downcast_ref::<ColorFormatError>()),
            Some(&ColorFormatError::UnknownColor("nocolor".to_string()))
        );
        assert!(error
            .source()
            .and_then(|source| source.downcast_ref::<AlphaError>())
            .is_none());

        let error = BlendError::from(ColormapError::ZeroResolution);
        assert_eq!(
            error
                .source()
                .and_then(|source| source.downcast_ref::<ColormapError>()),
            Some(&ColormapError::ZeroResolution)
        );
    }
}
