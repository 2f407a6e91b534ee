use crate::error::ColorFormatError;
use crate::Float;

/// Parse a color in hashed hexadecimal format. If successful, this function
/// returns the three color coordinates as unsigned bytes. It transparently
/// handles single-digit coordinates and drops a trailing alpha coordinate.
pub(crate) fn parse_hashed(s: &str) -> Result<[u8; 3], ColorFormatError> {
    let Some(digits) = s.strip_prefix('#') else {
        return Err(ColorFormatError::UnknownColor(s.to_string()));
    };

    let factor = match digits.len() {
        3 | 4 => 1,
        6 | 8 => 2,
        _ => return Err(ColorFormatError::UnexpectedCharacters),
    };

    let parse_coordinate = |index: usize| -> Result<u8, ColorFormatError> {
        let t = digits
            .get(factor * index..factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedCharacters)?;
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    };

    let c1 = parse_coordinate(0)?;
    let c2 = parse_coordinate(1)?;
    let c3 = parse_coordinate(2)?;
    if digits.len() == 4 || digits.len() == 8 {
        // Alpha gets dropped but must still be well-formed.
        parse_coordinate(3)?;
    }
    Ok([c1, c2, c3])
}

/// Parse a color cycle reference `C0` through `C9`. If successful, this
/// function returns the index into the cycle.
pub(crate) fn parse_cycle(s: &str) -> Option<usize> {
    let digits = s.strip_prefix('c')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse a grayscale level such as `0.25`. If the string holds a number, this
/// function returns the level, which must be in `0..=1`.
pub(crate) fn parse_gray(s: &str) -> Option<Result<Float, ColorFormatError>> {
    let level = s.parse::<Float>().ok()?;
    if (0.0..=1.0).contains(&level) {
        Some(Ok(level))
    } else {
        Some(Err(ColorFormatError::OutOfRange))
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Format the coordinates as a CSS sRGB color.
///
/// This function formats the given coordinates with the `color()` function and
/// space-separated arguments. It respects the formatter's precision,
/// defaulting to 5 digits past the decimal.
pub(crate) fn format(coordinates: &[Float; 3], f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("color(srgb ")?;

    let factor = (10.0 as Float).powi(f.precision().unwrap_or(5) as i32);
    for (index, coordinate) in coordinates.iter().enumerate() {
        if coordinate.is_nan() {
            f.write_str("none")?;
        } else {
            // CSS mandates NO trailing zeros whatsoever. But formatting
            // floats with a precision produces trailing zeros. Rounding
            // avoids them, for the most part. If fractional part is zero,
            // we do need an explicit precision---of zero!
            let c = (coordinate * factor).round() / factor;
            if c == c.trunc() {
                f.write_fmt(format_args!("{:.0}", c))?;
            } else {
                f.write_fmt(format_args!("{}", c))?;
            }
        }

        if index < 2 {
            f.write_str(" ")?;
        }
    }

    f.write_str(")")
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{parse_cycle, parse_gray, parse_hashed, ColorFormatError};

    #[test]
    fn test_parse_hashed() -> Result<(), ColorFormatError> {
        assert_eq!(parse_hashed("#123")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hashed("#1234")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hashed("#112233")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hashed("#11223380")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(
            parse_hashed("fff"),
            Err(ColorFormatError::UnknownColor("fff".to_string()))
        );
        assert_eq!(
            parse_hashed("#ff"),
            Err(ColorFormatError::UnexpectedCharacters)
        );
        assert_eq!(
            parse_hashed("#1122334"),
            Err(ColorFormatError::UnexpectedCharacters)
        );
        assert_eq!(parse_hashed("#0g0"), Err(ColorFormatError::MalformedHex));
        assert_eq!(parse_hashed("#000g"), Err(ColorFormatError::MalformedHex));

        Ok(())
    }

    #[test]
    fn test_parse_cycle() {
        assert_eq!(parse_cycle("c0"), Some(0));
        assert_eq!(parse_cycle("c13"), Some(13));
        assert_eq!(parse_cycle("c"), None);
        assert_eq!(parse_cycle("c-1"), None);
        assert_eq!(parse_cycle("chocolate"), None);
    }

    #[test]
    fn test_parse_gray() {
        assert_eq!(parse_gray("0.25"), Some(Ok(0.25)));
        assert_eq!(parse_gray("1"), Some(Ok(1.0)));
        assert_eq!(parse_gray("1.5"), Some(Err(ColorFormatError::OutOfRange)));
        assert_eq!(parse_gray("-0.1"), Some(Err(ColorFormatError::OutOfRange)));
        assert_eq!(parse_gray("nan"), Some(Err(ColorFormatError::OutOfRange)));
        assert_eq!(parse_gray("gray"), None);
    }

    #[test]
    fn test_format() {
        use crate::Color;

        let clr = Color::srgb(0.3, 0.336, 0.123456);
        assert_eq!(clr.to_string(), "color(srgb 0.3 0.336 0.12346)");
        assert_eq!(format!("{:.2}", clr), "color(srgb 0.3 0.34 0.12)");
        assert_eq!(Color::srgb(1.0, 0.5, 0.0).to_string(), "color(srgb 1 0.5 0)");
    }
}
