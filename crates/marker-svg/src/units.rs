use plate_types::PhysicalUnit;

use crate::errors::FormatError;

/// Parse a unit-suffixed length such as `50mm`.
///
/// The unit must be one of the two-character tokens in [`PhysicalUnit`].
/// Unitless or unknown-unit values are rejected rather than guessed at.
pub fn parse_length(
    attribute: &'static str,
    value: &str,
) -> Result<(f64, PhysicalUnit), FormatError> {
    let malformed = |reason: String| FormatError::MalformedLength {
        attribute,
        value: value.to_string(),
        reason,
    };

    let trimmed = value.trim();
    let split = trimmed
        .len()
        .checked_sub(2)
        .filter(|&i| trimmed.is_char_boundary(i))
        .ok_or_else(|| malformed("expected a number followed by a unit".to_string()))?;
    let (number, token) = trimmed.split_at(split);

    let unit = PhysicalUnit::from_token(token).ok_or_else(|| {
        let known: Vec<&str> = PhysicalUnit::ALL.iter().map(|u| u.token()).collect();
        malformed(format!(
            "unit `{token}` is not one of {}",
            known.join(", ")
        ))
    })?;

    let magnitude: f64 = number
        .trim()
        .parse()
        .map_err(|_| malformed(format!("`{}` is not a number", number.trim())))?;
    if !magnitude.is_finite() {
        return Err(malformed("length must be finite".to_string()));
    }
    Ok((magnitude, unit))
}
