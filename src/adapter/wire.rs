// ============================================================================
// Wire Values
// Loosely typed scalars arriving from the host runtime
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A numeric parameter as the host hands it over: a number, a big integer
/// rendered as text, or any other string a caller managed to send.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum WireScalar {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl From<u64> for WireScalar {
    fn from(value: u64) -> Self {
        WireScalar::Unsigned(value)
    }
}

impl From<i64> for WireScalar {
    fn from(value: i64) -> Self {
        WireScalar::Signed(value)
    }
}

impl From<f64> for WireScalar {
    fn from(value: f64) -> Self {
        WireScalar::Float(value)
    }
}

impl From<&str> for WireScalar {
    fn from(value: &str) -> Self {
        WireScalar::Text(value.to_string())
    }
}

impl From<String> for WireScalar {
    fn from(value: String) -> Self {
        WireScalar::Text(value)
    }
}

// ============================================================================
// Adapter Errors
// ============================================================================

/// Errors raised at the host boundary, before anything reaches the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// A numeric parameter was negative, non-numeric or out of range
    InvalidParameter { field: &'static str },
    /// The request could not be decoded
    MalformedRequest(String),
    /// The request named an operation the adapter does not serve
    UnknownOperation(String),
    /// The reply could not be encoded
    Encoding(String),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::InvalidParameter { field } => {
                write!(f, "invalid parameter: {}", field)
            },
            AdapterError::MalformedRequest(reason) => write!(f, "malformed request: {}", reason),
            AdapterError::UnknownOperation(op) => write!(f, "unknown operation: {}", op),
            AdapterError::Encoding(reason) => write!(f, "reply encoding failed: {}", reason),
        }
    }
}

impl std::error::Error for AdapterError {}

/// Result type alias for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

// ============================================================================
// Decoding
// ============================================================================

/// Decode a wire scalar into an unsigned 64-bit value.
///
/// Integral numbers pass through, fractional numbers truncate toward zero,
/// and strings are read `parseInt`-style: leading whitespace and an optional
/// `+` are skipped, then the longest run of decimal digits is taken
/// (`"42abc"` is 42, `"3.9"` is 3). Negative, empty, non-numeric and
/// out-of-range input is rejected.
pub fn decode_u64(value: &WireScalar, field: &'static str) -> AdapterResult<u64> {
    let invalid = AdapterError::InvalidParameter { field };
    match value {
        WireScalar::Unsigned(v) => Ok(*v),
        WireScalar::Signed(v) => u64::try_from(*v).map_err(|_| invalid),
        WireScalar::Float(v) => {
            // 2^64 is the first value that does not fit
            if v.is_finite() && *v >= 0.0 && *v < 18_446_744_073_709_551_616.0 {
                Ok(v.trunc() as u64)
            } else {
                Err(invalid)
            }
        },
        WireScalar::Text(text) => parse_integer_prefix(text).ok_or(invalid),
    }
}

fn parse_integer_prefix(text: &str) -> Option<u64> {
    let trimmed = text.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_end == 0 {
        return None;
    }
    unsigned[..digits_end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(value: impl Into<WireScalar>) -> AdapterResult<u64> {
        decode_u64(&value.into(), "uid")
    }

    #[test]
    fn test_numbers() {
        assert_eq!(decode(42u64), Ok(42));
        assert_eq!(decode(42i64), Ok(42));
        assert_eq!(decode(3.9f64), Ok(3));
        assert_eq!(decode(u64::MAX), Ok(u64::MAX));
    }

    #[test]
    fn test_strings() {
        assert_eq!(decode("42"), Ok(42));
        assert_eq!(decode("  17"), Ok(17));
        assert_eq!(decode("+8"), Ok(8));
        assert_eq!(decode("42abc"), Ok(42));
        assert_eq!(decode("42n"), Ok(42));
        assert_eq!(decode("3.9"), Ok(3));
        assert_eq!(decode("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn test_rejections() {
        let invalid = Err(AdapterError::InvalidParameter { field: "uid" });
        assert_eq!(decode(-1i64), invalid);
        assert_eq!(decode(-0.5f64), invalid);
        assert_eq!(decode(f64::NAN), invalid);
        assert_eq!(decode(f64::INFINITY), invalid);
        assert_eq!(decode(""), invalid);
        assert_eq!(decode("abc"), invalid);
        assert_eq!(decode("-5"), invalid);
        assert_eq!(decode("18446744073709551616"), invalid);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AdapterError::InvalidParameter { field: "score" }.to_string(),
            "invalid parameter: score"
        );
        assert_eq!(
            AdapterError::UnknownOperation("join".to_string()).to_string(),
            "unknown operation: join"
        );
    }
}
