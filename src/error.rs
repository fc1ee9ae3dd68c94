// Error taxonomy for IPND file generation
// Every error is raised synchronously at construction or render time and
// propagates to the caller. A single invalid record invalidates the whole
// file - there is no partial or recoverable generation.

use std::fmt;

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpndError {
    /// Invalid domain value: disallowed enum member, non-numeric
    /// number/suffix combination, malformed name, floor out of range,
    /// or an address used without a house/building specialization.
    Validation(String),

    /// A numeric field's decimal representation exceeds its declared width.
    /// Numeric values are never silently truncated.
    Overflow { value: String, width: usize },

    /// A transaction kind has no inserted entry and cannot be
    /// default-constructed.
    MissingRequiredField(&'static str),

    /// Header sequence number or footer row count outside its valid
    /// inclusive range.
    Range {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl fmt::Display for IpndError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpndError::Validation(msg) => write!(f, "validation error: {}", msg),
            IpndError::Overflow { value, width } => write!(
                f,
                "numeric value '{}' is wider than its declared size {}",
                value, width
            ),
            IpndError::MissingRequiredField(kind) => {
                write!(f, "required transaction record {} not set", kind)
            }
            IpndError::Range {
                what,
                value,
                min,
                max,
            } => write!(
                f,
                "{} {} outside valid range [{}, {}]",
                what, value, min, max
            ),
        }
    }
}

impl std::error::Error for IpndError {}

/// Result alias used throughout the record engine
pub type Result<T> = std::result::Result<T, IpndError>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_overflow() {
        let err = IpndError::Overflow {
            value: "10".to_string(),
            width: 1,
        };
        assert_eq!(
            err.to_string(),
            "numeric value '10' is wider than its declared size 1"
        );
    }

    #[test]
    fn test_display_missing_required() {
        let err = IpndError::MissingRequiredField("PublicNumber");
        assert_eq!(
            err.to_string(),
            "required transaction record PublicNumber not set"
        );
    }

    #[test]
    fn test_display_range() {
        let err = IpndError::Range {
            what: "sequence number",
            value: 0,
            min: 1,
            max: 999999,
        };
        assert_eq!(
            err.to_string(),
            "sequence number 0 outside valid range [1, 999999]"
        );
    }
}
