// 📏 Field Layer - Fixed-width leaf records
// The smallest renderable unit of an IPND file: a value with a declared
// character width and an encoding discipline (numeric or alpha).
//
// Rendering contract: output length == width, always.
// - Alpha: truncate, left-justify, space-pad right (silent truncation is
//   the specified policy for text)
// - Numeric: right-justify, zero-pad left, error on overflow (numeric
//   values are never silently truncated)

use crate::error::{IpndError, Result};
use serde::Serialize;

// ============================================================================
// ENCODING
// ============================================================================

/// Encoding discipline of a leaf field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encoding {
    /// Right-justified, zero-padded ("N" in the IPND data dictionary)
    Numeric,
    /// Left-justified, space-padded ("X" in the IPND data dictionary)
    Alpha,
}

impl Encoding {
    /// One-letter code used by the structured/introspection view
    pub fn code(&self) -> &'static str {
        match self {
            Encoding::Numeric => "N",
            Encoding::Alpha => "X",
        }
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A leaf field: fixed width, encoding, and an owned value.
///
/// Fields are value objects - constructed complete, never mutated.
/// An absent value is the empty string and still obeys the padding rules
/// of the declared encoding (all spaces for alpha, all zeros for numeric).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    encoding: Encoding,
    width: usize,
    value: String,
}

impl Field {
    /// Alpha (textual) field
    pub fn alpha(width: usize, value: impl Into<String>) -> Self {
        Field {
            encoding: Encoding::Alpha,
            width,
            value: value.into(),
        }
    }

    /// Numeric field
    pub fn numeric(width: usize, value: impl Into<String>) -> Self {
        Field {
            encoding: Encoding::Numeric,
            width,
            value: value.into(),
        }
    }

    /// Enum-constrained alpha field: a non-empty value outside `allowed`
    /// is rejected; an empty/absent value bypasses the check.
    pub fn alpha_in(width: usize, value: impl Into<String>, allowed: &[&str]) -> Result<Self> {
        let value = value.into();

        if !value.is_empty() && !allowed.contains(&value.as_str()) {
            return Err(IpndError::Validation(format!(
                "expected one of {:?} but got '{}'",
                allowed, value
            )));
        }

        Ok(Field::alpha(width, value))
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Render to a string of exactly `width` characters
    pub fn render(&self) -> Result<String> {
        match self.encoding {
            Encoding::Alpha => {
                let mut out: String = self.value.chars().take(self.width).collect();
                let len = out.chars().count();
                out.extend(std::iter::repeat(' ').take(self.width - len));
                Ok(out)
            }
            Encoding::Numeric => {
                let len = self.value.chars().count();
                if len > self.width {
                    return Err(IpndError::Overflow {
                        value: self.value.clone(),
                        width: self.width,
                    });
                }
                let mut out = String::with_capacity(self.width);
                out.extend(std::iter::repeat('0').take(self.width - len));
                out.push_str(&self.value);
                Ok(out)
            }
        }
    }

    /// Structured view for introspection and tests
    pub fn structured(&self) -> StructuredField {
        StructuredField {
            kind: self.encoding.code(),
            size: self.width,
            value: self.value.clone(),
        }
    }
}

// ============================================================================
// STRUCTURED VIEW
// ============================================================================

/// Introspection view of a rendered leaf: {type, size, value}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredField {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub size: usize,
    pub value: String,
}

// ============================================================================
// TESTS
// ============================================================================
