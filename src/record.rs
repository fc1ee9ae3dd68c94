// 🌳 Composite Records - ordered trees of fixed-width leaves
// A composite is an ordered aggregation of fields and/or other composites.
// It holds no values itself; all state lives in its leaves. Rendering is
// a depth-first flatten that preserves declared child order at every level.

use crate::error::{IpndError, Result};
use crate::field::{Field, StructuredField};

// ============================================================================
// NODE
// ============================================================================

/// One child of a composite: a leaf field or a nested composite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Field),
    Group(Composite),
}

// ============================================================================
// COMPOSITE
// ============================================================================

/// An ordered, named aggregation of fields and composites.
///
/// Child order is fixed by construction and never reordered. A composite
/// is a value object: built complete, then only read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Composite {
    children: Vec<Node>,
}

impl Composite {
    pub fn new() -> Self {
        Composite::default()
    }

    /// Builder: append a leaf field
    pub fn leaf(mut self, field: Field) -> Self {
        self.children.push(Node::Leaf(field));
        self
    }

    /// Builder: append a nested composite
    pub fn group(mut self, group: Composite) -> Self {
        self.children.push(Node::Group(group));
        self
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Depth-first expansion into the ordered leaf sequence
    pub fn flatten(&self) -> Vec<&Field> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Field>) {
        for child in &self.children {
            match child {
                Node::Leaf(field) => leaves.push(field),
                Node::Group(group) => group.collect_leaves(leaves),
            }
        }
    }

    /// Number of leaves in the flattened sequence
    pub fn leaf_count(&self) -> usize {
        self.flatten().len()
    }

    /// Sum of the declared widths of all leaves
    pub fn total_width(&self) -> usize {
        self.flatten().iter().map(|f| f.width()).sum()
    }

    /// Render every leaf to its fixed-width string, in order
    pub fn render(&self) -> Result<Vec<String>> {
        self.flatten().iter().map(|f| f.render()).collect()
    }

    /// Render and concatenate into one string
    pub fn render_to_string(&self) -> Result<String> {
        Ok(self.render()?.concat())
    }

    /// Structured {type, size, value} view of every leaf, in order
    pub fn render_structured(&self) -> Vec<StructuredField> {
        self.flatten().iter().map(|f| f.structured()).collect()
    }
}

// ============================================================================
// NUMBER / SUFFIX DECOMPOSITION
// ============================================================================

/// Split an input like "50a" into an integer magnitude and a trailing
/// non-digit suffix. A pure-digit input yields a magnitude with no suffix;
/// an empty/absent input yields two absent values. Used identically for
/// building numbers, house numbers, and floor numbers.
pub fn split_number_suffix(input: Option<&str>) -> Result<(Option<u32>, Option<String>)> {
    let raw = match input {
        Some(s) if !s.is_empty() => s,
        _ => return Ok((None, None)),
    };

    let digits_end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());

    if digits_end == 0 {
        return Err(IpndError::Validation(format!(
            "expected a street number but got '{}'",
            raw
        )));
    }

    let magnitude: u32 = raw[..digits_end].parse().map_err(|_| {
        IpndError::Validation(format!("street number '{}' too large", raw))
    })?;

    let suffix = &raw[digits_end..];

    if suffix.is_empty() {
        return Ok((Some(magnitude), None));
    }

    // The suffix must be one trailing run of non-digits ("5a5" is invalid)
    if suffix.chars().any(|c| c.is_ascii_digit()) {
        return Err(IpndError::Validation(format!(
            "invalid number/suffix combination '{}'",
            raw
        )));
    }

    Ok((Some(magnitude), Some(suffix.to_string())))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_fixture() -> Composite {
        let inner = Composite::new()
            .leaf(Field::alpha(3, "B"))
            .leaf(Field::alpha(4, "C"));

        Composite::new()
            .leaf(Field::alpha(2, "A"))
            .group(inner)
            .leaf(Field::numeric(2, "7"))
    }

    #[test]
    fn test_flatten_depth_first_order() {
        let c = nested_fixture();
        let leaves = c.flatten();

        assert_eq!(leaves.len(), 4);
        assert_eq!(leaves[0].value(), "A");
        assert_eq!(leaves[1].value(), "B");
        assert_eq!(leaves[2].value(), "C");
        assert_eq!(leaves[3].value(), "7");
    }

    #[test]
    fn test_render_concatenates_leaves() {
        let c = nested_fixture();
        assert_eq!(c.render().unwrap(), vec!["A ", "B  ", "C   ", "07"]);
        assert_eq!(c.render_to_string().unwrap(), "A B  C   07");
    }

    #[test]
    fn test_render_is_idempotent() {
        let c = nested_fixture();
        assert_eq!(c.render().unwrap(), c.render().unwrap());
    }

    #[test]
    fn test_total_width() {
        assert_eq!(nested_fixture().total_width(), 11);
    }

    #[test]
    fn test_structured_view() {
        let c = Composite::new().leaf(Field::alpha(3, "ACT"));
        let s = c.render_structured();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].kind, "X");
        assert_eq!(s[0].size, 3);
        assert_eq!(s[0].value, "ACT");
    }

    #[test]
    fn test_split_number_and_suffix() {
        assert_eq!(
            split_number_suffix(Some("50a")).unwrap(),
            (Some(50), Some("a".to_string()))
        );
    }

    #[test]
    fn test_split_pure_digits() {
        assert_eq!(split_number_suffix(Some("100")).unwrap(), (Some(100), None));
    }

    #[test]
    fn test_split_absent() {
        assert_eq!(split_number_suffix(None).unwrap(), (None, None));
        assert_eq!(split_number_suffix(Some("")).unwrap(), (None, None));
    }

    #[test]
    fn test_split_rejects_no_leading_digits() {
        assert!(matches!(
            split_number_suffix(Some("abc")),
            Err(IpndError::Validation(_))
        ));
    }

    #[test]
    fn test_split_rejects_digit_after_suffix() {
        assert!(matches!(
            split_number_suffix(Some("5a5")),
            Err(IpndError::Validation(_))
        ));
    }
}
