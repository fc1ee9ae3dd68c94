// 🏠 Address Composite - the 7-part, 23-leaf service/directory address
// One Address layout is reused for both the "service" and "directory"
// address slots of a transaction. Every sub-composite defaults to blank;
// setters replace a sub-composite wholesale rather than merging fields.
//
// Address is abstract over the street-number target: a House populates the
// house-number subunit, a Building populates the building subunit, and the
// undecorated base rejects set_street_number outright.

use crate::error::{IpndError, Result};
use crate::field::{Field, StructuredField};
use crate::record::{split_number_suffix, Composite};

// ============================================================================
// SUB-COMPOSITE CONSTRUCTORS
// ============================================================================

fn number_to_value(num: Option<u32>) -> String {
    num.map(|n| n.to_string()).unwrap_or_default()
}

/// Building subunit: type(6) num(5) suffix(1) num(5) suffix(1)
fn building_subunit(
    building_type: Option<&str>,
    street_no_start: Option<&str>,
    street_no_end: Option<&str>,
) -> Result<Composite> {
    let (start_num, start_suffix) = split_number_suffix(street_no_start)?;
    let (end_num, end_suffix) = split_number_suffix(street_no_end)?;

    Ok(Composite::new()
        .leaf(Field::alpha(6, building_type.unwrap_or_default()))
        .leaf(Field::alpha(5, number_to_value(start_num)))
        .leaf(Field::alpha(1, start_suffix.unwrap_or_default()))
        .leaf(Field::alpha(5, number_to_value(end_num)))
        .leaf(Field::alpha(1, end_suffix.unwrap_or_default())))
}

/// Building floor: type(2) num(4) suffix(1)
/// Floor numbers are constrained to [1, 1000] inclusive - a violation is a
/// validation error, never clamped.
fn building_floor(floor: Option<&str>, floor_type: &str) -> Result<Composite> {
    let (num, suffix) = split_number_suffix(floor)?;

    if let Some(n) = num {
        if !(1..=1000).contains(&n) {
            return Err(IpndError::Validation(format!("invalid floor number: {}", n)));
        }
    }

    // Blank floor leaves the type blank too
    let type_value = if num.is_some() { floor_type } else { "" };

    Ok(Composite::new()
        .leaf(Field::alpha(2, type_value))
        .leaf(Field::alpha(4, number_to_value(num)))
        .leaf(Field::alpha(1, suffix.unwrap_or_default())))
}

/// House number subunit: num(5) suffix(3) num(5) suffix(1)
fn house_subunit(house_no: Option<&str>, secondary_no: Option<&str>) -> Result<Composite> {
    let (num, suffix) = split_number_suffix(house_no)?;
    let (secondary_num, secondary_suffix) = split_number_suffix(secondary_no)?;

    Ok(Composite::new()
        .leaf(Field::alpha(5, number_to_value(num)))
        .leaf(Field::alpha(3, suffix.unwrap_or_default()))
        .leaf(Field::alpha(5, number_to_value(secondary_num)))
        .leaf(Field::alpha(1, secondary_suffix.unwrap_or_default())))
}

/// Street address: name(25) type(8) suffix(6) + secondary name(25) type(4)
/// suffix(2). The secondary street is carried blank (not populated by any
/// current caller) but must be present for the width contract.
fn street_address(name: &str, street_type: &str, suffix: &str) -> Composite {
    Composite::new()
        .leaf(Field::alpha(25, name))
        .leaf(Field::alpha(8, street_type))
        .leaf(Field::alpha(6, suffix))
        .leaf(Field::alpha(25, ""))
        .leaf(Field::alpha(4, ""))
        .leaf(Field::alpha(2, ""))
}

/// Service locality: state(3) locality(40) postcode(4, numeric)
fn service_locality(state: &str, postcode: &str, locality: &str) -> Composite {
    Composite::new()
        .leaf(Field::alpha(3, state))
        .leaf(Field::alpha(40, locality))
        .leaf(Field::numeric(4, postcode))
}

// ============================================================================
// ADDRESS
// ============================================================================

/// Street-number target of an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Abstract base - must be specialized before a street number is set
    Base,
    /// Street number populates the house-number subunit
    House,
    /// Street number populates the building subunit
    Building,
}

/// The full 7-part address: building subunit, building floor, building
/// property, building location, house subunit, street address, locality.
/// Flattens to exactly 23 leaves, all blank by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    kind: AddressKind,
    building_subunit: Composite,
    building_floor: Composite,
    building_property: Composite,
    building_location: Composite,
    house_subunit: Composite,
    street_address: Composite,
    service_locality: Composite,
}

impl Address {
    fn blank(kind: AddressKind) -> Self {
        Address {
            kind,
            // Blank constructors cannot fail - no number input to decompose
            building_subunit: building_subunit(None, None, None).unwrap(),
            building_floor: building_floor(None, "FL").unwrap(),
            building_property: Composite::new().leaf(Field::alpha(40, "")),
            building_location: Composite::new().leaf(Field::alpha(30, "")),
            house_subunit: house_subunit(None, None).unwrap(),
            street_address: street_address("", "", ""),
            service_locality: service_locality("", "", ""),
        }
    }

    /// Abstract base address - rejects set_street_number
    pub fn new() -> Self {
        Address::blank(AddressKind::Base)
    }

    /// House-shaped address
    pub fn house() -> Self {
        Address::blank(AddressKind::House)
    }

    /// Building-shaped address
    pub fn building() -> Self {
        Address::blank(AddressKind::Building)
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// Populate the street number. Where it lands depends on the address
    /// kind: house subunit for House, building subunit for Building. The
    /// base address has no street-number target.
    pub fn set_street_number(&mut self, number: &str) -> Result<()> {
        match self.kind {
            AddressKind::Base => Err(IpndError::Validation(
                "not house or building".to_string(),
            )),
            AddressKind::House => {
                self.house_subunit = house_subunit(Some(number), None)?;
                Ok(())
            }
            AddressKind::Building => {
                self.building_subunit = building_subunit(None, Some(number), None)?;
                Ok(())
            }
        }
    }

    /// Replace the street sub-composite wholesale
    pub fn set_street_name(&mut self, name: &str, street_type: &str, suffix: &str) {
        self.street_address = street_address(name, street_type, suffix);
    }

    /// Replace the locality sub-composite wholesale
    pub fn set_locality(&mut self, postcode: &str, locality: &str, state: &str) {
        self.service_locality = service_locality(state, postcode, locality);
    }

    /// Set the building floor ("5a" splits into number 5, suffix "a").
    /// Floor type defaults to "FL" for callers without a better code.
    pub fn set_floor(&mut self, floor: &str, floor_type: &str) -> Result<()> {
        self.building_floor = building_floor(Some(floor), floor_type)?;
        Ok(())
    }

    /// The address as a composite: 7 groups in fixed order, 23 leaves
    pub fn to_composite(&self) -> Composite {
        Composite::new()
            .group(self.building_subunit.clone())
            .group(self.building_floor.clone())
            .group(self.building_property.clone())
            .group(self.building_location.clone())
            .group(self.house_subunit.clone())
            .group(self.street_address.clone())
            .group(self.service_locality.clone())
    }

    pub fn render(&self) -> Result<Vec<String>> {
        self.to_composite().render()
    }

    pub fn render_structured(&self) -> Vec<StructuredField> {
        self.to_composite().render_structured()
    }
}

impl Default for Address {
    fn default() -> Self {
        Address::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_house() -> Address {
        let mut address = Address::house();
        address.set_street_number("1").unwrap();
        address.set_street_name("FAKE", "ST", "");
        address.set_locality("0200", "ANU", "ACT");
        address
    }

    #[test]
    fn test_default_house_flattens_to_23_leaves() {
        let address = Address::house();
        assert_eq!(address.to_composite().leaf_count(), 23);
    }

    #[test]
    fn test_blank_building_subunit_structured() {
        let subunit = building_subunit(None, None, None).unwrap();
        let sizes: Vec<usize> = subunit.render_structured().iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![6, 5, 1, 5, 1]);
        assert!(subunit.render_structured().iter().all(|s| s.value.is_empty()));
    }

    #[test]
    fn test_building_subunit_splits_numbers() {
        let subunit = building_subunit(Some("APT"), Some("50a"), Some("100")).unwrap();
        let values: Vec<String> = subunit
            .render_structured()
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["APT", "50", "a", "100", ""]);
    }

    #[test]
    fn test_building_floor_splits_number() {
        let floor = building_floor(Some("5a"), "L").unwrap();
        let values: Vec<String> = floor
            .render_structured()
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["L", "5", "a"]);
    }

    #[test]
    fn test_building_floor_range() {
        assert!(building_floor(Some("1000"), "FL").is_ok());
        assert!(matches!(
            building_floor(Some("1001"), "FL"),
            Err(IpndError::Validation(_))
        ));
        assert!(matches!(
            building_floor(Some("0"), "FL"),
            Err(IpndError::Validation(_))
        ));
    }

    #[test]
    fn test_house_subunit_splits_number() {
        let subunit = house_subunit(Some("50a"), None).unwrap();
        let values: Vec<String> = subunit
            .render_structured()
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["50", "a", "", ""]);
    }

    #[test]
    fn test_base_address_rejects_street_number() {
        let mut address = Address::new();
        let err = address.set_street_number("1").unwrap_err();
        assert_eq!(err, IpndError::Validation("not house or building".to_string()));
    }

    #[test]
    fn test_building_address_populates_building_subunit() {
        let mut address = Address::building();
        address.set_street_number("50a").unwrap();

        let structured = address.render_structured();
        // Building subunit occupies the first 5 leaves
        assert_eq!(structured[1].value, "50");
        assert_eq!(structured[2].value, "a");
        // House subunit (leaves 10..14) stays blank
        assert_eq!(structured[10].value, "");
    }

    #[test]
    fn test_populated_house_renders_exact_leaves() {
        let address = populated_house();
        let rendered = address.render().unwrap();

        assert_eq!(
            rendered,
            vec![
                "      ",
                "     ",
                " ",
                "     ",
                " ",
                "  ",
                "    ",
                " ",
                "                                        ",
                "                              ",
                "1    ",
                "   ",
                "     ",
                " ",
                "FAKE                     ",
                "ST      ",
                "      ",
                "                         ",
                "    ",
                "  ",
                "ACT",
                "ANU                                     ",
                "0200",
            ]
        );
    }

    #[test]
    fn test_address_total_width_is_226() {
        assert_eq!(Address::house().to_composite().total_width(), 226);
    }

    #[test]
    fn test_render_is_idempotent() {
        let address = populated_house();
        assert_eq!(address.render().unwrap(), address.render().unwrap());
    }
}
