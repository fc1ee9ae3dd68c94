// 👤 Entity Models - the customers behind a public number
// Closed taxonomy: Person | Business | Government | Charity. The record
// layer never branches on anything but the capability set below, so the
// set of kinds stays closed by design of the IPND format itself.

use crate::error::{IpndError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// ENTITY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Person,
    Business,
    Government,
    Charity,
}

impl EntityKind {
    /// IPND usage code for this kind of customer
    pub fn usage_code(&self) -> &'static str {
        match self {
            EntityKind::Person => "R",
            EntityKind::Business => "B",
            EntityKind::Government => "G",
            EntityKind::Charity => "C",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Person => "Person",
            EntityKind::Business => "Business",
            EntityKind::Government => "Government",
            EntityKind::Charity => "Charity",
        }
    }
}

// ============================================================================
// ENTITY
// ============================================================================

/// A person-like or business-like customer, carrying the capability set
/// the name/contact composites project from:
/// {rawname, firstname, surname, longname, title, contactnum}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    kind: EntityKind,
    pub title: String,
    pub rawname: String,
    pub firstname: String,
    pub surname: String,
    pub longname: String,
    pub contactnum: String,
}

impl Entity {
    pub fn new(kind: EntityKind) -> Self {
        Entity {
            kind,
            title: String::new(),
            rawname: String::new(),
            firstname: String::new(),
            surname: String::new(),
            longname: String::new(),
            contactnum: String::new(),
        }
    }

    pub fn person() -> Self {
        Entity::new(EntityKind::Person)
    }

    pub fn business() -> Self {
        Entity::new(EntityKind::Business)
    }

    pub fn government() -> Self {
        Entity::new(EntityKind::Government)
    }

    pub fn charity() -> Self {
        Entity::new(EntityKind::Charity)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Everything that is not a natural person is "business-shaped" for
    /// name-composition purposes (one raw name, no surname split).
    pub fn is_business(&self) -> bool {
        self.kind != EntityKind::Person
    }

    pub fn usage_code(&self) -> &'static str {
        self.kind.usage_code()
    }

    /// Store the customer name. Business-like entities keep only the raw
    /// name. A person's name is split on single spaces: last token is the
    /// surname (first 40 chars), first token the firstname, middle tokens
    /// join into the long name. Fewer than two tokens is malformed.
    pub fn set_name(&mut self, name: &str, title: Option<&str>) -> Result<()> {
        self.rawname = truncate(name, 160);

        if self.is_business() {
            return Ok(());
        }

        let pieces: Vec<&str> = name.split(' ').collect();

        if pieces.len() < 2 {
            return Err(IpndError::Validation(
                "expected first/last name".to_string(),
            ));
        }

        self.surname = truncate(pieces[pieces.len() - 1], 40);
        self.firstname = pieces[0].to_string();

        if pieces.len() > 2 {
            self.longname = pieces[1..pieces.len() - 1].join(" ");
        }

        self.title = title.unwrap_or_default().to_string();

        Ok(())
    }

    /// Store the contact number (first 20 chars)
    pub fn set_contact_number(&mut self, number: &str) {
        self.contactnum = truncate(number, 20);
    }
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_split() {
        let mut person = Entity::person();
        person.set_contact_number("1234567890");
        person.set_name("John J Smith", Some("Mr")).unwrap();

        assert_eq!(person.rawname, "John J Smith");
        assert_eq!(person.firstname, "John");
        assert_eq!(person.surname, "Smith");
        assert_eq!(person.longname, "J");
        assert_eq!(person.title, "Mr");
    }

    #[test]
    fn test_person_two_token_name_has_no_longname() {
        let mut person = Entity::person();
        person.set_name("Jane Doe", None).unwrap();

        assert_eq!(person.firstname, "Jane");
        assert_eq!(person.surname, "Doe");
        assert_eq!(person.longname, "");
    }

    #[test]
    fn test_person_single_token_name_is_malformed() {
        let mut person = Entity::person();
        let err = person.set_name("Madonna", None).unwrap_err();
        assert_eq!(err, IpndError::Validation("expected first/last name".to_string()));
    }

    #[test]
    fn test_business_name_is_not_split() {
        let mut business = Entity::business();
        business
            .set_name("Extremely Long Name Pty Ltd", None)
            .unwrap();

        assert_eq!(business.rawname, "Extremely Long Name Pty Ltd");
        assert_eq!(business.surname, "");
        assert_eq!(business.firstname, "");
    }

    #[test]
    fn test_rawname_truncated_to_160() {
        let mut business = Entity::business();
        let long = "X".repeat(200);
        business.set_name(&long, None).unwrap();
        assert_eq!(business.rawname.len(), 160);
    }

    #[test]
    fn test_contact_number_truncated_to_20() {
        let mut person = Entity::person();
        person.set_contact_number("123456789012345678901234");
        assert_eq!(person.contactnum, "12345678901234567890");
    }

    #[test]
    fn test_usage_codes() {
        assert_eq!(Entity::person().usage_code(), "R");
        assert_eq!(Entity::business().usage_code(), "B");
        assert_eq!(Entity::government().usage_code(), "G");
        assert_eq!(Entity::charity().usage_code(), "C");
    }

    #[test]
    fn test_is_business() {
        assert!(!Entity::person().is_business());
        assert!(Entity::business().is_business());
        assert!(Entity::government().is_business());
        assert!(Entity::charity().is_business());
    }
}
