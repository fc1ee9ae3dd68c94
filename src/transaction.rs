// 🗂️ Transaction Slot Table - canonical ordering + default filling
// A transaction row is assembled from typed entries inserted in any order.
// Each entry kind owns one canonical position (1..18); rendering resolves
// every position to an inserted entry or a blank default, then flattens in
// strict positional order. A full row is 68 leaves / 905 characters.

use crate::address::Address;
use crate::entity::Entity;
use crate::error::{IpndError, Result};
use crate::field::{Field, StructuredField};
use crate::record::Composite;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Wire format of the 14-digit IPND timestamps
pub const DATE_FORMAT: &str = "%Y%m%d%H%M%S";

// ============================================================================
// ENTRY KIND CATALOGUE
// ============================================================================

/// The fixed catalogue of transaction entry kinds, declared in canonical
/// rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    PublicNumber,
    ServiceStatusCode,
    PendingFlag,
    CancelPendingFlag,
    CustomerName,
    FindingName,
    ServiceAddress,
    DirectoryAddress,
    ListCode,
    UsageCode,
    TypeOfService,
    CustomerContact,
    CspCode,
    DpCode,
    TransactionDate,
    ServiceStatusDate,
    AlternateAddressFlag,
    PriorPublicNumber,
}

impl EntryKind {
    /// Every kind, in canonical order (position 1 first)
    pub const ALL: [EntryKind; 18] = [
        EntryKind::PublicNumber,
        EntryKind::ServiceStatusCode,
        EntryKind::PendingFlag,
        EntryKind::CancelPendingFlag,
        EntryKind::CustomerName,
        EntryKind::FindingName,
        EntryKind::ServiceAddress,
        EntryKind::DirectoryAddress,
        EntryKind::ListCode,
        EntryKind::UsageCode,
        EntryKind::TypeOfService,
        EntryKind::CustomerContact,
        EntryKind::CspCode,
        EntryKind::DpCode,
        EntryKind::TransactionDate,
        EntryKind::ServiceStatusDate,
        EntryKind::AlternateAddressFlag,
        EntryKind::PriorPublicNumber,
    ];

    /// Canonical position, 1..=18. Positions are unique by construction.
    pub fn position(&self) -> u8 {
        match self {
            EntryKind::PublicNumber => 1,
            EntryKind::ServiceStatusCode => 2,
            EntryKind::PendingFlag => 3,
            EntryKind::CancelPendingFlag => 4,
            EntryKind::CustomerName => 5,
            EntryKind::FindingName => 6,
            EntryKind::ServiceAddress => 7,
            EntryKind::DirectoryAddress => 8,
            EntryKind::ListCode => 9,
            EntryKind::UsageCode => 10,
            EntryKind::TypeOfService => 11,
            EntryKind::CustomerContact => 12,
            EntryKind::CspCode => 13,
            EntryKind::DpCode => 14,
            EntryKind::TransactionDate => 15,
            EntryKind::ServiceStatusDate => 16,
            EntryKind::AlternateAddressFlag => 17,
            EntryKind::PriorPublicNumber => 18,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntryKind::PublicNumber => "PublicNumber",
            EntryKind::ServiceStatusCode => "ServiceStatusCode",
            EntryKind::PendingFlag => "PendingFlag",
            EntryKind::CancelPendingFlag => "CancelPendingFlag",
            EntryKind::CustomerName => "CustomerName",
            EntryKind::FindingName => "FindingName",
            EntryKind::ServiceAddress => "ServiceAddress",
            EntryKind::DirectoryAddress => "DirectoryAddress",
            EntryKind::ListCode => "ListCode",
            EntryKind::UsageCode => "UsageCode",
            EntryKind::TypeOfService => "TypeOfService",
            EntryKind::CustomerContact => "CustomerContact",
            EntryKind::CspCode => "CSPCode",
            EntryKind::DpCode => "DPCode",
            EntryKind::TransactionDate => "TransactionDate",
            EntryKind::ServiceStatusDate => "ServiceStatusDate",
            EntryKind::AlternateAddressFlag => "AlternateAddressFlag",
            EntryKind::PriorPublicNumber => "PriorPublicNumber",
        }
    }
}

// ============================================================================
// ENTRY
// ============================================================================

/// One typed entry of a transaction: its kind plus the composite body that
/// renders it. Entity- and address-backed entries snapshot their source at
/// construction time (value semantics, no later mutation visible).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    kind: EntryKind,
    body: Composite,
}

impl Entry {
    fn single(kind: EntryKind, field: Field) -> Self {
        Entry {
            kind,
            body: Composite::new().leaf(field),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn body(&self) -> &Composite {
        &self.body
    }

    // ------------------------------------------------------------------
    // Simple leaf entries
    // ------------------------------------------------------------------

    /// The public number this row is about (position 1)
    pub fn public_number(value: &str) -> Self {
        Entry::single(EntryKind::PublicNumber, Field::alpha(20, value))
    }

    /// "C" (connect) or "D" (disconnect); blank only via default filling
    pub fn service_status_code(value: &str) -> Result<Self> {
        let field = Field::alpha_in(1, value, &["C", "D"])?;
        Ok(Entry::single(EntryKind::ServiceStatusCode, field))
    }

    pub fn pending_flag(value: &str) -> Self {
        Entry::single(EntryKind::PendingFlag, Field::alpha(1, value))
    }

    pub fn cancel_pending_flag(value: &str) -> Self {
        Entry::single(EntryKind::CancelPendingFlag, Field::alpha(1, value))
    }

    pub fn list_code(value: &str) -> Self {
        Entry::single(EntryKind::ListCode, Field::alpha(2, value))
    }

    pub fn usage_code(value: &str) -> Self {
        Entry::single(EntryKind::UsageCode, Field::alpha(1, value))
    }

    pub fn type_of_service(value: &str) -> Self {
        Entry::single(EntryKind::TypeOfService, Field::alpha(5, value))
    }

    pub fn csp_code(value: &str) -> Self {
        Entry::single(EntryKind::CspCode, Field::alpha(3, value))
    }

    pub fn dp_code(value: &str) -> Self {
        Entry::single(EntryKind::DpCode, Field::alpha(6, value))
    }

    pub fn alternate_address_flag(value: &str) -> Self {
        Entry::single(EntryKind::AlternateAddressFlag, Field::numeric(1, value))
    }

    pub fn prior_public_number(value: &str) -> Self {
        Entry::single(EntryKind::PriorPublicNumber, Field::alpha(20, value))
    }

    // ------------------------------------------------------------------
    // Date entries - the timestamp is always explicit, never read from a
    // clock inside the record tree
    // ------------------------------------------------------------------

    pub fn transaction_date(date: DateTime<Utc>) -> Self {
        Entry::single(
            EntryKind::TransactionDate,
            Field::numeric(14, date.format(DATE_FORMAT).to_string()),
        )
    }

    pub fn service_status_date(date: DateTime<Utc>) -> Self {
        Entry::single(
            EntryKind::ServiceStatusDate,
            Field::numeric(14, date.format(DATE_FORMAT).to_string()),
        )
    }

    // ------------------------------------------------------------------
    // Entity-backed entries
    // ------------------------------------------------------------------

    /// Customer name (position 5). Business: rawname(160) + blank title.
    /// Person: surname(40), firstname + longname joined by a single
    /// space (120), title(12).
    pub fn customer_name(entity: &Entity) -> Self {
        let body = if entity.is_business() {
            Composite::new()
                .leaf(Field::alpha(160, entity.rawname.as_str()))
                .leaf(Field::alpha(12, ""))
        } else {
            Composite::new()
                .leaf(Field::alpha(40, entity.surname.as_str()))
                .leaf(Field::alpha(
                    120,
                    format!("{} {}", entity.firstname, entity.longname),
                ))
                .leaf(Field::alpha(12, entity.title.as_str()))
        };

        Entry {
            kind: EntryKind::CustomerName,
            body,
        }
    }

    /// Finding name (position 6). Narrower than CustomerName on purpose:
    /// business rawname is 80 wide, and a person's firstname stands alone
    /// at width 40 (no longname). The asymmetry is part of the format.
    pub fn finding_name(entity: &Entity) -> Self {
        let body = if entity.is_business() {
            Composite::new()
                .leaf(Field::alpha(80, entity.rawname.as_str()))
                .leaf(Field::alpha(12, ""))
        } else {
            Composite::new()
                .leaf(Field::alpha(40, entity.surname.as_str()))
                .leaf(Field::alpha(40, entity.firstname.as_str()))
                .leaf(Field::alpha(12, entity.title.as_str()))
        };

        Entry {
            kind: EntryKind::FindingName,
            body,
        }
    }

    /// Customer contact (position 12): surname(40), firstname(40),
    /// contact number(20) regardless of entity shape.
    pub fn customer_contact(entity: &Entity) -> Self {
        Entry {
            kind: EntryKind::CustomerContact,
            body: Composite::new()
                .leaf(Field::alpha(40, entity.surname.as_str()))
                .leaf(Field::alpha(40, entity.firstname.as_str()))
                .leaf(Field::alpha(20, entity.contactnum.as_str())),
        }
    }

    // ------------------------------------------------------------------
    // Address-backed entries - service and directory are two roles over
    // the same address value, with identical leaf sequences
    // ------------------------------------------------------------------

    pub fn service_address(address: &Address) -> Self {
        Entry {
            kind: EntryKind::ServiceAddress,
            body: address.to_composite(),
        }
    }

    pub fn directory_address(address: &Address) -> Self {
        Entry {
            kind: EntryKind::DirectoryAddress,
            body: address.to_composite(),
        }
    }

    // ------------------------------------------------------------------
    // Default filling
    // ------------------------------------------------------------------

    /// The no-argument default for a kind, where one exists. Kinds backed
    /// by an entity, an address, a mandatory code, or an explicit
    /// timestamp have no sensible blank and return None.
    fn default_for(kind: EntryKind) -> Option<Entry> {
        match kind {
            EntryKind::ServiceStatusCode => {
                Some(Entry::single(kind, Field::alpha(1, "")))
            }
            EntryKind::PendingFlag => Some(Entry::pending_flag("")),
            EntryKind::CancelPendingFlag => Some(Entry::cancel_pending_flag("")),
            EntryKind::ListCode => Some(Entry::list_code("")),
            EntryKind::UsageCode => Some(Entry::usage_code("")),
            EntryKind::TypeOfService => Some(Entry::type_of_service("")),
            EntryKind::AlternateAddressFlag => Some(Entry::alternate_address_flag("N")),
            EntryKind::PriorPublicNumber => Some(Entry::prior_public_number("")),
            _ => None,
        }
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// One transaction row: a keyed slot table from canonical position to
/// entry. Insertion order is irrelevant to output order; inserting the
/// same kind twice keeps the later entry (last-write-wins).
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    slots: BTreeMap<u8, Entry>,
}

impl Transaction {
    pub fn new() -> Self {
        Transaction::default()
    }

    /// Insert an entry at its canonical position, overwriting any prior
    /// entry of the same kind.
    pub fn insert(&mut self, entry: Entry) {
        self.slots.insert(entry.kind().position(), entry);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resolve all 18 canonical kinds, in order: the inserted entry where
    /// present, the blank default where one exists, otherwise an error
    /// naming the missing kind.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        EntryKind::ALL
            .iter()
            .map(|kind| match self.slots.get(&kind.position()) {
                Some(entry) => Ok(entry.clone()),
                None => Entry::default_for(*kind)
                    .ok_or(IpndError::MissingRequiredField(kind.name())),
            })
            .collect()
    }

    /// The full row as one composite (68 leaves for a complete row)
    pub fn to_composite(&self) -> Result<Composite> {
        let mut row = Composite::new();
        for entry in self.entries()? {
            row = row.group(entry.body);
        }
        Ok(row)
    }

    /// Render every leaf to its fixed-width string, in canonical order
    pub fn render(&self) -> Result<Vec<String>> {
        self.to_composite()?.render()
    }

    /// Render and concatenate: exactly 905 characters for a valid row
    pub fn render_to_string(&self) -> Result<String> {
        Ok(self.render()?.concat())
    }

    pub fn render_structured(&self) -> Result<Vec<StructuredField>> {
        Ok(self.to_composite()?.render_structured())
    }
}

// ============================================================================
// TESTS
// ============================================================================
