// IPND Upload Generator - Core Library
// Builds Australian IPND (Integrated Public Number Database) upload files:
// fixed-width records composed from a tree of leaf fields, flattened and
// rendered to exactly 905 characters per record.

pub mod error;
pub mod field;
pub mod record;
pub mod address;
pub mod entity;
pub mod transaction;
pub mod envelope;
pub mod file;

// Re-export commonly used types
pub use error::{IpndError, Result};
pub use field::{Encoding, Field, StructuredField};
pub use record::{split_number_suffix, Composite, Node};
pub use address::{Address, AddressKind};
pub use entity::{Entity, EntityKind};
pub use transaction::{Entry, EntryKind, Transaction, DATE_FORMAT};
pub use envelope::{Footer, Header, RECORD_WIDTH};
pub use file::IpndFile;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
