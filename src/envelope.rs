// 📨 Envelope Records - Header and Footer
// Fixed-shape composites bracketing a batch of transactions. Both carry a
// literal tag, the file sequence number, a 14-digit timestamp, and a pad
// leaf sized so every record in the file is exactly 905 characters.
//
// Timestamps are explicit parameters - the caller nearest the process
// boundary decides what "now" is, keeping rendering deterministic.

use crate::error::{IpndError, Result};
use crate::field::{Field, StructuredField};
use crate::record::Composite;
use crate::transaction::DATE_FORMAT;
use chrono::{DateTime, Utc};

/// Every record in an IPND upload file renders to this many characters
pub const RECORD_WIDTH: usize = 905;

const SEQUENCE_MIN: i64 = 1;
const SEQUENCE_MAX: i64 = 999999;
const COUNT_MIN: i64 = 1;
const COUNT_MAX: i64 = 100000;

fn check_sequence(seq: u32) -> Result<()> {
    if i64::from(seq) < SEQUENCE_MIN || i64::from(seq) > SEQUENCE_MAX {
        return Err(IpndError::Range {
            what: "sequence number",
            value: i64::from(seq),
            min: SEQUENCE_MIN,
            max: SEQUENCE_MAX,
        });
    }
    Ok(())
}

// ============================================================================
// HEADER
// ============================================================================

/// File header: HDR + IPNDUP tags, 5-char source code, sequence, date, pad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    source: String,
    seq: u32,
    date: DateTime<Utc>,
}

impl Header {
    /// Sequence must be in [1, 999999]
    pub fn new(source: &str, seq: u32, date: DateTime<Utc>) -> Result<Self> {
        check_sequence(seq)?;

        Ok(Header {
            source: source.to_string(),
            seq,
            date,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }

    /// Header leaves: HDR(3) IPNDUP(6) source(5) seq(7N) date(14N) pad(870)
    pub fn to_composite(&self) -> Composite {
        Composite::new()
            .leaf(Field::alpha(3, "HDR"))
            .leaf(Field::alpha(6, "IPNDUP"))
            .leaf(Field::alpha(5, self.source.as_str()))
            .leaf(Field::numeric(7, self.seq.to_string()))
            .leaf(Field::numeric(14, self.date.format(DATE_FORMAT).to_string()))
            .leaf(Field::alpha(870, ""))
    }

    pub fn render(&self) -> Result<Vec<String>> {
        self.to_composite().render()
    }

    pub fn render_to_string(&self) -> Result<String> {
        self.to_composite().render_to_string()
    }

    pub fn render_structured(&self) -> Vec<StructuredField> {
        self.to_composite().render_structured()
    }
}

// ============================================================================
// FOOTER
// ============================================================================

/// File footer: TRL tag, sequence, date, transaction count, pad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    source: String,
    seq: u32,
    count: u32,
    date: DateTime<Utc>,
}

impl Footer {
    /// Sequence must be in [1, 999999] and count in [1, 100000]
    /// (below 1: no rows to submit; above 100000: too many rows for one
    /// upload file).
    pub fn new(source: &str, seq: u32, count: u32, date: DateTime<Utc>) -> Result<Self> {
        check_sequence(seq)?;

        if i64::from(count) < COUNT_MIN || i64::from(count) > COUNT_MAX {
            return Err(IpndError::Range {
                what: "row count",
                value: i64::from(count),
                min: COUNT_MIN,
                max: COUNT_MAX,
            });
        }

        Ok(Footer {
            source: source.to_string(),
            seq,
            count,
            date,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Footer leaves: TRL(3) seq(7N) date(14N) count(7N) pad(874)
    pub fn to_composite(&self) -> Composite {
        Composite::new()
            .leaf(Field::alpha(3, "TRL"))
            .leaf(Field::numeric(7, self.seq.to_string()))
            .leaf(Field::numeric(14, self.date.format(DATE_FORMAT).to_string()))
            .leaf(Field::numeric(7, self.count.to_string()))
            .leaf(Field::alpha(874, ""))
    }

    pub fn render(&self) -> Result<Vec<String>> {
        self.to_composite().render()
    }

    pub fn render_to_string(&self) -> Result<String> {
        self.to_composite().render_to_string()
    }

    pub fn render_structured(&self) -> Vec<StructuredField> {
        self.to_composite().render_structured()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_date() -> DateTime<Utc> {
        // 2020-01-01 00:00:00 UTC
        Utc.timestamp_opt(1577836800, 0).unwrap()
    }

    #[test]
    fn test_header_flattens_to_6_leaves() {
        let header = Header::new("XXXXX", 2, fixed_date()).unwrap();
        assert_eq!(header.to_composite().leaf_count(), 6);
    }

    #[test]
    fn test_header_structured() {
        let header = Header::new("XXXXX", 2, fixed_date()).unwrap();
        let s = header.render_structured();

        assert_eq!(s[0].value, "HDR");
        assert_eq!(s[1].value, "IPNDUP");
        assert_eq!(s[2].value, "XXXXX");
        assert_eq!(s[3].value, "2");
        assert_eq!(s[3].kind, "N");
        assert_eq!(s[4].value, "20200101000000");
        assert_eq!(s[5].size, 870);
    }

    #[test]
    fn test_header_renders_905_chars() {
        let header = Header::new("XXXXX", 2, fixed_date()).unwrap();
        let output = header.render_to_string().unwrap();

        assert_eq!(output.len(), RECORD_WIDTH);
        assert_eq!(output.trim_end(), "HDRIPNDUPXXXXX000000220200101000000");
    }

    #[test]
    fn test_footer_flattens_to_5_leaves() {
        let footer = Footer::new("XXXXX", 2, 3, fixed_date()).unwrap();
        assert_eq!(footer.to_composite().leaf_count(), 5);
    }

    #[test]
    fn test_footer_renders_905_chars() {
        let footer = Footer::new("XXXXX", 2, 3, fixed_date()).unwrap();
        let output = footer.render_to_string().unwrap();

        assert_eq!(output.len(), RECORD_WIDTH);
        assert_eq!(output.trim_end(), "TRL0000002202001010000000000003");
    }

    #[test]
    fn test_sequence_out_of_range() {
        assert!(matches!(
            Header::new("XXXXX", 0, fixed_date()),
            Err(IpndError::Range { .. })
        ));
        assert!(matches!(
            Header::new("XXXXX", 1000000, fixed_date()),
            Err(IpndError::Range { .. })
        ));
        assert!(Header::new("XXXXX", 999999, fixed_date()).is_ok());
    }

    #[test]
    fn test_footer_count_out_of_range() {
        assert!(matches!(
            Footer::new("XXXXX", 2, 0, fixed_date()),
            Err(IpndError::Range { .. })
        ));
        assert!(matches!(
            Footer::new("XXXXX", 2, 100001, fixed_date()),
            Err(IpndError::Range { .. })
        ));
        assert!(Footer::new("XXXXX", 2, 100000, fixed_date()).is_ok());
    }

    #[test]
    fn test_render_is_idempotent() {
        let header = Header::new("XXXXX", 2, fixed_date()).unwrap();
        assert_eq!(
            header.render_to_string().unwrap(),
            header.render_to_string().unwrap()
        );
    }
}
