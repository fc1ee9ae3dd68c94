// 📦 File Container - one Header, N Transactions, one Footer
// Thin orchestrator: sequences the envelope around the transaction rows
// and concatenates their fixed-width output. The footer row count is the
// number of transactions, so an empty file fails footer validation.

use crate::envelope::{Footer, Header};
use crate::error::Result;
use crate::transaction::Transaction;
use chrono::{DateTime, Utc};

/// A complete IPND upload file in memory
#[derive(Debug, Clone, Default)]
pub struct IpndFile {
    source: String,
    seq: u32,
    date: Option<DateTime<Utc>>,
    transactions: Vec<Transaction>,
}

impl IpndFile {
    /// `date` stamps the header and footer; None defers to `Utc::now()`
    /// at generation time (tests pass a fixed date for determinism).
    pub fn new(source: &str, seq: u32, date: Option<DateTime<Utc>>) -> Self {
        IpndFile {
            source: source.to_string(),
            seq,
            date,
            transactions: Vec::new(),
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Generate every record as its leaf-string vector: header row first,
    /// transactions in insertion order, footer row last.
    pub fn generate(&self) -> Result<Vec<Vec<String>>> {
        let date = self.date.unwrap_or_else(Utc::now);

        let mut rows = Vec::with_capacity(self.transactions.len() + 2);

        rows.push(Header::new(&self.source, self.seq, date)?.render()?);

        for transaction in &self.transactions {
            rows.push(transaction.render()?);
        }

        rows.push(
            Footer::new(&self.source, self.seq, self.transactions.len() as u32, date)?
                .render()?,
        );

        Ok(rows)
    }

    /// The final file content: 905 characters per record, no separators
    pub fn generate_to_string(&self) -> Result<String> {
        Ok(self
            .generate()?
            .into_iter()
            .map(|row| row.concat())
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================
