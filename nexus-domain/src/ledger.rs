use async_trait::async_trait;
use std::error::Error;

use crate::booking::Booking;

/// Append-only, persisted history of bookings.
///
/// Implementations keep the in-memory sequence authoritative for the
/// session; persistence failures degrade rather than roll back.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Load the persisted sequence. Missing or unreadable data degrades
    /// to an empty ledger, never an error.
    async fn load(&mut self) -> Vec<Booking>;

    /// Append one record and persist the full sequence before returning.
    async fn append(&mut self, booking: Booking) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Current in-memory sequence, oldest first.
    fn entries(&self) -> &[Booking];

    /// Display view of the ledger, most recent booking first.
    fn history(&self) -> Vec<Booking> {
        let mut out = self.entries().to_vec();
        out.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
        out
    }
}
