use serde::{Deserialize, Serialize};

use crate::booking::Booking;

/// UI-facing signals emitted by the booking flow.
/// These drive presentation only; the core never depends on a consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BookingEvent {
    SlotSelected { game_id: u32, slot_id: u32 },
    VerifyingStateChanged(bool),
    BookingConfirmed(Booking),
    BookingCancelled,
}
