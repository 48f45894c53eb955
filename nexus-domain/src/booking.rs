use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finalized record of a successful slot reservation.
/// Created exactly once per confirmed payment, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub game_id: u32,
    /// Denormalized for display; bookings outlive catalog edits
    pub game_title: String,
    pub slot_time: String,
    pub booked_at: DateTime<Utc>,
    pub amount: i32,
    pub currency: String,
}

impl Booking {
    pub fn new(
        game_id: u32,
        game_title: String,
        slot_time: String,
        amount: i32,
        currency: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id,
            game_title,
            slot_time,
            booked_at: Utc::now(),
            amount,
            currency,
        }
    }
}
