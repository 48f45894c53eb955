use serde::{Deserialize, Serialize};

/// Availability state of a single time slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Available,
    Booked,
}

/// Console the game runs on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Console {
    Ps5,
    Ps4,
}

/// A bookable time window belonging to a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: u32,
    /// Display label, e.g. "10:00 - 11:00"
    pub time: String,
    pub status: SlotStatus,
}

impl Slot {
    pub fn new(id: u32, time: impl Into<String>) -> Self {
        Self {
            id,
            time: time.into(),
            status: SlotStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}

/// A catalog entry owning an ordered list of slots.
/// Immutable except for its slots' status field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub console: Console,
    pub slots: Vec<Slot>,
}

impl Game {
    pub fn slot(&self, slot_id: u32) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }
}
