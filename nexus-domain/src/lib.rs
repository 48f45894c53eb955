pub mod booking;
pub mod events;
pub mod game;
pub mod ledger;
pub mod verification;

pub use booking::Booking;
pub use events::BookingEvent;
pub use game::{Console, Game, Slot, SlotStatus};
pub use ledger::LedgerRepository;
pub use verification::{VerificationClient, VerificationStatus};
