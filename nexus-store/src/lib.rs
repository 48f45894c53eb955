pub mod app_config;
pub mod ledger_repo;

pub use app_config::Config;
pub use ledger_repo::{FileLedger, LedgerError, BOOKING_HISTORY_KEY};
