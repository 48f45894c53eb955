pub mod flow;
pub mod verifier;

pub use flow::{BookingFlow, FlowError, FlowSettings, FlowState};
pub use verifier::MockVerifier;
