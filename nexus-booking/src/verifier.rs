use async_trait::async_trait;
use nexus_domain::{VerificationClient, VerificationStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;

/// Simulated payment check: a fixed delay, then a random outcome.
/// Never contacts a real payment provider.
pub struct MockVerifier {
    delay: Duration,
    success_rate: f64,
    rng: Mutex<StdRng>,
}

impl MockVerifier {
    pub fn new(delay: Duration, success_rate: f64) -> Self {
        Self::with_rng(delay, success_rate, StdRng::from_entropy())
    }

    /// Seeded variant so tests can reproduce the outcome sequence
    pub fn with_rng(delay: Duration, success_rate: f64, rng: StdRng) -> Self {
        Self {
            delay,
            success_rate,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl VerificationClient for MockVerifier {
    async fn verify(
        &self,
    ) -> Result<VerificationStatus, Box<dyn std::error::Error + Send + Sync>> {
        // Delay makes the verification feel like a network round trip
        sleep(self.delay).await;

        let roll: f64 = {
            let mut rng = self.rng.lock().map_err(|e| e.to_string())?;
            rng.gen()
        };

        if roll < self.success_rate {
            Ok(VerificationStatus::Success)
        } else {
            Ok(VerificationStatus::Pending)
        }
    }
}
