use async_trait::async_trait;
use nexus_domain::{Booking, LedgerRepository};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Well-known key the serialized ledger lives under in the data directory
pub const BOOKING_HISTORY_KEY: &str = "nexus_gaming_booking_history";

/// File-backed booking ledger: one JSON document in the scoped data dir.
///
/// The in-memory sequence is authoritative for the session. `append`
/// persists the full sequence before returning; a persist failure keeps
/// the in-memory entry and surfaces the error for logging only.
pub struct FileLedger {
    path: PathBuf,
    entries: Vec<Booking>,
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Failed to write ledger file: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to serialize ledger: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FileLedger {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{}.json", BOOKING_HISTORY_KEY)),
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(&self.entries)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl LedgerRepository for FileLedger {
    async fn load(&mut self) -> Vec<Booking> {
        self.entries = match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<Booking>>(&bytes) {
                Ok(entries) => {
                    debug!(count = entries.len(), "loaded booking history");
                    entries
                }
                Err(e) => {
                    // Corrupt history is discarded, not fatal
                    warn!("Booking history unreadable, starting empty: {}", e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!("Failed to read booking history, starting empty: {}", e);
                Vec::new()
            }
        };
        self.entries.clone()
    }

    async fn append(&mut self, booking: Booking) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.entries.push(booking);
        if let Err(e) = self.persist().await {
            // In-memory state stays authoritative; the entry is not rolled back
            error!("Failed to persist booking history: {}", e);
            return Err(Box::new(e));
        }
        Ok(())
    }

    fn entries(&self) -> &[Booking] {
        &self.entries
    }
}
