use nexus_catalog::{Catalog, CatalogError};
use nexus_domain::{
    Booking, BookingEvent, LedgerRepository, VerificationClient, VerificationStatus,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Tunables for one controller instance
#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub poll_interval: Duration,
    /// Fixed charge applied to every booking
    pub amount: i32,
    pub currency: String,
    /// None polls until success or cancellation
    pub max_poll_attempts: Option<u32>,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            amount: 100,
            currency: "INR".to_string(),
            max_poll_attempts: None,
        }
    }
}

/// Lifecycle of a single booking attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    SlotSelected { game_id: u32, slot_id: u32 },
    Verifying { game_id: u32, slot_id: u32 },
    Confirmed { booking: Booking },
}

impl FlowState {
    fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "IDLE",
            FlowState::SlotSelected { .. } => "SLOT_SELECTED",
            FlowState::Verifying { .. } => "VERIFYING",
            FlowState::Confirmed { .. } => "CONFIRMED",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

struct FlowInner {
    state: FlowState,
    /// Generation token; bumped whenever an attempt starts or dies.
    /// A finalize whose token no longer matches is a late result.
    attempt: u64,
    task: Option<JoinHandle<()>>,
}

/// Orchestrates slot selection, payment polling and booking finalization.
///
/// At most one polling task is alive at a time. Every exit from VERIFYING
/// (success, cancel, replacement, drop) releases it, and the finalize
/// sequence runs under the controller lock so the catalog mutation and the
/// ledger append land together or not at all.
pub struct BookingFlow {
    catalog: Arc<Mutex<Catalog>>,
    ledger: Arc<Mutex<Box<dyn LedgerRepository>>>,
    verifier: Arc<dyn VerificationClient>,
    settings: FlowSettings,
    events: broadcast::Sender<BookingEvent>,
    inner: Arc<Mutex<FlowInner>>,
}

impl BookingFlow {
    pub fn new(
        catalog: Arc<Mutex<Catalog>>,
        ledger: Arc<Mutex<Box<dyn LedgerRepository>>>,
        verifier: Arc<dyn VerificationClient>,
        settings: FlowSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            catalog,
            ledger,
            verifier,
            settings,
            events,
            inner: Arc::new(Mutex::new(FlowInner {
                state: FlowState::Idle,
                attempt: 0,
                task: None,
            })),
        }
    }

    /// UI-facing signal stream
    pub fn subscribe(&self) -> broadcast::Receiver<BookingEvent> {
        self.events.subscribe()
    }

    pub async fn state(&self) -> FlowState {
        self.inner.lock().await.state.clone()
    }

    /// Pick a slot and start payment verification immediately.
    ///
    /// Precondition: the slot exists and is AVAILABLE. Any in-flight
    /// attempt is replaced; its polling task stops before the new one
    /// starts.
    pub async fn select_slot(&self, game_id: u32, slot_id: u32) -> Result<(), FlowError> {
        {
            let catalog = self.catalog.lock().await;
            let game = catalog
                .get(game_id)
                .ok_or(CatalogError::GameNotFound(game_id))?;
            let slot = game
                .slot(slot_id)
                .ok_or(CatalogError::SlotNotFound { game_id, slot_id })?;
            if !slot.is_available() {
                return Err(CatalogError::SlotAlreadyBooked { game_id, slot_id }.into());
            }
        }

        let mut inner = self.inner.lock().await;
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        inner.attempt += 1;
        let attempt = inner.attempt;

        inner.state = FlowState::SlotSelected { game_id, slot_id };
        self.emit(BookingEvent::SlotSelected { game_id, slot_id });

        // Verification begins as soon as a slot is chosen; there is no
        // separate "pay now" step.
        inner.state = FlowState::Verifying { game_id, slot_id };
        self.emit(BookingEvent::VerifyingStateChanged(true));
        info!(game_id, slot_id, "slot selected, verification started");

        inner.task = Some(self.spawn_poller(attempt, game_id, slot_id));
        Ok(())
    }

    /// Abort the in-progress attempt. Nothing has been booked or written
    /// for an attempt that is cancelled before a SUCCESS tick commits.
    pub async fn cancel(&self) -> Result<(), FlowError> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            FlowState::SlotSelected { .. } | FlowState::Verifying { .. } => {
                if let Some(task) = inner.task.take() {
                    task.abort();
                }
                // Invalidates any verification result still in flight
                inner.attempt += 1;
                inner.state = FlowState::Idle;
                self.emit(BookingEvent::VerifyingStateChanged(false));
                self.emit(BookingEvent::BookingCancelled);
                info!("booking attempt cancelled");
                Ok(())
            }
            ref state => Err(FlowError::InvalidTransition {
                from: state.name(),
                to: "IDLE",
            }),
        }
    }

    /// Dismiss the confirmation and return to IDLE, ready for a new
    /// selection. Returns the confirmed booking.
    pub async fn acknowledge_confirmation(&self) -> Result<Booking, FlowError> {
        let mut inner = self.inner.lock().await;
        match inner.state.clone() {
            FlowState::Confirmed { booking } => {
                inner.state = FlowState::Idle;
                Ok(booking)
            }
            state => Err(FlowError::InvalidTransition {
                from: state.name(),
                to: "IDLE",
            }),
        }
    }

    fn emit(&self, event: BookingEvent) {
        // Nobody listening is fine; signals drive presentation only
        let _ = self.events.send(event);
    }

    fn spawn_poller(&self, attempt: u64, game_id: u32, slot_id: u32) -> JoinHandle<()> {
        let catalog = Arc::clone(&self.catalog);
        let ledger = Arc::clone(&self.ledger);
        let verifier = Arc::clone(&self.verifier);
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        let settings = self.settings.clone();

        tokio::spawn(async move {
            let mut ticker = interval(settings.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Consume the immediate first tick; the first verification
            // happens one full interval after selection.
            ticker.tick().await;

            let mut attempts = 0u32;
            loop {
                ticker.tick().await;
                attempts += 1;

                match verifier.verify().await {
                    Ok(VerificationStatus::Success) => {
                        finalize(
                            &inner, &catalog, &ledger, &events, &settings, attempt, game_id,
                            slot_id,
                        )
                        .await;
                        break;
                    }
                    Ok(VerificationStatus::Pending) => {
                        debug!(attempts, "payment still pending");
                    }
                    Err(e) => {
                        // Transient; the next tick retries
                        warn!("Payment verification poll failed: {}", e);
                    }
                }

                if let Some(max) = settings.max_poll_attempts {
                    if attempts >= max {
                        give_up(&inner, &events, attempt).await;
                        break;
                    }
                }
            }
        })
    }
}

impl Drop for BookingFlow {
    fn drop(&mut self) {
        // The poller must not outlive its controller
        if let Ok(mut inner) = self.inner.try_lock() {
            if let Some(task) = inner.task.take() {
                task.abort();
            }
        }
    }
}

/// Commit a successful verification: slot -> BOOKED, ledger append,
/// CONFIRMED. Runs entirely under the controller lock; a result whose
/// attempt token went stale while the verify call was in flight is
/// discarded without touching shared state.
#[allow(clippy::too_many_arguments)]
async fn finalize(
    inner: &Mutex<FlowInner>,
    catalog: &Mutex<Catalog>,
    ledger: &Mutex<Box<dyn LedgerRepository>>,
    events: &broadcast::Sender<BookingEvent>,
    settings: &FlowSettings,
    attempt: u64,
    game_id: u32,
    slot_id: u32,
) {
    let mut inner = inner.lock().await;
    if inner.attempt != attempt || !matches!(inner.state, FlowState::Verifying { .. }) {
        debug!(attempt, "discarding stale verification result");
        return;
    }

    let (game, slot) = {
        let mut catalog = catalog.lock().await;
        match catalog.mark_slot_booked(game_id, slot_id) {
            Ok(pair) => pair,
            Err(e) => {
                // The slot was taken out from under the attempt; drop back
                // to IDLE without double-counting anything.
                warn!("Could not finalize booking: {}", e);
                inner.attempt += 1;
                inner.task = None;
                inner.state = FlowState::Idle;
                let _ = events.send(BookingEvent::VerifyingStateChanged(false));
                let _ = events.send(BookingEvent::BookingCancelled);
                return;
            }
        }
    };

    let booking = Booking::new(
        game.id,
        game.title,
        slot.time,
        settings.amount,
        settings.currency.clone(),
    );

    {
        let mut ledger = ledger.lock().await;
        if let Err(e) = ledger.append(booking.clone()).await {
            // The slot mutation stands; session state is the source of
            // truth and the gap is logged, not propagated.
            error!("Booking held in memory only, persist failed: {}", e);
        }
    }

    info!(booking_id = %booking.id, game_id, slot_id, "booking confirmed");
    inner.attempt += 1;
    inner.task = None;
    inner.state = FlowState::Confirmed {
        booking: booking.clone(),
    };
    let _ = events.send(BookingEvent::VerifyingStateChanged(false));
    let _ = events.send(BookingEvent::BookingConfirmed(booking));
}

/// Poll bound exhausted: abandon the attempt through the cancel path
async fn give_up(inner: &Mutex<FlowInner>, events: &broadcast::Sender<BookingEvent>, attempt: u64) {
    let mut inner = inner.lock().await;
    if inner.attempt != attempt || !matches!(inner.state, FlowState::Verifying { .. }) {
        return;
    }
    warn!("verification poll budget exhausted, cancelling attempt");
    inner.attempt += 1;
    inner.task = None;
    inner.state = FlowState::Idle;
    let _ = events.send(BookingEvent::VerifyingStateChanged(false));
    let _ = events.send(BookingEvent::BookingCancelled);
}
