use nexus_booking::{BookingFlow, FlowSettings, MockVerifier};
use nexus_catalog::{seed_games, Catalog};
use nexus_domain::{BookingEvent, LedgerRepository};
use nexus_store::{Config, FileLedger};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nexus_app=info,nexus_booking=debug,nexus_store=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting Nexus Lounge booking engine");

    let mut ledger = FileLedger::new(&config.store.data_dir);
    let history = ledger.load().await;
    tracing::info!(bookings = history.len(), "loaded booking history");

    let catalog = Arc::new(Mutex::new(Catalog::new(seed_games())));
    let ledger: Arc<Mutex<Box<dyn LedgerRepository>>> = Arc::new(Mutex::new(Box::new(ledger)));
    let verifier = Arc::new(MockVerifier::new(
        Duration::from_millis(config.verifier.delay_ms),
        config.verifier.success_rate,
    ));

    let settings = FlowSettings {
        poll_interval: Duration::from_secs(config.booking.poll_interval_secs),
        amount: config.booking.amount,
        currency: config.booking.currency.clone(),
        max_poll_attempts: config.booking.max_poll_attempts,
    };
    let flow = BookingFlow::new(catalog.clone(), ledger.clone(), verifier, settings);
    let mut events = flow.subscribe();

    // Demo drive: book the first available slot of the first game
    let (game_id, slot_id, title, time) = {
        let catalog = catalog.lock().await;
        let game = catalog.games().into_iter().next().expect("seeded catalog is empty");
        let slot = game
            .slots
            .iter()
            .find(|s| s.is_available())
            .expect("no available slot in seed data");
        (game.id, slot.id, game.title.clone(), slot.time.clone())
    };

    println!(
        "Booking \"{}\" ({}) — pay {} {} to {} ({})",
        title, time, config.booking.amount, config.booking.currency, config.payee.name,
        config.payee.upi_id,
    );

    flow.select_slot(game_id, slot_id)
        .await
        .expect("slot selection failed");

    loop {
        match events.recv().await {
            Ok(BookingEvent::VerifyingStateChanged(true)) => {
                println!("Verifying payment, do not close this window...");
            }
            Ok(BookingEvent::BookingConfirmed(booking)) => {
                println!("Booking confirmed: {} at {}", booking.game_title, booking.slot_time);
                break;
            }
            Ok(BookingEvent::BookingCancelled) => {
                println!("Booking attempt abandoned");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Event stream closed: {}", e);
                return;
            }
        }
    }

    let booking = flow
        .acknowledge_confirmation()
        .await
        .expect("no confirmation to acknowledge");
    tracing::info!(booking_id = %booking.id, "flow back to idle");

    println!("Booking history (most recent first):");
    for b in ledger.lock().await.history() {
        println!("  {} — {} ({}) {} {}", b.booked_at, b.game_title, b.slot_time, b.amount, b.currency);
    }
}
