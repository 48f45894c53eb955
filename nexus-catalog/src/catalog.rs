use nexus_domain::{Game, Slot, SlotStatus};
use std::collections::HashMap;

/// In-memory catalog of games and their slots.
///
/// The only mutation it permits is flipping a slot from AVAILABLE to
/// BOOKED; games themselves are immutable after seeding.
pub struct Catalog {
    games: HashMap<u32, Game>,
    /// Seed insertion order, preserved for listings
    order: Vec<u32>,
}

impl Catalog {
    pub fn new(games: Vec<Game>) -> Self {
        let order = games.iter().map(|g| g.id).collect();
        let games = games.into_iter().map(|g| (g.id, g)).collect();
        Self { games, order }
    }

    pub fn get(&self, game_id: u32) -> Option<&Game> {
        self.games.get(&game_id)
    }

    /// All games in seed order
    pub fn games(&self) -> Vec<&Game> {
        self.order.iter().filter_map(|id| self.games.get(id)).collect()
    }

    /// Case-insensitive title search; an empty query returns everything
    pub fn search(&self, query: &str) -> Vec<&Game> {
        if query.is_empty() {
            return self.games();
        }
        let query = query.to_lowercase();
        self.games()
            .into_iter()
            .filter(|g| g.title.to_lowercase().contains(&query))
            .collect()
    }

    /// Flip a slot from AVAILABLE to BOOKED and return updated clones.
    ///
    /// Rejects unknown games/slots and slots that are already booked;
    /// the transition never runs in reverse.
    pub fn mark_slot_booked(
        &mut self,
        game_id: u32,
        slot_id: u32,
    ) -> Result<(Game, Slot), CatalogError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(CatalogError::GameNotFound(game_id))?;

        let slot = game
            .slots
            .iter_mut()
            .find(|s| s.id == slot_id)
            .ok_or(CatalogError::SlotNotFound { game_id, slot_id })?;

        if slot.status == SlotStatus::Booked {
            return Err(CatalogError::SlotAlreadyBooked { game_id, slot_id });
        }

        slot.status = SlotStatus::Booked;
        tracing::debug!(game_id, slot_id, "slot marked booked");

        let slot = slot.clone();
        Ok((game.clone(), slot))
    }

    /// Count of BOOKED slots across the whole catalog
    pub fn booked_count(&self) -> usize {
        self.games
            .values()
            .flat_map(|g| g.slots.iter())
            .filter(|s| s.status == SlotStatus::Booked)
            .count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Game not found: {0}")]
    GameNotFound(u32),

    #[error("Slot not found: game {game_id}, slot {slot_id}")]
    SlotNotFound { game_id: u32, slot_id: u32 },

    #[error("Slot already booked: game {game_id}, slot {slot_id}")]
    SlotAlreadyBooked { game_id: u32, slot_id: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_domain::Console;

    fn test_catalog() -> Catalog {
        Catalog::new(vec![Game {
            id: 1,
            title: "Test Game".to_string(),
            description: "A game".to_string(),
            console: Console::Ps5,
            slots: vec![Slot::new(10, "10:00 - 11:00"), Slot::new(11, "11:00 - 12:00")],
        }])
    }

    #[test]
    fn test_mark_slot_booked() {
        let mut catalog = test_catalog();

        let (game, slot) = catalog.mark_slot_booked(1, 10).unwrap();
        assert_eq!(game.id, 1);
        assert_eq!(slot.id, 10);
        assert_eq!(slot.status, SlotStatus::Booked);

        // Reflected in the store, not just the returned clone
        assert_eq!(catalog.get(1).unwrap().slot(10).unwrap().status, SlotStatus::Booked);
        assert_eq!(catalog.booked_count(), 1);
    }

    #[test]
    fn test_double_booking_rejected() {
        let mut catalog = test_catalog();
        catalog.mark_slot_booked(1, 10).unwrap();

        let err = catalog.mark_slot_booked(1, 10).unwrap_err();
        assert!(matches!(err, CatalogError::SlotAlreadyBooked { game_id: 1, slot_id: 10 }));
        assert_eq!(catalog.booked_count(), 1);
    }

    #[test]
    fn test_unknown_targets_rejected() {
        let mut catalog = test_catalog();

        assert!(matches!(
            catalog.mark_slot_booked(99, 10),
            Err(CatalogError::GameNotFound(99))
        ));
        assert!(matches!(
            catalog.mark_slot_booked(1, 99),
            Err(CatalogError::SlotNotFound { game_id: 1, slot_id: 99 })
        ));
        assert_eq!(catalog.booked_count(), 0);
    }

    #[test]
    fn test_search() {
        let catalog = test_catalog();

        assert_eq!(catalog.search("test").len(), 1);
        assert_eq!(catalog.search("TEST GAME").len(), 1);
        assert_eq!(catalog.search("missing").len(), 0);
        assert_eq!(catalog.search("").len(), 1);
    }
}
