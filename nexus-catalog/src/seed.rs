use nexus_domain::{Console, Game, Slot};

fn hourly_slots() -> Vec<Slot> {
    [
        "10:00 - 11:00",
        "11:00 - 12:00",
        "12:00 - 13:00",
        "14:00 - 15:00",
        "15:00 - 16:00",
        "16:00 - 17:00",
    ]
    .iter()
    .enumerate()
    .map(|(i, time)| Slot::new(10 + i as u32, *time))
    .collect()
}

/// Demo catalog for the lounge. Slot ids start at 10 within each game.
pub fn seed_games() -> Vec<Game> {
    vec![
        Game {
            id: 1,
            title: "Shadow Protocol".to_string(),
            description: "Stealth-action espionage across a neon-soaked megacity.".to_string(),
            console: Console::Ps5,
            slots: hourly_slots(),
        },
        Game {
            id: 2,
            title: "Apex Velocity".to_string(),
            description: "Arcade street racing with a full lounge wheel setup.".to_string(),
            console: Console::Ps5,
            slots: hourly_slots(),
        },
        Game {
            id: 3,
            title: "Ironclad Arena".to_string(),
            description: "Four-player mech brawler, best enjoyed loud.".to_string(),
            console: Console::Ps5,
            slots: hourly_slots(),
        },
        Game {
            id: 4,
            title: "Dune Raiders".to_string(),
            description: "Open-world desert survival and co-op raids.".to_string(),
            console: Console::Ps4,
            slots: hourly_slots(),
        },
        Game {
            id: 5,
            title: "Striker League 26".to_string(),
            description: "The lounge's tournament football staple.".to_string(),
            console: Console::Ps4,
            slots: hourly_slots(),
        },
        Game {
            id: 6,
            title: "Phantom Depths".to_string(),
            description: "Atmospheric underwater horror, single seat only.".to_string(),
            console: Console::Ps4,
            slots: hourly_slots(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_unique() {
        let games = seed_games();
        let ids: HashSet<u32> = games.iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), games.len());

        for game in &games {
            let slot_ids: HashSet<u32> = game.slots.iter().map(|s| s.id).collect();
            assert_eq!(slot_ids.len(), game.slots.len());
            assert!(game.slots.iter().all(|s| s.is_available()));
        }
    }
}
