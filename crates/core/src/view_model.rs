use crate::{Player, PowerCard, ProgramCard, Registers};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterSlot {
    pub card: ProgramCard,
    pub locked: bool,
    pub throw: bool,
}

impl RegisterSlot {
    pub fn is_empty(&self) -> bool {
        self.card.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailHands {
    pub program_hand: Vec<ProgramCard>,
    pub power_hand: Vec<PowerCard>,
    pub registers: Vec<RegisterSlot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSummary {
    pub id: String,
    pub name: String,
    pub power_hand: Vec<PowerCard>,
    pub registers: Vec<RegisterSlot>,
}

pub fn merge_registers(registers: Option<&Registers>) -> Vec<RegisterSlot> {
    let Some(registers) = registers else {
        return Vec::new();
    };
    registers
        .cards
        .iter()
        .enumerate()
        .map(|(idx, card)| RegisterSlot {
            card: card.clone(),
            locked: registers.locks.get(idx).copied().unwrap_or(false),
            throw: registers.throws.get(idx).copied().unwrap_or(false),
        })
        .collect()
}

fn power_cards(player: &Player) -> Vec<PowerCard> {
    player
        .power_hand
        .as_ref()
        .map(|hand| hand.cards.clone())
        .unwrap_or_default()
}

pub fn build_detail_hands(player: &Player) -> DetailHands {
    DetailHands {
        program_hand: player
            .program_hand
            .as_ref()
            .map(|hand| hand.cards.clone())
            .unwrap_or_default(),
        power_hand: power_cards(player),
        registers: merge_registers(player.registers.as_ref()),
    }
}

pub fn build_roster_entry(player: &Player) -> PlayerSummary {
    PlayerSummary {
        id: player.id.clone(),
        name: player.name.clone(),
        power_hand: power_cards(player),
        registers: merge_registers(player.registers.as_ref()),
    }
}

/// Replaces the first entry with the player's id; false when none matches.
pub fn replace_roster_entry(entries: &mut [PlayerSummary], player: &Player) -> bool {
    match entries.iter_mut().find(|entry| entry.id == player.id) {
        Some(entry) => {
            *entry = build_roster_entry(player);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hand;

    fn card(name: &str) -> ProgramCard {
        ProgramCard {
            number: 1,
            filename: name.to_string(),
            kind: "program".to_string(),
        }
    }

    fn power(name: &str) -> PowerCard {
        PowerCard {
            filename: name.to_string(),
            ..PowerCard::default()
        }
    }

    fn player_with_power(id: &str, cards: &[&str]) -> Player {
        Player {
            id: id.to_string(),
            name: id.to_uppercase(),
            power_hand: Some(Hand {
                id: None,
                cards: cards.iter().map(|name| power(name)).collect(),
            }),
            ..Player::default()
        }
    }

    #[test]
    fn registers_merge_locks_and_throws() {
        let player = Player {
            registers: Some(Registers {
                id: None,
                cards: vec![card("a.png"), card("b.png")],
                locks: vec![true, false],
                throws: vec![false, true],
            }),
            ..Player::default()
        };
        let hands = build_detail_hands(&player);
        assert_eq!(
            hands.registers,
            vec![
                RegisterSlot {
                    card: card("a.png"),
                    locked: true,
                    throw: false,
                },
                RegisterSlot {
                    card: card("b.png"),
                    locked: false,
                    throw: true,
                },
            ]
        );
    }

    #[test]
    fn missing_sections_build_empty_lists() {
        let hands = build_detail_hands(&Player::default());
        assert!(hands.program_hand.is_empty());
        assert!(hands.power_hand.is_empty());
        assert!(hands.registers.is_empty());
    }

    #[test]
    fn short_lock_vectors_read_as_unlocked() {
        let registers = Registers {
            id: None,
            cards: vec![card("a.png"), card("")],
            locks: vec![true],
            throws: Vec::new(),
        };
        let slots = merge_registers(Some(&registers));
        assert!(slots[0].locked);
        assert!(!slots[1].locked);
        assert!(!slots[1].throw);
        assert!(slots[1].is_empty());
    }

    #[test]
    fn roster_entry_projects_public_fields() {
        let player = player_with_power("p1", &["gear.png"]);
        let entry = build_roster_entry(&player);
        assert_eq!(entry.id, "p1");
        assert_eq!(entry.name, "P1");
        assert_eq!(entry.power_hand.len(), 1);
        assert!(entry.registers.is_empty());
    }

    #[test]
    fn replace_touches_only_matching_entry() {
        let mut entries = vec![
            build_roster_entry(&player_with_power("p1", &["a.png"])),
            build_roster_entry(&player_with_power("p2", &["b.png"])),
            build_roster_entry(&player_with_power("p3", &["c.png"])),
        ];
        let untouched_first = entries[0].power_hand.as_ptr();
        let untouched_last = entries[2].power_hand.as_ptr();
        let before = entries.clone();

        let updated = player_with_power("p2", &["b.png", "d.png"]);
        assert!(replace_roster_entry(&mut entries, &updated));

        assert_eq!(entries[1].power_hand.len(), 2);
        assert_eq!(entries[0], before[0]);
        assert_eq!(entries[2], before[2]);
        assert_eq!(entries[0].power_hand.as_ptr(), untouched_first);
        assert_eq!(entries[2].power_hand.as_ptr(), untouched_last);
    }

    #[test]
    fn replace_stops_at_first_match() {
        let mut entries = vec![
            build_roster_entry(&player_with_power("p1", &[])),
            build_roster_entry(&player_with_power("p1", &[])),
        ];
        let updated = player_with_power("p1", &["x.png"]);
        assert!(replace_roster_entry(&mut entries, &updated));
        assert_eq!(entries[0].power_hand.len(), 1);
        assert!(entries[1].power_hand.is_empty());
    }

    #[test]
    fn replace_without_match_changes_nothing() {
        let mut entries = vec![build_roster_entry(&player_with_power("p1", &["a.png"]))];
        let before = entries.clone();
        assert!(!replace_roster_entry(
            &mut entries,
            &player_with_power("zz", &[])
        ));
        assert_eq!(entries, before);
    }
}
