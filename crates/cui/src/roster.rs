use crate::controls::{drag_source, drop_target, Control};
use crate::detail::{decode_choice, log_option_error};
use roborally_client::{ApiClient, MoveOutcome, Transport};
use roborally_core::{
    build_roster_entry, replace_roster_entry, AssetPaths, CardMove, CardSlot, DragPayload,
    HandKind, OptionValueError, Player, PlayerSummary, PowerCardChoice, Selector, ORB_LABELS,
    ROSTER_USE_LABELS,
};

pub struct RosterView<T> {
    api: ApiClient<T>,
    assets: AssetPaths,
    pub players: Vec<PlayerSummary>,
    pub orbs: &'static [&'static str],
    pub num_uses: &'static [&'static str],
    pub viewing: Option<String>,
}

impl<T: Transport> RosterView<T> {
    pub fn new(api: ApiClient<T>, assets: AssetPaths) -> Self {
        Self {
            api,
            assets,
            players: Vec::new(),
            orbs: &ORB_LABELS,
            num_uses: &ROSTER_USE_LABELS,
            viewing: None,
        }
    }

    pub fn mount(api: ApiClient<T>, assets: AssetPaths) -> Self {
        let mut view = Self::new(api, assets);
        view.load_players();
        view
    }

    pub fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    pub fn teardown(&self) {
        self.api.scope().cancel();
    }

    pub fn load_players(&mut self) {
        let players = self.api.get_players();
        if self.api.scope().is_cancelled() {
            return;
        }
        self.players = players.iter().map(build_roster_entry).collect();
    }

    pub fn draw_power_card(&mut self, id: &str) -> bool {
        match self.api.draw_power_card(id) {
            Ok(player) => self.update_player(&player),
            Err(_) => false,
        }
    }

    pub fn start_drag(&self, index: usize, id: &str) -> DragPayload {
        DragPayload::from_player(id, index)
    }

    pub fn on_drop(&mut self, payload: &DragPayload, to_index: usize, to_id: &str) -> bool {
        let Some(from_id) = payload.from_player.as_deref() else {
            tracing::debug!("ignoring drop without a source player");
            return false;
        };
        let card_move = CardMove {
            from: CardSlot {
                player: from_id.to_string(),
                hand: HandKind::PowerHand,
                index: payload.from_index,
            },
            to: CardSlot {
                player: to_id.to_string(),
                hand: HandKind::PowerHand,
                index: to_index,
            },
        };
        self.move_card(&card_move)
    }

    pub fn move_card(&mut self, card_move: &CardMove) -> bool {
        match self.api.move_card(card_move) {
            Ok(MoveOutcome::Single(player)) => self.update_player(&player),
            Ok(MoveOutcome::Pair(from, to)) => {
                let from_found = self.update_player(&from);
                let to_found = self.update_player(&to);
                from_found || to_found
            }
            Err(_) => false,
        }
    }

    pub fn discard_card(&mut self, from_index: usize, from_id: &str) -> bool {
        match self
            .api
            .discard_card(from_id, HandKind::PowerHand, from_index)
        {
            Ok(player) => self.update_player(&player),
            Err(_) => false,
        }
    }

    pub fn set_orb(&mut self, value: &str) -> bool {
        let Some((id, choice)) = decode_owned_choice(value, self.orbs) else {
            return false;
        };
        match self.api.set_orb(&id, &choice.filename, choice.index) {
            Ok(player) => self.update_player(&player),
            Err(_) => false,
        }
    }

    pub fn set_num_uses(&mut self, value: &str) -> bool {
        let Some((id, choice)) = decode_owned_choice(value, self.num_uses) else {
            return false;
        };
        match self.api.set_num_uses(&id, &choice.filename, choice.index) {
            Ok(player) => self.update_player(&player),
            Err(_) => false,
        }
    }

    pub fn open_image(&mut self, url: String) {
        self.viewing = Some(url);
    }

    pub fn close_image(&mut self) {
        self.viewing = None;
    }

    pub fn update_player(&mut self, player: &Player) -> bool {
        let found = replace_roster_entry(&mut self.players, player);
        if !found {
            tracing::warn!(player = %player.id, "returned player is not on the roster");
        }
        found
    }

    /// Image per register of the entry at `row`: the card once locked, otherwise
    /// the placeholder.
    pub fn register_images(&self, row: usize) -> Vec<String> {
        let Some(entry) = self.players.get(row) else {
            return Vec::new();
        };
        entry
            .registers
            .iter()
            .map(|slot| {
                if slot.locked {
                    self.assets.program_card(&slot.card.filename)
                } else {
                    self.assets.placeholder()
                }
            })
            .collect()
    }

    pub fn orb_selector(&self, player: usize, index: usize) -> Option<Selector> {
        let card = self.players.get(player)?.power_hand.get(index)?;
        Some(Selector::new(self.orbs, card.orb))
    }

    pub fn uses_selector(&self, player: usize, index: usize) -> Option<Selector> {
        let card = self.players.get(player)?.power_hand.get(index)?;
        Some(Selector::new(self.num_uses, card.num_uses))
    }

    pub fn option_value(&self, player: usize, index: usize, option: u8) -> Option<String> {
        let entry = self.players.get(player)?;
        let card = entry.power_hand.get(index)?;
        Some(
            PowerCardChoice {
                id: Some(entry.id.clone()),
                filename: card.filename.clone(),
                index: option,
            }
            .encode(),
        )
    }

    pub fn controls(&self) -> Vec<Control> {
        let mut controls = Vec::new();
        for entry in &self.players {
            let id = entry.id.as_str();
            controls.push(Control::Draw {
                player: id.to_string(),
            });
            if entry.power_hand.is_empty() {
                controls.push(drop_target(id, HandKind::PowerHand, 0));
            }
            for (index, card) in entry.power_hand.iter().enumerate() {
                controls.push(Control::ViewImage {
                    url: self.assets.power_card(&card.filename),
                });
                controls.push(drag_source(id, HandKind::PowerHand, index));
                controls.push(drop_target(id, HandKind::PowerHand, index));
                controls.push(Control::OrbSelect {
                    player: id.to_string(),
                    index,
                });
                controls.push(Control::UsesSelect {
                    player: id.to_string(),
                    index,
                });
                controls.push(Control::Discard {
                    player: id.to_string(),
                    hand: HandKind::PowerHand,
                    index,
                });
            }
            for slot in entry.registers.iter().filter(|slot| slot.locked) {
                controls.push(Control::ViewImage {
                    url: self.assets.program_card(&slot.card.filename),
                });
            }
        }
        controls
    }
}

impl<T> Drop for RosterView<T> {
    fn drop(&mut self) {
        self.api.scope().cancel();
    }
}

fn decode_owned_choice(value: &str, labels: &[&str]) -> Option<(String, PowerCardChoice)> {
    let choice = decode_choice(value, labels)?;
    match choice.id.clone() {
        Some(id) => Some((id, choice)),
        None => {
            log_option_error(value, &OptionValueError::MissingPlayer);
            None
        }
    }
}
