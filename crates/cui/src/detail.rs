use crate::controls::{drag_source, drop_target, Control};
use roborally_client::{ApiClient, MoveOutcome, Transport};
use roborally_core::{
    build_detail_hands, AssetPaths, CardMove, CardSlot, DetailHands, DragPayload, HandKind,
    OptionValueError, Player, PowerCardChoice, RequestFailure, Selector, DETAIL_USE_LABELS,
    ORB_LABELS,
};

/// Only a returned player carrying the mounted id is applied.
pub struct DetailView<T> {
    api: ApiClient<T>,
    assets: AssetPaths,
    player_id: String,
    pub player: Player,
    pub hands: DetailHands,
    pub orbs: &'static [&'static str],
    pub num_uses: &'static [&'static str],
    pub viewing: Option<String>,
}

impl<T: Transport> DetailView<T> {
    pub fn new(api: ApiClient<T>, assets: AssetPaths) -> Self {
        Self {
            api,
            assets,
            player_id: String::new(),
            player: Player::default(),
            hands: DetailHands::default(),
            orbs: &ORB_LABELS,
            num_uses: &DETAIL_USE_LABELS,
            viewing: None,
        }
    }

    pub fn mount(api: ApiClient<T>, assets: AssetPaths, id: &str) -> Self {
        let mut view = Self::new(api, assets);
        view.load_player(id);
        view
    }

    pub fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    pub fn teardown(&self) {
        self.api.scope().cancel();
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn load_player(&mut self, id: &str) {
        self.player_id = id.to_string();
        let player = self.api.get_player(id);
        if self.api.scope().is_cancelled() {
            return;
        }
        self.apply_result(Ok(player));
    }

    pub fn reload(&mut self) {
        let id = self.player_id.clone();
        self.load_player(&id);
    }

    pub fn program_hand_filenames(&self) -> Vec<String> {
        self.hands
            .program_hand
            .iter()
            .map(|card| self.assets.program_card(&card.filename))
            .collect()
    }

    pub fn disable_ui(&self) -> bool {
        self.player.powered_down || self.player.is_destroyed() || !self.player.active
    }

    pub fn draw_power_card(&mut self) -> bool {
        let result = self.api.draw_power_card(&self.player_id);
        self.apply_result(result)
    }

    pub fn start_drag(&self, index: usize, list: HandKind) -> DragPayload {
        DragPayload::within(list, index)
    }

    pub fn on_drop(&mut self, payload: &DragPayload, to_index: usize, to_list: HandKind) -> bool {
        if !payload.from_list.exchanges_with(to_list) {
            tracing::debug!(
                from = %payload.from_list,
                to = %to_list,
                "ignoring drop between lists that do not exchange"
            );
            return false;
        }
        let card_move = CardMove {
            from: CardSlot {
                player: self.player_id.clone(),
                hand: payload.from_list,
                index: payload.from_index,
            },
            to: CardSlot {
                player: self.player_id.clone(),
                hand: to_list,
                index: to_index,
            },
        };
        self.move_card(&card_move)
    }

    pub fn move_card(&mut self, card_move: &CardMove) -> bool {
        match self.api.move_card(card_move) {
            Ok(MoveOutcome::Single(player)) => self.apply_result(Ok(player)),
            Ok(MoveOutcome::Pair(from, to)) => {
                let mine = if to.id == self.player_id { to } else { from };
                self.apply_result(Ok(mine))
            }
            Err(err) => self.apply_result(Err(err)),
        }
    }

    pub fn discard_card(&mut self, from_index: usize, from_list: HandKind) -> bool {
        let result = self.api.discard_card(&self.player_id, from_list, from_index);
        self.apply_result(result)
    }

    pub fn set_orb(&mut self, value: &str) -> bool {
        let Some(choice) = decode_choice(value, self.orbs) else {
            return false;
        };
        let result = self
            .api
            .set_orb(&self.player_id, &choice.filename, choice.index);
        self.apply_result(result)
    }

    pub fn set_num_uses(&mut self, value: &str) -> bool {
        let Some(choice) = decode_choice(value, self.num_uses) else {
            return false;
        };
        let result = self
            .api
            .set_num_uses(&self.player_id, &choice.filename, choice.index);
        self.apply_result(result)
    }

    /// The checkbox shows whatever the returned player says.
    pub fn on_check(&mut self, index: usize) -> bool {
        let result = self.api.throw_register(&self.player_id, index);
        self.apply_result(result)
    }

    pub fn open_image(&mut self, url: String) {
        self.viewing = Some(url);
    }

    pub fn close_image(&mut self) {
        self.viewing = None;
    }

    pub fn orb_selector(&self, index: usize) -> Option<Selector> {
        self.hands
            .power_hand
            .get(index)
            .map(|card| Selector::new(self.orbs, card.orb))
    }

    pub fn uses_selector(&self, index: usize) -> Option<Selector> {
        self.hands
            .power_hand
            .get(index)
            .map(|card| Selector::new(self.num_uses, card.num_uses))
    }

    pub fn option_value(&self, index: usize, option: u8) -> Option<String> {
        let card = self.hands.power_hand.get(index)?;
        Some(
            PowerCardChoice {
                id: None,
                filename: card.filename.clone(),
                index: option,
            }
            .encode(),
        )
    }

    pub fn controls(&self) -> Vec<Control> {
        let id = self.player_id.as_str();
        let disabled = self.disable_ui();
        let mut controls = Vec::new();

        if self.hands.program_hand.is_empty() {
            controls.push(drop_target(id, HandKind::ProgramHand, 0));
        } else if !disabled {
            for index in 0..self.hands.program_hand.len() {
                controls.push(drag_source(id, HandKind::ProgramHand, index));
                controls.push(drop_target(id, HandKind::ProgramHand, index));
            }
        }

        for (index, slot) in self.hands.registers.iter().enumerate() {
            if !disabled && !slot.locked {
                if slot.is_empty() {
                    controls.push(drop_target(id, HandKind::Registers, index));
                } else {
                    controls.push(drag_source(id, HandKind::Registers, index));
                }
            }
            controls.push(Control::ThrowToggle { index });
        }

        if !disabled {
            controls.push(Control::Draw {
                player: id.to_string(),
            });
        }
        if self.hands.power_hand.is_empty() {
            controls.push(drop_target(id, HandKind::PowerHand, 0));
        }
        for (index, card) in self.hands.power_hand.iter().enumerate() {
            controls.push(Control::ViewImage {
                url: self.assets.power_card(&card.filename),
            });
            if disabled {
                continue;
            }
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
        controls
    }

    fn apply(&mut self, player: Player) {
        self.hands = build_detail_hands(&player);
        self.player = player;
    }

    fn apply_result(&mut self, result: Result<Player, RequestFailure>) -> bool {
        match result {
            Ok(player) if player.id == self.player_id => {
                self.apply(player);
                true
            }
            Ok(player) => {
                tracing::warn!(
                    expected = %self.player_id,
                    returned = %player.id,
                    "ignoring response for another player"
                );
                false
            }
            Err(_) => false,
        }
    }
}

impl<T> Drop for DetailView<T> {
    fn drop(&mut self) {
        self.api.scope().cancel();
    }
}

pub(crate) fn decode_choice(value: &str, labels: &[&str]) -> Option<PowerCardChoice> {
    match PowerCardChoice::decode(value).and_then(|choice| choice.checked(labels)) {
        Ok(choice) => Some(choice),
        Err(err) => {
            log_option_error(value, &err);
            None
        }
    }
}

pub(crate) fn log_option_error(value: &str, err: &OptionValueError) {
    tracing::warn!(value, error = %err, "ignoring selector value");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::has_draw;
    use roborally_client::mock::{CancelDuringReply, RecordingTransport};
    use roborally_client::{Method, RequestScope};
    use roborally_core::ResponseEnvelope;
    use serde_json::{json, Value};

    fn view_with(player: Value) -> (DetailView<RecordingTransport>, RecordingTransport) {
        let transport = RecordingTransport::new();
        transport.reply_ok(player);
        let view = DetailView::mount(
            ApiClient::new(transport.clone()),
            AssetPaths::for_host("localhost:5000"),
            "p1",
        );
        (view, transport)
    }

    fn active_player() -> Value {
        json!({
            "id": "p1",
            "name": "Zoom",
            "active": true,
            "damage": 0,
            "program_hand": {"cards": [{"filename": "move1.png"}, {"filename": "uturn.png"}]},
            "power_hand": {"cards": [{"filename": "gear.png", "orb": 1, "num_uses": 2}]},
            "registers": {
                "cards": [{"filename": "back.png"}, {"filename": ""}],
                "locks": [true, false],
                "throws": [false, false]
            }
        })
    }

    #[test]
    fn load_player_builds_hands() {
        let (view, transport) = view_with(json!({
            "id": "p1",
            "program_hand": {"cards": [{"filename": "a.png"}]},
            "registers": {"cards": [], "locks": [], "throws": []}
        }));
        assert_eq!(view.hands.program_hand.len(), 1);
        assert_eq!(view.hands.program_hand[0].filename, "a.png");
        assert!(view.hands.registers.is_empty());
        assert_eq!(transport.requests()[0].path, "/players/p1");
        assert_eq!(
            view.program_hand_filenames(),
            vec!["http://localhost:5000/static/images/program_cards/a.png".to_string()]
        );
    }

    #[test]
    fn failed_load_renders_empty_state() {
        let transport = RecordingTransport::new();
        transport.reply(ResponseEnvelope::failed(500, "down"));
        let view = DetailView::mount(
            ApiClient::new(transport.clone()),
            AssetPaths::for_host("h"),
            "p1",
        );
        assert_eq!(view.player, Player::default());
        assert_eq!(view.hands, DetailHands::default());
        assert!(view.disable_ui());
    }

    #[test]
    fn disable_ui_truth_table() {
        let (mut view, _transport) = view_with(json!({"id": "p1"}));
        for powered_down in [false, true] {
            for destroyed in [false, true] {
                for active in [false, true] {
                    view.player.powered_down = powered_down;
                    view.player.damage = if destroyed { 10 } else { 9 };
                    view.player.active = active;
                    let expected = powered_down || destroyed || !active;
                    assert_eq!(
                        view.disable_ui(),
                        expected,
                        "powered_down={powered_down} destroyed={destroyed} active={active}"
                    );
                }
            }
        }
    }

    #[test]
    fn drop_between_non_exchanging_lists_sends_nothing() {
        let (mut view, transport) = view_with(active_player());
        let before = transport.request_count();
        let payload = view.start_drag(0, HandKind::PowerHand);
        assert!(!view.on_drop(&payload, 1, HandKind::Registers));
        let payload = view.start_drag(0, HandKind::ProgramHand);
        assert!(!view.on_drop(&payload, 1, HandKind::ProgramHand));
        let payload = view.start_drag(0, HandKind::Registers);
        assert!(!view.on_drop(&payload, 0, HandKind::PowerHand));
        assert_eq!(transport.request_count(), before);
    }

    #[test]
    fn drop_from_program_hand_into_register() {
        let (mut view, transport) = view_with(active_player());
        transport.reply_ok(json!({
            "id": "p1",
            "active": true,
            "program_hand": {"cards": [{"filename": "uturn.png"}]},
            "registers": {
                "cards": [{"filename": "back.png"}, {"filename": "move1.png"}],
                "locks": [true, false],
                "throws": [false, false]
            }
        }));
        let payload = view.start_drag(0, HandKind::ProgramHand);
        assert!(view.on_drop(&payload, 1, HandKind::Registers));
        assert_eq!(view.hands.program_hand.len(), 1);
        assert_eq!(view.hands.registers[1].card.filename, "move1.png");
        assert!(view.hands.power_hand.is_empty());

        let request = transport.requests().pop().expect("request");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/players/p1/transferCard");
        assert_eq!(
            request.body,
            Some(json!({
                "fromHand": "program_hand",
                "fromIndex": 0,
                "toHand": "registers",
                "toIndex": 1
            }))
        );
    }

    #[test]
    fn failed_mutation_keeps_previous_state() {
        let (mut view, transport) = view_with(active_player());
        let before_player = view.player.clone();
        let before_hands = view.hands.clone();
        transport.reply(ResponseEnvelope::failed(400, "locked"));
        assert!(!view.discard_card(0, HandKind::PowerHand));
        assert_eq!(view.player, before_player);
        assert_eq!(view.hands, before_hands);
    }

    #[test]
    fn draw_is_sent_even_when_ui_disabled_but_button_hidden() {
        let mut player = active_player();
        player["damage"] = json!(10);
        let (mut view, transport) = view_with(player);
        assert!(view.disable_ui());
        assert!(!has_draw(&view.controls()));

        transport.reply_ok(json!({"id": "p1", "damage": 10}));
        view.draw_power_card();
        let request = transport.requests().pop().expect("request");
        assert_eq!(request.path, "/players/p1/drawPowerCard");
    }

    #[test]
    fn enabled_ui_offers_draw_and_card_controls() {
        let (view, _transport) = view_with(active_player());
        let controls = view.controls();
        assert!(has_draw(&controls));
        assert!(controls.contains(&drag_source("p1", HandKind::ProgramHand, 1)));
        // register 0 is locked, register 1 is empty
        assert!(!controls.contains(&drag_source("p1", HandKind::Registers, 0)));
        assert!(controls.contains(&drop_target("p1", HandKind::Registers, 1)));
        assert!(controls.contains(&Control::OrbSelect {
            player: "p1".to_string(),
            index: 0
        }));
        assert!(controls.contains(&Control::ThrowToggle { index: 0 }));
    }

    #[test]
    fn disabled_ui_leaves_power_cards_view_only() {
        let mut player = active_player();
        player["powered_down"] = json!(true);
        let (view, _transport) = view_with(player);
        let controls = view.controls();
        assert!(controls.contains(&Control::ViewImage {
            url: "http://localhost:5000/static/images/power_cards/gear.png".to_string()
        }));
        assert!(!controls
            .iter()
            .any(|control| matches!(control, Control::DragSource { .. })));
        assert!(!controls
            .iter()
            .any(|control| matches!(control, Control::Discard { .. })));
        assert!(!controls
            .iter()
            .any(|control| matches!(control, Control::OrbSelect { .. })));
    }

    #[test]
    fn empty_program_hand_still_accepts_drops() {
        let mut player = active_player();
        player["program_hand"] = json!({"cards": []});
        player["active"] = json!(false);
        let (view, _transport) = view_with(player);
        assert!(view
            .controls()
            .contains(&drop_target("p1", HandKind::ProgramHand, 0)));
    }

    #[test]
    fn set_orb_decodes_selector_value() {
        let (mut view, transport) = view_with(active_player());
        transport.reply_ok(active_player());
        let value = view.option_value(0, 3).expect("card present");
        assert!(view.set_orb(&value));
        let request = transport.requests().pop().expect("request");
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/players/p1/powerCard/gear.png");
        assert_eq!(request.body, Some(json!({"orb": 3})));
    }

    #[test]
    fn set_num_uses_rejects_bad_values_without_request() {
        let (mut view, transport) = view_with(active_player());
        let before = transport.request_count();
        assert!(!view.set_num_uses("{not json"));
        assert!(!view.set_num_uses(r#"{"filename":"gear.png","index":6}"#));
        assert_eq!(transport.request_count(), before);

        transport.reply_ok(active_player());
        assert!(view.set_num_uses(r#"{"filename":"gear.png","index":5}"#));
        let request = transport.requests().pop().expect("request");
        assert_eq!(request.body, Some(json!({"numUses": 5})));
    }

    #[test]
    fn throw_checkbox_follows_server_answer() {
        let (mut view, transport) = view_with(active_player());
        let mut thrown = active_player();
        thrown["registers"]["throws"] = json!([false, true]);
        transport.reply_ok(thrown);
        assert!(view.on_check(1));
        assert!(view.hands.registers[1].throw);
        assert_eq!(
            transport.requests().pop().expect("request").body,
            Some(json!({"index": 1}))
        );

        transport.reply(ResponseEnvelope::failed(409, "rejected"));
        assert!(!view.on_check(1));
        assert!(view.hands.registers[1].throw);
    }

    #[test]
    fn empty_ok_reply_to_mutation_keeps_player() {
        let (mut view, transport) = view_with(active_player());
        let before_player = view.player.clone();
        let before_hands = view.hands.clone();
        transport.reply(ResponseEnvelope {
            status: 200,
            message: None,
            data: None,
        });
        assert!(!view.on_check(0));
        assert_eq!(view.player, before_player);
        assert_eq!(view.hands, before_hands);

        transport.reply_ok(active_player());
        view.reload();
        assert_eq!(transport.requests().pop().expect("request").path, "/players/p1");
    }

    #[test]
    fn reply_for_other_player_is_ignored() {
        let (mut view, transport) = view_with(active_player());
        let before = view.hands.clone();
        transport.reply_ok(json!({"id": "p2", "active": true}));
        assert!(!view.draw_power_card());
        assert_eq!(view.player.id, "p1");
        assert_eq!(view.hands, before);
    }

    #[test]
    fn reload_after_failed_mount_fetches_mounted_player() {
        let transport = RecordingTransport::new();
        transport.reply(ResponseEnvelope::failed(503, "starting"));
        let mut view = DetailView::mount(
            ApiClient::new(transport.clone()),
            AssetPaths::for_host("h"),
            "p1",
        );
        assert_eq!(view.player_id(), "p1");

        transport.reply_ok(active_player());
        view.reload();
        let paths: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|request| request.path)
            .collect();
        assert_eq!(paths, vec!["/players/p1", "/players/p1"]);
        assert_eq!(view.player.name, "Zoom");
        assert_eq!(view.hands.registers.len(), 2);
    }

    #[test]
    fn reply_arriving_after_teardown_is_not_applied() {
        let transport = RecordingTransport::new();
        transport.reply_ok(active_player());
        let scope = RequestScope::new();
        let mut view = DetailView::mount(
            ApiClient::with_scope(
                CancelDuringReply::new(transport.clone(), scope.clone(), 1),
                scope.clone(),
            ),
            AssetPaths::for_host("h"),
            "p1",
        );
        let before_player = view.player.clone();
        let before_hands = view.hands.clone();

        let mut thrown = active_player();
        thrown["registers"]["throws"] = json!([true, true]);
        transport.reply_ok(thrown);
        assert!(!view.on_check(0));
        assert!(scope.is_cancelled());
        assert_eq!(transport.request_count(), 2);
        assert_eq!(view.player, before_player);
        assert_eq!(view.hands, before_hands);
    }

    #[test]
    fn teardown_drops_late_requests() {
        let (mut view, transport) = view_with(active_player());
        let before = transport.request_count();
        view.teardown();
        assert!(!view.draw_power_card());
        view.reload();
        assert_eq!(transport.request_count(), before);
        assert_eq!(view.player.id, "p1");
    }
}
