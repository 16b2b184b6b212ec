use crate::controls::{drag_source, drop_target, has_control, Control};
use crate::detail::DetailView;
use crate::roster::RosterView;
use roborally_client::Transport;
use roborally_core::{DragPayload, HandKind};

pub enum Screen<T> {
    Detail(DetailView<T>),
    Roster(RosterView<T>),
}

pub struct App<T> {
    pub screen: Screen<T>,
    pub focus: HandKind,
    pub program_cursor: usize,
    pub register_cursor: usize,
    pub power_cursor: usize,
    pub player_cursor: usize,
    pub card_cursor: usize,
    pub held: Option<DragPayload>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl<T: Transport> App<T> {
    pub fn new(screen: Screen<T>) -> Self {
        let mut app = Self {
            screen,
            focus: HandKind::ProgramHand,
            program_cursor: 0,
            register_cursor: 0,
            power_cursor: 0,
            player_cursor: 0,
            card_cursor: 0,
            held: None,
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        };
        app.normalize_cursors();
        app
    }

    pub fn controls(&self) -> Vec<Control> {
        match &self.screen {
            Screen::Detail(view) => view.controls(),
            Screen::Roster(view) => view.controls(),
        }
    }

    pub fn focus_label(&self) -> &'static str {
        match (&self.screen, self.focus) {
            (Screen::Roster(_), _) => "Roster",
            (Screen::Detail(_), HandKind::ProgramHand) => "Program Hand",
            (Screen::Detail(_), HandKind::Registers) => "Registers",
            (Screen::Detail(_), HandKind::PowerHand) => "Power Hand",
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        if matches!(self.screen, Screen::Roster(_)) {
            self.move_cursor(forward);
            return;
        }
        self.focus = match (self.focus, forward) {
            (HandKind::ProgramHand, true) => HandKind::Registers,
            (HandKind::Registers, true) => HandKind::PowerHand,
            (HandKind::PowerHand, true) => HandKind::ProgramHand,
            (HandKind::ProgramHand, false) => HandKind::PowerHand,
            (HandKind::Registers, false) => HandKind::ProgramHand,
            (HandKind::PowerHand, false) => HandKind::Registers,
        };
    }

    pub fn move_cursor(&mut self, down: bool) {
        match &self.screen {
            Screen::Detail(view) => {
                let len = detail_len(view, self.focus);
                let cursor = match self.focus {
                    HandKind::ProgramHand => &mut self.program_cursor,
                    HandKind::Registers => &mut self.register_cursor,
                    HandKind::PowerHand => &mut self.power_cursor,
                };
                move_index(cursor, len, down);
            }
            Screen::Roster(view) => {
                move_index(&mut self.player_cursor, view.players.len(), down);
                self.card_cursor = 0;
            }
        }
    }

    pub fn move_card_cursor(&mut self, right: bool) {
        if let Screen::Roster(view) = &self.screen {
            let len = view
                .players
                .get(self.player_cursor)
                .map(|entry| entry.power_hand.len())
                .unwrap_or(0);
            move_index(&mut self.card_cursor, len, right);
        }
    }

    pub fn cursor(&self) -> usize {
        match self.screen {
            Screen::Roster(_) => self.card_cursor,
            Screen::Detail(_) => match self.focus {
                HandKind::ProgramHand => self.program_cursor,
                HandKind::Registers => self.register_cursor,
                HandKind::PowerHand => self.power_cursor,
            },
        }
    }

    pub fn selected_player_id(&self) -> Option<String> {
        match &self.screen {
            Screen::Detail(view) => Some(view.player_id().to_string()),
            Screen::Roster(view) => view
                .players
                .get(self.player_cursor)
                .map(|entry| entry.id.clone()),
        }
    }

    fn cursor_hand(&self) -> HandKind {
        match self.screen {
            Screen::Roster(_) => HandKind::PowerHand,
            Screen::Detail(_) => self.focus,
        }
    }

    pub fn pick_or_drop(&mut self) {
        if self.held.is_some() {
            self.drop_held();
        } else {
            self.pick_up();
        }
    }

    pub fn pick_up(&mut self) {
        let Some(player) = self.selected_player_id() else {
            return;
        };
        let (hand, index) = (self.cursor_hand(), self.cursor());
        if !has_control(&self.controls(), &drag_source(&player, hand, index)) {
            self.push_status("nothing to pick up here");
            return;
        }
        let payload = match &self.screen {
            Screen::Detail(view) => view.start_drag(index, hand),
            Screen::Roster(view) => view.start_drag(index, &player),
        };
        self.push_status(format!("holding {} #{}", hand, index + 1));
        self.held = Some(payload);
    }

    /// A refused target keeps the card in hand.
    pub fn drop_held(&mut self) {
        if self.held.is_none() {
            return;
        }
        let Some(player) = self.selected_player_id() else {
            return;
        };
        let (hand, index) = (self.cursor_hand(), self.cursor());
        if !has_control(&self.controls(), &drop_target(&player, hand, index)) {
            self.push_status("cannot drop here");
            return;
        }
        let Some(payload) = self.held.take() else {
            return;
        };
        let moved = match &mut self.screen {
            Screen::Detail(view) => view.on_drop(&payload, index, hand),
            Screen::Roster(view) => view.on_drop(&payload, index, &player),
        };
        if moved {
            self.push_status(format!("moved card to {} #{}", hand, index + 1));
        }
        self.normalize_cursors();
    }

    pub fn activate(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else if self.held.is_some() {
            self.drop_held();
        } else {
            self.view_image();
        }
    }

    pub fn cancel(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        let closed = match &mut self.screen {
            Screen::Detail(view) => view.viewing.take().is_some(),
            Screen::Roster(view) => view.viewing.take().is_some(),
        };
        if !closed && self.held.take().is_some() {
            self.push_status("put card back");
        }
    }

    pub fn draw_power_card(&mut self) {
        let Some(player) = self.selected_player_id() else {
            return;
        };
        if !has_control(&self.controls(), &Control::Draw { player: player.clone() }) {
            return;
        }
        let drew = match &mut self.screen {
            Screen::Detail(view) => view.draw_power_card(),
            Screen::Roster(view) => view.draw_power_card(&player),
        };
        if drew {
            self.push_status("drew power card");
        }
        self.normalize_cursors();
    }

    pub fn discard_selected(&mut self) {
        let Some(player) = self.selected_player_id() else {
            return;
        };
        let (hand, index) = (self.cursor_hand(), self.cursor());
        let wanted = Control::Discard {
            player: player.clone(),
            hand,
            index,
        };
        if !has_control(&self.controls(), &wanted) {
            return;
        }
        let discarded = match &mut self.screen {
            Screen::Detail(view) => view.discard_card(index, hand),
            Screen::Roster(view) => view.discard_card(index, &player),
        };
        if discarded {
            self.push_status("discarded power card");
        }
        self.normalize_cursors();
    }

    pub fn cycle_orb(&mut self) {
        let Some(player) = self.selected_player_id() else {
            return;
        };
        let index = self.cursor();
        let wanted = Control::OrbSelect {
            player: player.clone(),
            index,
        };
        if self.cursor_hand() != HandKind::PowerHand || !has_control(&self.controls(), &wanted) {
            return;
        }
        let player_cursor = self.player_cursor;
        let changed = match &mut self.screen {
            Screen::Detail(view) => {
                let value = view
                    .orb_selector(index)
                    .and_then(|selector| view.option_value(index, selector.next_index()));
                value.map(|value| view.set_orb(&value)).unwrap_or(false)
            }
            Screen::Roster(view) => {
                let value = view.orb_selector(player_cursor, index).and_then(|selector| {
                    view.option_value(player_cursor, index, selector.next_index())
                });
                value.map(|value| view.set_orb(&value)).unwrap_or(false)
            }
        };
        if changed {
            self.push_status("orb updated");
        }
    }

    pub fn cycle_uses(&mut self) {
        let Some(player) = self.selected_player_id() else {
            return;
        };
        let index = self.cursor();
        let wanted = Control::UsesSelect {
            player: player.clone(),
            index,
        };
        if self.cursor_hand() != HandKind::PowerHand || !has_control(&self.controls(), &wanted) {
            return;
        }
        let player_cursor = self.player_cursor;
        let changed = match &mut self.screen {
            Screen::Detail(view) => {
                let value = view
                    .uses_selector(index)
                    .and_then(|selector| view.option_value(index, selector.next_index()));
                value.map(|value| view.set_num_uses(&value)).unwrap_or(false)
            }
            Screen::Roster(view) => {
                let value = view.uses_selector(player_cursor, index).and_then(|selector| {
                    view.option_value(player_cursor, index, selector.next_index())
                });
                value.map(|value| view.set_num_uses(&value)).unwrap_or(false)
            }
        };
        if changed {
            self.push_status("uses updated");
        }
    }

    pub fn toggle_throw(&mut self) {
        let index = self.register_cursor;
        let Screen::Detail(view) = &mut self.screen else {
            return;
        };
        if self.focus != HandKind::Registers
            || !has_control(&view.controls(), &Control::ThrowToggle { index })
        {
            return;
        }
        if view.on_check(index) {
            self.push_status(format!("toggled throw on register {}", index + 1));
        }
    }

    pub fn view_image(&mut self) {
        let index = self.cursor();
        let controls = self.controls();
        let player_cursor = self.player_cursor;
        match &mut self.screen {
            Screen::Detail(view) => {
                if self.focus != HandKind::PowerHand {
                    return;
                }
                let Some(card) = view.hands.power_hand.get(index) else {
                    return;
                };
                let url = view.assets().power_card(&card.filename);
                if has_control(&controls, &Control::ViewImage { url: url.clone() }) {
                    view.open_image(url);
                }
            }
            Screen::Roster(view) => {
                let Some(card) = view
                    .players
                    .get(player_cursor)
                    .and_then(|entry| entry.power_hand.get(index))
                else {
                    return;
                };
                let url = view.assets().power_card(&card.filename);
                if has_control(&controls, &Control::ViewImage { url: url.clone() }) {
                    view.open_image(url);
                }
            }
        }
    }

    pub fn viewing(&self) -> Option<&str> {
        match &self.screen {
            Screen::Detail(view) => view.viewing.as_deref(),
            Screen::Roster(view) => view.viewing.as_deref(),
        }
    }

    pub fn reload(&mut self) {
        self.held = None;
        match &mut self.screen {
            Screen::Detail(view) => view.reload(),
            Screen::Roster(view) => view.load_players(),
        }
        self.normalize_cursors();
        self.push_status("reloaded");
    }

    pub fn quit(&mut self) {
        match &self.screen {
            Screen::Detail(view) => view.teardown(),
            Screen::Roster(view) => view.teardown(),
        }
        self.should_quit = true;
    }

    pub fn normalize_cursors(&mut self) {
        match &self.screen {
            Screen::Detail(view) => {
                clamp_index(
                    &mut self.program_cursor,
                    detail_len(view, HandKind::ProgramHand),
                );
                clamp_index(
                    &mut self.register_cursor,
                    detail_len(view, HandKind::Registers),
                );
                clamp_index(&mut self.power_cursor, detail_len(view, HandKind::PowerHand));
            }
            Screen::Roster(view) => {
                clamp_index(&mut self.player_cursor, view.players.len());
                let cards = view
                    .players
                    .get(self.player_cursor)
                    .map(|entry| entry.power_hand.len())
                    .unwrap_or(0);
                clamp_index(&mut self.card_cursor, cards);
            }
        }
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }
}

fn detail_len<T>(view: &DetailView<T>, hand: HandKind) -> usize {
    match hand {
        HandKind::ProgramHand => view.hands.program_hand.len(),
        HandKind::Registers => view.hands.registers.len(),
        HandKind::PowerHand => view.hands.power_hand.len(),
    }
}

fn move_index(value: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *value = 0;
        return;
    }
    if down {
        *value = (*value + 1) % len;
    } else if *value == 0 {
        *value = len - 1;
    } else {
        *value -= 1;
    }
}

fn clamp_index(value: &mut usize, len: usize) {
    if len == 0 {
        *value = 0;
    } else if *value >= len {
        *value = len - 1;
    }
}
