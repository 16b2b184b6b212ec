use crate::app::{App, Screen};
use crate::controls::{drag_source, drop_target, has_control, has_draw, Control};
use crate::detail::DetailView;
use crate::roster::RosterView;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use roborally_client::Transport;
use roborally_core::HandKind;

pub fn draw<T: Transport>(frame: &mut Frame, app: &App<T>) {
    match &app.screen {
        Screen::Detail(view) => draw_detail(frame, app, view),
        Screen::Roster(view) => draw_roster(frame, app, view),
    }
    if let Some(url) = app.viewing() {
        draw_image_popup(frame, url);
    }
    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_detail<T: Transport>(frame: &mut Frame, app: &App<T>, view: &DetailView<T>) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(5),
            Constraint::Min(5),
            Constraint::Min(6),
        ])
        .split(frame.area());
    let controls = view.controls();

    draw_player_header(frame, root[0], app, view);
    draw_program_hand(frame, root[1], app, view, &controls);
    draw_registers(frame, root[2], app, view, &controls);
    draw_power_hand(frame, root[3], app, view, &controls);
}

fn draw_player_header<T: Transport>(
    frame: &mut Frame,
    area: Rect,
    app: &App<T>,
    view: &DetailView<T>,
) {
    let player = &view.player;
    let mut flags = Vec::new();
    if player.powered_down {
        flags.push("POWERED DOWN");
    }
    if player.will_power_down {
        flags.push("powering down next turn");
    }
    if player.is_destroyed() {
        flags.push("DESTROYED");
    }
    if !player.active {
        flags.push("inactive");
    }
    let lines = vec![
        Line::from(format!("RoboRally | {} ({})", player.name, view.player_id()).bold()),
        Line::from(format!(
            "Damage {} | {}",
            player.damage,
            if flags.is_empty() {
                "ready".to_string()
            } else {
                flags.join(", ")
            }
        )),
        Line::from(format!(
            "Instructions: {}",
            player.instructions.as_deref().unwrap_or("-")
        )),
        Line::from(format!(
            "Focus: {} | {} | Status: {}",
            app.focus_label(),
            held_label(app),
            app.status_line
        )),
    ];
    let block = Block::default().borders(Borders::ALL).title("Player");
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn draw_program_hand<T: Transport>(
    frame: &mut Frame,
    area: Rect,
    app: &App<T>,
    view: &DetailView<T>,
    controls: &[Control],
) {
    let id = view.player_id();
    let items: Vec<ListItem<'_>> = if view.hands.program_hand.is_empty() {
        vec![ListItem::new(placeholder_label(
            controls,
            id,
            HandKind::ProgramHand,
        ))]
    } else {
        view.hands
            .program_hand
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                let marker = drag_marker(controls, id, HandKind::ProgramHand, idx);
                ListItem::new(format!("{marker} {:>2}: {}", idx + 1, card.filename))
            })
            .collect()
    };
    let focused = app.focus == HandKind::ProgramHand;
    render_list(
        frame,
        area,
        items,
        pane_block("Program Card Hand", focused),
        focused.then_some(app.program_cursor),
    );
}

fn draw_registers<T: Transport>(
    frame: &mut Frame,
    area: Rect,
    app: &App<T>,
    view: &DetailView<T>,
    controls: &[Control],
) {
    let id = view.player_id();
    let items: Vec<ListItem<'_>> = if view.hands.registers.is_empty() {
        vec![ListItem::new("None, which is a big problem.")]
    } else {
        view.hands
            .registers
            .iter()
            .enumerate()
            .map(|(idx, slot)| {
                let label = if slot.locked {
                    "LOCKED".to_string()
                } else {
                    format!("{}", idx + 1)
                };
                let card = if slot.is_empty() {
                    if has_control(
                        controls,
                        &drop_target(id, HandKind::Registers, idx),
                    ) {
                        "(empty, drop here)".to_string()
                    } else {
                        "(empty)".to_string()
                    }
                } else {
                    slot.card.filename.clone()
                };
                let marker = drag_marker(controls, id, HandKind::Registers, idx);
                let check = if slot.throw { "[x]" } else { "[ ]" };
                ListItem::new(format!("{marker} {label:>6}: {card}  {check} Throw"))
            })
            .collect()
    };
    let focused = app.focus == HandKind::Registers;
    render_list(
        frame,
        area,
        items,
        pane_block("Registers", focused),
        focused.then_some(app.register_cursor),
    );
}

fn draw_power_hand<T: Transport>(
    frame: &mut Frame,
    area: Rect,
    app: &App<T>,
    view: &DetailView<T>,
    controls: &[Control],
) {
    let id = view.player_id();
    let (button_area, list_area) = split_draw_button(area, has_draw(controls));
    if let Some(button_area) = button_area {
        frame.render_widget(
            Paragraph::new("[d] Draw")
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().add_modifier(Modifier::BOLD)),
            button_area,
        );
    }

    let items: Vec<ListItem<'_>> = if view.hands.power_hand.is_empty() {
        vec![ListItem::new(placeholder_label(
            controls,
            id,
            HandKind::PowerHand,
        ))]
    } else {
        view.hands
            .power_hand
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                let mut line = format!(
                    "{} {:>2}: {}",
                    drag_marker(controls, id, HandKind::PowerHand, idx),
                    idx + 1,
                    card.filename
                );
                let editable = has_control(
                    controls,
                    &Control::OrbSelect {
                        player: id.to_string(),
                        index: idx,
                    },
                );
                if editable {
                    let orb = view.orb_selector(idx).map(|s| s.label()).unwrap_or("?");
                    let uses = view.uses_selector(idx).map(|s| s.label()).unwrap_or("?");
                    line.push_str(&format!("  Orb: {orb}  Uses: {uses}  [x] Discard"));
                } else {
                    line.push_str("  (view only)");
                }
                ListItem::new(line)
            })
            .collect()
    };
    let focused = app.focus == HandKind::PowerHand;
    render_list(
        frame,
        list_area,
        items,
        pane_block("Power Card Hand", focused),
        focused.then_some(app.power_cursor),
    );
}

fn draw_roster<T: Transport>(frame: &mut Frame, app: &App<T>, view: &RosterView<T>) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(frame.area());
    let header = format!(
        "RoboRally board | {} players | {} | Status: {}",
        view.players.len(),
        held_label(app),
        app.status_line
    );
    frame.render_widget(
        Paragraph::new(Line::from(header.bold()))
            .block(Block::default().borders(Borders::ALL).title("Public Cards")),
        root[0],
    );

    let items: Vec<ListItem<'_>> = if view.players.is_empty() {
        vec![ListItem::new("no players")]
    } else {
        view.players
            .iter()
            .enumerate()
            .map(|(row, entry)| {
                let selected_row = row == app.player_cursor;
                let cards = if entry.power_hand.is_empty() {
                    "(empty, drop here)".to_string()
                } else {
                    entry
                        .power_hand
                        .iter()
                        .enumerate()
                        .map(|(idx, card)| {
                            let cursor = if selected_row && idx == app.card_cursor {
                                ">"
                            } else {
                                " "
                            };
                            let orb = view.orbs.get(usize::from(card.orb)).unwrap_or(&"?");
                            let uses = view
                                .num_uses
                                .get(usize::from(card.num_uses))
                                .unwrap_or(&"?");
                            format!("{cursor}{} (orb {orb}, uses {uses})", card.filename)
                        })
                        .collect::<Vec<_>>()
                        .join(" ")
                };
                let placeholder = view.assets().placeholder();
                let registers = view
                    .register_images(row)
                    .iter()
                    .enumerate()
                    .map(|(idx, url)| {
                        if *url == placeholder {
                            format!("[{}:--]", idx + 1)
                        } else {
                            let name = url.rsplit('/').next().unwrap_or(url.as_str());
                            format!("[{}:{name}]", idx + 1)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                ListItem::new(vec![
                    Line::from(format!("{}  [d] Draw", entry.name).bold()),
                    Line::from(format!("  power: {cards}")),
                    Line::from(format!("  registers: {registers}")),
                ])
            })
            .collect()
    };
    render_list(
        frame,
        root[1],
        items,
        pane_block("Players", true),
        Some(app.player_cursor),
    );
}

fn held_label<T: Transport>(app: &App<T>) -> String {
    match &app.held {
        Some(payload) => match &payload.from_player {
            Some(player) => format!(
                "Holding: {} {} #{}",
                player,
                payload.from_list,
                payload.from_index + 1
            ),
            None => format!(
                "Holding: {} #{}",
                payload.from_list,
                payload.from_index + 1
            ),
        },
        None => "Holding: -".to_string(),
    }
}

fn drag_marker(controls: &[Control], player: &str, hand: HandKind, index: usize) -> &'static str {
    if has_control(controls, &drag_source(player, hand, index)) {
        "*"
    } else {
        " "
    }
}

fn placeholder_label(controls: &[Control], player: &str, hand: HandKind) -> &'static str {
    if has_control(controls, &drop_target(player, hand, 0)) {
        "(no cards, drop here)"
    } else {
        "(no cards)"
    }
}

fn split_draw_button(area: Rect, show: bool) -> (Option<Rect>, Rect) {
    if !show {
        return (None, area);
    }
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Min(10)])
        .split(area);
    (Some(parts[0]), parts[1])
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem<'_>>,
    block: Block<'_>,
    cursor: Option<usize>,
) {
    let len = items.len();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if let Some(cursor) = cursor {
        if len > 0 {
            state.select(Some(cursor.min(len - 1)));
        }
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_image_popup(frame: &mut Frame, url: &str) {
    let area = centered_rect(70, 20, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("Full-size card image:"),
        Line::from(url.to_string()),
        Line::from(""),
        Line::from("Esc close"),
    ];
    let block = Block::default()
        .title("Card")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("q quit | ? help | r reload"),
        Line::from("tab focus pane | arrows/hjkl move"),
        Line::from("space pick up card / drop held card | esc put back"),
        Line::from("enter drop held card or view power card"),
        Line::from("d draw power card | x discard power card"),
        Line::from("o cycle orb | u cycle uses | t toggle register throw"),
        Line::from("v view full-size power card"),
        Line::from("* marks cards that can be picked up"),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    block
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
