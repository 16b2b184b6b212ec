use crate::app::App;
use crate::input::InputAction;
use roborally_client::Transport;

pub fn dispatch<T: Transport>(app: &mut App<T>, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.quit(),
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::NextFocus => app.cycle_focus(true),
        InputAction::PrevFocus => app.cycle_focus(false),
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::MoveLeft => app.move_card_cursor(false),
        InputAction::MoveRight => app.move_card_cursor(true),
        InputAction::PickOrDrop => app.pick_or_drop(),
        InputAction::Activate => app.activate(),
        InputAction::Cancel => app.cancel(),
        InputAction::Draw => app.draw_power_card(),
        InputAction::Discard => app.discard_selected(),
        InputAction::CycleOrb => app.cycle_orb(),
        InputAction::CycleUses => app.cycle_uses(),
        InputAction::ToggleThrow => app.toggle_throw(),
        InputAction::ViewImage => app.view_image(),
        InputAction::Reload => app.reload(),
    }
}
