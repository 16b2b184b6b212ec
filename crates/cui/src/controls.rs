use roborally_core::HandKind;

/// Input is only acted on when the matching control is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Draw {
        player: String,
    },
    DragSource {
        player: String,
        hand: HandKind,
        index: usize,
    },
    DropTarget {
        player: String,
        hand: HandKind,
        index: usize,
    },
    OrbSelect {
        player: String,
        index: usize,
    },
    UsesSelect {
        player: String,
        index: usize,
    },
    Discard {
        player: String,
        hand: HandKind,
        index: usize,
    },
    ThrowToggle {
        index: usize,
    },
    ViewImage {
        url: String,
    },
}

pub fn has_control(controls: &[Control], wanted: &Control) -> bool {
    controls.iter().any(|control| control == wanted)
}

pub fn has_draw(controls: &[Control]) -> bool {
    controls
        .iter()
        .any(|control| matches!(control, Control::Draw { .. }))
}

pub fn drag_source(player: &str, hand: HandKind, index: usize) -> Control {
    Control::DragSource {
        player: player.to_string(),
        hand,
        index,
    }
}

pub fn drop_target(player: &str, hand: HandKind, index: usize) -> Control {
    Control::DropTarget {
        player: player.to_string(),
        hand,
        index,
    }
}
