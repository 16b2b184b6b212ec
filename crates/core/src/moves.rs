use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandKind {
    ProgramHand,
    PowerHand,
    Registers,
}

impl HandKind {
    pub const ALL: [HandKind; 3] = [
        HandKind::ProgramHand,
        HandKind::Registers,
        HandKind::PowerHand,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandKind::ProgramHand => "program_hand",
            HandKind::PowerHand => "power_hand",
            HandKind::Registers => "registers",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == value)
    }

    /// Only program hand and registers trade cards directly within one player.
    pub fn exchanges_with(self, other: HandKind) -> bool {
        matches!(
            (self, other),
            (HandKind::Registers, HandKind::ProgramHand)
                | (HandKind::ProgramHand, HandKind::Registers)
        )
    }
}

impl fmt::Display for HandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub from_list: HandKind,
    pub from_index: usize,
    pub from_player: Option<String>,
}

impl DragPayload {
    pub fn within(from_list: HandKind, from_index: usize) -> Self {
        Self {
            from_list,
            from_index,
            from_player: None,
        }
    }

    pub fn from_player(player: impl Into<String>, from_index: usize) -> Self {
        Self {
            from_list: HandKind::PowerHand,
            from_index,
            from_player: Some(player.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSlot {
    pub player: String,
    pub hand: HandKind,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMove {
    pub from: CardSlot,
    pub to: CardSlot,
}

impl CardMove {
    pub fn is_cross_player(&self) -> bool {
        self.from.player != self.to.player
    }
}
