use serde::{Deserialize, Serialize};

/// Damage above this value destroys the robot.
pub const MAX_DAMAGE: i32 = 9;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramCard {
    pub number: i32,
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ProgramCard {
    /// Registers hold a card with an empty filename when nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.filename.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerCard {
    pub number: i32,
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub orb: u8,
    pub num_uses: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hand<C> {
    pub id: Option<String>,
    pub cards: Vec<C>,
}

impl<C> Default for Hand<C> {
    fn default() -> Self {
        Self {
            id: None,
            cards: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registers {
    pub id: Option<String>,
    pub cards: Vec<ProgramCard>,
    pub locks: Vec<bool>,
    pub throws: Vec<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub damage: i32,
    pub powered_down: bool,
    pub will_power_down: bool,
    pub active: bool,
    pub avatar_filename: String,
    pub instructions: Option<String>,
    pub program_hand: Option<Hand<ProgramCard>>,
    pub power_hand: Option<Hand<PowerCard>>,
    pub registers: Option<Registers>,
}

impl Player {
    pub fn is_destroyed(&self) -> bool {
        self.damage > MAX_DAMAGE
    }
}
