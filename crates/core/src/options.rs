use crate::OptionValueError;
use serde::{Deserialize, Serialize};

pub const ORB_LABELS: [&str; 4] = ["(none)", "1", "2", "3"];
pub const DETAIL_USE_LABELS: [&str; 6] = ["(none)", "1", "2", "3", "4", "5"];
pub const ROSTER_USE_LABELS: [&str; 8] = ["(none)", "1", "2", "3", "4", "5", "6", "7"];

/// The roster fills in `id` because it spans several players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerCardChoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub filename: String,
    pub index: u8,
}

impl PowerCardChoice {
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn decode(value: &str) -> Result<Self, OptionValueError> {
        serde_json::from_str(value).map_err(|err| OptionValueError::Malformed(err.to_string()))
    }

    pub fn checked(self, labels: &[&str]) -> Result<Self, OptionValueError> {
        let max = labels.len().saturating_sub(1) as u8;
        if usize::from(self.index) >= labels.len() {
            return Err(OptionValueError::OutOfRange {
                index: self.index,
                max,
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub labels: &'static [&'static str],
    pub selected: usize,
}

impl Selector {
    pub fn new(labels: &'static [&'static str], selected: u8) -> Self {
        Self {
            labels,
            selected: usize::from(selected),
        }
    }

    pub fn label(&self) -> &'static str {
        self.labels.get(self.selected).copied().unwrap_or("?")
    }

    pub fn next_index(&self) -> u8 {
        if self.labels.is_empty() {
            return 0;
        }
        ((self.selected + 1) % self.labels.len()) as u8
    }
}
