//! Prize list
//!
//! Persisted to LocalStorage. Every prize becomes one ball; the list never
//! drops below `MIN_PRIZES` entries.

use serde::{Deserialize, Serialize};

use crate::error::LotteryError;
use crate::platform::storage;

/// Fewest prizes a list may hold
pub const MIN_PRIZES: usize = 2;

/// Number of prizes in the default list
pub const DEFAULT_PRIZE_COUNT: usize = 95;

/// Label given to prizes added without a name
pub const NEW_PRIZE_LABEL: &str = "New prize";

/// Ordered prize labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PrizeList {
    entries: Vec<String>,
}

impl Default for PrizeList {
    fn default() -> Self {
        Self {
            entries: (1..=DEFAULT_PRIZE_COUNT)
                .map(|n| format!("No. {}", n))
                .collect(),
        }
    }
}

impl TryFrom<Vec<String>> for PrizeList {
    type Error = LotteryError;

    fn try_from(entries: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<PrizeList> for Vec<String> {
    fn from(list: PrizeList) -> Self {
        list.entries
    }
}

impl PrizeList {
    /// Build a list from raw labels (trimmed, validated)
    pub fn from_entries<I, S>(entries: I) -> Result<Self, LotteryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .collect();
        if entries.len() < MIN_PRIZES {
            return Err(LotteryError::TooFewPrizes {
                min: MIN_PRIZES,
                got: entries.len(),
            });
        }
        if let Some(index) = entries.iter().position(|e| e.is_empty()) {
            return Err(LotteryError::EmptyLabel { index });
        }
        Ok(Self { entries })
    }

    pub fn labels(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the list has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a prize, using the placeholder label when `label` is blank.
    /// Returns the new entry's index.
    pub fn add(&mut self, label: &str) -> usize {
        let label = label.trim();
        let label = if label.is_empty() { NEW_PRIZE_LABEL } else { label };
        self.entries.push(label.to_string());
        self.entries.len() - 1
    }

    /// Replace the label at `index`
    pub fn rename(&mut self, index: usize, label: &str) -> Result<(), LotteryError> {
        let len = self.entries.len();
        let label = label.trim();
        if label.is_empty() {
            return Err(LotteryError::EmptyLabel { index });
        }
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(LotteryError::IndexOutOfRange { index, len })?;
        *entry = label.to_string();
        Ok(())
    }

    /// Remove the prize at `index`, refusing to go below `MIN_PRIZES`
    pub fn remove(&mut self, index: usize) -> Result<String, LotteryError> {
        let len = self.entries.len();
        if index >= len {
            return Err(LotteryError::IndexOutOfRange { index, len });
        }
        if len <= MIN_PRIZES {
            return Err(LotteryError::TooFewPrizes {
                min: MIN_PRIZES,
                got: len - 1,
            });
        }
        Ok(self.entries.remove(index))
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "lottery_prizes";

    /// Load the prize list from LocalStorage, or the default list
    pub fn load() -> Self {
        match storage::load_json::<PrizeList>(Self::STORAGE_KEY) {
            Some(list) => {
                log::info!("Loaded {} prizes", list.len());
                list
            }
            None => {
                log::info!("No saved prizes, using the default {}", DEFAULT_PRIZE_COUNT);
                Self::default()
            }
        }
    }

    /// Save the prize list to LocalStorage
    pub fn save(&self) -> Result<(), LotteryError> {
        storage::save_json(Self::STORAGE_KEY, self)?;
        log::info!("Prizes saved ({} entries)", self.entries.len());
        Ok(())
    }
}
