use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single schedulable card on the board (an appointment, in the shop
/// dashboard). The engine only ever reads `id` and `status`; `position`
/// orders the card inside its status column and belongs to the board state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub position: u32,
}

impl Card {
    pub fn new(status: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            status: status.to_string(),
            position: 0,
        }
    }
}

/// A point-in-time snapshot of the board, loaded from a JSON file.
///
/// The file is the host's export of the live board state; the engine never
/// writes it back — moves happen against the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub cards: Vec<Card>,
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Board {
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let contents = std::fs::read_to_string(path)?;
        let board = serde_json::from_str(&contents)?;
        Ok(board)
    }

    /// Card counts per status column, in stable (sorted) column order.
    pub fn column_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for card in &self.cards {
            *counts.entry(card.status.clone()).or_insert(0) += 1;
        }
        counts
    }
}
