//! Transient in-memory game store

use crate::{CatalogError, GameDetails, GameId, GameRecord, GameStore};
use std::collections::BTreeMap;

/// Game store backed by an ordered map
///
/// Each instance is independent; nothing is shared between stores.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: BTreeMap<GameId, GameRecord>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    fn create(&mut self, game: GameRecord) -> Result<(), CatalogError> {
        if self.games.contains_key(&game.id()) {
            return Err(CatalogError::DuplicateId(game.id()));
        }

        tracing::debug!("Adding game {} to memory store", game.id());
        self.games.insert(game.id(), game);
        Ok(())
    }

    fn get(&self, id: GameId) -> Result<GameRecord, CatalogError> {
        self.games
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    fn contains(&self, id: GameId) -> Result<bool, CatalogError> {
        Ok(self.games.contains_key(&id))
    }

    fn update(&mut self, id: GameId, details: GameDetails) -> Result<GameRecord, CatalogError> {
        let game = self.games.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        details.validate()?;
        game.replace_details(details);

        tracing::debug!("Updated game {} in memory store", id);
        Ok(game.clone())
    }

    fn delete(&mut self, id: GameId) -> Result<(), CatalogError> {
        self.games.remove(&id).ok_or(CatalogError::NotFound(id))?;
        tracing::debug!("Removed game {} from memory store", id);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<GameRecord>, CatalogError> {
        Ok(self.games.values().cloned().collect())
    }

    fn average_rating(&self) -> Result<f64, CatalogError> {
        if self.games.is_empty() {
            return Err(CatalogError::EmptyStore);
        }

        let total: f64 = self.games.values().map(GameRecord::rating).sum();
        Ok(total / self.games.len() as f64)
    }

    fn count(&self) -> Result<usize, CatalogError> {
        Ok(self.games.len())
    }

    fn next_id(&self) -> Result<GameId, CatalogError> {
        Ok(self.games.keys().next_back().map_or(1, |id| id + 1))
    }
}
