//! Record store contract shared by every backend

use crate::{CatalogError, GameDetails, GameId, GameRecord, MemoryStore, SqliteStore};
use gamevault_config::{Backend, StorageConfig};

/// Owner of the game records, keyed by identifier
///
/// Listing is always in ascending identifier order. Every call runs to
/// completion on the calling thread; backends keep no state between calls
/// besides the records themselves.
pub trait GameStore {
    /// Insert a new record, failing with `DuplicateId` if the identifier is taken
    fn create(&mut self, game: GameRecord) -> Result<(), CatalogError>;

    /// Fetch a record by identifier
    fn get(&self, id: GameId) -> Result<GameRecord, CatalogError>;

    /// Check whether an identifier is present
    fn contains(&self, id: GameId) -> Result<bool, CatalogError>;

    /// Replace the mutable fields of an existing record
    fn update(&mut self, id: GameId, details: GameDetails) -> Result<GameRecord, CatalogError>;

    /// Remove a record
    fn delete(&mut self, id: GameId) -> Result<(), CatalogError>;

    /// All records, ordered by identifier
    fn list_all(&self) -> Result<Vec<GameRecord>, CatalogError>;

    /// Mean rating across all records, `EmptyStore` when there are none
    fn average_rating(&self) -> Result<f64, CatalogError>;

    /// Number of stored records
    fn count(&self) -> Result<usize, CatalogError>;

    /// Smallest identifier above every stored one (1 for an empty store)
    fn next_id(&self) -> Result<GameId, CatalogError>;
}

/// Open the backend selected by the configuration
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn GameStore>, CatalogError> {
    match config.backend {
        Backend::Memory => {
            tracing::info!("Using in-memory game store");
            Ok(Box::new(MemoryStore::new()))
        }
        Backend::Sqlite => {
            if let Some(parent) = config.database.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            Ok(Box::new(SqliteStore::open(&config.database)?))
        }
    }
}
