//! Video game catalog for GameVault
//!
//! Stores game records keyed by identifier, with two interchangeable backends
//! (an in-memory map and an SQLite table). Records enter the catalog through
//! `GameStore::create` or the bulk importer and change only through
//! `GameStore::update` or the partial updater.

mod database;
mod importer;
mod memory;
mod record;
mod store;
mod updater;

pub use database::SqliteStore;
pub use importer::{
    ImportReport, RejectReason, RejectedLine, import_file, import_lines, import_reader, parse_line,
};
pub use memory::MemoryStore;
pub use record::{
    Field, GameDetails, GameId, GameRecord, MAX_RATING, MIN_RELEASE_YEAR, ValidationError,
};
pub use store::{GameStore, open_store};
pub use updater::{GamePatch, PatchOutcome, SkippedField, apply_patch};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("A game with ID {0} already exists")]
    DuplicateId(GameId),

    #[error("Game not found: {0}")]
    NotFound(GameId),

    #[error("No games in the catalog")]
    EmptyStore,

    #[error("Invalid game data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend unavailable: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
