//! Game store using SQLite

use crate::{CatalogError, GameDetails, GameId, GameRecord, GameStore};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::path::Path;

/// Game store backed by a single SQLite table
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        tracing::info!("Opened game database at {}", path.display());

        let store = Self { conn };
        store.ensure_schema()?;

        Ok(store)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;

        let store = Self { conn };
        store.ensure_schema()?;

        Ok(store)
    }

    /// Create the games table if it does not exist yet
    pub fn ensure_schema(&self) -> Result<(), CatalogError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                genre TEXT NOT NULL,
                release_year INTEGER NOT NULL,
                price REAL NOT NULL,
                rating REAL NOT NULL
            );
        "#,
        )?;

        Ok(())
    }

    /// Convert a row to a GameRecord
    fn row_to_game(row: &rusqlite::Row) -> rusqlite::Result<GameRecord> {
        let details = GameDetails {
            title: row.get("title")?,
            genre: row.get("genre")?,
            release_year: row.get("release_year")?,
            price: row.get("price")?,
            rating: row.get("rating")?,
        };

        // Rows written by other tools may break the field bounds
        GameRecord::new(row.get("id")?, details).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
        })
    }
}

impl GameStore for SqliteStore {
    fn create(&mut self, game: GameRecord) -> Result<(), CatalogError> {
        let result = self.conn.execute(
            r#"INSERT INTO games (id, title, genre, release_year, price, rating)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            params![
                game.id(),
                game.title(),
                game.genre(),
                game.release_year(),
                game.price(),
                game.rating(),
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!("Inserted game {}", game.id());
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(CatalogError::DuplicateId(game.id()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get(&self, id: GameId) -> Result<GameRecord, CatalogError> {
        self.conn
            .query_row(
                "SELECT * FROM games WHERE id = ?1",
                params![id],
                Self::row_to_game,
            )
            .optional()?
            .ok_or(CatalogError::NotFound(id))
    }

    fn contains(&self, id: GameId) -> Result<bool, CatalogError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM games WHERE id = ?1 LIMIT 1",
                params![id],
                |_| Ok(()),
            )
            .optional()?;

        Ok(found.is_some())
    }

    fn update(&mut self, id: GameId, details: GameDetails) -> Result<GameRecord, CatalogError> {
        if !self.contains(id)? {
            return Err(CatalogError::NotFound(id));
        }
        details.validate()?;

        let changed = self.conn.execute(
            r#"UPDATE games
               SET title = ?1, genre = ?2, release_year = ?3, price = ?4, rating = ?5
               WHERE id = ?6"#,
            params![
                details.title,
                details.genre,
                details.release_year,
                details.price,
                details.rating,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(CatalogError::NotFound(id));
        }

        tracing::debug!("Updated game {}", id);
        Ok(GameRecord::new(id, details)?)
    }

    fn delete(&mut self, id: GameId) -> Result<(), CatalogError> {
        let changed = self
            .conn
            .execute("DELETE FROM games WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(CatalogError::NotFound(id));
        }

        tracing::debug!("Deleted game {}", id);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<GameRecord>, CatalogError> {
        let mut stmt = self.conn.prepare("SELECT * FROM games ORDER BY id")?;

        let games = stmt
            .query_map([], Self::row_to_game)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(games)
    }

    fn average_rating(&self) -> Result<f64, CatalogError> {
        let average: Option<f64> =
            self.conn
                .query_row("SELECT AVG(rating) FROM games", [], |row| row.get(0))?;

        average.ok_or(CatalogError::EmptyStore)
    }

    fn count(&self) -> Result<usize, CatalogError> {
        let count: usize = self
            .conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(count)
    }

    fn next_id(&self) -> Result<GameId, CatalogError> {
        let next: GameId = self.conn.query_row(
            "SELECT COALESCE(MAX(id), 0) + 1 FROM games",
            [],
            |row| row.get(0),
        )?;
        Ok(next)
    }
}
