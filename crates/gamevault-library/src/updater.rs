//! Partial updates: apply only the fields a caller supplied

use crate::record::{check_price, check_rating, check_release_year, check_text};
use crate::{CatalogError, Field, GameId, GameRecord, GameStore, ValidationError};

/// Proposed new values for a game; `None` means "not supplied"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamePatch {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
}

impl GamePatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.genre.is_none()
            && self.release_year.is_none()
            && self.price.is_none()
            && self.rating.is_none()
    }
}

/// A supplied field that was not applied
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedField {
    pub field: Field,
    pub reason: ValidationError,
}

/// Result of applying a patch
#[derive(Debug, Clone, PartialEq)]
pub struct PatchOutcome {
    /// The record as stored after the patch
    pub record: GameRecord,
    pub applied: Vec<Field>,
    pub skipped: Vec<SkippedField>,
}

/// Apply every valid supplied field of `patch` to the game `id`
///
/// Invalid fields are skipped and reported, they never abort the update.
/// Text fields are trimmed before they are checked and stored.
pub fn apply_patch<S>(
    store: &mut S,
    id: GameId,
    patch: &GamePatch,
) -> Result<PatchOutcome, CatalogError>
where
    S: GameStore + ?Sized,
{
    let current = store.get(id)?;
    let mut details = current.details().clone();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();

    let mut check = |field: Field, result: Result<(), ValidationError>| -> bool {
        match result {
            Ok(()) => {
                applied.push(field);
                true
            }
            Err(reason) => {
                tracing::warn!("Skipping {} for game {}: {}", field, id, reason);
                skipped.push(SkippedField { field, reason });
                false
            }
        }
    };

    if let Some(title) = &patch.title {
        let title = title.trim();
        if check(Field::Title, check_text(Field::Title, title)) {
            details.title = title.to_string();
        }
    }
    if let Some(genre) = &patch.genre {
        let genre = genre.trim();
        if check(Field::Genre, check_text(Field::Genre, genre)) {
            details.genre = genre.to_string();
        }
    }
    if let Some(year) = patch.release_year
        && check(Field::ReleaseYear, check_release_year(year))
    {
        details.release_year = year;
    }
    if let Some(price) = patch.price
        && check(Field::Price, check_price(price))
    {
        details.price = price;
    }
    if let Some(rating) = patch.rating
        && check(Field::Rating, check_rating(rating))
    {
        details.rating = rating;
    }

    if applied.is_empty() {
        return Ok(PatchOutcome {
            record: current,
            applied,
            skipped,
        });
    }

    let updated = store.update(id, details)?;
    tracing::info!("Applied {} field(s) to game {}", applied.len(), id);

    Ok(PatchOutcome {
        record: updated,
        applied,
        skipped,
    })
}
