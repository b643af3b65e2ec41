//! Game records and field validation

use std::fmt;
use thiserror::Error;

/// Unique, immutable game identifier
pub type GameId = i64;

/// Earliest accepted release year, applied to every write path
pub const MIN_RELEASE_YEAR: i32 = 1950;

/// Highest accepted rating (ratings start at 0)
pub const MAX_RATING: f64 = 10.0;

/// A record field, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Title,
    Genre,
    ReleaseYear,
    Price,
    Rating,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Genre => "genre",
            Field::ReleaseYear => "release year",
            Field::Price => "price",
            Field::Rating => "rating",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why candidate data was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be blank")]
    Blank { field: Field },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: Field, value: String },

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("{field} is not a number: {value:?}")]
    Unparsable { field: Field, value: String },

    #[error("line is not valid UTF-8")]
    NotUtf8,
}

impl ValidationError {
    /// Short reason tag for reports
    pub fn tag(&self) -> &'static str {
        match self {
            ValidationError::Blank { .. } => "blank",
            ValidationError::OutOfRange { .. } => "range",
            ValidationError::FieldCount { .. } => "format",
            ValidationError::Unparsable { .. } => "type",
            ValidationError::NotUtf8 => "encoding",
        }
    }
}

pub(crate) fn check_text(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

pub(crate) fn check_release_year(year: i32) -> Result<(), ValidationError> {
    if year < MIN_RELEASE_YEAR {
        return Err(ValidationError::OutOfRange {
            field: Field::ReleaseYear,
            value: year.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: Field::Price,
            value: price.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_rating(rating: f64) -> Result<(), ValidationError> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: Field::Rating,
            value: rating.to_string(),
        });
    }
    Ok(())
}

/// The mutable part of a game record
#[derive(Debug, Clone, PartialEq)]
pub struct GameDetails {
    pub title: String,
    pub genre: String,
    pub release_year: i32,
    pub price: f64,
    pub rating: f64,
}

impl GameDetails {
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        release_year: i32,
        price: f64,
        rating: f64,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            release_year,
            price,
            rating,
        }
    }

    /// Check every field against the catalog bounds, reporting the first violation
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text(Field::Title, &self.title)?;
        check_text(Field::Genre, &self.genre)?;
        check_release_year(self.release_year)?;
        check_price(self.price)?;
        check_rating(self.rating)?;
        Ok(())
    }
}

/// A game in the catalog
///
/// Only constructible through [`GameRecord::new`], so every value of this type
/// satisfies the field bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    id: GameId,
    details: GameDetails,
}

impl GameRecord {
    /// Validate and build a record
    pub fn new(id: GameId, details: GameDetails) -> Result<Self, ValidationError> {
        details.validate()?;
        Ok(Self { id, details })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn genre(&self) -> &str {
        &self.details.genre
    }

    pub fn release_year(&self) -> i32 {
        self.details.release_year
    }

    pub fn price(&self) -> f64 {
        self.details.price
    }

    pub fn rating(&self) -> f64 {
        self.details.rating
    }

    pub fn details(&self) -> &GameDetails {
        &self.details
    }

    /// Swap in already validated details; the identifier never changes
    pub(crate) fn replace_details(&mut self, details: GameDetails) {
        self.details = details;
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Title: {} | Genre: {} | Year: {} | Price: ${:.2} | Rating: {:.1}",
            self.id,
            self.details.title,
            self.details.genre,
            self.details.release_year,
            self.details.price,
            self.details.rating
        )
    }
}
