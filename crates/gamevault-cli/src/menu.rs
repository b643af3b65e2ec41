//! Text menu over the game catalog
//!
//! Reads answers line by line from any `BufRead` and writes prompts and
//! results to any `Write`, so the whole loop can be driven from tests.

use anyhow::Result;
use gamevault_library::{
    CatalogError, GameDetails, GameId, GamePatch, GameRecord, GameStore, apply_patch, import_file,
};
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

/// Menu entries, in display order
const OPTIONS: &[(&str, &str)] = &[
    ("1", "Add video game entry manually"),
    ("2", "Add video game entries from text file"),
    ("3", "Update video game entry"),
    ("4", "Delete video game entry"),
    ("5", "View full list of video game entries"),
    ("6", "Calculate average rating"),
    ("0", "Exit"),
];

/// Interactive console menu
pub struct Menu<'a, R, W> {
    store: &'a mut dyn GameStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a mut dyn GameStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "**************** Welcome to the VideoGame Management System ****************"
        )?;

        loop {
            writeln!(self.output, "--- Menu Options ---")?;
            for (key, label) in OPTIONS {
                writeln!(self.output, "{}. {}", key, label)?;
            }

            let Some(choice) = self.prompt("Enter your choice")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.add_game()?,
                "2" => self.import_games()?,
                "3" => self.update_game()?,
                "4" => self.delete_game()?,
                "5" => self.list_games()?,
                "6" => self.average_rating()?,
                "0" => break,
                _ => writeln!(self.output, "Invalid choice, enter a number from 0-6")?,
            }
        }

        writeln!(self.output, "Ending Program...")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed answer, `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print a catalog failure; backend failures end the session
    fn report_error(&mut self, err: CatalogError) -> Result<()> {
        match err {
            CatalogError::Backend(_) => Err(err.into()),
            err => {
                writeln!(self.output, "Error: {}", err)?;
                Ok(())
            }
        }
    }

    fn read_id(&mut self, label: &str) -> Result<Option<GameId>> {
        let Some(answer) = self.prompt(label)? else {
            return Ok(None);
        };
        match answer.parse() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Invalid input type: {:?} is not a game ID", answer)?;
                Ok(None)
            }
        }
    }

    fn add_game(&mut self) -> Result<()> {
        let Some(id_answer) = self.prompt("Enter Game ID (blank for next free ID)")? else {
            return Ok(());
        };
        let id = if id_answer.is_empty() {
            match self.store.next_id() {
                Ok(id) => id,
                Err(err) => return self.report_error(err),
            }
        } else {
            match id_answer.parse() {
                Ok(id) => id,
                Err(_) => {
                    writeln!(self.output, "Invalid input type, game ID must be a number")?;
                    return Ok(());
                }
            }
        };

        let mut answers = Vec::with_capacity(5);
        for label in [
            "Enter Game Name",
            "Enter Game Genre",
            "Enter Game Release Year",
            "Enter Game Price",
            "Enter Game Rating (0-10)",
        ] {
            match self.prompt(label)? {
                Some(answer) => answers.push(answer),
                None => return Ok(()),
            }
        }

        let (Ok(year), Ok(price), Ok(rating)) = (
            answers[2].parse::<i32>(),
            answers[3].parse::<f64>(),
            answers[4].parse::<f64>(),
        ) else {
            writeln!(self.output, "Invalid input type, year, price and rating must be numbers")?;
            return Ok(());
        };

        let details = GameDetails::new(
            answers[0].as_str(),
            answers[1].as_str(),
            year,
            price,
            rating,
        );
        let result = GameRecord::new(id, details)
            .map_err(CatalogError::from)
            .and_then(|game| self.store.create(game));

        match result {
            Ok(()) => {
                writeln!(self.output, "Game {} added successfully", id)?;
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }

    fn import_games(&mut self) -> Result<()> {
        let Some(path) = self.prompt("Enter the file path")? else {
            return Ok(());
        };
        if path.is_empty() {
            writeln!(self.output, "File path cannot be blank.")?;
            return Ok(());
        }

        let report = match import_file(&mut *self.store, Path::new(&path)) {
            Ok(report) => report,
            Err(err) => return self.report_error(err),
        };

        for rejected in &report.rejected {
            writeln!(
                self.output,
                "Skipped line {} [{}]: {} -> {}",
                rejected.line_number,
                rejected.reason.tag(),
                rejected.reason,
                rejected.line
            )?;
        }
        writeln!(
            self.output,
            "{} game(s) added successfully from file.",
            report.inserted
        )?;
        Ok(())
    }

    /// Ask for an optional value; blank keeps the current one
    fn read_optional<T: FromStr>(&mut self, label: &str) -> Result<Option<Option<T>>> {
        let Some(answer) = self.prompt(label)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(Some(None));
        }
        match answer.parse() {
            Ok(value) => Ok(Some(Some(value))),
            Err(_) => {
                writeln!(self.output, "Ignoring {:?}: not a number", answer)?;
                Ok(Some(None))
            }
        }
    }

    fn update_game(&mut self) -> Result<()> {
        let Some(id) = self.read_id("Enter the Game ID of the game you would like to update")?
        else {
            return Ok(());
        };

        let current = match self.store.get(id) {
            Ok(game) => game,
            Err(err) => return self.report_error(err),
        };
        writeln!(self.output, "Current details:\n{}", current)?;
        writeln!(self.output, "Leave a field blank to keep its current value.")?;

        let mut patch = GamePatch::new();
        let Some(title) = self.prompt("New Title")? else {
            return Ok(());
        };
        if !title.is_empty() {
            patch.title = Some(title);
        }
        let Some(genre) = self.prompt("New Genre")? else {
            return Ok(());
        };
        if !genre.is_empty() {
            patch.genre = Some(genre);
        }
        let Some(year) = self.read_optional("New Release Year")? else {
            return Ok(());
        };
        patch.release_year = year;
        let Some(price) = self.read_optional("New Price")? else {
            return Ok(());
        };
        patch.price = price;
        let Some(rating) = self.read_optional("New Rating (0-10)")? else {
            return Ok(());
        };
        patch.rating = rating;

        if patch.is_empty() {
            writeln!(self.output, "Nothing to update.")?;
            return Ok(());
        }

        let outcome = match apply_patch(&mut *self.store, id, &patch) {
            Ok(outcome) => outcome,
            Err(err) => return self.report_error(err),
        };

        for skipped in &outcome.skipped {
            writeln!(self.output, "Not updated: {}", skipped.reason)?;
        }
        writeln!(self.output, "Updated details:\n{}", outcome.record)?;
        if outcome.applied.is_empty() {
            writeln!(self.output, "No changes applied")?;
        } else {
            writeln!(self.output, "Game updated successfully")?;
        }
        Ok(())
    }

    fn delete_game(&mut self) -> Result<()> {
        let Some(id) = self.read_id("Enter the Game ID of the game you would like to remove")?
        else {
            return Ok(());
        };

        match self.store.delete(id) {
            Ok(()) => {
                writeln!(self.output, "Game removed successfully")?;
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }

    fn list_games(&mut self) -> Result<()> {
        let games = match self.store.list_all() {
            Ok(games) => games,
            Err(err) => return self.report_error(err),
        };

        if games.is_empty() {
            writeln!(self.output, "No games available to display.")?;
            return Ok(());
        }

        writeln!(self.output, "--- List of Video Games ---")?;
        for game in &games {
            writeln!(self.output, "{}", game)?;
        }
        writeln!(self.output, "----------------------------")?;
        Ok(())
    }

    fn average_rating(&mut self) -> Result<()> {
        match self.store.average_rating() {
            Ok(average) => {
                writeln!(self.output, "Average Rating of All Games: {:.2}", average)?;
                Ok(())
            }
            Err(CatalogError::EmptyStore) => {
                writeln!(
                    self.output,
                    "No games available to calculate average rating."
                )?;
                Ok(())
            }
            Err(err) => self.report_error(err),
        }
    }
}
