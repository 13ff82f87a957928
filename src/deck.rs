/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Flashquiz.
 *
 * Flashquiz is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Flashquiz is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Flashquiz.  If not, see <http://www.gnu.org/licenses/>.
 */

use std::{
    fmt::{Debug, Display},
    fs::File,
    io::Read,
    ops::Deref,
    path::{Path, PathBuf},
};

///Deck of question/answer flashcards, in the order they appear in the source file.
///A deck always holds at least one card.
///
///Example:
///```
///# use flashquiz::deck::Deck;
///let csv = "2+2,4\n\"capital of France\", \"Paris\" ,ignored\nlonely\n";
///let deck = Deck::from_reader(csv.as_bytes(), "inline.csv").expect("valid deck");
///assert_eq!(deck.len(), 2);
///assert_eq!(deck[1].question, "capital of France");
///assert_eq!(deck[1].answer, "Paris");
///```
pub struct Deck {
    cards: Vec<Flashcard>,
}

impl Deck {
    pub fn new(cards: Vec<Flashcard>, source: impl Into<PathBuf>) -> Result<Self, DeckError> {
        if cards.is_empty() {
            return Err(DeckError::Empty(source.into()));
        }

        Ok(Self { cards })
    }

    pub fn from_reader(reader: impl Read, source: impl Into<PathBuf>) -> Result<Self, DeckError> {
        let source = source.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut cards = vec![];

        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|err| DeckError::Csv(source.clone(), err))?;

            match (record.get(0), record.get(1)) {
                (Some(question), Some(answer)) => cards.push(Flashcard::new(question, answer)),
                _ => tracing::debug!(line = line + 1, "Skipping record with fewer than two fields"),
            }
        }

        Self::new(cards, source)
    }
}

impl Debug for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deck")
            .field("cards", &self.cards.len())
            .finish()
    }
}

impl Deref for Deck {
    type Target = [Flashcard];

    fn deref(&self) -> &Self::Target {
        &self.cards
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            question: clean_field(question).to_owned(),
            answer: clean_field(answer).to_owned(),
        }
    }

    ///Answers match when equal after trimming, ignoring case.
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.answer.trim().to_lowercase()
    }
}

///Trims the field, then strips a single layer of wrapping double quotes.
///Escaped quotes inside the field are left as they are.
fn clean_field(field: &str) -> &str {
    let field = field.trim();

    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}

#[derive(Debug)]
pub enum DeckError {
    Io(PathBuf, std::io::Error),
    Csv(PathBuf, csv::Error),
    Empty(PathBuf),
}

impl Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::Csv(path, err) => f.write_fmt(format_args!(
                "CsvError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::Empty(path) => f.write_fmt(format_args!(
                "EmptyDeck: No record with both a question and an answer, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
        }
    }
}

pub fn load_deck(path: impl AsRef<Path>) -> Result<Deck, DeckError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| DeckError::Io(path.to_owned(), err))?;
    let deck = Deck::from_reader(file, path)?;

    tracing::info!(path = %path.display(), cards = deck.len(), "Loaded deck");

    Ok(deck)
}
