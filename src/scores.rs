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

use std::{fmt::Display, path::PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::deck::Deck;

#[derive(Debug)]
pub enum ScoreError {
    Io(PathBuf, std::io::Error),
    Serde(PathBuf, serde_json::Error),
}

impl Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::Serde(path, err) => f.write_fmt(format_args!(
                "SerdeError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
        }
    }
}

///Question to tally, for a single user. Keeps insertion order, which is deck
///order for a new user and file order for a loaded one.
pub type Tallies = IndexMap<String, Tally>;

///Every user's tallies, keyed by the name they entered, in the order they
///first appeared.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[serde(transparent)]
pub struct UserRecord {
    users: IndexMap<String, Tallies>,
}

impl UserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    ///Creates the user if needed and gives every card in the deck a tally.
    ///Existing tallies are left untouched.
    pub fn ensure_user(&mut self, name: &str, deck: &Deck) -> &Tallies {
        let tallies = self.users.entry(name.to_owned()).or_default();

        for card in deck.iter() {
            if !tallies.contains_key(&card.question) {
                tallies.insert(card.question.clone(), Tally::default());
            }
        }

        tallies
    }

    pub fn tallies(&self, name: &str) -> Option<&Tallies> {
        self.users.get(name)
    }

    pub fn tally_mut(&mut self, name: &str, question: &str) -> &mut Tally {
        self.users
            .entry(name.to_owned())
            .or_default()
            .entry(question.to_owned())
            .or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Tally {
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub wrong: u32,
}

impl Tally {
    ///`max(1, wrong - correct + 1)`: cards missed more often than answered are
    ///drawn more often, and a mastered card never drops to zero.
    pub fn weight(&self) -> u64 {
        let weight = i64::from(self.wrong) - i64::from(self.correct) + 1;
        weight.max(1) as u64
    }
}

pub trait Persist {
    fn save(&mut self, record: &UserRecord) -> Result<(), ScoreError>;
}

///JSON file backing a [`UserRecord`].
pub struct ScoreStore {
    path: PathBuf,
}

const DEFAULT_HOME_SCORES_PATH: &str = ".config/flashquiz/user_data.json";
const FALLBACK_SCORES_PATH: &str = "user_data.json";

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_user_home() -> Self {
        Self::new(default_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    ///Reads the record. A missing, unreadable or corrupt file yields an empty record.
    pub fn load(&self) -> UserRecord {
        let path = &self.path;

        match std::fs::metadata(path) {
            Err(_) => UserRecord::new(),
            Ok(metadata) if !metadata.is_file() => {
                tracing::warn!(path = %path.display(), "Score path is not a file, starting empty");
                UserRecord::new()
            }
            Ok(_) => match std::fs::read_to_string(path) {
                Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                    tracing::warn!(path = %path.display(), %err, "Discarding unreadable scores");
                    UserRecord::new()
                }),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "Unable to read scores");
                    UserRecord::new()
                }
            },
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Persist for ScoreStore {
    ///Replaces the file with the full, pretty printed record.
    fn save(&mut self, record: &UserRecord) -> Result<(), ScoreError> {
        let path = &self.path;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| ScoreError::Io(path.clone(), err))?;
            }
        }

        let json = serde_json::to_string_pretty(record)
            .map_err(|err| ScoreError::Serde(path.clone(), err))?;

        let temp = self.temp_path();
        std::fs::write(&temp, json).map_err(|err| ScoreError::Io(temp.clone(), err))?;
        std::fs::rename(&temp, path).map_err(|err| ScoreError::Io(path.clone(), err))?;

        Ok(())
    }
}

fn default_path() -> PathBuf {
    match dirs::home_dir() {
        Some(mut path) => {
            path.push(DEFAULT_HOME_SCORES_PATH);
            path
        }
        None => {
            tracing::warn!("Unable to find user home directory, using working directory");
            PathBuf::from(FALLBACK_SCORES_PATH)
        }
    }
}
