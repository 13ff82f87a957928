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

use rand::Rng;

use crate::{
    deck::{Deck, Flashcard},
    scores::{Persist, UserRecord},
    selector,
};

pub const NAME_PROMPT: &str = "Enter your name: ";
pub const ANSWER_PROMPT: &str = "Your answer: ";
pub const CONTINUE_PROMPT: &str = "Press Enter to continue...";
pub const CORRECT_MESSAGE: &str = "Correct!";

const CURSOR: char = '|';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Input {
    Char(char),
    Backspace,
    Submit,
    Continue,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Continue,
    Quit,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Mode<'a> {
    NameEntry {
        buffer: String,
    },
    Question {
        current: &'a Flashcard,
        buffer: String,
    },
    Feedback {
        current: &'a Flashcard,
        message: String,
        correct: bool,
    },
}

///What the current mode wants on screen.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum View<'s> {
    NameEntry {
        prompt: &'static str,
        input: String,
    },
    Question {
        question: &'s str,
        prompt: &'static str,
        input: String,
    },
    Feedback {
        question: &'s str,
        message: &'s str,
        positive: bool,
        prompt: &'static str,
    },
}

///Answers graded during this run only.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SessionStats {
    pub correct: usize,
    pub wrong: usize,
}

impl SessionStats {
    pub fn answered(&self) -> usize {
        self.correct + self.wrong
    }
}

///A single player's run through a deck. Owns the score record and saves it
///through `store` after every graded answer.
pub struct Session<'a, R, S> {
    deck: &'a Deck,
    record: UserRecord,
    store: S,
    rng: R,
    mode: Mode<'a>,
    user: Option<String>,
    stats: SessionStats,
}

impl<'a, R, S> Session<'a, R, S>
where
    R: Rng,
    S: Persist,
{
    pub fn new(deck: &'a Deck, record: UserRecord, store: S, rng: R) -> Self {
        Self {
            deck,
            record,
            store,
            rng,
            mode: Mode::NameEntry {
                buffer: String::new(),
            },
            user: None,
            stats: SessionStats::default(),
        }
    }

    pub fn handle(&mut self, input: Input) -> Outcome {
        if input == Input::Quit {
            tracing::info!(answered = self.stats.answered(), "Quitting session");
            return Outcome::Quit;
        }

        match &mut self.mode {
            Mode::NameEntry { buffer } => match input {
                Input::Char(c) => buffer.push(c),
                Input::Backspace => {
                    buffer.pop();
                }
                Input::Submit => {
                    let name = buffer.trim().to_owned();
                    if !name.is_empty() {
                        self.commit_user(name);
                    }
                }
                Input::Continue | Input::Quit => {}
            },
            Mode::Question { current, buffer } => match input {
                Input::Char(c) => buffer.push(c),
                Input::Backspace => {
                    buffer.pop();
                }
                Input::Submit => {
                    let current = *current;
                    let answer = std::mem::take(buffer);
                    self.grade(current, &answer);
                }
                Input::Continue | Input::Quit => {}
            },
            Mode::Feedback { .. } => match input {
                Input::Submit | Input::Continue => self.next_question(),
                Input::Char(_) | Input::Backspace | Input::Quit => {}
            },
        }

        Outcome::Continue
    }

    fn commit_user(&mut self, name: String) {
        let tallies = self.record.ensure_user(&name, self.deck);
        tracing::info!(user = %name, questions = tallies.len(), "User entered");

        self.user = Some(name);
        self.next_question();
    }

    fn grade(&mut self, card: &'a Flashcard, answer: &str) {
        let correct = card.accepts(answer);

        if let Some(user) = self.user.as_deref() {
            let tally = self.record.tally_mut(user, &card.question);
            if correct {
                tally.correct = tally.correct.saturating_add(1);
            } else {
                tally.wrong = tally.wrong.saturating_add(1);
            }
            tracing::info!(
                user,
                question = %card.question,
                correct,
                total_correct = tally.correct,
                total_wrong = tally.wrong,
                "Answer graded"
            );
        }

        let message = if correct {
            self.stats.correct += 1;
            CORRECT_MESSAGE.to_owned()
        } else {
            self.stats.wrong += 1;
            format!("Incorrect! The correct answer was: {}", card.answer)
        };

        if let Err(err) = self.store.save(&self.record) {
            tracing::error!(%err, "Unable to save scores");
        }

        self.mode = Mode::Feedback {
            current: card,
            message,
            correct,
        };
    }

    fn next_question(&mut self) {
        let Some(user) = self.user.as_deref() else {
            return;
        };

        let deck = self.deck;
        let picked = match self.record.tallies(user) {
            Some(tallies) => selector::pick(deck, tallies, &mut self.rng),
            None => selector::pick(deck, &Default::default(), &mut self.rng),
        };

        match picked.and_then(|index| deck.get(index)) {
            Some(current) => {
                self.mode = Mode::Question {
                    current,
                    buffer: String::new(),
                }
            }
            None => tracing::error!("Unable to pick a question from the deck"),
        }
    }

    pub fn view(&self) -> View<'_> {
        match &self.mode {
            Mode::NameEntry { buffer } => View::NameEntry {
                prompt: NAME_PROMPT,
                input: with_cursor(buffer),
            },
            Mode::Question { current, buffer } => View::Question {
                question: &current.question,
                prompt: ANSWER_PROMPT,
                input: with_cursor(buffer),
            },
            Mode::Feedback {
                current,
                message,
                correct,
            } => View::Feedback {
                question: &current.question,
                message,
                positive: *correct,
                prompt: CONTINUE_PROMPT,
            },
        }
    }

    pub fn mode(&self) -> &Mode<'a> {
        &self.mode
    }

    pub fn awaiting_continue(&self) -> bool {
        matches!(self.mode, Mode::Feedback { .. })
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn record(&self) -> &UserRecord {
        &self.record
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn into_parts(self) -> (UserRecord, S, SessionStats) {
        (self.record, self.store, self.stats)
    }
}

fn with_cursor(buffer: &str) -> String {
    let mut input = String::with_capacity(buffer.len() + 1);
    input.push_str(buffer);
    input.push(CURSOR);
    input
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        deck::{Deck, Flashcard},
        scores::{Persist, ScoreError, Tally, UserRecord},
    };

    use super::{Input, Mode, Outcome, Session, SessionStats, View, CORRECT_MESSAGE};

    ///Keeps every saved record instead of writing it anywhere.
    #[derive(Default)]
    struct MemoryStore {
        saves: Vec<UserRecord>,
    }

    impl Persist for MemoryStore {
        fn save(&mut self, record: &UserRecord) -> Result<(), ScoreError> {
            self.saves.push(record.clone());
            Ok(())
        }
    }

    struct FailingStore;

    impl Persist for FailingStore {
        fn save(&mut self, _: &UserRecord) -> Result<(), ScoreError> {
            Err(ScoreError::Io(
                "unwritable.json".into(),
                std::io::Error::other("read-only"),
            ))
        }
    }

    fn deck() -> Deck {
        Deck::new(
            vec![
                Flashcard::new("2+2", "4"),
                Flashcard::new("capital of France", "Paris"),
            ],
            "test.csv",
        )
        .expect("Unable to build deck")
    }

    fn session<S: Persist>(deck: &Deck, store: S) -> Session<'_, StdRng, S> {
        Session::new(deck, UserRecord::new(), store, StdRng::seed_from_u64(99))
    }

    fn type_str<R: rand::Rng, S: Persist>(session: &mut Session<'_, R, S>, text: &str) {
        for c in text.chars() {
            assert_eq!(session.handle(Input::Char(c)), Outcome::Continue);
        }
    }

    fn current_question<R: rand::Rng, S: Persist>(session: &Session<'_, R, S>) -> Flashcard {
        match session.mode() {
            Mode::Question { current, .. } => (*current).clone(),
            mode => panic!("Expected question mode, found {mode:?}"),
        }
    }

    #[test]
    fn starts_in_name_entry() {
        let deck = deck();
        let session = session(&deck, MemoryStore::default());
        assert_eq!(
            session.view(),
            View::NameEntry {
                prompt: "Enter your name: ",
                input: "|".to_owned()
            }
        );
        assert!(session.user().is_none());
    }

    #[test]
    fn name_entry_editing() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        type_str(&mut session, "Annx");
        session.handle(Input::Backspace);
        assert_eq!(
            session.mode(),
            &Mode::NameEntry {
                buffer: "Ann".to_owned()
            }
        );

        session.handle(Input::Continue);
        assert!(matches!(session.mode(), Mode::NameEntry { .. }));
    }

    #[test]
    fn backspace_on_empty_buffer() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());
        session.handle(Input::Backspace);
        assert_eq!(
            session.mode(),
            &Mode::NameEntry {
                buffer: String::new()
            }
        );
    }

    #[test]
    fn empty_name_is_ignored() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        session.handle(Input::Submit);
        type_str(&mut session, "   ");
        session.handle(Input::Submit);

        assert!(matches!(session.mode(), Mode::NameEntry { .. }));
        assert!(session.user().is_none());
        assert!(session.record().is_empty());
    }

    #[test]
    fn new_user_gets_zero_tallies() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        type_str(&mut session, "  Ann ");
        session.handle(Input::Submit);

        assert_eq!(session.user(), Some("Ann"));
        let tallies = session
            .record()
            .tallies("Ann")
            .expect("Ann should have tallies");
        assert_eq!(tallies.len(), deck.len());
        assert!(deck
            .iter()
            .all(|card| tallies.get(&card.question) == Some(&Tally::default())));
        assert!(matches!(
            session.mode(),
            Mode::Question { buffer, .. } if buffer.is_empty()
        ));
    }

    #[test]
    fn scenario_ann() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        type_str(&mut session, "Ann");
        session.handle(Input::Submit);

        let mut answered = 0;
        while answered < 20 {
            let card = current_question(&session);
            let answer = if card.question == "2+2" { "4" } else { " paris " };
            type_str(&mut session, answer);
            session.handle(Input::Submit);
            answered += 1;

            match session.view() {
                View::Feedback {
                    question,
                    message,
                    positive,
                    ..
                } => {
                    assert_eq!(question, card.question);
                    assert_eq!(message, CORRECT_MESSAGE);
                    assert!(positive);
                }
                view => panic!("Expected feedback, found {view:?}"),
            }

            session.handle(Input::Submit);
        }

        let tallies = session
            .record()
            .tallies("Ann")
            .expect("Ann should have tallies");
        let total: u32 = tallies.values().map(|tally| tally.correct).sum();
        assert_eq!(total, 20);
        assert!(tallies.values().all(|tally| tally.wrong == 0));
        assert_eq!(
            session.stats(),
            SessionStats {
                correct: 20,
                wrong: 0
            }
        );
    }

    #[test]
    fn correct_answer_increments_tally() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        type_str(&mut session, "Ann");
        session.handle(Input::Submit);
        let card = current_question(&session);

        type_str(&mut session, &card.answer.to_uppercase());
        session.handle(Input::Submit);

        let tally = session.record().tallies("Ann").expect("Ann should have tallies")[&card.question];
        assert_eq!(tally, Tally { correct: 1, wrong: 0 });

        let (_, store, stats) = session.into_parts();
        assert_eq!(store.saves.len(), 1);
        assert_eq!(stats.answered(), 1);
    }

    #[test]
    fn wrong_answer_shows_correct_answer() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        type_str(&mut session, "Ann");
        session.handle(Input::Submit);
        let card = current_question(&session);

        type_str(&mut session, "no idea");
        session.handle(Input::Submit);

        match session.view() {
            View::Feedback {
                message, positive, ..
            } => {
                assert!(!positive);
                assert_eq!(
                    message,
                    format!("Incorrect! The correct answer was: {}", card.answer)
                );
            }
            view => panic!("Expected feedback, found {view:?}"),
        }

        let tally = session.record().tallies("Ann").expect("Ann should have tallies")[&card.question];
        assert_eq!(tally, Tally { correct: 0, wrong: 1 });
        assert_eq!(session.stats().wrong, 1);
    }

    #[test]
    fn maxed_tallies_stay_maxed() {
        let deck = deck();
        let mut record = UserRecord::new();
        for card in deck.iter() {
            *record.tally_mut("Ann", &card.question) = Tally {
                correct: u32::MAX,
                wrong: u32::MAX,
            };
        }

        let mut session = Session::new(
            &deck,
            record,
            MemoryStore::default(),
            StdRng::seed_from_u64(5),
        );
        type_str(&mut session, "Ann");
        session.handle(Input::Submit);

        let card = current_question(&session);
        type_str(&mut session, "no idea");
        assert_eq!(session.handle(Input::Submit), Outcome::Continue);
        session.handle(Input::Continue);

        let card_b = current_question(&session);
        type_str(&mut session, &card_b.answer);
        assert_eq!(session.handle(Input::Submit), Outcome::Continue);

        let tallies = session
            .record()
            .tallies("Ann")
            .expect("Ann should have tallies");
        assert_eq!(tallies[&card.question].wrong, u32::MAX);
        assert_eq!(tallies[&card_b.question].correct, u32::MAX);
        assert_eq!(
            session.stats(),
            SessionStats {
                correct: 1,
                wrong: 1
            }
        );
    }

    #[test]
    fn every_answer_is_saved() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        type_str(&mut session, "Ann");
        session.handle(Input::Submit);

        for i in 0..3 {
            type_str(&mut session, "wrong");
            session.handle(Input::Submit);
            session.handle(Input::Continue);

            assert!(matches!(session.mode(), Mode::Question { .. }), "round {i}");
        }

        let (record, store, _) = session.into_parts();
        assert_eq!(store.saves.len(), 3);
        assert_eq!(store.saves.last(), Some(&record));

        let wrong: u32 = record
            .tallies("Ann")
            .expect("Ann should have tallies")
            .values()
            .map(|tally| tally.wrong)
            .sum();
        assert_eq!(wrong, 3);
    }

    #[test]
    fn feedback_ignores_typing() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        type_str(&mut session, "Ann");
        session.handle(Input::Submit);
        session.handle(Input::Submit);
        assert!(session.awaiting_continue());

        let before = session.mode().clone();
        type_str(&mut session, "abc");
        session.handle(Input::Backspace);
        assert_eq!(session.mode(), &before);

        session.handle(Input::Continue);
        assert!(!session.awaiting_continue());
        assert!(matches!(
            session.mode(),
            Mode::Question { buffer, .. } if buffer.is_empty()
        ));
    }

    #[test]
    fn question_editing_and_continue() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        type_str(&mut session, "Ann");
        session.handle(Input::Submit);

        type_str(&mut session, "Parix");
        session.handle(Input::Backspace);
        session.handle(Input::Continue);

        match session.view() {
            View::Question { prompt, input, .. } => {
                assert_eq!(prompt, "Your answer: ");
                assert_eq!(input, "Pari|");
            }
            view => panic!("Expected question, found {view:?}"),
        }
    }

    #[test]
    fn quit_from_every_mode() {
        let deck = deck();

        let mut session = session(&deck, MemoryStore::default());
        assert_eq!(session.handle(Input::Quit), Outcome::Quit);

        type_str(&mut session, "Ann");
        session.handle(Input::Submit);
        assert_eq!(session.handle(Input::Quit), Outcome::Quit);

        session.handle(Input::Submit);
        assert!(session.awaiting_continue());
        assert_eq!(session.handle(Input::Quit), Outcome::Quit);

        let (_, store, _) = session.into_parts();
        assert_eq!(store.saves.len(), 1);
    }

    #[test]
    fn never_returns_to_name_entry() {
        let deck = deck();
        let mut session = session(&deck, MemoryStore::default());

        type_str(&mut session, "Ann");
        session.handle(Input::Submit);

        for input in [
            Input::Submit,
            Input::Backspace,
            Input::Continue,
            Input::Char('x'),
            Input::Submit,
            Input::Submit,
            Input::Backspace,
        ] {
            session.handle(input);
            assert!(!matches!(session.mode(), Mode::NameEntry { .. }));
            assert_eq!(session.user(), Some("Ann"));
        }
    }

    #[test]
    fn returning_user_keeps_history() {
        let deck = deck();
        let mut record = UserRecord::new();
        record.tally_mut("Ann", "2+2").wrong = 4;

        let mut session = Session::new(
            &deck,
            record,
            MemoryStore::default(),
            StdRng::seed_from_u64(3),
        );
        type_str(&mut session, "Ann");
        session.handle(Input::Submit);

        let tallies = session
            .record()
            .tallies("Ann")
            .expect("Ann should have tallies");
        assert_eq!(tallies["2+2"], Tally { correct: 0, wrong: 4 });
        assert_eq!(tallies["capital of France"], Tally::default());
    }

    #[test]
    fn save_failure_keeps_session_running() {
        let deck = deck();
        let mut session = session(&deck, FailingStore);

        type_str(&mut session, "Ann");
        session.handle(Input::Submit);
        type_str(&mut session, "nope");
        assert_eq!(session.handle(Input::Submit), Outcome::Continue);

        assert!(session.awaiting_continue());
        assert_eq!(session.stats().wrong, 1);
    }
}
