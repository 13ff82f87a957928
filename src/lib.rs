use clap::Parser;
use crossterm::event::Event;
use std::{fmt::Display, panic::AssertUnwindSafe, path::PathBuf, time::Duration};

use deck::{load_deck, Deck, DeckError};
use rand::Rng;
use scores::{Persist, ScoreStore, UserRecord};
use session::{Outcome, Session, SessionStats};
use terminal::TerminalWrapper;
use widget::QuizWidget;

mod cli;
pub mod deck;
mod event;
mod logging;
pub mod scores;
pub mod selector;
pub mod session;
mod terminal;
mod widget;

pub fn run() -> Result<SessionStats, QuizError> {
    let cli = cli::QuizCli::parse();

    if let Some(path) = cli.log.as_deref() {
        if let Err(err) = logging::init(path) {
            eprintln!("Unable to log to {}: {err}", path.display());
        }
    }

    let (deck, store, record) = prepare(cli.deck, cli.scores)?;
    let frame = Duration::from_secs(1) / cli.fps;
    let mut session = Session::new(&deck, record, store, rand::thread_rng());

    std::panic::catch_unwind(AssertUnwindSafe(|| -> Result<(), QuizError> {
        //NOTE: From this point, stdout/stderr will not be usable, hence we
        //need to catch any panics, since they are not loggable. Mapping to
        //QuizError allows us to gracefully exit and report the panic.
        let term = &mut TerminalWrapper::new().map_err(UiError::Io)?;
        run_session(term, &mut session, frame)
    }))
    .map_err(|err| {
        QuizError::Panic(if let Some(msg) = err.downcast_ref::<String>() {
            msg.clone()
        } else if let Some(msg) = err.downcast_ref::<&str>() {
            (*msg).to_owned()
        } else {
            "Unknown panic occurred".to_owned()
        })
    })??;

    Ok(session.stats())
}

///Loads everything the session needs. The deck comes first, so a bad deck
///stops the program before the score file is looked at.
fn prepare(
    deck_path: PathBuf,
    scores_path: Option<PathBuf>,
) -> Result<(Deck, ScoreStore, UserRecord), QuizError> {
    let deck = load_deck(&deck_path)?;
    let store = scores_path
        .map(ScoreStore::new)
        .unwrap_or_else(ScoreStore::in_user_home);
    let record = store.load();

    tracing::info!(path = %store.path().display(), "Using score file");

    Ok((deck, store, record))
}

fn run_session<R: Rng, S: Persist>(
    term: &mut TerminalWrapper,
    session: &mut Session<R, S>,
    frame: Duration,
) -> Result<(), QuizError> {
    loop {
        term.render_widget(QuizWidget::new(&session.view(), session.stats()))?;

        if dispatch(session, event::poll_events(frame)?) == Outcome::Quit {
            return Ok(());
        }
    }
}

///Feeds a batch of terminal events to the session, mapping each one against
///the mode the previous one left behind.
fn dispatch<R: Rng, S: Persist>(
    session: &mut Session<R, S>,
    events: impl IntoIterator<Item = Event>,
) -> Outcome {
    for event in events {
        let Some(input) = event::match_user_input(event, session.awaiting_continue()) else {
            continue;
        };

        if session.handle(input) == Outcome::Quit {
            return Outcome::Quit;
        }
    }

    Outcome::Continue
}

#[derive(Debug)]
pub enum QuizError {
    Deck(DeckError),
    Ui(UiError),
    Panic(String),
}

impl Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deck(err) => f.write_fmt(format_args!("Deck: {err}")),
            Self::Ui(err) => f.write_fmt(format_args!("Ui: {err}")),
            Self::Panic(err) => f.write_fmt(format_args!("Panicked: {err}")),
        }
    }
}

impl From<DeckError> for QuizError {
    fn from(err: DeckError) -> Self {
        Self::Deck(err)
    }
}

impl From<UiError> for QuizError {
    fn from(err: UiError) -> Self {
        Self::Ui(err)
    }
}

#[derive(Debug)]
pub enum UiError {
    Io(std::io::Error),
}

impl Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => f.write_fmt(format_args!("IoError: {err}")),
        }
    }
}

impl From<std::io::Error> for UiError {
    fn from(err: std::io::Error) -> Self {
        UiError::Io(err)
    }
}
