use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

///Sends tracing output to `path`, appending. The terminal is taken over by
///the quiz, so logs never go to stdout or stderr.
pub fn init(path: &Path) -> Result<(), std::io::Error> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| std::io::Error::other(err.to_string()))
}
