use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "flashquiz", version = env!("CARGO_PKG_VERSION"))]
pub struct QuizCli {
    #[arg(default_value = "flashcards.csv", value_name = "DECK", help = "Flashcard CSV file", long_help = DECK_HELP)]
    pub deck: PathBuf,
    #[arg(short = 's', long = "scores", value_name = "PATH", help = "Score file", long_help = SCORES_HELP)]
    pub scores: Option<PathBuf>,
    #[arg(long = "fps", value_name = "FPS", default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240), help = "Frames per second")]
    pub fps: u32,
    #[arg(long = "log", value_name = "PATH", help = "Write logs to a file", long_help = LOG_HELP)]
    pub log: Option<PathBuf>,
}

const DECK_HELP: &str = r#"Flashcard CSV file. One card per line: question,answer
Extra columns are ignored, and a single pair of wrapping double quotes is stripped from each field."#;
const SCORES_HELP: &str = r#"Score file. Correct and wrong counts for every player and question are kept here.
Defaults to ~/.config/flashquiz/user_data.json"#;
const LOG_HELP: &str = r#"Write logs to a file. Verbosity is controlled with RUST_LOG, eg RUST_LOG=debug"#;
