use flashquiz::{deck::DeckError, QuizError};

fn main() {
    let result = flashquiz::run();
    match result {
        Ok(stats) => {
            let (total_correct, total) = (stats.correct, stats.answered());
            println!(
                "You got {total_correct} correct out of {total} ({:.2}%)",
                if total == 0 {
                    0.0
                } else {
                    (total_correct as f64 / total as f64) * 100.0
                }
            );
            if total_correct == total && total > 0 {
                println!("Well done!");
            }
        }
        Err(err) => {
            match err {
                QuizError::Deck(DeckError::Io(path, err)) => eprintln!(
                    "Error: Unable to read deck {}: {err}",
                    path.to_str().unwrap_or("unknown")
                ),
                QuizError::Deck(err) => eprintln!("Error: {err}"),
                QuizError::Ui(err) => eprintln!("UiError: {err}"),
                QuizError::Panic(err) => eprintln!("Panicked: {err}"),
            }
            std::process::exit(1);
        }
    }
}
