use std::io::{self, BufRead, Write};

use chrono::Local;
use daily_client::{ClientApp, ClientConfig};
use daily_core::{StatsAggregator, format_countdown, time_until_next_word};
use daily_types::{GuessFeedback, LetterStatus};
use tracing::info;

fn render(feedback: &GuessFeedback) -> String {
    feedback
        .word
        .chars()
        .zip(&feedback.letters)
        .map(|(c, status)| match status {
            LetterStatus::Correct => format!("[{}]", c),
            LetterStatus::Present => format!("({})", c),
            LetterStatus::Absent => format!(" {} ", c),
        })
        .collect()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let now = Local::now().naive_local();
    let mut app = match ClientApp::start(&config, now.date()).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };
    info!("Playing puzzle for {}", app.session().date_key());

    for row in app.session().board() {
        println!("{}", render(&row));
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !app.session().state().is_over {
        print!("guess ({} left)> ", app.session().remaining_guesses());
        if io::stdout().flush().is_err() {
            break;
        }
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if app.session_mut().ensure_current_day(Local::now().date_naive()) {
            println!("A new puzzle is out for {}.", app.session().date_key());
        }

        match line.trim() {
            "!hard" => match app.session_mut().set_hard_mode(true) {
                Ok(()) => println!("hard mode on"),
                Err(e) => println!("{}", e),
            },
            "!easy" => match app.session_mut().set_hard_mode(false) {
                Ok(()) => println!("hard mode off"),
                Err(e) => println!("{}", e),
            },
            word => match app.submit_guess(word).await {
                Ok(accepted) => println!("{}", render(&accepted.feedback)),
                Err(rejection) => println!("{}", rejection),
            },
        }
    }

    if let Some(answer) = app.session().reveal_word() {
        let stats = app.session().stats();
        println!(
            "{} The word was {}. Played {}, won {}%, streak {}.",
            if app.session().state().won { "Solved!" } else { "Out of guesses." },
            answer,
            stats.played,
            StatsAggregator::win_percentage(stats),
            stats.current_streak
        );
        let remaining = time_until_next_word(Local::now().naive_local());
        println!("Next word in {}", format_countdown(remaining));
    }

    app.shutdown().await;
}
