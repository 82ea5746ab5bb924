use crate::evaluator::{Feedback, LetterStatus};
use crate::game_state::{GameInterface, KeyInput, UserAction};
use crate::round::{DEFAULT_MAX_ATTEMPTS, Round};
use crate::wordbank::WORD_LENGTH;
use clap::Parser;
use clap::builder::TypedValueParser;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::PathBuf;

pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Guess the hidden five-letter word in a limited number of attempts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited wordbank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Directory where the round in progress is saved
    #[arg(long = "save-dir")]
    pub save_dir: Option<PathBuf>,

    /// Log file (defaults to wordle.log inside the save directory)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Number of attempts allowed per round
    #[arg(
        long = "max-attempts",
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u8).range(1..=10).map(usize::from)
    )]
    pub max_attempts: usize,

    /// Read whole words from stdin instead of starting the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Discard any saved round and start a fresh one
    #[arg(long)]
    pub reset: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn parse_line(line: &str) -> Vec<UserAction> {
    let input = line.trim().to_uppercase();
    match input.as_str() {
        "EXIT" => vec![UserAction::Exit],
        "NEXT" => vec![UserAction::NewGame],
        "-" => vec![UserAction::Key(KeyInput::Delete)],
        _ => {
            let mut actions: Vec<UserAction> = input
                .chars()
                .filter(char::is_ascii_alphabetic)
                .map(|c| UserAction::Key(KeyInput::Letter(c)))
                .collect();
            actions.push(UserAction::Key(KeyInput::Submit));
            actions
        }
    }
}

pub fn format_row(attempt: &str, feedback: &[Feedback]) -> String {
    let codes: String = feedback.iter().map(|f| f.to_char()).collect();
    format!("{attempt} {codes}")
}

pub fn format_keyboard(status: &LetterStatus) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| match status.status_of(c) {
                    Some(Feedback::Correct) => format!("[{c}]"),
                    Some(Feedback::Present) => format!("({c})"),
                    Some(Feedback::Absent) => " . ".to_string(),
                    None => format!(" {c} "),
                })
                .collect()
        })
        .collect()
}

pub fn display_board(round: &Round) {
    for (attempt, feedback) in round.rows() {
        println!("{}", format_row(attempt, &feedback));
    }
    if !round.is_round_over() {
        let typed = format!("{:_<width$}", round.current(), width = WORD_LENGTH);
        println!("{typed}");
    }
    for line in format_keyboard(round.status()) {
        println!("{line}");
    }
    println!("Attempts left: {}", round.attempts_left());
}

pub fn display_rejected(word: &str) {
    println!("Not in my dictionary: {word}");
}

pub fn display_incomplete() {
    println!("Not enough letters. Letters typed so far are kept; enter the rest or '-' to delete.");
}

pub fn display_win(attempts: usize) {
    println!("Solved in {attempts} attempt(s)! Type 'next' for a new word or 'exit' to quit.");
}

pub fn display_loss(secret: &str) {
    println!("Out of attempts. The word was {secret}. Type 'next' to play again.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_new_game_message(word_count: usize) {
    println!("New game started. Secret drawn from {word_count} words.");
}

/// Line-oriented implementation of the `GameInterface` trait.
///
/// The letters on each line are added to the current row and submitted,
/// `-` deletes a letter, `next` starts a new round and `exit` (or end of
/// input) quits.
pub struct CliInterface<R: BufRead> {
    reader: R,
    pending: VecDeque<UserAction>,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn render(&mut self, round: &Round) {
        // Typing a whole line emits one event per letter; draw once it is submitted.
        if self.pending.is_empty() {
            display_board(round);
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        if let Some(action) = self.pending.pop_front() {
            return Some(action);
        }

        println!("\nEnter a {WORD_LENGTH}-letter word ('-' to delete, 'next' for a new word, 'exit' to quit):");
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => return Some(UserAction::Exit),
            Ok(_) => {}
        }
        self.pending.extend(parse_line(&line));
        self.pending.pop_front()
    }

    fn display_rejected(&mut self, word: &str) {
        display_rejected(word);
    }

    fn display_incomplete(&mut self, round: &Round) {
        display_incomplete();
        display_board(round);
    }

    fn display_win(&mut self, round: &Round) {
        display_win(round.history().len());
    }

    fn display_loss(&mut self, round: &Round) {
        display_loss(round.secret());
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        display_new_game_message(word_count);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
