use std::io;
use std::path::PathBuf;
use wordle_tui::cli::{Cli, CliInterface, parse_cli};
use wordle_tui::logging::init_logging;
use wordle_tui::store::default_data_dir;
use wordle_tui::tui::TuiInterface;
use wordle_tui::{FileStore, Game, GameError, PersistedRound, WordBank, game_loop, info_log};

fn main() {
    let cli = parse_cli();
    if let Err(e) = run(&cli) {
        eprintln!("wordle-tui: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), GameError> {
    let data_dir = cli
        .save_dir
        .clone()
        .or_else(default_data_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| data_dir.join("wordle.log"));
    if let Err(e) = init_logging(&log_path) {
        eprintln!("Logging disabled, could not open '{}': {e}", log_path.display());
    }

    let bank = match &cli.wordbank_path {
        Some(path) => WordBank::from_file(path).inspect_err(|_| {
            eprintln!("Failed to load word bank from '{}'", path.display());
        })?,
        None => WordBank::embedded(),
    };
    info_log!("Loaded {} words", bank.len());

    let mut store = FileStore::new(&data_dir);
    if cli.reset
        && let Err(e) = PersistedRound::clear(&mut store)
    {
        log::warn!("Could not discard saved round: {e}");
    }

    let mut game = Game::new(bank, store, cli.max_attempts)?;

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut game, &mut interface);
    } else {
        let mut interface = TuiInterface::new()?;
        game_loop(&mut game, &mut interface);
    }
    Ok(())
}
