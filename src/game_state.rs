use crate::round::{Round, RoundError, RoundState, Submission};
use crate::store::{KeyValueStore, PersistedRound};
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("the word bank has no playable words")]
    EmptyWordBank,

    #[error("terminal or IO error")]
    Io(#[from] io::Error),
}

/// A single key press after the front-end has filtered out modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Letter(char),
    Submit,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Key(KeyInput),
    NewGame,
    Exit,
}

/// What a key press did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Edited,
    Rejected(String),
    /// Submit pressed before the row was full; the typed letters stay.
    Incomplete,
    Submitted(Submission),
}

/// Trait for game UI interactions - allows different UI implementations (CLI, TUI).
pub trait GameInterface {
    /// Redraw tiles and keyboard from the round.
    fn render(&mut self, round: &Round);

    /// Next input event; `None` means nothing actionable arrived yet.
    fn read_action(&mut self) -> Option<UserAction>;

    fn display_rejected(&mut self, word: &str);

    /// Submit was pressed with fewer than five letters typed.
    fn display_incomplete(&mut self, round: &Round);

    fn display_win(&mut self, round: &Round);

    /// Reveal the secret after the last attempt missed.
    fn display_loss(&mut self, round: &Round);

    fn display_new_game_message(&mut self, word_count: usize);

    fn display_exit_message(&mut self);
}

/// Session state: the word bank, the round in play and where it is saved.
pub struct Game<S: KeyValueStore> {
    bank: WordBank,
    round: Round,
    store: S,
    rng: StdRng,
    max_attempts: usize,
}

impl<S: KeyValueStore> Game<S> {
    /// Resume the saved round if there is a usable one, otherwise draw a new secret.
    pub fn new(bank: WordBank, store: S, max_attempts: usize) -> Result<Self, GameError> {
        Self::with_rng(bank, store, max_attempts, StdRng::from_entropy())
    }

    pub fn with_rng(
        bank: WordBank,
        store: S,
        max_attempts: usize,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        let secret = bank
            .choose(&mut rng)
            .ok_or(GameError::EmptyWordBank)?
            .to_string();
        let mut game = Self {
            round: Round::new(&secret, max_attempts),
            bank,
            store,
            rng,
            max_attempts,
        };

        match PersistedRound::load(&game.store) {
            Ok(Some(saved)) => match Round::restore(&saved, max_attempts) {
                Ok(round) => game.round = round,
                Err(e) => {
                    log::warn!("Discarding saved round: {e}");
                    game.clear_saved();
                }
            },
            Ok(None) => {
                info_log!("Game::new() - no saved round, starting fresh");
            }
            Err(e) => {
                log::warn!("Could not load saved round: {e}");
                game.clear_saved();
            }
        }
        Ok(game)
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Explicit reset: forget the saved round and draw a new secret.
    pub fn start_new_round(&mut self) {
        self.clear_saved();
        // Game::with_rng guarantees the bank is non-empty.
        if let Some(secret) = self.bank.choose(&mut self.rng) {
            self.round = Round::new(secret, self.max_attempts);
        }
        info_log!("Game::start_new_round() - new round started");
    }

    pub fn handle_key(&mut self, key: KeyInput) -> KeyOutcome {
        debug_log!("Game::handle_key() - {:?}", key);
        match key {
            KeyInput::Letter(c) => {
                if self.round.append_letter(c) {
                    KeyOutcome::Edited
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyInput::Delete => {
                if self.round.delete_letter() {
                    KeyOutcome::Edited
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyInput::Submit => match self.round.submit_attempt(&self.bank) {
                Ok(submission) => {
                    if submission.state == RoundState::Won {
                        self.clear_saved();
                    } else {
                        self.save();
                    }
                    KeyOutcome::Submitted(submission)
                }
                Err(RoundError::NotInWordBank(word)) => KeyOutcome::Rejected(word),
                Err(RoundError::Incomplete) => KeyOutcome::Incomplete,
                Err(e) => {
                    log::debug!("Submit ignored: {e}");
                    KeyOutcome::Ignored
                }
            },
        }
    }

    fn save(&mut self) {
        if let Err(e) = self.round.to_persisted().save(&mut self.store) {
            log::warn!("Could not save round: {e}");
        }
    }

    fn clear_saved(&mut self) {
        if let Err(e) = PersistedRound::clear(&mut self.store) {
            log::warn!("Could not clear saved round: {e}");
        }
    }
}

/// Dispatch input events to the round until the player exits.
pub fn game_loop<S: KeyValueStore, I: GameInterface + ?Sized>(
    game: &mut Game<S>,
    interface: &mut I,
) {
    interface.render(game.round());
    if game.round().state() == RoundState::Lost {
        interface.display_loss(game.round());
    }

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                game.start_new_round();
                interface.display_new_game_message(game.word_bank().len());
                interface.render(game.round());
            }
            UserAction::Key(key) => match game.handle_key(key) {
                KeyOutcome::Ignored => {}
                KeyOutcome::Edited => interface.render(game.round()),
                KeyOutcome::Rejected(word) => interface.display_rejected(&word),
                KeyOutcome::Incomplete => interface.display_incomplete(game.round()),
                KeyOutcome::Submitted(submission) => {
                    interface.render(game.round());
                    match submission.state {
                        RoundState::Won => interface.display_win(game.round()),
                        RoundState::Lost => interface.display_loss(game.round()),
                        RoundState::InProgress => {}
                    }
                }
            },
        }
    }
}
