// Library interface for wordle-tui
// This allows integration tests to access internal modules

pub mod cli;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod round;
pub mod store;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use evaluator::{Feedback, LetterStatus, classify, evaluate};
pub use game_state::{Game, GameError, GameInterface, KeyInput, KeyOutcome, UserAction, game_loop};
pub use round::{DEFAULT_MAX_ATTEMPTS, Round, RoundError, RoundState, Submission};
pub use store::{FileStore, KeyValueStore, MemoryStore, PersistedRound, StoreError};
pub use wordbank::{WORD_LENGTH, WordBank, load_wordbank_from_file, load_wordbank_from_str};
