use crate::evaluator::{Feedback, LetterStatus, classify, evaluate};
use crate::store::PersistedRound;
use crate::wordbank::{WORD_LENGTH, WordBank, is_valid_word};
use crate::{debug_log, info_log};
use thiserror::Error;

pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("Not in my dictionary: {0}")]
    NotInWordBank(String),

    #[error("the round is already over")]
    RoundOver,

    #[error("attempt must be exactly 5 letters")]
    Incomplete,

    #[error("saved round is invalid: {0}")]
    InvalidSave(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    InProgress,
    Won,
    Lost,
}

/// Result of an accepted attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub attempt: String,
    pub feedback: Vec<Feedback>,
    pub state: RoundState,
}

/// One puzzle: the secret, finalized attempts and the attempt being typed.
#[derive(Debug, Clone)]
pub struct Round {
    secret: String,
    history: Vec<String>,
    current: String,
    status: LetterStatus,
    max_attempts: usize,
}

impl Round {
    pub fn new(secret: &str, max_attempts: usize) -> Self {
        Self {
            secret: secret.to_ascii_uppercase(),
            history: Vec::new(),
            current: String::new(),
            status: LetterStatus::new(),
            max_attempts,
        }
    }

    /// Rebuild a round from its saved form, replaying every attempt through
    /// the evaluator so the keyboard status matches the history.
    pub fn restore(saved: &PersistedRound, max_attempts: usize) -> Result<Self, RoundError> {
        if !is_valid_word(&saved.secret) {
            return Err(RoundError::InvalidSave(format!(
                "secret '{}' is not {WORD_LENGTH} ASCII letters",
                saved.secret
            )));
        }
        if saved.history.len() > max_attempts {
            return Err(RoundError::InvalidSave(format!(
                "{} attempts saved, at most {max_attempts} allowed",
                saved.history.len()
            )));
        }
        if let Some(bad) = saved.history.iter().find(|a| !is_valid_word(a)) {
            return Err(RoundError::InvalidSave(format!(
                "attempt '{bad}' is not {WORD_LENGTH} ASCII letters"
            )));
        }

        let mut round = Self::new(&saved.secret, max_attempts);
        for attempt in &saved.history {
            let attempt = attempt.to_ascii_uppercase();
            evaluate(&round.secret, &attempt, &mut round.status);
            round.history.push(attempt);
        }
        info_log!(
            "Round::restore() - restored {} attempt(s), state {:?}",
            round.history.len(),
            round.state()
        );
        Ok(round)
    }

    pub fn to_persisted(&self) -> PersistedRound {
        PersistedRound {
            secret: self.secret.clone(),
            history: self.history.clone(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn status(&self) -> &LetterStatus {
        &self.status
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Push a letter onto the in-progress attempt. Returns whether it was taken.
    pub fn append_letter(&mut self, ch: char) -> bool {
        if self.is_round_over() || !ch.is_ascii_alphabetic() || self.current.len() >= WORD_LENGTH {
            return false;
        }
        self.current.push(ch.to_ascii_uppercase());
        debug_log!("Round::append_letter() - current: '{}'", self.current);
        true
    }

    /// Drop the last letter of the in-progress attempt. Returns whether one was removed.
    pub fn delete_letter(&mut self) -> bool {
        if self.is_round_over() {
            return false;
        }
        let removed = self.current.pop().is_some();
        debug_log!("Round::delete_letter() - current: '{}'", self.current);
        removed
    }

    /// Finalize the in-progress attempt.
    ///
    /// Rejected attempts leave history, status and the typed letters untouched.
    pub fn submit_attempt(&mut self, bank: &WordBank) -> Result<Submission, RoundError> {
        if self.is_round_over() {
            return Err(RoundError::RoundOver);
        }
        if self.current.len() != WORD_LENGTH {
            return Err(RoundError::Incomplete);
        }
        if !bank.contains(&self.current) {
            info_log!("Round::submit_attempt() - '{}' rejected", self.current);
            return Err(RoundError::NotInWordBank(self.current.clone()));
        }

        let attempt = std::mem::take(&mut self.current);
        let feedback = evaluate(&self.secret, &attempt, &mut self.status);
        self.history.push(attempt.clone());
        let state = self.state();
        info_log!(
            "Round::submit_attempt() - attempt {}/{} '{}' -> {:?}",
            self.history.len(),
            self.max_attempts,
            attempt,
            state
        );

        Ok(Submission {
            attempt,
            feedback,
            state,
        })
    }

    pub fn is_won(&self) -> bool {
        self.history.last().is_some_and(|last| *last == self.secret)
    }

    pub fn is_round_over(&self) -> bool {
        self.is_won() || self.history.len() >= self.max_attempts
    }

    pub fn state(&self) -> RoundState {
        if self.is_won() {
            RoundState::Won
        } else if self.is_round_over() {
            RoundState::Lost
        } else {
            RoundState::InProgress
        }
    }

    /// Finalized attempts with their classifications, oldest first.
    pub fn rows(&self) -> Vec<(&str, Vec<Feedback>)> {
        self.history
            .iter()
            .map(|attempt| (attempt.as_str(), classify(&self.secret, attempt)))
            .collect()
    }

    pub fn attempts_left(&self) -> usize {
        self.max_attempts.saturating_sub(self.history.len())
    }
}
