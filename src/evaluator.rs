use std::collections::BTreeSet;

/// Per-letter classification of an attempt against the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl Feedback {
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Letters learned so far in the round, aggregated for the keyboard.
///
/// `correct` and `present` never share a letter: promotion to `correct`
/// removes the letter from `present`. `absent` only holds letters that do
/// not occur in the secret, so it is disjoint from both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterStatus {
    correct: BTreeSet<char>,
    present: BTreeSet<char>,
    absent: BTreeSet<char>,
}

impl LetterStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correct(&self) -> &BTreeSet<char> {
        &self.correct
    }

    pub fn present(&self) -> &BTreeSet<char> {
        &self.present
    }

    pub fn absent(&self) -> &BTreeSet<char> {
        &self.absent
    }

    /// Best known classification of a single key, if it has been guessed.
    pub fn status_of(&self, letter: char) -> Option<Feedback> {
        if self.correct.contains(&letter) {
            Some(Feedback::Correct)
        } else if self.present.contains(&letter) {
            Some(Feedback::Present)
        } else if self.absent.contains(&letter) {
            Some(Feedback::Absent)
        } else {
            None
        }
    }

    fn mark_correct(&mut self, letter: char) {
        self.correct.insert(letter);
        self.present.remove(&letter);
    }

    fn mark_present(&mut self, letter: char) {
        if !self.correct.contains(&letter) {
            self.present.insert(letter);
        }
    }

    fn mark_absent(&mut self, letter: char) {
        self.absent.insert(letter);
    }
}

/// Classify each position of `attempt` against `secret`, folding what was
/// learned into `status`.
///
/// A letter that occurs anywhere in the secret is `Present` at every
/// misplaced position, regardless of how many times it occurs. Both words
/// must be the same length; only the common prefix is classified otherwise.
pub fn evaluate(secret: &str, attempt: &str, status: &mut LetterStatus) -> Vec<Feedback> {
    debug_assert_eq!(
        secret.chars().count(),
        attempt.chars().count(),
        "secret and attempt must have equal length"
    );

    secret
        .chars()
        .zip(attempt.chars())
        .map(|(expected, letter)| {
            if letter == expected {
                status.mark_correct(letter);
                Feedback::Correct
            } else if secret.contains(letter) {
                status.mark_present(letter);
                Feedback::Present
            } else {
                status.mark_absent(letter);
                Feedback::Absent
            }
        })
        .collect()
}

/// Evaluate without keeping the status update, for re-rendering history rows.
pub fn classify(secret: &str, attempt: &str) -> Vec<Feedback> {
    evaluate(secret, attempt, &mut LetterStatus::new())
}
