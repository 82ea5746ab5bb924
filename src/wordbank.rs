use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const WORD_LENGTH: usize = 5;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Exactly `WORD_LENGTH` ASCII letters, either case.
pub fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn normalize(line: &str) -> Option<String> {
    let word = line.trim();
    is_valid_word(word).then(|| word.to_ascii_uppercase())
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Fixed list of playable words, loaded once and never mutated.
///
/// Words are stored upper-cased. Order is preserved from the source so a
/// seeded RNG always draws the same secret.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl WordBank {
    pub fn new(words: Vec<String>) -> Self {
        let lookup = words.iter().cloned().collect();
        Self { words, lookup }
    }

    pub fn embedded() -> Self {
        Self::new(load_wordbank_from_str(EMBEDDED_WORDBANK))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        load_wordbank_from_file(path).map(Self::new)
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(&word.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_load_filters_and_uppercases() {
        let words = load_wordbank_from_str("crane\n  slate \ncranes\ncr4ne\n\nRAISE");
        assert_eq!(words, vec!["CRANE", "SLATE", "RAISE"]);
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("CRANE"));
        assert!(is_valid_word("crane"));
        assert!(!is_valid_word("CRAN"));
        assert!(!is_valid_word("CRANES"));
        assert!(!is_valid_word("CR4NE"));
        assert!(!is_valid_word("\u{df}late")); // upper-cases to six letters
        assert!(!is_valid_word("cr\u{e9}ne"));
    }

    #[test]
    fn test_embedded_wordbank_is_well_formed() {
        let bank = WordBank::embedded();
        assert!(!bank.is_empty());
        assert!(bank.words().iter().all(|w| w.len() == WORD_LENGTH));
        assert!(bank.contains("crane"));
        assert!(bank.contains("CRAVE"));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let bank = WordBank::new(load_wordbank_from_str("apple\ngrape"));
        assert!(bank.contains("APPLE"));
        assert!(bank.contains("grape"));
        assert!(bank.contains("GrApE"));
        assert!(!bank.contains("lemon"));
    }

    #[test]
    fn test_choose_draws_from_bank() {
        let bank = WordBank::new(load_wordbank_from_str("apple\ngrape\nlemon"));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let word = bank.choose(&mut rng).unwrap();
            assert!(bank.contains(word));
        }
    }

    #[test]
    fn test_choose_on_empty_bank() {
        let bank = WordBank::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(bank.choose(&mut rng).is_none());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apple").unwrap();
        writeln!(file, "toolong").unwrap();
        writeln!(file, "peach").unwrap();

        let bank = WordBank::from_file(file.path()).unwrap();
        assert_eq!(bank.words(), ["APPLE", "PEACH"]);
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(WordBank::from_file("/nonexistent/wordbank.txt").is_err());
    }
}
