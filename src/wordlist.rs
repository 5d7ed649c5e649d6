// This file is part of Pwomatic.
//
// Copyright (c) 2025  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::error::{GenerateError, WordlistError};
use crate::selector::Selector;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

pub const MIN_WORDS: usize = 10_000;

/// Immutable dictionary shared by reference across every generation.
#[derive(Debug, Clone)]
pub struct Wordlist {
    words: Vec<String>,
}

impl Wordlist {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WordlistError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| WordlistError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let wordlist = Self::from_text(&content)?;
        tracing::info!(
            "Dictionary loaded: {} words from {}",
            wordlist.len(),
            path.display()
        );
        Ok(wordlist)
    }

    pub fn from_text(text: &str) -> Result<Self, WordlistError> {
        Self::from_words(text.lines())
    }

    /// Trims and NFC-normalizes each entry, skipping blanks.
    pub fn from_words<I, S>(words: I) -> Result<Self, WordlistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().nfc().collect::<String>())
            .filter(|word| !word.is_empty())
            .collect();

        if words.len() < MIN_WORDS {
            return Err(WordlistError::TooFewWords {
                found: words.len(),
                required: MIN_WORDS,
            });
        }

        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn random_word<S: Selector>(&self, selector: &mut S) -> Result<&str, GenerateError> {
        let index = selector.uniform(self.words.len())?;
        Ok(&self.words[index])
    }

    pub fn random_words<S: Selector>(
        &self,
        selector: &mut S,
        count: usize,
    ) -> Result<Vec<&str>, GenerateError> {
        (0..count).map(|_| self.random_word(selector)).collect()
    }
}

/// Lowercase word for `index`, padded with 'a' to exactly `len` letters.
#[cfg(test)]
pub(crate) fn synthetic_word(index: usize, len: usize) -> String {
    let mut letters = vec![b'a'; len];
    let mut rest = index;
    for slot in letters.iter_mut().rev() {
        *slot = b'a' + (rest % 26) as u8;
        rest /= 26;
    }
    String::from_utf8(letters).unwrap()
}

/// `MIN_WORDS` distinct lowercase words whose lengths come from `len_of`.
#[cfg(test)]
pub(crate) fn synthetic_wordlist(len_of: impl Fn(usize) -> usize) -> Wordlist {
    Wordlist::from_words((0..MIN_WORDS).map(|i| synthetic_word(i, len_of(i)))).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{ScriptedSelector, SecureSelector};
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_synthetic_words_distinct() {
        let wordlist = synthetic_wordlist(|i| 3 + i % 7);
        let unique: HashSet<_> = wordlist.words().collect();
        assert_eq!(unique.len(), MIN_WORDS);
        assert!(
            wordlist
                .words()
                .all(|w| (3..=9).contains(&w.len()) && w.chars().all(|c| c.is_ascii_lowercase()))
        );
    }

    #[test]
    fn test_too_few_words() {
        let result = Wordlist::from_words((0..MIN_WORDS - 1).map(|i| synthetic_word(i, 4)));
        match result {
            Err(WordlistError::TooFewWords { found, required }) => {
                assert_eq!(found, MIN_WORDS - 1);
                assert_eq!(required, MIN_WORDS);
            }
            _ => panic!("Expected TooFewWords error"),
        }
    }

    #[test]
    fn test_blank_lines_do_not_count() {
        let mut text = String::new();
        for i in 0..MIN_WORDS - 1 {
            text.push_str(&synthetic_word(i, 5));
            text.push_str("\n   \n\t\n");
        }
        assert!(matches!(
            Wordlist::from_text(&text),
            Err(WordlistError::TooFewWords { found, .. }) if found == MIN_WORDS - 1
        ));
    }

    #[test]
    fn test_entries_are_trimmed_and_normalized() {
        let mut lines: Vec<String> = (0..MIN_WORDS).map(|i| synthetic_word(i, 5)).collect();
        lines[0] = "  cafe\u{0301}\t".to_string();
        lines[1] = "\u{00A0}zebra ".to_string();

        let wordlist = Wordlist::from_words(&lines).unwrap();
        let words: Vec<&str> = wordlist.words().collect();
        assert_eq!(words[0], "caf\u{00E9}");
        assert_eq!(words[0].chars().count(), 4);
        assert_eq!(words[1], "zebra");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Wordlist::load("/nonexistent/path/dictionary.txt");
        match result {
            Err(WordlistError::Read { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/path/dictionary.txt"));
            }
            _ => panic!("Expected Read error"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for i in 0..MIN_WORDS {
            writeln!(temp_file, "{}", synthetic_word(i, 6)).expect("Failed to write");
        }
        writeln!(temp_file).expect("Failed to write");

        let wordlist = Wordlist::load(temp_file.path()).unwrap();
        assert_eq!(wordlist.len(), MIN_WORDS);
        assert!(!wordlist.is_empty());
    }

    #[test]
    fn test_load_short_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "alpha\nbravo\ncharlie").expect("Failed to write");

        assert!(matches!(
            Wordlist::load(temp_file.path()),
            Err(WordlistError::TooFewWords { found: 3, .. })
        ));
    }

    #[test]
    fn test_random_word_follows_selector() {
        let wordlist = synthetic_wordlist(|_| 4);
        let mut selector = ScriptedSelector::new([0, 27, MIN_WORDS - 1]);
        let words = wordlist.random_words(&mut selector, 3).unwrap();
        assert_eq!(words, vec!["aaaa", "aabb", synthetic_word(MIN_WORDS - 1, 4).as_str()]);
    }

    #[test]
    fn test_random_word_spread() {
        let wordlist = synthetic_wordlist(|i| 3 + i % 7);
        let mut selector = SecureSelector::from_entropy().unwrap();
        let drawn: HashSet<&str> = (0..500)
            .map(|_| wordlist.random_word(&mut selector).unwrap())
            .collect();
        assert!(drawn.len() > 400, "Only {} distinct words in 500 draws", drawn.len());
    }
}
