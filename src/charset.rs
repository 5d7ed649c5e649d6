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

/// A fixed, ordered alphabet of distinct ASCII characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSet(&'static str);

pub const UPPER: CharacterSet = CharacterSet("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
pub const LOWER: CharacterSet = CharacterSet("abcdefghijklmnopqrstuvwxyz");
pub const DIGITS: CharacterSet = CharacterSet("0123456789");
pub const SYMBOLS: CharacterSet = CharacterSet("!@#$%^&*()-_=+[]{};:,.<>?");

/// `UPPER` followed by `LOWER`.
pub const ALPHA: CharacterSet =
    CharacterSet("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `UPPER`, `LOWER`, `DIGITS` and `SYMBOLS`, in that order.
pub const ALL_CHARS: CharacterSet = CharacterSet(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{};:,.<>?",
);

/// Word separators in normal mode: a digit or a symbol.
pub const SEPARATORS: CharacterSet = CharacterSet("0123456789!@#$%^&*()-_=+[]{};:,.<>?");

impl CharacterSet {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Character at `index`; sets are ASCII so byte and char positions agree.
    pub fn get(&self, index: usize) -> Option<char> {
        self.0.as_bytes().get(index).map(|&b| b as char)
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(c)
    }

    pub fn count_in(&self, s: &str) -> usize {
        s.chars().filter(|&c| self.contains(c)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base_set_sizes() {
        assert_eq!(UPPER.len(), 26);
        assert_eq!(LOWER.len(), 26);
        assert_eq!(DIGITS.len(), 10);
        assert_eq!(SYMBOLS.len(), 25);
    }

    #[test]
    fn test_unions_match_concatenation() {
        assert_eq!(
            ALPHA.as_str(),
            format!("{}{}", UPPER.as_str(), LOWER.as_str())
        );
        assert_eq!(
            ALL_CHARS.as_str(),
            format!(
                "{}{}{}{}",
                UPPER.as_str(),
                LOWER.as_str(),
                DIGITS.as_str(),
                SYMBOLS.as_str()
            )
        );
        assert_eq!(
            SEPARATORS.as_str(),
            format!("{}{}", DIGITS.as_str(), SYMBOLS.as_str())
        );
        assert_eq!(ALL_CHARS.len(), 87);
    }

    #[test]
    fn test_sets_have_no_duplicates() {
        for set in [UPPER, LOWER, DIGITS, SYMBOLS, ALPHA, ALL_CHARS, SEPARATORS] {
            let unique: HashSet<_> = set.as_str().chars().collect();
            assert_eq!(
                unique.len(),
                set.len(),
                "Set {:?} contains duplicates",
                set.as_str()
            );
            assert!(set.as_str().is_ascii());
        }
    }

    #[test]
    fn test_get_and_count() {
        assert_eq!(UPPER.get(0), Some('A'));
        assert_eq!(SYMBOLS.get(24), Some('?'));
        assert_eq!(DIGITS.get(10), None);
        assert_eq!(SYMBOLS.count_in("ab!c?9"), 2);
        assert!(!SYMBOLS.contains('/'));
    }
}
