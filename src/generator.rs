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

use crate::charset::{ALL_CHARS, ALPHA, CharacterSet, DIGITS, LOWER, SEPARATORS, SYMBOLS, UPPER};
use crate::error::GenerateError;
use crate::selector::{SecureSelector, Selector};
use crate::wordlist::Wordlist;
use serde::Serialize;
use zeroize::Zeroizing;

const NORMAL_ATTEMPTS: usize = 100;
const READABLE_ATTEMPTS: usize = 1000;
const CAPITALIZE_ATTEMPTS: usize = 200;

const NORMAL_POOL: [(CharacterSet, usize); 4] = [(UPPER, 2), (LOWER, 2), (DIGITS, 4), (SYMBOLS, 2)];
const NORMAL_POOL_LEN: usize = 2 + 2 + 4 + 2;
const RANDOM_POOL: [(CharacterSet, usize); 3] = [(ALPHA, 2), (DIGITS, 2), (SYMBOLS, 2)];

const READABLE_WORDS: usize = 3;
const READABLE_NUMBER_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Readable,
    Random,
}

impl Mode {
    /// Unknown names, including the empty string, select `Normal`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "readability" => Mode::Readable,
            "random" => Mode::Random,
            _ => Mode::Normal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Readable => "readability",
            Mode::Random => "random",
        }
    }
}

impl From<&str> for Mode {
    fn from(name: &str) -> Self {
        Mode::from_name(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub min_len: usize,
    pub max_len: usize,
    pub readable_symbols: usize,
}

impl Policy {
    pub const STANDARD: Self = Self {
        min_len: 20,
        max_len: 27,
        readable_symbols: 4,
    };

    /// Characters left for the three readable words once number and symbols are reserved.
    pub fn readable_word_budget(&self) -> usize {
        self.max_len
            .saturating_sub(READABLE_NUMBER_LEN + self.readable_symbols)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NoFittingWords { attempts: usize },
    TooLong { len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The requested mode produced the password.
    Exact,
    /// Readable mode cannot fit any word under this policy; normal mode ran instead.
    Deferred,
    FellBack(FallbackReason),
}

#[derive(Debug, Clone)]
pub struct Generated {
    pub password: Zeroizing<String>,
    pub outcome: Outcome,
}

impl Generated {
    fn new(password: Zeroizing<String>, outcome: Outcome) -> Self {
        Self { password, outcome }
    }

    pub fn fell_back_to_normal(&self) -> bool {
        matches!(self.outcome, Outcome::FellBack(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub passwords: Vec<Zeroizing<String>>,
    pub fallback: bool,
}

#[derive(Serialize)]
struct BatchBody<'a> {
    pwds: Vec<&'a str>,
    fallback: bool,
}

impl Batch {
    pub fn to_json(&self) -> serde_json::Result<Zeroizing<String>> {
        let body = BatchBody {
            pwds: self.passwords.iter().map(|p| p.as_str()).collect(),
            fallback: self.fallback,
        };
        serde_json::to_string(&body).map(Zeroizing::new)
    }
}

enum Sampling<T> {
    Sampling { attempt: usize },
    Accepted(T),
    ExhaustedRetries { attempts: usize },
}

enum Sampled<T> {
    Accepted(T),
    Exhausted { attempts: usize },
}

/// Runs `draw` until it accepts a candidate or `limit` draws have been rejected.
fn sample_bounded<T, F>(limit: usize, mut draw: F) -> Result<Sampled<T>, GenerateError>
where
    F: FnMut() -> Result<Option<T>, GenerateError>,
{
    let mut state = Sampling::Sampling { attempt: 0 };
    loop {
        state = match state {
            Sampling::Sampling { attempt } if attempt >= limit => {
                Sampling::ExhaustedRetries { attempts: attempt }
            }
            Sampling::Sampling { attempt } => match draw()? {
                Some(candidate) => Sampling::Accepted(candidate),
                None => Sampling::Sampling {
                    attempt: attempt + 1,
                },
            },
            Sampling::Accepted(candidate) => return Ok(Sampled::Accepted(candidate)),
            Sampling::ExhaustedRetries { attempts } => {
                return Ok(Sampled::Exhausted { attempts });
            }
        };
    }
}

fn fill_pool<S: Selector>(
    selector: &mut S,
    pool: &mut Vec<char>,
    composition: &[(CharacterSet, usize)],
) -> Result<(), GenerateError> {
    for (set, count) in composition {
        for _ in 0..*count {
            pool.push(selector.pick(set)?);
        }
    }
    Ok(())
}

pub fn generate_normal<S: Selector>(
    words: &Wordlist,
    selector: &mut S,
    policy: &Policy,
) -> Result<Zeroizing<String>, GenerateError> {
    let sampled = sample_bounded(NORMAL_ATTEMPTS, || {
        let first = words.random_word(selector)?;
        let second = words.random_word(selector)?;
        let mut separators = [' '; 4];
        for separator in separators.iter_mut() {
            *separator = selector.pick(&SEPARATORS)?;
        }

        let mut block = Zeroizing::new(String::with_capacity(first.len() + second.len() + 4));
        block.push(separators[0]);
        block.push_str(first);
        block.push(separators[1]);
        block.push(separators[2]);
        block.push_str(second);
        block.push(separators[3]);

        let block_len = block.chars().count();
        if block_len + NORMAL_POOL_LEN <= policy.max_len {
            Ok(Some((block, block_len)))
        } else {
            tracing::debug!("Word block of {} chars too long, redrawing", block_len);
            Ok(None)
        }
    })?;

    let (block, block_len) = match sampled {
        Sampled::Accepted(accepted) => accepted,
        Sampled::Exhausted { attempts } => {
            return Err(GenerateError::RetriesExhausted {
                attempts,
                max_len: policy.max_len,
            });
        }
    };

    let mut pool: Zeroizing<Vec<char>> = Zeroizing::new(Vec::with_capacity(policy.min_len));
    fill_pool(selector, &mut pool, &NORMAL_POOL)?;

    let total = block_len + pool.len();
    if total > policy.max_len {
        return Err(GenerateError::LengthOverflow {
            len: total,
            max_len: policy.max_len,
        });
    }
    for _ in total..policy.min_len {
        pool.push(selector.pick(&ALL_CHARS)?);
    }

    selector.shuffle(pool.as_mut_slice())?;

    let mut password = block;
    password.extend(pool.iter());
    Ok(password)
}

/// Number of letters to capitalize for a combined word of `len` chars.
fn capitalization_target(len: usize) -> usize {
    match len {
        0..16 => 1,
        16..28 => 2,
        _ => 3,
    }
}

/// Uppercases up to `target` distinct lowercase letters at random positions.
fn capitalize<S: Selector>(
    letters: &mut [char],
    target: usize,
    selector: &mut S,
) -> Result<usize, GenerateError> {
    if letters.is_empty() {
        return Ok(0);
    }

    let mut made = 0;
    let mut tries = 0;
    while made < target && tries < CAPITALIZE_ATTEMPTS {
        tries += 1;
        let index = selector.uniform(letters.len())?;
        let c = letters[index];
        if !c.is_lowercase() {
            continue;
        }
        let mut upper = c.to_uppercase();
        if let (Some(u), None) = (upper.next(), upper.next()) {
            letters[index] = u;
            made += 1;
        }
    }
    Ok(made)
}

pub fn generate_readable<S: Selector>(
    words: &Wordlist,
    selector: &mut S,
    policy: &Policy,
) -> Result<Generated, GenerateError> {
    let budget = policy.readable_word_budget();
    if budget < READABLE_WORDS {
        tracing::debug!(
            "Readable word budget {} cannot hold {} words, using normal mode",
            budget,
            READABLE_WORDS
        );
        let password = generate_normal(words, selector, policy)?;
        return Ok(Generated::new(password, Outcome::Deferred));
    }

    let sampled = sample_bounded(READABLE_ATTEMPTS, || {
        let picked = words.random_words(selector, READABLE_WORDS)?;
        let total: usize = picked.iter().map(|w| w.chars().count()).sum();
        Ok((total <= budget).then_some(picked))
    })?;

    let picked = match sampled {
        Sampled::Accepted(picked) => picked,
        Sampled::Exhausted { attempts } => {
            tracing::warn!(
                "No word triple fits {} chars after {} attempts, falling back to normal",
                budget,
                attempts
            );
            return fall_back(words, selector, policy, FallbackReason::NoFittingWords { attempts });
        }
    };

    let mut letters: Zeroizing<Vec<char>> =
        Zeroizing::new(picked.iter().flat_map(|w| w.chars()).collect());
    let target = capitalization_target(letters.len());
    let made = capitalize(&mut letters, target, selector)?;
    if made < target {
        tracing::debug!("Capitalized {} of {} letters", made, target);
    }

    let number = Zeroizing::new((1000 + selector.uniform(9000)?).to_string());

    let mut password = Zeroizing::new(String::with_capacity(policy.max_len));
    password.extend(letters.iter());
    password.push_str(&number);
    for _ in 0..policy.readable_symbols {
        password.push(selector.pick(&SYMBOLS)?);
    }

    let len = password.chars().count();
    if len > policy.max_len {
        tracing::warn!(
            "Readable password of {} chars exceeds {}, falling back to normal",
            len,
            policy.max_len
        );
        return fall_back(words, selector, policy, FallbackReason::TooLong { len });
    }

    Ok(Generated::new(password, Outcome::Exact))
}

fn fall_back<S: Selector>(
    words: &Wordlist,
    selector: &mut S,
    policy: &Policy,
    reason: FallbackReason,
) -> Result<Generated, GenerateError> {
    let password = generate_normal(words, selector, policy)?;
    Ok(Generated::new(password, Outcome::FellBack(reason)))
}

pub fn generate_random<S: Selector>(
    selector: &mut S,
    policy: &Policy,
) -> Result<Zeroizing<String>, GenerateError> {
    let span = policy.max_len.saturating_sub(policy.min_len) + 1;
    let len = policy.min_len + selector.uniform(span)?;

    let mut pool: Zeroizing<Vec<char>> = Zeroizing::new(Vec::with_capacity(len));
    fill_pool(selector, &mut pool, &RANDOM_POOL)?;
    while pool.len() < len {
        pool.push(selector.pick(&ALL_CHARS)?);
    }

    selector.shuffle(pool.as_mut_slice())?;

    Ok(Zeroizing::new(pool.iter().collect()))
}

pub fn generate_with<S: Selector>(
    words: &Wordlist,
    selector: &mut S,
    mode: Mode,
    policy: &Policy,
) -> Result<Generated, GenerateError> {
    match mode {
        Mode::Normal => {
            generate_normal(words, selector, policy).map(|p| Generated::new(p, Outcome::Exact))
        }
        Mode::Readable => generate_readable(words, selector, policy),
        Mode::Random => generate_random(selector, policy).map(|p| Generated::new(p, Outcome::Exact)),
    }
}

pub fn generate(words: &Wordlist, mode: &str) -> Result<Generated, GenerateError> {
    let mut selector = SecureSelector::from_entropy()?;
    generate_with(words, &mut selector, Mode::from_name(mode), &Policy::STANDARD)
}

/// Generates `count` independent passwords; the first error aborts the batch.
pub fn generate_batch(words: &Wordlist, mode: &str, count: usize) -> Result<Batch, GenerateError> {
    let mut batch = Batch {
        passwords: Vec::with_capacity(count),
        fallback: false,
    };
    for _ in 0..count {
        let generated = generate(words, mode)?;
        batch.fallback |= generated.fell_back_to_normal();
        batch.passwords.push(generated.password);
    }
    Ok(batch)
}
