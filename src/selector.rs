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

use crate::charset::CharacterSet;
use crate::error::GenerateError;
use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroizing;

const KEYSTREAM_BUFFER_LEN: usize = 512;

/// Uniform index source behind every character, word and shuffle choice.
pub trait Selector {
    /// Returns an integer in `[0, n)`.
    fn uniform(&mut self, n: usize) -> Result<usize, GenerateError>;

    fn pick(&mut self, set: &CharacterSet) -> Result<char, GenerateError> {
        let index = self.uniform(set.len())?;
        set.get(index).ok_or(GenerateError::EmptyRange)
    }

    /// Fisher-Yates, drawing every swap position from `uniform`.
    fn shuffle<T>(&mut self, items: &mut [T]) -> Result<(), GenerateError>
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.uniform(i + 1)?;
            items.swap(i, j);
        }
        Ok(())
    }
}

/// ChaCha20 keystream keyed from the operating system's entropy source.
pub struct SecureSelector {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl SecureSelector {
    pub fn from_entropy() -> Result<Self, GenerateError> {
        let mut key = Zeroizing::new([0u8; 32]);
        getrandom::fill(&mut key[..])
            .map_err(|e| GenerateError::EntropyUnavailable(e.to_string()))?;
        Ok(Self::from_key(&key))
    }

    pub fn from_key(key: &[u8; 32]) -> Self {
        let mut cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        let mut buffer = Zeroizing::new(vec![0u8; KEYSTREAM_BUFFER_LEN]);
        cipher.apply_keystream(&mut buffer);
        Self {
            cipher,
            buffer,
            pos: 0,
        }
    }

    fn next_u32(&mut self) -> u32 {
        if self.pos + 4 > self.buffer.len() {
            self.buffer.fill(0);
            self.cipher.apply_keystream(&mut self.buffer);
            self.pos = 0;
        }

        let word = u32::from_le_bytes([
            self.buffer[self.pos],
            self.buffer[self.pos + 1],
            self.buffer[self.pos + 2],
            self.buffer[self.pos + 3],
        ]);
        self.pos += 4;
        word
    }
}

impl Selector for SecureSelector {
    fn uniform(&mut self, n: usize) -> Result<usize, GenerateError> {
        if n == 0 {
            return Err(GenerateError::EmptyRange);
        }
        let n = u64::try_from(n).map_err(|_| GenerateError::EmptyRange)?;
        if n > u64::from(u32::MAX) {
            return Err(GenerateError::EmptyRange);
        }

        let rejection_threshold = ((1u64 << 32) / n) * n;

        loop {
            let random_u32 = u64::from(self.next_u32());
            if random_u32 < rejection_threshold {
                return Ok((random_u32 % n) as usize);
            }
        }
    }
}

/// Replays a fixed list of draws; fails like a dead entropy source once empty.
#[cfg(test)]
pub(crate) struct ScriptedSelector {
    draws: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedSelector {
    pub(crate) fn new<I: IntoIterator<Item = usize>>(draws: I) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
impl Selector for ScriptedSelector {
    fn uniform(&mut self, n: usize) -> Result<usize, GenerateError> {
        let value = self
            .draws
            .pop_front()
            .ok_or_else(|| GenerateError::EntropyUnavailable("script exhausted".to_string()))?;
        assert!(value < n, "Scripted draw {} out of range [0, {})", value, n);
        Ok(value)
    }
}
