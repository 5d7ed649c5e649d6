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

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("Cannot draw from an empty range")]
    EmptyRange,
    #[error("Could not find two words that produce a password <= {max_len} after {attempts} attempts")]
    RetriesExhausted { attempts: usize, max_len: usize },
    #[error("Word part + pool too long: {len} chars, exceeds maximum {max_len}")]
    LengthOverflow { len: usize, max_len: usize },
}

#[derive(Error, Debug)]
pub enum WordlistError {
    #[error("Failed to read dictionary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Dictionary contains only {found} words, at least {required} required")]
    TooFewWords { found: usize, required: usize },
}
