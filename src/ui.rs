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

use console::Style;
use pwomatic::{Batch, Mode, Policy, Wordlist, generate};

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn tree_branches(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn status_line(fallback: bool) -> &'static str {
    if fallback {
        "Fell back to normal"
    } else {
        "New set"
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

pub fn display_batch(batch: &Batch, mode: Mode, options: &DisplayOptions) {
    for (i, password) in batch.passwords.iter().enumerate() {
        println!("Out[{}]: {}", i, &***password);
    }

    if options.quiet {
        return;
    }

    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_branches(options.unicode_support);
    let policy = Policy::STANDARD;

    let status_style = if options.color_support {
        if batch.fallback {
            Style::new().yellow()
        } else {
            Style::new().green()
        }
    } else {
        Style::new()
    };
    let status_icon = if batch.fallback { check_warn } else { check_ok };

    println!();
    println!("Settings:");
    println!("  {} Mode       {}", branch, mode.name());
    println!(
        "  {} Length     {}-{} chars",
        branch, policy.min_len, policy.max_len
    );
    println!(
        "  {} Count      {} {}",
        last,
        batch.passwords.len(),
        plural(batch.passwords.len(), "password", "passwords")
    );

    println!(
        "\n{} {}",
        status_style.apply_to(format!("[{}]", status_icon)),
        status_style.apply_to(status_line(batch.fallback))
    );
}

/// Prints `count` normal-mode passwords prefixed by their length; failures are printed inline.
pub fn display_sample(words: &Wordlist, count: usize) {
    for _ in 0..count {
        match generate(words, Mode::Normal.name()) {
            Ok(generated) => {
                println!(
                    "{} {}",
                    generated.password.chars().count(),
                    &**generated.password
                )
            }
            Err(e) => println!("error: {}", e),
        }
    }
}
