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

mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use pwomatic::{Mode, Wordlist, generate_batch};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SAMPLE_COUNT: usize = 200;

#[derive(Parser)]
#[command(
    name = "pwomatic",
    version,
    author,
    about = "Dictionary-based password generator with normal, readable and random modes"
)]
struct Cli {
    /// normal, readability or random; anything else means normal
    #[arg(short, long, default_value = "normal")]
    mode: String,

    #[arg(short, long, default_value_t = 12)]
    count: usize,

    #[arg(short, long, env = "PWOMATIC_DICTIONARY", default_value = "dictionary.txt")]
    dictionary: PathBuf,

    /// Print {"pwds": [...], "fallback": bool}
    #[arg(long)]
    json: bool,

    /// Print 200 normal passwords with their lengths and exit
    #[arg(long)]
    sample: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let words = Wordlist::load(&cli.dictionary).with_context(|| {
        format!("Failed to load dictionary {}", cli.dictionary.display())
    })?;

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    if cli.sample {
        ui::display_sample(&words, SAMPLE_COUNT);
        return Ok(());
    }

    let mode = Mode::from_name(&cli.mode);
    if mode.name() != cli.mode {
        tracing::debug!("Unknown mode {:?}, using {}", cli.mode, mode.name());
    }

    let batch = generate_batch(&words, &cli.mode, cli.count)
        .context("Could not generate password")?;

    if cli.json {
        let json = batch.to_json().context("Failed to encode JSON")?;
        println!("{}", &**json);
    } else {
        ui::display_batch(&batch, mode, &options);
    }

    Ok(())
}
