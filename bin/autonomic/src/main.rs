// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use anyhow::{Context, Result};
use autonomic::{
    AutonomicConfig, AutonomicSession, BufferToggle, EmotionClassifier, HttpClassifier,
    StaticClassifier,
};
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.load_config()?;
    let mut session = AutonomicSession::open(&config).context("failed to open preset store")?;

    match cli.cmd {
        Command::Update {
            text,
            scores,
            range,
            toggle,
        } => {
            let range = range.unwrap_or_else(|| config.default_preset.clone());
            session.select_range(&range)?;
            if cli.debug {
                session.set_debug(true);
            }
            session.set_toggle(BufferToggle::from_host(toggle));

            let classifier = build_classifier(&config, scores.as_deref())?;
            let text = text.as_deref().unwrap_or_default();
            let outcome = session.update(text, classifier.as_ref())?;
            let report = json!({
                "buffer": outcome.buffer.identifier(),
                "toggle": outcome.next_toggle,
                "coefficient": outcome.coefficient,
                "parameters": outcome.parameters,
                "path": outcome.path,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::List => {
            for name in session.preset_names()? {
                println!("{name}");
            }
        }
        Command::Show { name } => {
            let name = name.unwrap_or_else(|| config.default_preset.clone());
            let (name, rows) = session.select_range(&name)?;
            println!("{name}");
            for row in rows {
                println!(
                    "  {:<28} lo={:<8} hi={:<8} [{}..{} step {}]",
                    row.parameter, row.lo.value, row.hi.value, row.minimum, row.maximum, row.step
                );
            }
        }
        Command::Save { name, base, set } => {
            let base = base.unwrap_or_else(|| config.default_preset.clone());
            session.select_range(&base)?;
            for (key, value) in &set {
                session
                    .set_bound(key, *value)
                    .with_context(|| format!("cannot apply {key}={value}"))?;
            }
            let names = session.save_range(&name)?;
            info!(preset = %name, total = names.len(), "parameter range saved");
        }
    }
    Ok(())
}

fn build_classifier(
    config: &AutonomicConfig,
    scores: Option<&std::path::Path>,
) -> Result<Box<dyn EmotionClassifier>> {
    match scores {
        Some(path) => Ok(Box::new(StaticClassifier::from_json_file(path)?)),
        None => {
            let classifier = HttpClassifier::new(&config.classifier)
                .context("set AUTONOMIC_CLASSIFIER_URL or pass --scores")?;
            Ok(Box::new(classifier))
        }
    }
}
