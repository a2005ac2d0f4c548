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

use autonomic::{AutonomicConfig, AutonomicError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "autonomic")]
#[command(about = "Emotion-driven modulation of text-generation parameters")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub presets_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    pub ranges_dir: Option<PathBuf>,

    /// Force diagnostic dumps during `update` without saving the flag to the preset
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify text and write the next parameter buffer
    Update {
        #[arg(long, required_unless_present = "scores")]
        text: Option<String>,

        /// Precomputed classifier output (JSON) instead of calling the endpoint
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Parameter range preset to interpolate over
        #[arg(long)]
        range: Option<String>,

        /// Toggle bit handed back by the host after the previous update
        #[arg(long, default_value_t = 0)]
        toggle: i64,
    },

    /// List saved parameter ranges
    List,

    /// Show the slider values of a parameter range
    Show { name: Option<String> },

    /// Save a parameter range, optionally overriding bounds
    Save {
        name: String,

        #[arg(long)]
        base: Option<String>,

        /// Bound override such as `temp_hi=1.4`; repeatable
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, f64)>,
    },
}

impl Cli {
    pub fn load_config(&self) -> Result<AutonomicConfig, AutonomicError> {
        let mut config = AutonomicConfig::load(self.config.as_deref())?;
        if let Some(dir) = &self.presets_dir {
            config.presets_dir = dir.clone();
        }
        if let Some(dir) = &self.ranges_dir {
            config.ranges_dir = dir.clone();
        }
        Ok(config)
    }
}

pub fn parse_assignment(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid number for '{}': {e}", key.trim()))?;
    Ok((key.trim().to_string(), value))
}
