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

use crate::presets::DEFAULT_PRESET;
use crate::types::{AutonomicError, AutonomicResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutonomicConfig {
    /// Directory the host reads generation presets from; buffers land here.
    #[serde(default = "default_presets_dir")]
    pub presets_dir: PathBuf,
    #[serde(default = "default_ranges_dir")]
    pub ranges_dir: PathBuf,
    #[serde(default = "default_preset_name")]
    pub default_preset: String,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_presets_dir() -> PathBuf {
    PathBuf::from("presets")
}
fn default_ranges_dir() -> PathBuf {
    PathBuf::from("param_ranges")
}
fn default_preset_name() -> String {
    DEFAULT_PRESET.to_string()
}
fn default_timeout_seconds() -> u64 {
    30
}

impl Default for AutonomicConfig {
    fn default() -> Self {
        Self {
            presets_dir: default_presets_dir(),
            ranges_dir: default_ranges_dir(),
            default_preset: default_preset_name(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl AutonomicConfig {
    pub fn from_file(path: impl AsRef<Path>) -> AutonomicResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AutonomicError::Configuration(format!("failed to read '{}': {e}", path.display()))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            AutonomicError::Configuration(format!("failed to parse '{}': {e}", path.display()))
        })
    }

    /// File (when given) first, then environment overrides.
    pub fn load(path: Option<&Path>) -> AutonomicResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> AutonomicResult<()> {
        if let Some(dir) = env_non_empty("AUTONOMIC_PRESETS_DIR") {
            self.presets_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env_non_empty("AUTONOMIC_RANGES_DIR") {
            self.ranges_dir = PathBuf::from(dir);
        }
        if let Some(name) = env_non_empty("AUTONOMIC_DEFAULT_PRESET") {
            self.default_preset = name;
        }
        if let Some(url) = env_non_empty("AUTONOMIC_CLASSIFIER_URL") {
            self.classifier.endpoint = Some(url);
        }
        if let Some(token) = env_non_empty("AUTONOMIC_CLASSIFIER_TOKEN") {
            self.classifier.api_token = Some(token);
        }
        if let Some(raw) = env_non_empty("AUTONOMIC_CLASSIFIER_TIMEOUT") {
            self.classifier.timeout_seconds = raw.parse().map_err(|_| {
                AutonomicError::Configuration(format!(
                    "AUTONOMIC_CLASSIFIER_TIMEOUT must be whole seconds, got '{raw}'"
                ))
            })?;
        }
        Ok(())
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
