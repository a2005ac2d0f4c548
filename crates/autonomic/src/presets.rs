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

use crate::logging::log_range_table;
use crate::ranges::RangeTable;
use crate::types::{AutonomicError, AutonomicResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const PRESET_SUFFIX: &str = ".yaml";
pub const DEFAULT_PRESET: &str = "Default";

/// Named parameter-range presets stored as `<dir>/<name>.yaml`.
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
}

impl PresetStore {
    /// Opens the store, creating the directory and writing `default_name`
    /// from `table` when that preset does not exist yet.
    pub fn open(
        dir: impl Into<PathBuf>,
        default_name: &str,
        table: &RangeTable,
    ) -> AutonomicResult<Self> {
        let store = Self::new(dir);
        store.ensure_dir()?;
        if !store.path_for(default_name)?.is_file() {
            info!(
                target: "autonomic",
                preset = default_name,
                "creating default parameter range"
            );
            store.save(default_name, table)?;
        }
        Ok(store)
    }

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> AutonomicResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}{PRESET_SUFFIX}")))
    }

    /// Names of every preset file in the directory, sorted.
    pub fn list(&self) -> AutonomicResult<Vec<String>> {
        self.ensure_dir()?;
        let entries = fs::read_dir(&self.dir).map_err(|source| self.io_error(&self.dir, source))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| self.io_error(&self.dir, source))?;
            if !entry.path().is_file() {
                continue;
            }
            // Names that are not UTF-8 could never be loaded back by name.
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(stem) = strip_preset_suffix(file_name).filter(|s| !s.is_empty()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn read(&self, name: &str) -> AutonomicResult<RangeTable> {
        let path = self.path_for(name)?;
        let content = fs::read_to_string(&path).map_err(|source| self.io_error(&path, source))?;
        RangeTable::from_yaml(&content)
            .map_err(|source| AutonomicError::PresetParse { path, source })
    }

    /// Merges the named preset into `table` and returns the name.
    pub fn load_into(&self, name: &str, table: &mut RangeTable) -> AutonomicResult<String> {
        let preset = self.read(name)?;
        table.merge(preset);
        if table.debug_enabled() {
            log_range_table("loaded", &self.path_for(name)?, table);
        }
        Ok(name.to_string())
    }

    pub fn save(&self, name: &str, table: &RangeTable) -> AutonomicResult<PathBuf> {
        let path = self.path_for(name)?;
        self.ensure_dir()?;
        let yaml = table.to_yaml()?;
        fs::write(&path, yaml).map_err(|source| self.io_error(&path, source))?;
        if table.debug_enabled() {
            log_range_table("saved", &path, table);
        }
        Ok(path)
    }

    fn ensure_dir(&self) -> AutonomicResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| self.io_error(&self.dir, source))
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> AutonomicError {
        AutonomicError::PresetIo {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn strip_preset_suffix(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(PRESET_SUFFIX.len())?;
    if !file_name.is_char_boundary(split) {
        return None;
    }
    let (stem, suffix) = file_name.split_at(split);
    suffix.eq_ignore_ascii_case(PRESET_SUFFIX).then_some(stem)
}

fn validate_name(name: &str) -> AutonomicResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(AutonomicError::InvalidPresetName {
            name: name.to_string(),
        });
    }
    Ok(())
}
