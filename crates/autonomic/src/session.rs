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

//! Explicit state behind the settings surface and its event handlers.

use crate::buffer::{BufferSlot, BufferToggle, BufferWriter};
use crate::classifier::EmotionClassifier;
use crate::config::AutonomicConfig;
use crate::emotion::EmotionContributions;
use crate::generation::{make_parameters, GenerationParameters};
use crate::logging::{log_contributions, log_generation, log_raw_scores};
use crate::presets::PresetStore;
use crate::ranges::{spec_for_key, RangeTable};
use crate::settings::{slider_rows, SliderRow};
use crate::types::{AutonomicError, AutonomicResult, EmotionScore};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Result of one update: which buffer now holds the new parameters and
/// the bit the host should pass back next time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateOutcome {
    pub coefficient: f64,
    pub parameters: GenerationParameters,
    pub buffer: BufferSlot,
    pub path: PathBuf,
    pub next_toggle: u8,
}

#[derive(Debug, Clone)]
pub struct AutonomicSession {
    ranges: RangeTable,
    toggle: BufferToggle,
    presets: PresetStore,
    buffers: BufferWriter,
}

impl AutonomicSession {
    /// Starts from the built-in ranges and makes sure the default preset
    /// exists on disk.
    pub fn open(config: &AutonomicConfig) -> AutonomicResult<Self> {
        let ranges = RangeTable::default();
        let presets = PresetStore::open(&config.ranges_dir, &config.default_preset, &ranges)?;
        Ok(Self {
            ranges,
            toggle: BufferToggle::new(),
            presets,
            buffers: BufferWriter::new(&config.presets_dir),
        })
    }

    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    pub fn toggle(&self) -> BufferToggle {
        self.toggle
    }

    pub fn set_toggle(&mut self, toggle: BufferToggle) {
        self.toggle = toggle;
    }

    pub fn debug_enabled(&self) -> bool {
        self.ranges.debug_enabled()
    }

    pub fn update(
        &mut self,
        text: &str,
        classifier: &dyn EmotionClassifier,
    ) -> AutonomicResult<UpdateOutcome> {
        let scores = classifier.classify(text)?;
        self.update_from_scores(&scores)
    }

    pub fn update_from_scores(
        &mut self,
        scores: &[EmotionScore],
    ) -> AutonomicResult<UpdateOutcome> {
        let debug = self.debug_enabled();
        if debug {
            log_raw_scores(scores);
        }

        let contributions = EmotionContributions::from_scores(scores)?;
        if debug {
            log_contributions(&contributions);
        }

        let coefficient = contributions.coefficient();
        let parameters = make_parameters(&self.ranges, coefficient)?;

        let mut toggle = self.toggle;
        let (buffer, next_toggle) = toggle.advance();
        let path = self.buffers.write(buffer, &parameters)?;
        self.toggle = toggle;
        if debug {
            log_generation(buffer, &parameters);
        }
        info!(
            target: "autonomic",
            coefficient,
            buffer = %buffer,
            "autonomic update"
        );

        Ok(UpdateOutcome {
            coefficient,
            parameters,
            buffer,
            path,
            next_toggle,
        })
    }

    /// Slider change for a `<prefix>_lo` / `<prefix>_hi` key.
    pub fn set_bound(&mut self, key: &str, value: f64) -> AutonomicResult<()> {
        let (spec, side) = spec_for_key(key).ok_or_else(|| AutonomicError::UnknownParameter {
            key: key.to_string(),
        })?;
        if !value.is_finite() || !spec.accepts(value) {
            return Err(AutonomicError::OutOfRange {
                key: key.to_string(),
                value,
                min: spec.slider_min,
                max: spec.slider_max,
            });
        }
        self.ranges.set_bound(spec, side, value);
        Ok(())
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.ranges.set_debug(enabled);
    }

    /// Loads a saved range into the live table and returns the name with
    /// refreshed slider rows.
    pub fn select_range(&mut self, name: &str) -> AutonomicResult<(String, Vec<SliderRow>)> {
        let name = self.presets.load_into(name, &mut self.ranges)?;
        Ok((name, slider_rows(&self.ranges)))
    }

    /// Saves the live table and returns the refreshed preset list.
    pub fn save_range(&self, name: &str) -> AutonomicResult<Vec<String>> {
        self.presets.save(name, &self.ranges)?;
        self.presets.list()
    }

    pub fn preset_names(&self) -> AutonomicResult<Vec<String>> {
        self.presets.list()
    }

    pub fn slider_rows(&self) -> Vec<SliderRow> {
        slider_rows(&self.ranges)
    }
}
