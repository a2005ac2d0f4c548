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

pub mod buffer;
pub mod classifier;
pub mod config;
pub mod emotion;
pub mod generation;
pub mod logging;
pub mod presets;
pub mod ranges;
pub mod session;
pub mod settings;
pub mod types;

pub use buffer::{BufferSlot, BufferToggle, BufferWriter};
pub use classifier::{parse_scores, EmotionClassifier, HttpClassifier, StaticClassifier};
pub use config::{AutonomicConfig, ClassifierConfig};
pub use emotion::{autonomic_coefficient, EmotionContributions};
pub use generation::{make_parameters, GenerationParameters, ParameterValue};
pub use presets::{PresetStore, DEFAULT_PRESET};
pub use ranges::{range_bias, Bounds, ParameterKind, ParameterSpec, RangeTable, PARAMETERS};
pub use session::{AutonomicSession, UpdateOutcome};
pub use settings::{slider_rows, SliderRow};
pub use types::{AutonomicError, AutonomicResult, EmotionLabel, EmotionScore};
