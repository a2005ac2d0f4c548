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

//! Diagnostic dumps emitted when the range table's `print_debug` flag is on.

use crate::buffer::BufferSlot;
use crate::emotion::EmotionContributions;
use crate::generation::GenerationParameters;
use crate::ranges::{describe_value, RangeTable};
use crate::types::EmotionScore;
use std::path::Path;
use tracing::info;

pub const LOG_TARGET: &str = "autonomic";

pub fn log_raw_scores(scores: &[EmotionScore]) {
    for s in scores {
        info!(
            target: LOG_TARGET,
            label = %s.label,
            score = s.score,
            "Raw sentiment output"
        );
    }
}

pub fn log_contributions(contributions: &EmotionContributions) {
    for (label, term) in contributions.terms() {
        info!(
            target: LOG_TARGET,
            emotion = %label,
            contribution = %format!("{term:.3}"),
            "Sentiment component contribution"
        );
    }
    info!(
        target: LOG_TARGET,
        coefficient = %format!("{:.2}", contributions.coefficient()),
        "Autonomic coefficient"
    );
}

pub fn log_range_table(action: &str, path: &Path, table: &RangeTable) {
    info!(
        target: LOG_TARGET,
        action = action,
        path = %path.display(),
        "Parameter ranges"
    );
    for (key, value) in table.iter() {
        info!(
            target: LOG_TARGET,
            key = %key,
            value = %describe_value(value),
            "Parameter range"
        );
    }
}

pub fn log_generation(slot: BufferSlot, params: &GenerationParameters) {
    for (name, value) in params.iter() {
        info!(
            target: LOG_TARGET,
            buffer = %slot,
            parameter = %name,
            value = %value,
            "Generated parameter"
        );
    }
}
