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

//! Host-independent description of the parameter-range sliders.

use crate::ranges::{
    as_number, describe_value, ParameterSpec, RangeTable, HI_SUFFIX, LO_SUFFIX, PARAMETERS,
};
use serde::Serialize;
use tracing::warn;

pub const LO_DESCRIPTION: &str = "min arousal";
pub const HI_DESCRIPTION: &str = "max arousal";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    pub key: String,
    pub label: String,
    pub value: f64,
}

/// A pair of sliders bounding one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderRow {
    pub parameter: &'static str,
    pub minimum: f64,
    pub maximum: f64,
    pub step: f64,
    pub lo: Slider,
    pub hi: Slider,
}

pub fn hi_lo_keys(prefix: &str) -> (String, String) {
    (format!("{prefix}_{HI_SUFFIX}"), format!("{prefix}_{LO_SUFFIX}"))
}

pub fn slider_rows(table: &RangeTable) -> Vec<SliderRow> {
    PARAMETERS.iter().map(|spec| slider_row(spec, table)).collect()
}

pub fn slider_row(spec: &ParameterSpec, table: &RangeTable) -> SliderRow {
    let (hi_key, lo_key) = hi_lo_keys(spec.prefix);
    SliderRow {
        parameter: spec.name,
        minimum: spec.slider_min,
        maximum: spec.slider_max,
        step: spec.step,
        lo: Slider {
            value: slider_value(table, &lo_key),
            label: format!("{} ({LO_DESCRIPTION})", spec.prefix),
            key: lo_key,
        },
        hi: Slider {
            value: slider_value(table, &hi_key),
            label: format!("{} ({HI_DESCRIPTION})", spec.prefix),
            key: hi_key,
        },
    }
}

/// Current value for a slider; anything that is not a number renders as 0.
pub fn slider_value(table: &RangeTable, key: &str) -> f64 {
    match table.get(key) {
        Some(value) => as_number(value).unwrap_or_else(|| {
            warn!(
                target: "autonomic",
                key = key,
                value = %describe_value(value),
                "no usable value for slider, using 0"
            );
            0.0
        }),
        None => {
            warn!(target: "autonomic", key = key, "no default value for slider, using 0");
            0.0
        }
    }
}
