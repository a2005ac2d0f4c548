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

use crate::types::{AutonomicError, AutonomicResult};
use serde::{Deserialize, Serialize};
use serde_yaml::{Number, Value};
use std::collections::BTreeMap;

pub const DEBUG_KEY: &str = "print_debug";
pub const LO_SUFFIX: &str = "lo";
pub const HI_SUFFIX: &str = "hi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Float,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundSide {
    Lo,
    Hi,
}

/// A generation parameter driven by the coefficient, with its range keys,
/// defaults and slider limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub prefix: &'static str,
    pub kind: ParameterKind,
    pub default_lo: f64,
    pub default_hi: f64,
    pub slider_min: f64,
    pub slider_max: f64,
    pub step: f64,
}

impl ParameterSpec {
    pub fn lo_key(&self) -> String {
        format!("{}_{LO_SUFFIX}", self.prefix)
    }

    pub fn hi_key(&self) -> String {
        format!("{}_{HI_SUFFIX}", self.prefix)
    }

    pub fn key(&self, side: BoundSide) -> String {
        match side {
            BoundSide::Lo => self.lo_key(),
            BoundSide::Hi => self.hi_key(),
        }
    }

    pub fn accepts(&self, value: f64) -> bool {
        value >= self.slider_min && value <= self.slider_max
    }

    fn default_value(&self, side: BoundSide) -> Value {
        let raw = match side {
            BoundSide::Lo => self.default_lo,
            BoundSide::Hi => self.default_hi,
        };
        number_value(self.kind, raw)
    }
}

pub static PARAMETERS: [ParameterSpec; 6] = [
    ParameterSpec {
        name: "temperature",
        prefix: "temp",
        kind: ParameterKind::Float,
        default_lo: 0.4,
        default_hi: 1.1,
        slider_min: 0.05,
        slider_max: 2.0,
        step: 0.05,
    },
    ParameterSpec {
        name: "typical_p",
        prefix: "typical_p",
        kind: ParameterKind::Float,
        default_lo: 0.8,
        default_hi: 0.2,
        slider_min: 0.0,
        slider_max: 1.0,
        step: 0.05,
    },
    ParameterSpec {
        name: "repetition_penalty",
        prefix: "repetition_penalty",
        kind: ParameterKind::Float,
        default_lo: 1.15,
        default_hi: 1.1,
        slider_min: 0.0,
        slider_max: 2.0,
        step: 0.05,
    },
    ParameterSpec {
        name: "encoder_repetition_penalty",
        prefix: "encoder_repetition_penalty",
        kind: ParameterKind::Float,
        default_lo: 1.05,
        default_hi: 1.0,
        slider_min: 0.0,
        slider_max: 2.0,
        step: 0.05,
    },
    ParameterSpec {
        name: "penalty_alpha",
        prefix: "penalty_alpha",
        kind: ParameterKind::Float,
        default_lo: 2.5,
        default_hi: 1.0,
        slider_min: 0.0,
        slider_max: 5.0,
        step: 0.05,
    },
    ParameterSpec {
        name: "top_k",
        prefix: "top_k",
        kind: ParameterKind::Integer,
        default_lo: 4.0,
        default_hi: 10.0,
        slider_min: 0.0,
        slider_max: 75.0,
        step: 1.0,
    },
];

/// Resolves a flat range key such as `temp_lo` to its parameter and side.
pub fn spec_for_key(key: &str) -> Option<(&'static ParameterSpec, BoundSide)> {
    PARAMETERS.iter().find_map(|spec| {
        if key == spec.lo_key() {
            Some((spec, BoundSide::Lo))
        } else if key == spec.hi_key() {
            Some((spec, BoundSide::Hi))
        } else {
            None
        }
    })
}

pub fn range_bias(bounds: [f64; 2], bias: f64) -> f64 {
    bounds[0] + bias * (bounds[1] - bounds[0])
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lo: f64,
    pub hi: f64,
}

impl Bounds {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn interpolate(&self, bias: f64) -> f64 {
        range_bias([self.lo, self.hi], bias)
    }

    pub fn truncated(&self) -> Self {
        Self {
            lo: self.lo.trunc(),
            hi: self.hi.trunc(),
        }
    }
}

/// Live parameter-range table: flat keys (`temp_lo`, `top_k_hi`,
/// `print_debug`, ...) to YAML scalars. Unrecognised entries are carried
/// through untouched so a preset survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeTable {
    entries: BTreeMap<String, Value>,
}

impl Default for RangeTable {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(DEBUG_KEY.to_string(), Value::Bool(true));
        for spec in &PARAMETERS {
            for side in [BoundSide::Lo, BoundSide::Hi] {
                entries.insert(spec.key(side), spec.default_value(side));
            }
        }
        Self { entries }
    }
}

impl RangeTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Stores a bound, keeping integer parameters as YAML integers when the
    /// value is whole.
    pub fn set_bound(&mut self, spec: &ParameterSpec, side: BoundSide, value: f64) {
        self.entries.insert(spec.key(side), number_value(spec.kind, value));
    }

    pub fn numeric(&self, key: &str) -> AutonomicResult<f64> {
        let value = self
            .entries
            .get(key)
            .ok_or_else(|| AutonomicError::MissingRange {
                key: key.to_string(),
            })?;
        as_number(value).ok_or_else(|| AutonomicError::NonNumericBound {
            key: key.to_string(),
            value: describe_value(value),
        })
    }

    pub fn bounds(&self, spec: &ParameterSpec) -> AutonomicResult<Bounds> {
        Ok(Bounds::new(
            self.numeric(&spec.lo_key())?,
            self.numeric(&spec.hi_key())?,
        ))
    }

    /// Overlays `other` onto this table; keys absent from `other` are kept.
    pub fn merge(&mut self, other: RangeTable) {
        self.entries.extend(other.entries);
    }

    pub fn debug_enabled(&self) -> bool {
        self.entries
            .get(DEBUG_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.entries.insert(DEBUG_KEY.to_string(), Value::Bool(enabled));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_yaml(&self) -> AutonomicResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Numeric view of a stored value. Booleans are not numbers here.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

pub fn describe_value(value: &Value) -> String {
    match serde_yaml::to_string(value) {
        Ok(s) => s.trim_end().to_string(),
        Err(_) => format!("{value:?}"),
    }
}

fn number_value(kind: ParameterKind, raw: f64) -> Value {
    match kind {
        ParameterKind::Integer if raw.fract() == 0.0 => Value::Number(Number::from(raw as i64)),
        _ => Value::Number(Number::from(raw)),
    }
}
