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

use crate::ranges::{ParameterKind, RangeTable, PARAMETERS};
use crate::types::AutonomicResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Float(f64),
}

impl ParameterValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            ParameterValue::Integer(v) => *v as f64,
            ParameterValue::Float(v) => *v,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(v) => write!(f, "{v}"),
            ParameterValue::Float(v) => write!(f, "{v:.2}"),
        }
    }
}

/// Concrete generation settings handed to the host through a buffer file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationParameters {
    values: BTreeMap<String, ParameterValue>,
}

impl GenerationParameters {
    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_yaml(&self) -> AutonomicResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Interpolates every registered parameter between its configured bounds.
pub fn make_parameters(table: &RangeTable, bias: f64) -> AutonomicResult<GenerationParameters> {
    let mut values = BTreeMap::new();
    for spec in &PARAMETERS {
        let bounds = table.bounds(spec)?;
        let value = match spec.kind {
            ParameterKind::Float => ParameterValue::Float(bounds.interpolate(bias)),
            ParameterKind::Integer => {
                ParameterValue::Integer(bounds.truncated().interpolate(bias).trunc() as i64)
            }
        };
        values.insert(spec.name.to_string(), value);
    }
    Ok(GenerationParameters { values })
}
