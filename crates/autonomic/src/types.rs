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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Labels emitted by the emotion classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLabel {
    Anger,
    Disgust,
    Fear,
    Joy,
    Neutral,
    Sadness,
    Surprise,
    Custom(String),
}

impl EmotionLabel {
    pub fn as_str(&self) -> &str {
        match self {
            EmotionLabel::Anger => "anger",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Joy => "joy",
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Sadness => "sadness",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Custom(s) => s.as_str(),
        }
    }
}

impl From<&str> for EmotionLabel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "anger" => EmotionLabel::Anger,
            "disgust" => EmotionLabel::Disgust,
            "fear" => EmotionLabel::Fear,
            "joy" => EmotionLabel::Joy,
            "neutral" => EmotionLabel::Neutral,
            "sadness" => EmotionLabel::Sadness,
            "surprise" => EmotionLabel::Surprise,
            _ => EmotionLabel::Custom(s.to_string()),
        }
    }
}

impl From<String> for EmotionLabel {
    fn from(s: String) -> Self {
        EmotionLabel::from(s.as_str())
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `{label, score}` pair as produced by a text-classification pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

impl EmotionScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    pub fn emotion(&self) -> EmotionLabel {
        EmotionLabel::from(self.label.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AutonomicError {
    #[error("Classifier output is missing the '{label}' emotion")]
    MissingEmotion { label: EmotionLabel },

    #[error("Score for '{label}' is not a finite number: {score}")]
    InvalidScore { label: String, score: f64 },

    #[error("Parameter range '{key}' is not defined")]
    MissingRange { key: String },

    #[error("Parameter range '{key}' holds a non-numeric value: {value}")]
    NonNumericBound { key: String, value: String },

    #[error("Unknown parameter range key '{key}'")]
    UnknownParameter { key: String },

    #[error("Value {value} for '{key}' is outside [{min}, {max}]")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid preset name '{name}'")]
    InvalidPresetName { name: String },

    #[error("Failed to access preset file '{}': {source}", .path.display())]
    PresetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preset file '{}': {source}", .path.display())]
    PresetParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write buffer '{}': {source}", .path.display())]
    BufferIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Serialisation error: {0}")]
    Serialisation(String),
}

pub type AutonomicResult<T> = Result<T, AutonomicError>;

impl From<serde_yaml::Error> for AutonomicError {
    fn from(err: serde_yaml::Error) -> Self {
        AutonomicError::Serialisation(format!("YAML error: {err}"))
    }
}

impl From<reqwest::Error> for AutonomicError {
    fn from(err: reqwest::Error) -> Self {
        AutonomicError::Classifier(err.to_string())
    }
}
