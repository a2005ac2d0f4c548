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

use crate::config::ClassifierConfig;
use crate::types::{AutonomicError, AutonomicResult, EmotionScore};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Number of labels requested from the remote model so that every emotion
/// is scored rather than only the top one.
pub const EMOTION_TOP_K: usize = 7;

pub trait EmotionClassifier {
    fn classify(&self, text: &str) -> AutonomicResult<Vec<EmotionScore>>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifierPayload {
    Single(Vec<EmotionScore>),
    Batch(Vec<Vec<EmotionScore>>),
}

/// Parses text-classification output, either a flat list of
/// `{label, score}` objects or a batch whose first entry is used.
pub fn parse_scores(body: &str) -> AutonomicResult<Vec<EmotionScore>> {
    let payload: ClassifierPayload = serde_json::from_str(body).map_err(|e| {
        AutonomicError::Classifier(format!(
            "unexpected classifier response ({e}): {}",
            truncate(body)
        ))
    })?;
    match payload {
        ClassifierPayload::Single(scores) => Ok(scores),
        ClassifierPayload::Batch(batch) => batch
            .into_iter()
            .next()
            .ok_or_else(|| AutonomicError::Classifier("classifier returned an empty batch".into())),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

/// Calls a hosted text-classification endpoint.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    endpoint: String,
    api_token: Option<String>,
    client: Client,
}

impl HttpClassifier {
    pub fn new(config: &ClassifierConfig) -> AutonomicResult<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| AutonomicError::Configuration("classifier endpoint is not set".into()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AutonomicError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            endpoint,
            api_token: config.api_token.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EmotionClassifier for HttpClassifier {
    fn classify(&self, text: &str) -> AutonomicResult<Vec<EmotionScore>> {
        let body = json!({
            "inputs": text,
            "parameters": { "top_k": EMOTION_TOP_K },
        });
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        debug!(
            target: "autonomic",
            endpoint = %self.endpoint,
            chars = text.len(),
            "classifying text"
        );
        let response = request.send()?;
        let status = response.status();
        let content = response.text()?;
        if !status.is_success() {
            return Err(AutonomicError::Classifier(format!(
                "classifier returned {status}: {}",
                truncate(&content)
            )));
        }
        parse_scores(&content)
    }
}

/// Returns the same scores for every text; used for precomputed output.
#[derive(Debug, Clone, Default)]
pub struct StaticClassifier {
    scores: Vec<EmotionScore>,
}

impl StaticClassifier {
    pub fn new(scores: Vec<EmotionScore>) -> Self {
        Self { scores }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> AutonomicResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AutonomicError::Classifier(format!("failed to read scores '{}': {e}", path.display()))
        })?;
        Ok(Self::new(parse_scores(&content)?))
    }
}

impl EmotionClassifier for StaticClassifier {
    fn classify(&self, _text: &str) -> AutonomicResult<Vec<EmotionScore>> {
        Ok(self.scores.clone())
    }
}
