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

//! Maps classifier output onto a single arousal scalar, the autonomic
//! coefficient, used as the interpolation bias for generation parameters.

use crate::types::{AutonomicError, AutonomicResult, EmotionLabel, EmotionScore};
use serde::Serialize;
use std::f64::consts::PI;

/// Per-emotion terms of the coefficient, before summation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionContributions {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
    pub surprise: f64,
}

impl EmotionContributions {
    pub fn from_scores(scores: &[EmotionScore]) -> AutonomicResult<Self> {
        Ok(Self {
            anger: anger_term(score_for(scores, &EmotionLabel::Anger)?),
            disgust: disgust_term(score_for(scores, &EmotionLabel::Disgust)?),
            fear: fear_term(score_for(scores, &EmotionLabel::Fear)?),
            joy: peaked_term(score_for(scores, &EmotionLabel::Joy)?),
            sadness: peaked_term(score_for(scores, &EmotionLabel::Sadness)?),
            surprise: surprise_term(score_for(scores, &EmotionLabel::Surprise)?),
        })
    }

    pub fn terms(&self) -> [(EmotionLabel, f64); 6] {
        [
            (EmotionLabel::Anger, self.anger),
            (EmotionLabel::Disgust, self.disgust),
            (EmotionLabel::Fear, self.fear),
            (EmotionLabel::Joy, self.joy),
            (EmotionLabel::Sadness, self.sadness),
            (EmotionLabel::Surprise, self.surprise),
        ]
    }

    /// Unclamped sum of all terms.
    pub fn total(&self) -> f64 {
        self.terms().iter().map(|(_, term)| term).sum()
    }

    /// The sum with a ceiling of 1.
    pub fn coefficient(&self) -> f64 {
        let total = self.total();
        if total > 1.0 {
            1.0
        } else {
            total
        }
    }
}

/// Computes the autonomic coefficient for one classified text.
pub fn autonomic_coefficient(scores: &[EmotionScore]) -> AutonomicResult<f64> {
    EmotionContributions::from_scores(scores).map(|c| c.coefficient())
}

/// First score carrying `label`. Later duplicates are ignored.
pub fn score_for(scores: &[EmotionScore], label: &EmotionLabel) -> AutonomicResult<f64> {
    let found = scores
        .iter()
        .find(|s| &s.emotion() == label)
        .ok_or_else(|| AutonomicError::MissingEmotion {
            label: label.clone(),
        })?;

    if !found.score.is_finite() {
        return Err(AutonomicError::InvalidScore {
            label: found.label.clone(),
            score: found.score,
        });
    }
    Ok(found.score)
}

fn anger_term(anger: f64) -> f64 {
    anger.powi(3)
}

fn disgust_term(disgust: f64) -> f64 {
    disgust
}

fn fear_term(fear: f64) -> f64 {
    fear.powi(2)
}

// Zero at 0.5, rising towards both extremes; strongest near 1.
fn peaked_term(score: f64) -> f64 {
    0.75 * (score + 0.1) * (PI * score).cos().powi(2)
}

fn surprise_term(surprise: f64) -> f64 {
    surprise
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: f64) -> Vec<EmotionScore> {
        ["anger", "disgust", "fear", "joy", "neutral", "sadness", "surprise"]
            .iter()
            .map(|label| EmotionScore::new(*label, value))
            .collect()
    }

    #[test]
    fn peaked_term_vanishes_at_half() {
        assert!(peaked_term(0.5).abs() < 1e-12);
        assert!((peaked_term(0.0) - 0.075).abs() < 1e-12);
        assert!((peaked_term(1.0) - 0.825).abs() < 1e-12);
    }

    #[test]
    fn zero_scores_give_floor_from_peaked_terms() {
        let c = EmotionContributions::from_scores(&uniform(0.0)).unwrap();
        assert!((c.coefficient() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn saturated_scores_clamp_to_one() {
        let c = EmotionContributions::from_scores(&uniform(1.0)).unwrap();
        assert!(c.total() > 1.0);
        assert_eq!(c.coefficient(), 1.0);
    }
}
