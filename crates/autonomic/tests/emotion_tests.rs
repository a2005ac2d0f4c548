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

use autonomic::emotion::score_for;
use autonomic::{
    autonomic_coefficient, AutonomicError, EmotionContributions, EmotionLabel, EmotionScore,
};

fn scores(pairs: &[(&str, f64)]) -> Vec<EmotionScore> {
    pairs.iter().map(|(l, s)| EmotionScore::new(*l, *s)).collect()
}

fn approx_eq(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-4, "{a} != {b}");
}

#[test]
fn test_uniform_low_scores_breakdown() {
    let input = scores(&[
        ("anger", 0.1),
        ("disgust", 0.1),
        ("fear", 0.1),
        ("joy", 0.1),
        ("neutral", 0.1),
        ("sadness", 0.1),
        ("surprise", 0.1),
    ]);
    let c = EmotionContributions::from_scores(&input).unwrap();
    approx_eq(c.anger, 0.001);
    approx_eq(c.disgust, 0.1);
    approx_eq(c.fear, 0.01);
    approx_eq(c.joy, 0.15 * (0.1 * std::f64::consts::PI).cos().powi(2));
    approx_eq(c.joy, 0.135_68);
    approx_eq(c.sadness, c.joy);
    approx_eq(c.surprise, 0.1);
    approx_eq(c.total(), 0.482_35);
    assert_eq!(c.total(), c.coefficient());
}

#[test]
fn test_neutral_does_not_contribute() {
    let base = [
        ("anger", 0.2),
        ("disgust", 0.05),
        ("fear", 0.3),
        ("joy", 0.25),
        ("sadness", 0.15),
        ("surprise", 0.05),
    ];
    let mut calm = scores(&base);
    calm.push(EmotionScore::new("neutral", 0.0));
    let mut flat = scores(&base);
    flat.push(EmotionScore::new("neutral", 0.99));
    assert_eq!(
        autonomic_coefficient(&calm).unwrap(),
        autonomic_coefficient(&flat).unwrap()
    );
}

#[test]
fn test_neutral_label_is_optional() {
    let input = scores(&[
        ("anger", 0.0),
        ("disgust", 0.0),
        ("fear", 0.0),
        ("joy", 0.5),
        ("sadness", 0.5),
        ("surprise", 0.0),
    ]);
    approx_eq(autonomic_coefficient(&input).unwrap(), 0.0);
}

#[test]
fn test_missing_label_is_an_error() {
    let input = scores(&[
        ("anger", 0.1),
        ("disgust", 0.1),
        ("joy", 0.1),
        ("neutral", 0.1),
        ("sadness", 0.1),
        ("surprise", 0.1),
    ]);
    match autonomic_coefficient(&input) {
        Err(AutonomicError::MissingEmotion { label }) => assert_eq!(label, EmotionLabel::Fear),
        other => panic!("expected missing fear, got {other:?}"),
    }
}

#[test]
fn test_first_duplicate_wins() {
    let input = scores(&[("anger", 0.4), ("anger", 0.9)]);
    approx_eq(score_for(&input, &EmotionLabel::Anger).unwrap(), 0.4);
}

#[test]
fn test_labels_match_case_insensitively() {
    let input = scores(&[("Fear", 0.3)]);
    approx_eq(score_for(&input, &EmotionLabel::Fear).unwrap(), 0.3);
}

#[test]
fn test_non_finite_score_is_rejected() {
    let input = scores(&[
        ("anger", f64::NAN),
        ("disgust", 0.1),
        ("fear", 0.1),
        ("joy", 0.1),
        ("sadness", 0.1),
        ("surprise", 0.1),
    ]);
    assert!(matches!(
        autonomic_coefficient(&input),
        Err(AutonomicError::InvalidScore { .. })
    ));
}

#[test]
fn test_strong_anger_saturates() {
    let input = scores(&[
        ("anger", 1.0),
        ("disgust", 0.4),
        ("fear", 0.0),
        ("joy", 0.0),
        ("sadness", 0.0),
        ("surprise", 0.0),
    ]);
    assert_eq!(autonomic_coefficient(&input).unwrap(), 1.0);
}
