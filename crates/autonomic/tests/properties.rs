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

use autonomic::{autonomic_coefficient, range_bias, EmotionScore};
use proptest::prelude::*;

fn score_set(values: [f64; 6]) -> Vec<EmotionScore> {
    ["anger", "disgust", "fear", "joy", "sadness", "surprise"]
        .iter()
        .zip(values)
        .map(|(label, score)| EmotionScore::new(*label, score))
        .collect()
}

fn unit_scores() -> impl Strategy<Value = [f64; 6]> {
    prop::array::uniform6(0.0f64..=1.0)
}

proptest! {
    #[test]
    fn coefficient_stays_in_unit_interval(values in unit_scores()) {
        let c = autonomic_coefficient(&score_set(values)).unwrap();
        prop_assert!((0.0..=1.0).contains(&c), "coefficient {} out of range", c);
    }

    #[test]
    fn coefficient_is_monotone_in_linear_and_power_terms(
        values in unit_scores(),
        index in prop::sample::select(vec![0usize, 1, 2, 5]),
        delta in 0.0f64..=1.0,
    ) {
        let before = autonomic_coefficient(&score_set(values)).unwrap();
        let mut raised = values;
        raised[index] = (raised[index] + delta).min(1.0);
        let after = autonomic_coefficient(&score_set(raised)).unwrap();
        prop_assert!(after + 1e-12 >= before, "{} dropped to {}", before, after);
    }

    #[test]
    fn interpolation_hits_bounds_and_is_linear(
        lo in -10.0f64..10.0,
        hi in -10.0f64..10.0,
        bias in 0.0f64..=1.0,
    ) {
        prop_assert_eq!(range_bias([lo, hi], 0.0), lo);
        prop_assert!((range_bias([lo, hi], 1.0) - hi).abs() < 1e-9);
        let mid = range_bias([lo, hi], 0.5);
        prop_assert!((mid - (lo + hi) / 2.0).abs() < 1e-9);
        let v = range_bias([lo, hi], bias);
        prop_assert!(v >= lo.min(hi) - 1e-9 && v <= lo.max(hi) + 1e-9);
    }
}
