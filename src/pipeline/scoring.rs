//! Score bucketing.
//!
//! The scorer answers a two-class polarity question with one confidence
//! value. Two cut points turn that into the three business labels; this is
//! a heuristic mapping, not a calibrated probability of interest.

use tracing::debug;

use crate::config::ThresholdConfig;
use crate::pipeline::types::Category;

/// Map a confidence in [0, 1] to a category.
///
/// Above `interested` → Interested, below `not_interested` → NotInterested,
/// anything else (both cut points included) → Neutral.
pub fn classify_by_score(score: f64, cfg: &ThresholdConfig) -> Category {
    let category = if score > cfg.interested() {
        Category::Interested
    } else if score < cfg.not_interested() {
        Category::NotInterested
    } else {
        Category::Neutral
    };
    debug!(score, category = %category, "Bucketed scorer confidence");
    category
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_with_default_thresholds() {
        let cfg = ThresholdConfig::default();
        assert_eq!(classify_by_score(0.95, &cfg), Category::Interested);
        assert_eq!(classify_by_score(0.5, &cfg), Category::Neutral);
        assert_eq!(classify_by_score(0.05, &cfg), Category::NotInterested);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let cfg = ThresholdConfig::default();
        assert_eq!(classify_by_score(0.7, &cfg), Category::Neutral);
        assert_eq!(classify_by_score(0.3, &cfg), Category::Neutral);
    }

    #[test]
    fn extremes() {
        let cfg = ThresholdConfig::default();
        assert_eq!(classify_by_score(1.0, &cfg), Category::Interested);
        assert_eq!(classify_by_score(0.0, &cfg), Category::NotInterested);
    }

    #[test]
    fn ranges_partition_unit_interval() {
        // Sweep [0, 1]: categories change exactly twice, in order, with no
        // overlap and no gap.
        let cfg = ThresholdConfig::default();
        let mut seen = Vec::new();
        for i in 0..=1000 {
            let s = i as f64 / 1000.0;
            let c = classify_by_score(s, &cfg);
            if seen.last() != Some(&c) {
                seen.push(c);
            }
            let expected = if s > 0.7 {
                Category::Interested
            } else if s < 0.3 {
                Category::NotInterested
            } else {
                Category::Neutral
            };
            assert_eq!(c, expected, "score {s}");
        }
        assert_eq!(
            seen,
            vec![
                Category::NotInterested,
                Category::Neutral,
                Category::Interested
            ]
        );
    }

    #[test]
    fn custom_thresholds() {
        let cfg = ThresholdConfig::new(0.9, 0.1).unwrap();
        assert_eq!(classify_by_score(0.8, &cfg), Category::Neutral);
        assert_eq!(classify_by_score(0.2, &cfg), Category::Neutral);
        assert_eq!(classify_by_score(0.91, &cfg), Category::Interested);
    }
}
