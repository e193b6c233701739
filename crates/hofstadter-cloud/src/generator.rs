// ─────────────────────────────────────────────────────────────────────
// Hofstadter Heart Kernel — Point-Cloud Generator
// ─────────────────────────────────────────────────────────────────────
//! Generation pass:
//!   1. Validate config
//!   2. Build a(n), Q(n) tables over 1..=n_max (preparatory pass)
//!   3. Map each scanned index to a position
//!   4. Drop outliers
//!   5. Classify and color the rest
//!   6. Bounding box over the kept positions
//!   7. Camera suggestion from the bounding box

use serde::{Deserialize, Serialize};

use hofstadter_seq::SequenceEngine;
use hofstadter_types::{
    BoundingBox, CloudConfig, GeneratedPoint, HeartError, HeartResult, ViewSuggestion,
};

use crate::color::ColorClass;
use crate::mapping::{is_outlier, map_index};
use crate::view::derive_view;

/// Counters for one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub scanned: usize,
    pub emitted: usize,
    pub rejected: usize,
    pub concordant: usize,
    pub discordant: usize,
}

/// Output handed to the external renderer.
///
/// `bounds` and `view` are derived once from `points`; they are a
/// snapshot, not kept in sync with later edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    pub points: Vec<GeneratedPoint>,
    pub bounds: BoundingBox,
    pub view: ViewSuggestion,
    pub stats: GenerationStats,
}

/// Owns the sequence engine and runs generation passes over it.
pub struct CloudGenerator {
    config: CloudConfig,
    engine: SequenceEngine,
}

impl CloudGenerator {
    pub fn new(config: CloudConfig) -> HeartResult<Self> {
        config.validate()?;
        let capacity = usize::try_from(config.n_max)
            .map_err(|_| HeartError::Config(format!("n_max {} out of range", config.n_max)))?;
        Ok(Self {
            engine: SequenceEngine::with_capacity(capacity),
            config,
        })
    }

    pub fn default_params() -> HeartResult<Self> {
        Self::new(CloudConfig::default())
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    pub fn engine(&self) -> &SequenceEngine {
        &self.engine
    }

    /// Run one full generation pass.
    ///
    /// Fails with `HeartError::EmptyResult` if the filter rejects every
    /// scanned index.
    pub fn generate(&mut self) -> HeartResult<PointCloud> {
        let cfg = &self.config;
        let step = usize::try_from(cfg.step)
            .map_err(|_| HeartError::Config(format!("step {} out of range", cfg.step)))?;

        log::info!(
            "Generating Hofstadter point cloud: n_max={}, step={}",
            cfg.n_max,
            cfg.step
        );
        let tables = self.engine.build_tables(cfg.n_max)?;

        let concordant = ColorClass::Concordant.rgb();
        let discordant = ColorClass::Discordant.rgb();

        let mut stats = GenerationStats::default();
        let mut points = Vec::new();
        if points.try_reserve(tables.a.values().len() / step + 1).is_err() {
            log::warn!("Point buffer not pre-reservable for n_max={}; growing on demand", cfg.n_max);
        }

        for n in (1..=cfg.n_max).step_by(step) {
            stats.scanned += 1;
            let sample = map_index(&tables, cfg, n)?;
            if is_outlier(cfg, sample.position) {
                stats.rejected += 1;
                continue;
            }

            let color = match ColorClass::classify(sample.correlation, cfg.correlation_threshold) {
                ColorClass::Concordant => {
                    stats.concordant += 1;
                    concordant
                }
                ColorClass::Discordant => {
                    stats.discordant += 1;
                    discordant
                }
            };
            points.push(GeneratedPoint {
                n,
                position: sample.position,
                color,
            });
        }
        stats.emitted = points.len();

        let Some(bounds) = BoundingBox::from_positions(points.iter().map(|p| p.position)) else {
            log::warn!(
                "No points generated: all {} indices rejected (n_max={}, step={})",
                stats.rejected,
                cfg.n_max,
                cfg.step
            );
            return Err(HeartError::EmptyResult {
                n_max: cfg.n_max,
                step: cfg.step,
                rejected: stats.rejected,
            });
        };
        let view = derive_view(&bounds, cfg.camera_distance_factor);

        log::info!(
            "Generated {} points ({} rejected, {} concordant, {} discordant)",
            stats.emitted,
            stats.rejected,
            stats.concordant,
            stats.discordant
        );
        log::debug!(
            "Bounds: min={:?}, max={:?}, center={:?}, size={:?}",
            bounds.min.to_array(),
            bounds.max.to_array(),
            bounds.center().to_array(),
            bounds.size().to_array()
        );
        log::debug!(
            "Suggested camera: position={:?}, target={:?}",
            view.position.to_array(),
            view.target.to_array()
        );

        Ok(PointCloud {
            points,
            bounds,
            view,
            stats,
        })
    }
}

/// Generate with default constants over the given range.
pub fn generate(n_max: i64, step: i64) -> HeartResult<PointCloud> {
    generate_with(CloudConfig::with_range(n_max, step))
}

pub fn generate_with(config: CloudConfig) -> HeartResult<PointCloud> {
    CloudGenerator::new(config)?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_range() {
        assert!(matches!(generate(0, 1), Err(HeartError::Config(_))));
        assert!(matches!(generate(10, 0), Err(HeartError::Config(_))));
        assert!(matches!(generate(-4, -1), Err(HeartError::Config(_))));
    }

    #[test]
    fn test_huge_range_fails_without_panicking() {
        assert!(matches!(
            generate(i64::MAX, 1),
            Err(HeartError::Capacity { .. })
        ));
        assert!(generate(i64::MAX, i64::MAX).is_err());
    }

    #[test]
    fn test_single_index() {
        let cloud = generate(1, 1).unwrap();
        assert_eq!(cloud.points.len(), 1);
        let p = cloud.points[0];
        assert_eq!(p.n, 1);
        assert!((p.position.x - 0.015).abs() < 1e-12);
        assert_eq!(p.position.y, -0.125);
        assert_eq!(p.position.z, 0.0);
        assert_eq!(cloud.bounds.min, cloud.bounds.max);
        assert_eq!(cloud.view.position, cloud.view.target);
    }

    #[test]
    fn test_hand_checked_filter() {
        // n_max = 20: |a(n) - Q(n)| >= 2 at n = 5, 8, 11, 12, 16, 17, 20,
        // which puts |y| >= 0.25 above a 0.2 limit.
        let cfg = CloudConfig {
            y_limit: 0.2,
            ..CloudConfig::with_range(20, 1)
        };
        let cloud = generate_with(cfg).unwrap();
        let kept: Vec<i64> = cloud.points.iter().map(|p| p.n).collect();
        assert_eq!(kept, vec![1, 2, 3, 4, 6, 7, 9, 10, 13, 14, 15, 18, 19]);
        assert_eq!(cloud.stats.rejected, 7);
        assert_eq!(cloud.stats.scanned, 20);
    }

    #[test]
    fn test_step_selects_indices() {
        let cloud = generate(20, 3).unwrap();
        let kept: Vec<i64> = cloud.points.iter().map(|p| p.n).collect();
        assert_eq!(kept, vec![1, 4, 7, 10, 13, 16, 19]);
    }

    #[test]
    fn test_filter_matches_independent_scan() {
        let cfg = CloudConfig::with_range(5000, 1);
        let cloud = generate_with(cfg.clone()).unwrap();
        assert_eq!(cloud.stats.rejected, 43);

        let tables = SequenceEngine::new().build_tables(5000).unwrap();
        let expected: Vec<i64> = (1..=5000)
            .filter(|&n| !is_outlier(&cfg, map_index(&tables, &cfg, n).unwrap().position))
            .collect();
        let kept: Vec<i64> = cloud.points.iter().map(|p| p.n).collect();
        assert_eq!(kept, expected);
        assert!(cloud.points.iter().all(|p| !is_outlier(&cfg, p.position)));
    }

    #[test]
    fn test_default_run() {
        let cloud = CloudGenerator::default_params().unwrap().generate().unwrap();
        assert_eq!(cloud.stats.scanned, 10_750);
        assert_eq!(cloud.stats.emitted, 9_923);
        assert_eq!(cloud.stats.rejected, 827);
        assert_eq!(cloud.stats.concordant, 9_923);
        assert!(cloud.points.iter().all(|p| p.n != 3314));
    }

    #[test]
    fn test_empty_result_is_distinct() {
        let cfg = CloudConfig {
            x_limit: 1e-9,
            ..CloudConfig::with_range(3, 1)
        };
        assert_eq!(
            generate_with(cfg).unwrap_err(),
            HeartError::EmptyResult {
                n_max: 3,
                step: 1,
                rejected: 3,
            }
        );
    }

    #[test]
    fn test_colors_are_binary() {
        let cfg = CloudConfig {
            correlation_threshold: 0.05,
            ..CloudConfig::with_range(500, 1)
        };
        let cloud = generate_with(cfg).unwrap();
        let pink = ColorClass::Concordant.rgb();
        let blue = ColorClass::Discordant.rgb();
        assert!(cloud.points.iter().all(|p| p.color == pink || p.color == blue));
        assert!(cloud.stats.concordant > 0);
        assert!(cloud.stats.discordant > 0);
        assert_eq!(
            cloud.stats.concordant + cloud.stats.discordant,
            cloud.stats.emitted
        );
    }

    #[test]
    fn test_bounds_enclose_points() {
        let cloud = generate(3000, 2).unwrap();
        assert!(cloud.points.iter().all(|p| cloud.bounds.contains(p.position)));
        assert_eq!(cloud.view.target, cloud.bounds.center());
        let distance = cloud.bounds.max_dim() * 3.0;
        let expected = cloud.bounds.center() + crate::view::VIEW_DIRECTION * distance;
        assert_eq!(cloud.view.position, expected);
    }

    #[test]
    fn test_deterministic() {
        let first = generate(2000, 1).unwrap();
        let second = generate(2000, 1).unwrap();
        assert_eq!(first, second);

        let mut generator = CloudGenerator::new(CloudConfig::with_range(2000, 1)).unwrap();
        let third = generator.generate().unwrap();
        let derived = generator.engine().stats().derivations_a;
        let fourth = generator.generate().unwrap();
        assert_eq!(third, fourth);
        assert_eq!(generator.engine().stats().derivations_a, derived);
        assert_eq!(first, fourth);
    }
}
