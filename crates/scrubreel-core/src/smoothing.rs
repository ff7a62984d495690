//! Frame-to-frame smoothing of a tracked value toward a target.
//!
//! Every variant reduces to exponential smoothing (`lerp` with a factor in
//! `(0, 1]`), so none of them overshoot the target.

use serde::{Deserialize, Serialize};

/// Chooses the next value of a tracked quantity.
///
/// `velocity` is the signed per-frame change of the raw target, positive while
/// scrolling forward.
pub trait Smoother {
    fn next(&self, current: f64, target: f64, velocity: f64) -> f64;
}

impl<F> Smoother for F
where
    F: Fn(f64, f64, f64) -> f64,
{
    fn next(&self, current: f64, target: f64, velocity: f64) -> f64 {
        self(current, target, velocity)
    }
}

pub fn lerp(from: f64, to: f64, factor: f64) -> f64 {
    from + (to - from) * factor
}

/// Lag threshold above which `factor` replaces the base factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingTier {
    pub above: f64,
    pub factor: f64,
}

/// Configurable smoothing strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SmoothingStrategy {
    Fixed {
        factor: f64,
    },
    /// Picks a snappier factor the further the value lags behind its target.
    Adaptive {
        base: f64,
        #[serde(default)]
        tiers: Vec<SmoothingTier>,
    },
    /// Different factors for scrolling forward and backward.
    Directional {
        forward: f64,
        backward: f64,
    },
    /// Jumps straight to the target once the gap exceeds `snap_distance`.
    Snap {
        factor: f64,
        snap_distance: f64,
    },
}

impl Default for SmoothingStrategy {
    fn default() -> Self {
        SmoothingStrategy::Adaptive {
            base: 0.12,
            tiers: vec![
                SmoothingTier {
                    above: 0.01,
                    factor: 0.18,
                },
                SmoothingTier {
                    above: 0.05,
                    factor: 0.25,
                },
            ],
        }
    }
}

impl SmoothingStrategy {
    /// Factor applied for a step from `current` toward `target`.
    pub fn factor_for(&self, current: f64, target: f64, velocity: f64) -> f64 {
        let lag = (target - current).abs();
        match self {
            SmoothingStrategy::Fixed { factor } => *factor,
            SmoothingStrategy::Adaptive { base, tiers } => tiers
                .iter()
                .filter(|tier| lag > tier.above)
                .max_by(|a, b| a.above.total_cmp(&b.above))
                .map(|tier| tier.factor)
                .unwrap_or(*base),
            SmoothingStrategy::Directional { forward, backward } => {
                let heading = if velocity != 0.0 {
                    velocity
                } else {
                    target - current
                };
                if heading < 0.0 { *backward } else { *forward }
            }
            SmoothingStrategy::Snap {
                factor,
                snap_distance,
            } => {
                if lag > *snap_distance {
                    1.0
                } else {
                    *factor
                }
            }
        }
    }

    /// Returns every factor this strategy can apply, for validation.
    pub fn factors(&self) -> Vec<f64> {
        match self {
            SmoothingStrategy::Fixed { factor } => vec![*factor],
            SmoothingStrategy::Adaptive { base, tiers } => std::iter::once(*base)
                .chain(tiers.iter().map(|tier| tier.factor))
                .collect(),
            SmoothingStrategy::Directional { forward, backward } => vec![*forward, *backward],
            SmoothingStrategy::Snap { factor, .. } => vec![*factor],
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(bad) = self.factors().into_iter().find(|f| !is_valid_factor(*f)) {
            return Err(format!("smoothing factor {bad} is outside (0, 1]"));
        }
        match self {
            SmoothingStrategy::Adaptive { tiers, .. } => {
                if let Some(tier) = tiers
                    .iter()
                    .find(|tier| !tier.above.is_finite() || tier.above < 0.0)
                {
                    return Err(format!("tier threshold {} must be >= 0", tier.above));
                }
            }
            SmoothingStrategy::Snap { snap_distance, .. } => {
                if !snap_distance.is_finite() || *snap_distance <= 0.0 {
                    return Err(format!("snap distance {snap_distance} must be > 0"));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl Smoother for SmoothingStrategy {
    fn next(&self, current: f64, target: f64, velocity: f64) -> f64 {
        let factor = self.factor_for(current, target, velocity).clamp(0.0, 1.0);
        lerp(current, target, factor)
    }
}

pub fn is_valid_factor(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0 && factor <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames_to_converge(strategy: &SmoothingStrategy, target: f64, epsilon: f64) -> usize {
        let mut value = 0.0;
        for frame in 1..=10_000 {
            value = strategy.next(value, target, 0.0);
            assert!(value <= target + 1e-12, "overshoot at frame {frame}");
            if (target - value).abs() < epsilon {
                return frame;
            }
        }
        panic!("did not converge");
    }

    #[test]
    fn fixed_factor_converges_within_bound() {
        let strategy = SmoothingStrategy::Fixed { factor: 0.12 };
        // (1 - 0.12)^n < 0.001 once n >= 55
        let frames = frames_to_converge(&strategy, 1.0, 0.001);
        assert!(frames <= 55, "took {frames} frames");
    }

    #[test]
    fn adaptive_catches_up_faster_than_base() {
        let adaptive = SmoothingStrategy::default();
        let base_only = SmoothingStrategy::Fixed { factor: 0.12 };
        assert!(
            frames_to_converge(&adaptive, 1.0, 0.001) < frames_to_converge(&base_only, 1.0, 0.001)
        );
    }

    #[test]
    fn adaptive_picks_highest_matching_tier() {
        let strategy = SmoothingStrategy::default();
        assert_eq!(strategy.factor_for(0.0, 0.005, 0.0), 0.12);
        assert_eq!(strategy.factor_for(0.0, 0.03, 0.0), 0.18);
        assert_eq!(strategy.factor_for(0.0, 0.4, 0.0), 0.25);
    }

    #[test]
    fn directional_uses_velocity_sign() {
        let strategy = SmoothingStrategy::Directional {
            forward: 0.3,
            backward: 0.1,
        };
        assert_eq!(strategy.factor_for(0.5, 0.6, 0.02), 0.3);
        assert_eq!(strategy.factor_for(0.5, 0.4, -0.02), 0.1);
        assert_eq!(strategy.factor_for(0.5, 0.4, 0.0), 0.1);
    }

    #[test]
    fn snap_jumps_when_far_behind() {
        let strategy = SmoothingStrategy::Snap {
            factor: 0.1,
            snap_distance: 0.3,
        };
        assert_eq!(strategy.next(0.0, 0.9, 0.0), 0.9);
        assert!((strategy.next(0.0, 0.2, 0.0) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn closures_act_as_smoothers() {
        let halfway = |current: f64, target: f64, _velocity: f64| (current + target) / 2.0;
        assert_eq!(halfway.next(0.0, 1.0, 0.0), 0.5);
    }

    #[test]
    fn rejects_out_of_range_factors() {
        assert!(SmoothingStrategy::Fixed { factor: 0.0 }.validate().is_err());
        assert!(SmoothingStrategy::Fixed { factor: 1.5 }.validate().is_err());
        assert!(SmoothingStrategy::Fixed { factor: 1.0 }.validate().is_ok());
        assert!(SmoothingStrategy::default().validate().is_ok());
    }
}
