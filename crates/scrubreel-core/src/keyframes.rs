//! Scroll-linked property tracks.
//!
//! A track maps scroll progress to a value through keyframes, interpolating
//! linearly between neighbours and holding the first/last value outside them.

pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone)]
pub struct Track {
    keys: Vec<(f64, f64)>,
    easing: fn(f64) -> f64,
}

impl Track {
    /// Builds a track from `(progress, value)` pairs. Keys are sorted by
    /// progress and non-finite pairs are dropped.
    pub fn new(keys: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut keys: Vec<(f64, f64)> = keys
            .into_iter()
            .filter(|(at, value)| at.is_finite() && value.is_finite())
            .collect();
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            keys,
            easing: linear,
        }
    }

    /// Applies `easing` to the local position inside each segment.
    pub fn with_easing(mut self, easing: fn(f64) -> f64) -> Self {
        self.easing = easing;
        self
    }

    pub fn sample(&self, progress: f64) -> f64 {
        let Some(&(first_at, first_value)) = self.keys.first() else {
            return 0.0;
        };
        let Some(&(last_at, last_value)) = self.keys.last() else {
            return 0.0;
        };
        if !progress.is_finite() || progress <= first_at {
            return first_value;
        }
        if progress >= last_at {
            return last_value;
        }
        for pair in self.keys.windows(2) {
            let (from_at, from_value) = pair[0];
            let (to_at, to_value) = pair[1];
            if progress <= to_at {
                let span = to_at - from_at;
                if span <= f64::EPSILON {
                    return to_value;
                }
                let local = (self.easing)((progress - from_at) / span);
                return from_value + (to_value - from_value) * local;
            }
        }
        last_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_values_outside_keys() {
        let scale = Track::new([(0.0, 0.0), (0.7, 6.0)]);
        assert_eq!(scale.sample(-0.5), 0.0);
        assert_eq!(scale.sample(0.9), 6.0);
        assert!((scale.sample(0.35) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn interpolates_multi_segment_tracks() {
        let opacity = Track::new([(0.95, 0.0), (0.0, 0.0), (0.1, 1.0), (0.6, 1.0)]);
        assert!((opacity.sample(0.05) - 0.5).abs() < 1e-9);
        assert_eq!(opacity.sample(0.3), 1.0);
        assert!((opacity.sample(0.775) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn easing_bends_segment_but_keeps_endpoints() {
        let eased = Track::new([(0.0, 0.0), (1.0, 10.0)]).with_easing(ease_out_quad);
        assert_eq!(eased.sample(0.0), 0.0);
        assert_eq!(eased.sample(1.0), 10.0);
        assert!(eased.sample(0.5) > 5.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_track_samples_zero() {
        assert_eq!(Track::new(Vec::<(f64, f64)>::new()).sample(0.5), 0.0);
    }
}
