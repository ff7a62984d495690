use scrubreel_core::Track;
use scrubreel_core::keyframes::{ease_out_quad, smoothstep};

/// Scroll-linked opacity and size tracks for the copy drawn over the media.
#[derive(Debug, Clone)]
pub struct OverlayTracks {
    pub(in crate::app) title_opacity: Track,
    pub(in crate::app) title_scale: Track,
    pub(in crate::app) subtitle_opacity: Track,
    pub(in crate::app) body_opacity: Track,
}

impl Default for OverlayTracks {
    fn default() -> Self {
        OverlayTracks {
            title_opacity: Track::new([(0.0, 1.0), (0.25, 1.0), (0.35, 0.0)]),
            title_scale: Track::new([(0.0, 1.0), (0.35, 1.3)]).with_easing(ease_out_quad),
            subtitle_opacity: Track::new([(0.3, 0.0), (0.4, 1.0), (0.6, 1.0), (0.7, 0.0)])
                .with_easing(smoothstep),
            body_opacity: Track::new([(0.65, 0.0), (0.8, 1.0), (1.0, 1.0)]),
        }
    }
}

/// Sampled overlay values for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    pub(in crate::app) title_opacity: f32,
    pub(in crate::app) title_scale: f32,
    pub(in crate::app) subtitle_opacity: f32,
    pub(in crate::app) body_opacity: f32,
}

impl OverlayTracks {
    pub(in crate::app) fn sample(&self, progress: f64) -> OverlayFrame {
        OverlayFrame {
            title_opacity: self.title_opacity.sample(progress) as f32,
            title_scale: self.title_scale.sample(progress) as f32,
            subtitle_opacity: self.subtitle_opacity.sample(progress) as f32,
            body_opacity: self.body_opacity.sample(progress) as f32,
        }
    }
}
