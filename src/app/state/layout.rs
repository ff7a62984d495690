use super::constants::MIN_VIEWPORT_HEIGHT_PX;
use crate::config::AppConfig;
use scrubreel_core::RegionGeometry;

/// Scroll position and viewport size, in logical pixels.
#[derive(Debug, Clone, Copy)]
pub struct LayoutState {
    pub(in crate::app) scroll_offset: f32,
    pub(in crate::app) viewport_height: f32,
}

impl LayoutState {
    pub(in crate::app) fn new(config: &AppConfig) -> Self {
        LayoutState {
            scroll_offset: 0.0,
            viewport_height: config.window_height,
        }
    }

    pub(in crate::app) fn viewport(&self) -> f32 {
        self.viewport_height.max(MIN_VIEWPORT_HEIGHT_PX)
    }

    pub(in crate::app) fn lead_in_height(&self, config: &AppConfig) -> f32 {
        config.lead_in_viewports.max(0.0) * self.viewport()
    }

    pub(in crate::app) fn region_height(&self, config: &AppConfig) -> f32 {
        config.region_viewports * self.viewport()
    }

    pub(in crate::app) fn tail_height(&self, config: &AppConfig) -> f32 {
        config.tail_viewports.max(0.0) * self.viewport()
    }

    pub(in crate::app) fn region(&self, config: &AppConfig) -> RegionGeometry {
        RegionGeometry::new(
            self.lead_in_height(config) as f64,
            self.region_height(config) as f64,
            self.viewport() as f64,
        )
    }

    pub(in crate::app) fn is_pinned(&self, config: &AppConfig) -> bool {
        self.region(config).is_pinned(self.scroll_offset as f64)
    }

    /// Offset of the pinned media layer inside the region, emulating a sticky
    /// element: zero before the region reaches the top, then following the
    /// scroll until the region's bottom edge arrives.
    pub(in crate::app) fn pin_offset(&self, config: &AppConfig) -> f32 {
        let travel = (self.region_height(config) - self.viewport()).max(0.0);
        (self.scroll_offset - self.lead_in_height(config)).clamp(0.0, travel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(scroll_offset: f32) -> LayoutState {
        LayoutState {
            scroll_offset,
            viewport_height: 1000.0,
        }
    }

    #[test]
    fn region_sits_below_lead_in() {
        let config = AppConfig::default();
        let region = layout(0.0).region(&config);
        assert_eq!(region.top, 1000.0);
        assert_eq!(region.height, 3000.0);
        assert_eq!(region.viewport_height, 1000.0);
        assert_eq!(region.progress(2000.0), 0.5);
    }

    #[test]
    fn pin_offset_follows_scroll_inside_region() {
        let config = AppConfig::default();
        assert_eq!(layout(500.0).pin_offset(&config), 0.0);
        assert_eq!(layout(1800.0).pin_offset(&config), 800.0);
        assert_eq!(layout(9000.0).pin_offset(&config), 2000.0);
    }

    #[test]
    fn pinned_only_while_region_covers_viewport() {
        let config = AppConfig::default();
        assert!(!layout(500.0).is_pinned(&config));
        assert!(layout(1000.0).is_pinned(&config));
        assert!(layout(2900.0).is_pinned(&config));
        assert!(!layout(3000.0).is_pinned(&config));
    }
}
