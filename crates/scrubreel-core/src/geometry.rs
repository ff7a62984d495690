//! Tracking-region geometry and the scroll-to-progress mapping.
//!
//! All lengths are CSS/logical pixels measured from the top of the page.

use serde::{Deserialize, Serialize};

/// Live bounds of the tracking region, read once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionGeometry {
    /// Offset of the region's top edge from the top of the page.
    pub top: f64,
    /// Total height of the region.
    pub height: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
}

impl RegionGeometry {
    pub fn new(top: f64, height: f64, viewport_height: f64) -> Self {
        Self {
            top,
            height,
            viewport_height,
        }
    }

    /// Distance the page must scroll to traverse the region.
    ///
    /// Zero for degenerate regions that fit inside the viewport.
    pub fn scroll_range(&self) -> f64 {
        let range = sanitize(self.height) - sanitize(self.viewport_height);
        range.max(0.0)
    }

    /// Normalized position of the viewport inside the region for `scroll_offset`.
    pub fn progress(&self, scroll_offset: f64) -> f64 {
        scroll_progress(scroll_offset, self.top, self.height, self.viewport_height)
    }

    /// Whether the region currently covers the whole viewport.
    pub fn is_pinned(&self, scroll_offset: f64) -> bool {
        if !scroll_offset.is_finite() || self.scroll_range() <= 0.0 {
            return false;
        }
        let relative_top = sanitize(self.top) - scroll_offset;
        let relative_bottom = relative_top + sanitize(self.height);
        relative_top <= 0.0 && relative_bottom > sanitize(self.viewport_height)
    }
}

/// Maps a scroll offset to [0, 1] progress through a tracking region.
///
/// Regions no taller than the viewport always report 0, and non-finite inputs
/// are treated as the start of the region.
pub fn scroll_progress(
    scroll_offset: f64,
    region_top: f64,
    region_height: f64,
    viewport_height: f64,
) -> f64 {
    if !scroll_offset.is_finite()
        || !region_top.is_finite()
        || !region_height.is_finite()
        || !viewport_height.is_finite()
    {
        return 0.0;
    }
    if region_height <= viewport_height {
        return 0.0;
    }
    let scrolled = scroll_offset - region_top;
    let range = (region_height - viewport_height).max(1.0);
    (scrolled / range).clamp(0.0, 1.0)
}

/// Sub-range of scroll progress that drives the media.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressWindow {
    pub start: f64,
    pub end: f64,
}

impl Default for ProgressWindow {
    fn default() -> Self {
        Self::FULL
    }
}

impl ProgressWindow {
    pub const FULL: ProgressWindow = ProgressWindow {
        start: 0.0,
        end: 1.0,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && (0.0..=1.0).contains(&self.start)
            && (0.0..=1.0).contains(&self.end)
            && self.start < self.end
    }

    /// Re-normalizes region progress into progress through this window.
    pub fn map(&self, progress: f64) -> f64 {
        if !progress.is_finite() {
            return 0.0;
        }
        let span = self.end - self.start;
        if span <= f64::EPSILON {
            return if progress >= self.end { 1.0 } else { 0.0 };
        }
        ((progress - self.start) / span).clamp(0.0, 1.0)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_regions_report_zero() {
        for (height, viewport) in [(800.0, 1000.0), (1000.0, 1000.0), (0.0, 1.0)] {
            for scroll in [-500.0, 0.0, 250.0, 10_000.0] {
                let progress = scroll_progress(scroll, 0.0, height, viewport);
                assert_eq!(progress, 0.0, "height={height} viewport={viewport}");
            }
        }
    }

    #[test]
    fn progress_follows_worked_example() {
        let region = RegionGeometry::new(0.0, 3000.0, 1000.0);
        assert_eq!(region.progress(0.0), 0.0);
        assert!((region.progress(1000.0) - 0.5).abs() < 1e-9);
        assert_eq!(region.progress(5000.0), 1.0);
    }

    #[test]
    fn progress_is_monotonic_in_scroll_offset() {
        let region = RegionGeometry::new(420.0, 2700.0, 900.0);
        let mut previous = -1.0;
        let mut scroll = -200.0;
        while scroll < 4000.0 {
            let progress = region.progress(scroll);
            assert!((0.0..=1.0).contains(&progress));
            assert!(progress >= previous, "progress regressed at scroll={scroll}");
            previous = progress;
            scroll += 37.5;
        }
    }

    #[test]
    fn non_finite_inputs_map_to_start() {
        assert_eq!(scroll_progress(f64::NAN, 0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(500.0, f64::INFINITY, 3000.0, 1000.0), 0.0);
    }

    #[test]
    fn pinned_only_while_region_covers_viewport() {
        let region = RegionGeometry::new(500.0, 3000.0, 1000.0);
        assert!(!region.is_pinned(100.0));
        assert!(region.is_pinned(500.0));
        assert!(region.is_pinned(2400.0));
        assert!(!region.is_pinned(2500.0));
    }

    #[test]
    fn window_remaps_sub_range() {
        let first = ProgressWindow::new(0.0, 0.5);
        let second = ProgressWindow::new(0.6, 1.0);
        assert!((first.map(0.25) - 0.5).abs() < 1e-9);
        assert_eq!(first.map(0.7), 1.0);
        assert_eq!(second.map(0.3), 0.0);
        assert!((second.map(0.8) - 0.5).abs() < 1e-9);
        assert!(!ProgressWindow::new(0.6, 0.6).is_valid());
    }
}
