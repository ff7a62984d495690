/// Layout and presentation limits for the preview window.
pub(crate) const MIN_VIEWPORT_HEIGHT_PX: f32 = 120.0;
pub(crate) const TITLE_FONT_SIZE_PX: f32 = 56.0;
pub(crate) const SUBTITLE_FONT_SIZE_PX: f32 = 28.0;
pub(crate) const BODY_FONT_SIZE_PX: f32 = 18.0;
pub(crate) const STATUS_FONT_SIZE_PX: f32 = 13.0;
pub(crate) const SPACER_FONT_SIZE_PX: f32 = 22.0;
pub(crate) const OVERLAY_PADDING_PX: f32 = 48.0;
