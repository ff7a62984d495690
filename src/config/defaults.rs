pub(crate) fn default_fps() -> f64 {
    30.0
}

pub(crate) fn default_decode_batch() -> usize {
    24
}

pub(crate) fn default_lead_in_viewports() -> f32 {
    1.0
}

pub(crate) fn default_region_viewports() -> f32 {
    3.0
}

pub(crate) fn default_tail_viewports() -> f32 {
    1.0
}

pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    800.0
}

pub(crate) fn default_title() -> String {
    "Scroll to play".to_string()
}

pub(crate) fn default_subtitle() -> String {
    "Every frame follows the scrollbar".to_string()
}

pub(crate) fn default_body() -> String {
    "Scroll back up and the footage rewinds with you.".to_string()
}

pub(crate) fn default_show_status() -> bool {
    true
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_remount() -> String {
    "r".to_string()
}

pub(crate) fn default_key_quit() -> String {
    "q".to_string()
}
