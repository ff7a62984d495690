/// Host-side mirror of what the player asked to have attached.
#[derive(Debug, Default)]
pub struct HostState {
    pub(in crate::app) mounted: bool,
    pub(in crate::app) scroll_attached: bool,
    pub(in crate::app) media_attached: bool,
    pub(in crate::app) gestures_attached: bool,
    pub(in crate::app) frame_pending: bool,
    /// Set while a click/touch is being dispatched.
    pub(in crate::app) in_gesture: bool,
    pub(in crate::app) ready: bool,
}

impl HostState {
    pub(in crate::app) fn has_live_work(&self) -> bool {
        self.scroll_attached || self.media_attached || self.gestures_attached || self.frame_pending
    }
}
