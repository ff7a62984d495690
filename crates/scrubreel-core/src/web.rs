//! Browser host for [`ScrollSyncPlayer`].
//!
//! Binds the player to a tracking-region element and a `<video>` element:
//! window scroll events, `requestAnimationFrame`, media readiness events and
//! the click/touch fallback for the priming handshake. Every closure holds a
//! `Weak` handle to the shared state, so dropping the [`ScrollScrubber`]
//! releases everything even if the browser still holds a callback.

use crate::cache::{CacheState, MediaCache};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::geometry::RegionGeometry;
use crate::media::{MediaSource, MediaStatus, ReadyState};
use crate::player::{FrameInput, ScrollSyncPlayer, SyncEffect, SyncEvent, SyncStatus};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AddEventListenerOptions, Document, Event, HtmlElement, HtmlVideoElement, Window};

const MEDIA_EVENTS: [&str; 6] = [
    "loadedmetadata",
    "loadeddata",
    "durationchange",
    "canplay",
    "canplaythrough",
    "error",
];
const GESTURE_EVENTS: [&str; 2] = ["click", "touchstart"];

type Shared = Rc<RefCell<Inner>>;

struct Callbacks {
    scroll: Closure<dyn FnMut(Event)>,
    frame: Closure<dyn FnMut(f64)>,
    media: Closure<dyn FnMut(Event)>,
    gesture: Closure<dyn FnMut(Event)>,
}

struct Inner {
    player: ScrollSyncPlayer,
    window: Window,
    region: HtmlElement,
    video: HtmlVideoElement,
    frame_id: Option<i32>,
    callbacks: Option<Callbacks>,
    on_readiness: Option<Rc<dyn Fn(bool)>>,
}

/// Follow-up work collected while the shared state is borrowed.
enum Outcome {
    Readiness(bool),
    Event(SyncEvent),
}

/// Scroll-scrubbed `<video>` bound to a tall container element.
pub struct ScrollScrubber {
    shared: Shared,
}

impl ScrollScrubber {
    /// Prepares `video` for scrubbing and wires the callbacks. Nothing is
    /// attached to the page until [`ScrollScrubber::start`].
    pub fn attach(
        region: HtmlElement,
        video: HtmlVideoElement,
        source: MediaSource<HtmlVideoElement>,
        config: SyncConfig,
    ) -> Result<Self, SyncError> {
        let window = web_sys::window().ok_or_else(|| SyncError::Host("no window".into()))?;
        let player = ScrollSyncPlayer::new(config)?;

        video.set_muted(true);
        video
            .set_attribute("playsinline", "")
            .map_err(js_error)?;
        match source {
            MediaSource::Prewarmed(cached) => {
                debug!(src = %cached.src(), "Using prewarmed video");
                video.set_preload("auto");
                video.set_src(&cached.src());
            }
            MediaSource::Url(url) => {
                if url.trim().is_empty() {
                    return Err(SyncError::Host("video source is empty".into()));
                }
                video.set_preload("auto");
                video.set_src(&url);
            }
        }

        let shared = Rc::new(RefCell::new(Inner {
            player,
            window: window.clone(),
            region,
            video: video.clone(),
            frame_id: None,
            callbacks: None,
            on_readiness: None,
        }));
        let callbacks = build_callbacks(Rc::downgrade(&shared), window, video);
        shared.borrow_mut().callbacks = Some(callbacks);
        Ok(Self { shared })
    }

    /// Registers a callback for readiness changes (show video vs poster).
    pub fn on_readiness(&self, callback: impl Fn(bool) + 'static) {
        self.shared.borrow_mut().on_readiness = Some(Rc::new(callback));
    }

    pub fn start(&self) -> Result<(), SyncError> {
        let (effects, offset, status) = {
            let mut inner = self.shared.borrow_mut();
            let geometry = inner.geometry();
            let effects = inner.player.start(geometry)?;
            let offset = inner.window.scroll_y().unwrap_or(0.0);
            let status = media_status(&inner.video);
            (effects, offset, status)
        };
        run_effects(&self.shared, effects);
        dispatch(&self.shared, SyncEvent::Scrolled { offset });
        dispatch(&self.shared, SyncEvent::MediaChanged(status));
        Ok(())
    }

    pub fn activate(&self) {
        let effects = self.shared.borrow_mut().player.activate();
        run_effects(&self.shared, effects);
    }

    pub fn stop(&self) {
        let effects = match self.shared.try_borrow_mut() {
            Ok(mut inner) => inner.player.stop(),
            Err(_) => {
                warn!("Scroll scrubber busy; stop skipped");
                return;
            }
        };
        run_effects(&self.shared, effects);
    }

    pub fn is_ready(&self) -> bool {
        self.shared.borrow().player.is_ready()
    }

    pub fn status(&self) -> SyncStatus {
        self.shared.borrow().player.status()
    }
}

impl Drop for ScrollScrubber {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Inner {
    fn geometry(&self) -> Option<RegionGeometry> {
        if !self.region.is_connected() {
            return None;
        }
        let rect = self.region.get_bounding_client_rect();
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);
        Some(RegionGeometry::new(
            rect.top() + scroll_y,
            rect.height(),
            viewport_height,
        ))
    }

    fn frame_input(&self, timestamp_ms: f64) -> FrameInput {
        FrameInput {
            timestamp_ms,
            geometry: self.geometry(),
            media_time: Some(self.video.current_time()),
        }
    }

    fn apply(&mut self, effect: SyncEffect, weak: &Weak<RefCell<Inner>>) -> Option<Outcome> {
        let callbacks = self.callbacks.as_ref()?;
        match effect {
            SyncEffect::AttachScroll => {
                let options = AddEventListenerOptions::new();
                options.set_passive(true);
                if let Err(err) = self
                    .window
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        "scroll",
                        callbacks.scroll.as_ref().unchecked_ref(),
                        &options,
                    )
                {
                    warn!(error = ?err, "Failed to attach scroll listener");
                }
            }
            SyncEffect::DetachScroll => {
                let _ = self.window.remove_event_listener_with_callback(
                    "scroll",
                    callbacks.scroll.as_ref().unchecked_ref(),
                );
            }
            SyncEffect::AttachMediaEvents => {
                for name in MEDIA_EVENTS {
                    if let Err(err) = self
                        .video
                        .add_event_listener_with_callback(name, callbacks.media.as_ref().unchecked_ref())
                    {
                        warn!(event = name, error = ?err, "Failed to attach media listener");
                    }
                }
            }
            SyncEffect::DetachMediaEvents => {
                for name in MEDIA_EVENTS {
                    let _ = self.video.remove_event_listener_with_callback(
                        name,
                        callbacks.media.as_ref().unchecked_ref(),
                    );
                }
            }
            SyncEffect::AttachGestures => {
                for name in GESTURE_EVENTS {
                    if let Err(err) = self
                        .window
                        .add_event_listener_with_callback(name, callbacks.gesture.as_ref().unchecked_ref())
                    {
                        warn!(event = name, error = ?err, "Failed to attach gesture listener");
                    }
                }
            }
            SyncEffect::DetachGestures => {
                for name in GESTURE_EVENTS {
                    let _ = self.window.remove_event_listener_with_callback(
                        name,
                        callbacks.gesture.as_ref().unchecked_ref(),
                    );
                }
            }
            SyncEffect::RequestFrame => {
                match self
                    .window
                    .request_animation_frame(callbacks.frame.as_ref().unchecked_ref())
                {
                    Ok(id) => self.frame_id = Some(id),
                    Err(err) => warn!(error = ?err, "requestAnimationFrame failed"),
                }
            }
            SyncEffect::CancelFrame => {
                if let Some(id) = self.frame_id.take() {
                    let _ = self.window.cancel_animation_frame(id);
                }
            }
            SyncEffect::Prime => return self.prime(weak),
            SyncEffect::Seek(position) => self.video.set_current_time(position),
            SyncEffect::ReadinessChanged(ready) => return Some(Outcome::Readiness(ready)),
        }
        None
    }

    /// Muted play/pause warm-up. The first `play()` call happens right here so
    /// it still runs inside the triggering gesture handler.
    fn prime(&self, weak: &Weak<RefCell<Inner>>) -> Option<Outcome> {
        let video = self.video.clone();
        video.set_muted(true);
        let first_play = match video.play() {
            Ok(promise) => JsFuture::from(promise),
            Err(err) => return Some(Outcome::Event(denied(err))),
        };
        let weak = weak.clone();
        spawn_local(async move {
            let result = warm_up(&video, first_play).await;
            if let Some(shared) = weak.upgrade() {
                dispatch(&shared, SyncEvent::PrimeResolved(result));
            }
        });
        None
    }
}

async fn warm_up(video: &HtmlVideoElement, first_play: JsFuture) -> Result<(), SyncError> {
    first_play.await.map_err(denied_error)?;
    video.pause().map_err(denied_error)?;
    video.set_current_time(0.01);
    let second_play = video.play().map_err(denied_error)?;
    JsFuture::from(second_play).await.map_err(denied_error)?;
    video.pause().map_err(denied_error)?;
    video.set_current_time(0.0);
    Ok(())
}

fn build_callbacks(weak: Weak<RefCell<Inner>>, window: Window, video: HtmlVideoElement) -> Callbacks {
    let scroll = {
        let weak = weak.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let offset = window.scroll_y().unwrap_or(0.0);
            dispatch(&shared, SyncEvent::Scrolled { offset });
        })
    };

    let frame = {
        let weak = weak.clone();
        Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let input = match shared.try_borrow_mut() {
                Ok(mut inner) => {
                    inner.frame_id = None;
                    inner.frame_input(timestamp)
                }
                Err(_) => return,
            };
            dispatch(&shared, SyncEvent::Frame(input));
        })
    };

    let media = {
        let weak = weak.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let sync_event = if event.type_() == "error" {
                SyncEvent::MediaFailed(format!("media error on {}", video.src()))
            } else {
                SyncEvent::MediaChanged(media_status(&video))
            };
            dispatch(&shared, sync_event);
        })
    };

    let gesture = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if let Some(shared) = weak.upgrade() {
            dispatch(&shared, SyncEvent::UserGesture);
        }
    });

    Callbacks {
        scroll,
        frame,
        media,
        gesture,
    }
}

fn dispatch(shared: &Shared, event: SyncEvent) {
    let effects = match shared.try_borrow_mut() {
        Ok(mut inner) => inner.player.handle(event),
        Err(_) => {
            warn!("Dropping re-entrant scroll sync event");
            return;
        }
    };
    run_effects(shared, effects);
}

fn run_effects(shared: &Shared, effects: Vec<SyncEffect>) {
    if effects.is_empty() {
        return;
    }
    let weak = Rc::downgrade(shared);
    let (outcomes, on_readiness) = {
        let Ok(mut inner) = shared.try_borrow_mut() else {
            warn!("Scroll scrubber busy; effects dropped");
            return;
        };
        let outcomes: Vec<Outcome> = effects
            .into_iter()
            .filter_map(|effect| inner.apply(effect, &weak))
            .collect();
        (outcomes, inner.on_readiness.clone())
    };

    for outcome in outcomes {
        match outcome {
            Outcome::Readiness(ready) => {
                if let Some(callback) = &on_readiness {
                    callback(ready);
                }
            }
            Outcome::Event(event) => dispatch(shared, event),
        }
    }
}

fn media_status(video: &HtmlVideoElement) -> MediaStatus {
    MediaStatus::new(ReadyState::from_html(video.ready_state()), Some(video.duration()))
}

fn denied(err: JsValue) -> SyncEvent {
    SyncEvent::PrimeResolved(Err(denied_error(err)))
}

fn denied_error(err: JsValue) -> SyncError {
    SyncError::ActivationDenied(format!("{err:?}"))
}

fn js_error(err: JsValue) -> SyncError {
    SyncError::Host(format!("{err:?}"))
}

/// Starts buffering videos before the section that scrubs them mounts.
///
/// Owned by the page and handed to whichever section needs the video; it
/// replaces a page-global cache.
pub struct VideoPreloader {
    document: Document,
    cache: Rc<RefCell<MediaCache<HtmlVideoElement>>>,
    listeners: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
}

impl VideoPreloader {
    pub fn new() -> Result<Self, SyncError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SyncError::Host("no document".into()))?;
        Ok(Self {
            document,
            cache: Rc::new(RefCell::new(MediaCache::new())),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Begins loading `src` unless it is already loading or cached.
    pub fn preload(&self, src: &str) -> Result<CacheState<HtmlVideoElement>, SyncError> {
        if !self.cache.borrow_mut().begin_loading(src) {
            return Ok(self.cache.borrow().state(src));
        }

        let video: HtmlVideoElement = self
            .document
            .create_element("video")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| SyncError::Host("created element is not a video".into()))?;
        video.set_preload("auto");
        video.set_muted(true);
        video.set_attribute("playsinline", "").map_err(js_error)?;

        let cache = Rc::downgrade(&self.cache);
        let key = src.to_string();
        let loaded = video.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(cache) = cache.upgrade() else {
                return;
            };
            let Ok(mut cache) = cache.try_borrow_mut() else {
                return;
            };
            if event.type_() == "error" {
                cache.fail(&key, "video failed to load");
            } else if !matches!(cache.state(&key), CacheState::Ready(_)) {
                cache.complete(&key, loaded.clone());
            }
        });
        for name in ["canplaythrough", "error"] {
            video
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
                .map_err(js_error)?;
        }
        self.listeners.borrow_mut().push(listener);
        video.set_src(src);
        Ok(CacheState::Loading)
    }

    pub fn source_for(&self, src: &str) -> MediaSource<HtmlVideoElement> {
        self.cache.borrow().source_for(src)
    }

    pub fn cached(&self, src: &str) -> Option<HtmlVideoElement> {
        self.cache.borrow().get(src)
    }
}
