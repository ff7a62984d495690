use scrubreel_core::{
    ActivationState, FrameInput, MediaStatus, ReadyState, RegionGeometry, ScrollSyncPlayer,
    SyncConfig, SyncEffect, SyncError, SyncEvent,
};

const REGION: RegionGeometry = RegionGeometry {
    top: 0.0,
    height: 3000.0,
    viewport_height: 1000.0,
};

/// Minimal host that executes effects the way a real one would.
#[derive(Default)]
struct FakeHost {
    scroll_attached: bool,
    media_attached: bool,
    gestures_attached: bool,
    frame_pending: bool,
    primes: usize,
    seeks: Vec<f64>,
    readiness: Vec<bool>,
    clock_ms: f64,
}

impl FakeHost {
    fn apply(&mut self, effects: Vec<SyncEffect>) {
        for effect in effects {
            match effect {
                SyncEffect::AttachScroll => self.scroll_attached = true,
                SyncEffect::DetachScroll => self.scroll_attached = false,
                SyncEffect::AttachMediaEvents => self.media_attached = true,
                SyncEffect::DetachMediaEvents => self.media_attached = false,
                SyncEffect::AttachGestures => self.gestures_attached = true,
                SyncEffect::DetachGestures => self.gestures_attached = false,
                SyncEffect::RequestFrame => self.frame_pending = true,
                SyncEffect::CancelFrame => self.frame_pending = false,
                SyncEffect::Prime => self.primes += 1,
                SyncEffect::Seek(position) => self.seeks.push(position),
                SyncEffect::ReadinessChanged(ready) => self.readiness.push(ready),
            }
        }
    }

    fn has_live_work(&self) -> bool {
        self.scroll_attached || self.media_attached || self.gestures_attached || self.frame_pending
    }

    /// Delivers the pending animation frame, if any.
    fn pump(&mut self, player: &mut ScrollSyncPlayer) {
        if !self.frame_pending {
            return;
        }
        self.frame_pending = false;
        self.clock_ms += 16.7;
        let effects = player.handle(SyncEvent::Frame(FrameInput {
            timestamp_ms: self.clock_ms,
            geometry: Some(REGION),
            media_time: None,
        }));
        self.apply(effects);
    }
}

fn started() -> (ScrollSyncPlayer, FakeHost) {
    let mut player = ScrollSyncPlayer::new(SyncConfig::default()).expect("valid config");
    let mut host = FakeHost::default();
    let effects = player.start(Some(REGION)).expect("region mounted");
    host.apply(effects);
    (player, host)
}

#[test]
fn steady_target_converges_without_overshoot() {
    let (mut player, mut host) = started();
    host.apply(player.handle(SyncEvent::Scrolled { offset: 1000.0 }));
    let mut frames = 0;
    while (player.status().progress - 0.5).abs() >= 0.001 {
        host.pump(&mut player);
        frames += 1;
        assert!(player.status().progress <= 0.5 + 1e-12, "overshoot");
        assert!(frames < 120, "no convergence after {frames} frames");
    }
}

#[test]
fn teardown_is_idempotent() {
    let mut never_started = ScrollSyncPlayer::new(SyncConfig::default()).expect("valid config");
    assert!(never_started.stop().is_empty());
    assert!(never_started.stop().is_empty());

    let (mut player, mut host) = started();
    host.pump(&mut player);
    host.apply(player.stop());
    assert!(!host.has_live_work());
    assert!(player.stop().is_empty());
    assert!(!host.has_live_work());
}

#[test]
fn activation_primes_exactly_once() {
    let (mut player, mut host) = started();
    host.apply(player.handle(SyncEvent::MediaChanged(MediaStatus::new(
        ReadyState::Playable,
        Some(8.0),
    ))));
    assert_eq!(host.primes, 1);
    host.apply(player.activate());
    assert_eq!(host.primes, 1, "probe in flight must coalesce");

    host.apply(player.handle(SyncEvent::PrimeResolved(Ok(()))));
    host.apply(player.handle(SyncEvent::UserGesture));
    host.apply(player.activate());
    assert_eq!(host.primes, 1);
    assert_eq!(player.activation(), ActivationState::Unlocked);
    assert_eq!(host.readiness, vec![true]);
}

#[test]
fn denied_probe_falls_back_to_one_gesture() {
    let (mut player, mut host) = started();
    host.apply(player.handle(SyncEvent::MediaChanged(MediaStatus::new(
        ReadyState::DataLoaded,
        Some(8.0),
    ))));
    host.apply(player.handle(SyncEvent::PrimeResolved(Err(
        SyncError::ActivationDenied("NotAllowedError".into()),
    ))));
    assert!(host.gestures_attached);

    host.apply(player.handle(SyncEvent::UserGesture));
    assert!(!host.gestures_attached);
    assert_eq!(host.primes, 2);
    host.apply(player.handle(SyncEvent::PrimeResolved(Ok(()))));
    assert!(player.is_ready());
}

#[test]
fn media_without_metadata_never_seeks() {
    let (mut player, mut host) = started();
    host.apply(player.activate());
    host.apply(player.handle(SyncEvent::Scrolled { offset: 1800.0 }));
    for _ in 0..300 {
        host.pump(&mut player);
    }
    assert!(host.seeks.is_empty());
    assert!(host.readiness.is_empty());
    assert_eq!(host.primes, 0);
    assert!(!player.is_ready());
    assert_eq!(player.activation(), ActivationState::Locked);
}

#[test]
fn scrubbing_tracks_scroll_in_both_directions() {
    let (mut player, mut host) = started();
    host.apply(player.handle(SyncEvent::MediaChanged(MediaStatus::playable(12.0))));
    host.apply(player.handle(SyncEvent::PrimeResolved(Ok(()))));

    host.apply(player.handle(SyncEvent::Scrolled { offset: 1500.0 }));
    for _ in 0..300 {
        host.pump(&mut player);
    }
    let forward = *host.seeks.last().expect("forward seeks");
    assert!((forward - 9.0).abs() <= 0.03 + 1e-9, "forward ended at {forward}");

    host.apply(player.handle(SyncEvent::Scrolled { offset: 500.0 }));
    for _ in 0..300 {
        host.pump(&mut player);
    }
    let backward = *host.seeks.last().expect("backward seeks");
    assert!((backward - 3.0).abs() <= 0.03 + 1e-9, "backward ended at {backward}");
}
