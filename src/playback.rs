//! Play/pause/mute/progress bookkeeping for one card's video.
//!
//! The controller never touches the DOM directly; it drives a [`PlaybackPort`]
//! (the `<video>` element in the browser, a recording fake in tests). Play
//! attempts are asynchronous and tagged with the epoch they were issued in.
//! Pausing or rewinding advances the epoch, so a late resolution from an
//! earlier substory is dropped instead of flipping the current state.

use crate::error::PlaybackError;
use std::future::Future;
use std::pin::Pin;

pub type PlayAttempt = Pin<Box<dyn Future<Output = Result<(), PlaybackError>>>>;

/// Media operations the controller needs from whatever renders the video.
pub trait PlaybackPort {
    /// Starts playback. The returned future settles once the media element
    /// accepts or rejects the request.
    fn play(&self) -> PlayAttempt;
    fn pause(&self);
    /// Seeks to time zero.
    fn rewind(&self);
    fn set_muted(&self, muted: bool);
    fn is_paused(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Playing,
    Paused,
    Ended,
}

/// An in-flight play request. Await `attempt`, then hand the outcome back to
/// [`PlaybackController::settle_play`] together with `epoch`.
pub struct PendingPlay {
    pub epoch: u64,
    pub attempt: PlayAttempt,
}

impl std::fmt::Debug for PendingPlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingPlay").field("epoch", &self.epoch).finish()
    }
}

/// Render-facing snapshot of the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackView {
    pub is_playing: bool,
    pub progress: f64,
}

#[derive(Debug)]
pub struct PlaybackController<P> {
    port: P,
    phase: PlaybackPhase,
    progress: f64,
    epoch: u64,
}

impl<P: PlaybackPort> PlaybackController<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            phase: PlaybackPhase::Idle,
            progress: 0.0,
            epoch: 0,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn view(&self) -> PlaybackView {
        PlaybackView {
            is_playing: self.is_playing(),
            progress: self.progress,
        }
    }

    /// Requests playback. State only changes once the attempt settles.
    pub fn activate(&mut self) -> PendingPlay {
        log::trace!("play requested (epoch {})", self.epoch);
        PendingPlay {
            epoch: self.epoch,
            attempt: self.port.play(),
        }
    }

    /// Applies the outcome of a play attempt. Returns false when the attempt
    /// belongs to an older epoch and was discarded.
    pub fn settle_play(&mut self, epoch: u64, result: Result<(), PlaybackError>) -> bool {
        if epoch != self.epoch {
            log::trace!("dropping stale play result (epoch {epoch}, now {})", self.epoch);
            return false;
        }
        match result {
            Ok(()) => self.phase = PlaybackPhase::Playing,
            Err(err) => {
                log::debug!("playback did not start: {err}");
                if self.phase != PlaybackPhase::Ended {
                    self.phase = PlaybackPhase::Paused;
                }
            }
        }
        true
    }

    pub fn deactivate(&mut self) {
        self.port.pause();
        self.epoch = self.epoch.wrapping_add(1);
        if self.phase == PlaybackPhase::Playing {
            self.phase = PlaybackPhase::Paused;
        }
    }

    /// Flips between playing and paused. Does nothing on inactive cards.
    pub fn toggle_play_pause(&mut self, is_active: bool) -> Option<PendingPlay> {
        if !is_active {
            return None;
        }
        if self.port.is_paused() {
            if self.phase == PlaybackPhase::Ended {
                // replaying a finished video starts a fresh playback
                self.reset();
            }
            Some(self.activate())
        } else {
            self.deactivate();
            None
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.port.set_muted(muted);
    }

    /// Seeks to the start and clears progress for a new substory.
    pub fn reset(&mut self) {
        self.port.rewind();
        self.epoch = self.epoch.wrapping_add(1);
        self.progress = 0.0;
        self.phase = PlaybackPhase::Idle;
    }

    /// Records a time update. Returns the new progress, or `None` while the
    /// duration is still unknown.
    pub fn on_time_update(&mut self, current_time: f64, duration: f64) -> Option<f64> {
        if !duration.is_finite() || duration <= 0.0 || !current_time.is_finite() {
            return None;
        }
        let percentage = (current_time / duration * 100.0).clamp(0.0, 100.0);
        self.progress = self.progress.max(percentage);
        Some(self.progress)
    }

    /// Records end of stream. Returns true exactly once per completed
    /// playback, and never for inactive cards. An ended event that arrives
    /// while nothing is playing belongs to a previous substory.
    pub fn on_ended(&mut self, is_active: bool) -> bool {
        if !is_active {
            log::trace!("ignoring ended event on inactive card");
            return false;
        }
        if self.phase != PlaybackPhase::Playing {
            return false;
        }
        self.phase = PlaybackPhase::Ended;
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::task::{Context, Poll, Waker};

    #[derive(Debug, Default)]
    pub(crate) struct FakeMedia {
        pub paused: bool,
        pub muted: bool,
        pub plays: usize,
        pub pauses: usize,
        pub rewinds: usize,
        pub reject_next: Option<String>,
    }

    #[derive(Clone, Debug)]
    pub(crate) struct FakePort(pub Rc<RefCell<FakeMedia>>);

    impl FakePort {
        pub(crate) fn new() -> Self {
            Self(Rc::new(RefCell::new(FakeMedia {
                paused: true,
                ..FakeMedia::default()
            })))
        }
    }

    impl PlaybackPort for FakePort {
        fn play(&self) -> PlayAttempt {
            let mut media = self.0.borrow_mut();
            media.plays += 1;
            let outcome = match media.reject_next.take() {
                Some(reason) => Err(PlaybackError::Rejected(reason)),
                None => {
                    media.paused = false;
                    Ok(())
                }
            };
            Box::pin(std::future::ready(outcome))
        }

        fn pause(&self) {
            let mut media = self.0.borrow_mut();
            media.paused = true;
            media.pauses += 1;
        }

        fn rewind(&self) {
            self.0.borrow_mut().rewinds += 1;
        }

        fn set_muted(&self, muted: bool) {
            self.0.borrow_mut().muted = muted;
        }

        fn is_paused(&self) -> bool {
            self.0.borrow().paused
        }
    }

    pub(crate) fn resolve(pending: PendingPlay) -> (u64, Result<(), PlaybackError>) {
        let mut attempt = pending.attempt;
        let mut cx = Context::from_waker(Waker::noop());
        match attempt.as_mut().poll(&mut cx) {
            Poll::Ready(result) => (pending.epoch, result),
            Poll::Pending => panic!("fake play attempts settle immediately"),
        }
    }

    fn started(controller: &mut PlaybackController<FakePort>) {
        let (epoch, result) = resolve(controller.activate());
        assert!(controller.settle_play(epoch, result));
    }

    #[test]
    fn activate_plays_once_the_attempt_resolves() {
        let mut controller = PlaybackController::new(FakePort::new());
        let pending = controller.activate();
        assert_eq!(controller.phase(), PlaybackPhase::Idle);

        let (epoch, result) = resolve(pending);
        assert!(controller.settle_play(epoch, result));
        assert!(controller.is_playing());
    }

    #[test]
    fn rejected_play_falls_back_to_paused() {
        let port = FakePort::new();
        port.0.borrow_mut().reject_next = Some("NotAllowedError".into());
        let mut controller = PlaybackController::new(port);

        let (epoch, result) = resolve(controller.activate());
        assert!(controller.settle_play(epoch, result));
        assert!(!controller.is_playing());
        assert_eq!(controller.phase(), PlaybackPhase::Paused);
    }

    #[test]
    fn stale_play_result_is_discarded_after_reset() {
        let mut controller = PlaybackController::new(FakePort::new());
        let pending = controller.activate();
        controller.reset();

        let (epoch, result) = resolve(pending);
        assert!(!controller.settle_play(epoch, result));
        assert_eq!(controller.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn stale_play_result_is_discarded_after_deactivate() {
        let mut controller = PlaybackController::new(FakePort::new());
        let pending = controller.activate();
        controller.deactivate();

        let (epoch, result) = resolve(pending);
        assert!(!controller.settle_play(epoch, result));
        assert!(!controller.is_playing());
    }

    #[test]
    fn toggle_is_ignored_on_inactive_cards() {
        let port = FakePort::new();
        let mut controller = PlaybackController::new(port.clone());
        assert!(controller.toggle_play_pause(false).is_none());
        assert_eq!(port.0.borrow().plays, 0);
        assert_eq!(port.0.borrow().pauses, 0);
    }

    #[test]
    fn toggle_pauses_a_playing_video() {
        let port = FakePort::new();
        let mut controller = PlaybackController::new(port.clone());
        started(&mut controller);

        assert!(controller.toggle_play_pause(true).is_none());
        assert!(!controller.is_playing());
        assert!(port.0.borrow().paused);
    }

    #[test]
    fn reset_rewinds_and_clears_progress() {
        let port = FakePort::new();
        let mut controller = PlaybackController::new(port.clone());
        controller.on_time_update(3.0, 10.0);
        assert_eq!(controller.progress(), 30.0);

        controller.reset();
        assert_eq!(controller.progress(), 0.0);
        assert_eq!(port.0.borrow().rewinds, 1);
    }

    #[test]
    fn unknown_duration_skips_progress() {
        let mut controller = PlaybackController::new(FakePort::new());
        assert_eq!(controller.on_time_update(1.0, f64::NAN), None);
        assert_eq!(controller.on_time_update(1.0, 0.0), None);
        assert_eq!(controller.on_time_update(1.0, f64::INFINITY), None);
        assert_eq!(controller.progress(), 0.0);
        assert_eq!(controller.on_time_update(5.0, 10.0), Some(50.0));
    }

    #[test]
    fn ended_fires_once_and_only_when_active() {
        let mut controller = PlaybackController::new(FakePort::new());
        started(&mut controller);

        assert!(!controller.on_ended(false));
        assert!(controller.on_ended(true));
        assert!(!controller.on_ended(true));
        assert_eq!(controller.phase(), PlaybackPhase::Ended);
    }

    #[test]
    fn ended_before_playback_started_is_stale() {
        let mut controller = PlaybackController::new(FakePort::new());
        assert!(!controller.on_ended(true));
        started(&mut controller);
        controller.reset();
        assert!(!controller.on_ended(true));
    }

    #[test]
    fn mute_does_not_touch_play_state() {
        let port = FakePort::new();
        let mut controller = PlaybackController::new(port.clone());
        started(&mut controller);
        controller.set_muted(true);
        assert!(port.0.borrow().muted);
        assert!(controller.is_playing());
    }

    proptest! {
        #[test]
        fn progress_is_clamped_and_monotonic(
            updates in prop::collection::vec((any::<f64>(), any::<f64>()), 0..64)
        ) {
            let mut controller = PlaybackController::new(FakePort::new());
            let mut last = 0.0;
            for (current_time, duration) in updates {
                controller.on_time_update(current_time, duration);
                let progress = controller.progress();
                prop_assert!((0.0..=100.0).contains(&progress));
                prop_assert!(progress >= last);
                last = progress;
            }
        }

        #[test]
        fn double_toggle_restores_play_state(start_playing in any::<bool>()) {
            let mut controller = PlaybackController::new(FakePort::new());
            if start_playing {
                started(&mut controller);
            }
            let before = controller.is_playing();
            for _ in 0..2 {
                if let Some(pending) = controller.toggle_play_pause(true) {
                    let (epoch, result) = resolve(pending);
                    controller.settle_play(epoch, result);
                }
            }
            prop_assert_eq!(controller.is_playing(), before);
        }
    }
}
