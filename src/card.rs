use crate::carousel::{CardPosition, StoryStep};
use crate::error::PlaybackError;
use crate::navigation::{CardNavigation, NavOutcome, PressGesture};
use crate::playback::{PendingPlay, PlaybackController, PlaybackPort, PlaybackView};

/// What the owner of a card has to do after an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardEffect {
    None,
    /// The card switched to another substory; re-render it.
    SubstoryChanged(usize),
    /// The card hit a bound; ask the carousel to step.
    Story(StoryStep),
}

/// Everything one mounted card owns: its substory index, its playback and
/// its press gesture.
#[derive(Debug)]
pub struct CardController<P> {
    nav: CardNavigation,
    playback: PlaybackController<P>,
    press: PressGesture,
}

impl<P: PlaybackPort> CardController<P> {
    pub fn new(
        port: P,
        substory_count: usize,
        position: CardPosition,
        is_active: bool,
        start_at_last_substory: bool,
    ) -> Self {
        Self {
            nav: CardNavigation::new(substory_count, position, is_active, start_at_last_substory),
            playback: PlaybackController::new(port),
            press: PressGesture::default(),
        }
    }

    pub fn sync(
        &mut self,
        position: CardPosition,
        is_active: bool,
        start_at_last_substory: bool,
    ) -> usize {
        if !is_active {
            self.press.cancel();
        }
        self.nav.sync(position, is_active, start_at_last_substory)
    }

    pub fn substory_index(&self) -> usize {
        self.nav.current_index()
    }

    pub fn navigation(&self) -> &CardNavigation {
        &self.nav
    }

    pub fn view(&self) -> PlaybackView {
        self.playback.view()
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_pressed()
    }

    /// Brings playback in line with the activation state. Active cards start
    /// their current substory from the top; inactive ones are paused.
    pub fn apply_activation(&mut self) -> Option<PendingPlay> {
        if self.nav.is_active() {
            self.playback.reset();
            Some(self.playback.activate())
        } else {
            self.playback.deactivate();
            self.playback.reset();
            None
        }
    }

    pub fn toggle_play_pause(&mut self) -> Option<PendingPlay> {
        self.playback.toggle_play_pause(self.nav.is_active())
    }

    pub fn settle_play(&mut self, epoch: u64, result: Result<(), PlaybackError>) -> bool {
        self.playback.settle_play(epoch, result)
    }

    /// Only the active card may flip the shared mute flag.
    pub fn request_toggle_mute(&self) -> bool {
        self.nav.is_active()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.playback.set_muted(muted);
    }

    pub fn on_time_update(&mut self, current_time: f64, duration: f64) -> Option<f64> {
        self.playback.on_time_update(current_time, duration)
    }

    pub fn go_previous(&mut self) -> CardEffect {
        let outcome = self.nav.go_previous();
        self.apply(outcome)
    }

    pub fn go_next(&mut self) -> CardEffect {
        let outcome = self.nav.go_next();
        self.apply(outcome)
    }

    /// End of stream from the media element.
    pub fn on_media_ended(&mut self) -> CardEffect {
        if !self.playback.on_ended(self.nav.is_active()) {
            return CardEffect::None;
        }
        let outcome = self.nav.on_substory_ended();
        self.apply(outcome)
    }

    fn apply(&mut self, outcome: NavOutcome) -> CardEffect {
        match outcome {
            NavOutcome::Ignored => CardEffect::None,
            NavOutcome::Moved(index) => {
                self.playback.reset();
                CardEffect::SubstoryChanged(index)
            }
            NavOutcome::Delegate(step) => CardEffect::Story(step),
        }
    }

    pub fn press(&mut self) -> bool {
        let clickable = self.nav.is_clickable();
        self.press.press(clickable)
    }

    /// Completes a press. Adjacent cards select themselves by stepping the
    /// carousel towards their side.
    pub fn release(&mut self) -> Option<StoryStep> {
        if !self.press.release() || !self.nav.is_clickable() {
            return None;
        }
        match self.nav.position().get() {
            -1 => Some(StoryStep::Previous),
            1 => Some(StoryStep::Next),
            _ => None,
        }
    }

    pub fn cancel_press(&mut self) {
        self.press.cancel();
    }
}
