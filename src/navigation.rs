//! Per-card substory tracking.
//!
//! A card owns its current substory index. Previous/next move within the
//! story while there is room, and otherwise hand the request up to the
//! carousel as a [`StoryStep`].

use crate::carousel::{CardPosition, StoryStep};

/// Where a card starts when it is mounted or changes activation.
///
/// Active cards start at the last substory only when the user arrived by
/// going back. Inactive cards to the left start at their last substory,
/// everything else at the first.
pub fn initial_substory_index(
    substory_count: usize,
    position: CardPosition,
    is_active: bool,
    start_at_last_substory: bool,
) -> usize {
    let last = substory_count.saturating_sub(1);
    let at_last = if is_active {
        start_at_last_substory
    } else {
        position.is_before()
    };
    if at_last {
        last
    } else {
        0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// The card is inactive; nothing happened.
    Ignored,
    /// The card moved to another substory of the same story.
    Moved(usize),
    /// The card is at its bound; the carousel should step.
    Delegate(StoryStep),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardNavigation {
    substory_count: usize,
    current: usize,
    position: CardPosition,
    is_active: bool,
}

impl CardNavigation {
    pub fn new(
        substory_count: usize,
        position: CardPosition,
        is_active: bool,
        start_at_last_substory: bool,
    ) -> Self {
        Self {
            substory_count,
            current: initial_substory_index(
                substory_count,
                position,
                is_active,
                start_at_last_substory,
            ),
            position,
            is_active,
        }
    }

    /// Applies new carousel props. The index is re-derived only when the
    /// card gains or loses the active slot.
    pub fn sync(
        &mut self,
        position: CardPosition,
        is_active: bool,
        start_at_last_substory: bool,
    ) -> usize {
        let was_active = self.is_active;
        self.position = position;
        self.is_active = is_active;
        if was_active != is_active {
            self.current = initial_substory_index(
                self.substory_count,
                position,
                is_active,
                start_at_last_substory,
            );
            log::trace!(
                "card at {} {} -> substory {}",
                position.get(),
                if is_active { "activated" } else { "deactivated" },
                self.current
            );
        }
        self.current
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn position(&self) -> CardPosition {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    fn is_last(&self) -> bool {
        self.current + 1 >= self.substory_count
    }

    pub fn go_previous(&mut self) -> NavOutcome {
        if !self.is_active {
            return NavOutcome::Ignored;
        }
        if self.current > 0 {
            self.current -= 1;
            NavOutcome::Moved(self.current)
        } else {
            NavOutcome::Delegate(StoryStep::Previous)
        }
    }

    pub fn go_next(&mut self) -> NavOutcome {
        if !self.is_active {
            return NavOutcome::Ignored;
        }
        if self.is_last() {
            NavOutcome::Delegate(StoryStep::Next)
        } else {
            self.current += 1;
            NavOutcome::Moved(self.current)
        }
    }

    /// Same branching as [`go_next`](Self::go_next), driven by end of stream.
    pub fn on_substory_ended(&mut self) -> NavOutcome {
        self.go_next()
    }

    pub fn can_go_previous(&self, can_go_previous_story: bool) -> bool {
        self.current > 0 || can_go_previous_story
    }

    pub fn can_go_next(&self, can_go_next_story: bool) -> bool {
        !self.is_last() || can_go_next_story
    }

    /// Only the inactive neighbours directly beside the active card react
    /// to presses.
    pub fn is_clickable(&self) -> bool {
        !self.is_active && self.position.is_adjacent()
    }
}

/// Press-then-release tracking for adjacent cards. Leaving the card while
/// pressed cancels the gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressGesture {
    pressed: bool,
}

impl PressGesture {
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn press(&mut self, clickable: bool) -> bool {
        if !clickable {
            return false;
        }
        self.pressed = true;
        true
    }

    /// Returns true when this release completes a press.
    pub fn release(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }

    pub fn cancel(&mut self) {
        self.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pos(offset: i32) -> CardPosition {
        CardPosition::new(offset).unwrap()
    }

    #[test]
    fn active_card_starts_first_unless_arriving_backwards() {
        assert_eq!(initial_substory_index(4, pos(0), true, false), 0);
        assert_eq!(initial_substory_index(4, pos(0), true, true), 3);
    }

    #[test]
    fn inactive_cards_start_by_side() {
        assert_eq!(initial_substory_index(4, pos(-2), false, false), 3);
        assert_eq!(initial_substory_index(4, pos(-1), false, false), 3);
        assert_eq!(initial_substory_index(4, pos(1), false, false), 0);
        assert_eq!(initial_substory_index(4, pos(3), false, true), 0);
    }

    #[test]
    fn next_at_last_delegates_without_moving() {
        let mut nav = CardNavigation::new(2, pos(0), true, true);
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.go_next(), NavOutcome::Delegate(StoryStep::Next));
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn previous_at_first_delegates_without_moving() {
        let mut nav = CardNavigation::new(3, pos(0), true, false);
        assert_eq!(nav.go_previous(), NavOutcome::Delegate(StoryStep::Previous));
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn inactive_cards_ignore_navigation() {
        let mut nav = CardNavigation::new(3, pos(1), false, false);
        assert_eq!(nav.go_next(), NavOutcome::Ignored);
        assert_eq!(nav.go_previous(), NavOutcome::Ignored);
        assert_eq!(nav.on_substory_ended(), NavOutcome::Ignored);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn losing_the_active_slot_rederives_the_index() {
        let mut nav = CardNavigation::new(3, pos(0), true, false);
        nav.go_next();
        assert_eq!(nav.current_index(), 1);

        // user moved forward: this card slides to the left
        assert_eq!(nav.sync(pos(-1), false, false), 2);
        // and back again
        assert_eq!(nav.sync(pos(0), true, true), 2);
        nav.go_previous();
        assert_eq!(nav.sync(pos(1), false, false), 0);
    }

    #[test]
    fn sliding_while_inactive_keeps_the_index() {
        let mut nav = CardNavigation::new(3, pos(-2), false, false);
        assert_eq!(nav.sync(pos(-3), false, false), 2);
        assert_eq!(nav.sync(pos(-1), false, false), 2);
    }

    #[test]
    fn availability_flags_combine_card_and_carousel() {
        let nav = CardNavigation::new(3, pos(0), true, false);
        assert!(!nav.can_go_previous(false));
        assert!(nav.can_go_previous(true));
        assert!(nav.can_go_next(false));

        let single = CardNavigation::new(1, pos(0), true, false);
        assert!(!single.can_go_next(false));
        assert!(single.can_go_next(true));
    }

    #[test]
    fn only_adjacent_inactive_cards_are_clickable() {
        assert!(CardNavigation::new(1, pos(-1), false, false).is_clickable());
        assert!(CardNavigation::new(1, pos(1), false, false).is_clickable());
        assert!(!CardNavigation::new(1, pos(2), false, false).is_clickable());
        assert!(!CardNavigation::new(1, pos(0), true, false).is_clickable());
    }

    #[test]
    fn press_release_fires_once() {
        let mut press = PressGesture::default();
        assert!(press.press(true));
        assert!(press.release());
        assert!(!press.release());
    }

    #[test]
    fn leaving_before_release_cancels() {
        let mut press = PressGesture::default();
        press.press(true);
        press.cancel();
        assert!(!press.release());
    }

    #[test]
    fn presses_on_unclickable_cards_do_nothing() {
        let mut press = PressGesture::default();
        assert!(!press.press(false));
        assert!(!press.is_pressed());
        assert!(!press.release());
    }

    proptest! {
        #[test]
        fn next_moves_or_delegates(count in 1usize..12, steps in 0usize..24) {
            let mut nav = CardNavigation::new(count, pos(0), true, false);
            for _ in 0..steps {
                let before = nav.current_index();
                match nav.go_next() {
                    NavOutcome::Moved(index) => {
                        prop_assert_eq!(index, before + 1);
                        prop_assert!(index < count);
                    }
                    NavOutcome::Delegate(step) => {
                        prop_assert_eq!(step, StoryStep::Next);
                        prop_assert_eq!(before, count - 1);
                        prop_assert_eq!(nav.current_index(), before);
                    }
                    NavOutcome::Ignored => prop_assert!(false, "active card ignored next"),
                }
            }
        }
    }
}
