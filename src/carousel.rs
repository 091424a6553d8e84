use crate::config::{CloseBehavior, ViewerConfig, MAX_WINDOW_RADIUS};

/// Offset of a card from the active one, in `-3..=3`. Zero is the active card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardPosition(i8);

impl CardPosition {
    pub fn new(offset: i32) -> Option<Self> {
        let limit = i32::from(MAX_WINDOW_RADIUS);
        (-limit..=limit)
            .contains(&offset)
            .then(|| CardPosition(offset as i8))
    }

    pub fn get(self) -> i8 {
        self.0
    }

    pub fn is_active(self) -> bool {
        self.0 == 0
    }

    /// Left of the active card.
    pub fn is_before(self) -> bool {
        self.0 < 0
    }

    pub fn is_adjacent(self) -> bool {
        self.0.abs() == 1
    }
}

/// Which way the user last moved between stories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationDirection {
    Forward,
    Backward,
    #[default]
    None,
}

/// Story-level step requested by a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoryStep {
    Previous,
    Next,
}

/// One mounted card: the story at `story_index`, rendered at `position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleCard {
    pub story_index: usize,
    pub position: CardPosition,
    pub start_at_last_substory: bool,
}

/// Owner of the active story index, the shared mute flag and the
/// navigation direction hint.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselState {
    story_count: usize,
    current_index: usize,
    is_muted: bool,
    direction: NavigationDirection,
    radius: u8,
    start_muted: bool,
}

impl CarouselState {
    pub fn new(story_count: usize, config: &ViewerConfig) -> Self {
        Self {
            story_count,
            current_index: 0,
            is_muted: config.start_muted,
            direction: NavigationDirection::None,
            radius: config.effective_radius(),
            start_muted: config.start_muted,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn direction(&self) -> NavigationDirection {
        self.direction
    }

    pub fn can_go_previous_story(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_next_story(&self) -> bool {
        self.current_index + 1 < self.story_count
    }

    /// Returns whether the index moved.
    pub fn go_next_story(&mut self) -> bool {
        if !self.can_go_next_story() {
            return false;
        }
        self.direction = NavigationDirection::Forward;
        self.current_index += 1;
        log::debug!("story -> {} (forward)", self.current_index);
        true
    }

    pub fn go_previous_story(&mut self) -> bool {
        if !self.can_go_previous_story() {
            return false;
        }
        self.direction = NavigationDirection::Backward;
        self.current_index -= 1;
        log::debug!("story -> {} (backward)", self.current_index);
        true
    }

    pub fn step(&mut self, step: StoryStep) -> bool {
        match step {
            StoryStep::Previous => self.go_previous_story(),
            StoryStep::Next => self.go_next_story(),
        }
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }

    /// Clears transient state when the viewer closes.
    pub fn close(&mut self, behavior: CloseBehavior) {
        self.direction = NavigationDirection::None;
        if behavior == CloseBehavior::Reset {
            self.current_index = 0;
            self.is_muted = self.start_muted;
        }
    }

    /// Cards within the window around the active story, left to right.
    pub fn visible_cards(&self) -> Vec<VisibleCard> {
        let radius = i64::from(self.radius);
        let current = self.current_index as i64;
        (-radius..=radius)
            .filter_map(|offset| {
                let index = current + offset;
                if index < 0 || index >= self.story_count as i64 {
                    return None;
                }
                let position = CardPosition::new(offset as i32)?;
                Some(VisibleCard {
                    story_index: index as usize,
                    position,
                    start_at_last_substory: position.is_active()
                        && self.direction == NavigationDirection::Backward,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn carousel(count: usize) -> CarouselState {
        CarouselState::new(count, &ViewerConfig::default())
    }

    #[test]
    fn positions_outside_window_are_rejected() {
        assert_eq!(CardPosition::new(-3).map(CardPosition::get), Some(-3));
        assert_eq!(CardPosition::new(4), None);
        assert_eq!(CardPosition::new(-4), None);
    }

    #[test]
    fn next_at_last_story_is_a_no_op() {
        let mut state = carousel(2);
        assert!(state.go_next_story());
        assert!(!state.go_next_story());
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.direction(), NavigationDirection::Forward);
    }

    #[test]
    fn previous_at_first_story_is_a_no_op() {
        let mut state = carousel(3);
        assert!(!state.go_previous_story());
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.direction(), NavigationDirection::None);
    }

    #[test]
    fn window_is_clipped_at_the_edges() {
        let state = carousel(10);
        let positions: Vec<i8> = state.visible_cards().iter().map(|c| c.position.get()).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn only_the_active_card_starts_at_last_after_going_back() {
        let mut state = carousel(10);
        for _ in 0..5 {
            state.go_next_story();
        }
        state.go_previous_story();

        let cards = state.visible_cards();
        assert_eq!(cards.len(), 7);
        let flagged: Vec<i8> = cards
            .iter()
            .filter(|c| c.start_at_last_substory)
            .map(|c| c.position.get())
            .collect();
        assert_eq!(flagged, vec![0]);
        let active = cards.iter().find(|c| c.position.is_active()).unwrap();
        assert_eq!(active.story_index, 4);
    }

    #[test]
    fn forward_navigation_never_flags_start_at_last() {
        let mut state = carousel(4);
        state.go_next_story();
        assert!(state.visible_cards().iter().all(|c| !c.start_at_last_substory));
    }

    #[test]
    fn smaller_radius_narrows_the_window() {
        let config = ViewerConfig {
            window_radius: 1,
            ..ViewerConfig::default()
        };
        let mut state = CarouselState::new(6, &config);
        state.go_next_story();
        state.go_next_story();
        let indices: Vec<usize> = state.visible_cards().iter().map(|c| c.story_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn mute_is_one_shared_flag() {
        let mut state = carousel(3);
        assert!(state.is_muted());
        state.toggle_mute();
        assert!(!state.is_muted());
        state.go_next_story();
        assert!(!state.is_muted());
    }

    #[test]
    fn close_resets_or_resumes() {
        let mut state = carousel(3);
        state.go_next_story();
        state.go_next_story();
        state.go_previous_story();
        state.close(CloseBehavior::Resume);
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.direction(), NavigationDirection::None);

        state.toggle_mute();
        state.close(CloseBehavior::Reset);
        assert_eq!(state.current_index(), 0);
        assert!(state.is_muted());
    }

    #[test]
    fn empty_carousel_shows_nothing() {
        let state = carousel(0);
        assert!(state.visible_cards().is_empty());
        assert!(!state.can_go_next_story());
    }

    proptest! {
        #[test]
        fn window_has_one_active_card_and_at_most_seven(
            count in 1usize..40,
            moves in prop::collection::vec(any::<bool>(), 0..80)
        ) {
            let mut state = carousel(count);
            for forward in moves {
                if forward { state.go_next_story(); } else { state.go_previous_story(); }
                prop_assert!(state.current_index() < count);

                let cards = state.visible_cards();
                prop_assert!(cards.len() <= 7);
                prop_assert_eq!(cards.iter().filter(|c| c.position.is_active()).count(), 1);
                prop_assert!(cards.iter().all(|c| c.story_index < count));
                prop_assert!(cards.iter().all(|c| !c.start_at_last_substory || c.position.is_active()));
            }
        }
    }
}
