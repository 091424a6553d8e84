use crate::carousel::{CarouselState, StoryStep};
use crate::config::{CloseBehavior, ViewerConfig};
use crate::preload::use_story_preload;
use crate::stories::Story;
use crate::story_card::StoryCard;
use std::rc::Rc;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

pub enum CarouselAction {
    Step(StoryStep),
    ToggleMute,
    Close(CloseBehavior),
}

impl Reducible for CarouselState {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            CarouselAction::Step(step) => {
                next.step(step);
            }
            CarouselAction::ToggleMute => next.toggle_mute(),
            CarouselAction::Close(behavior) => next.close(behavior),
        }
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct StoryViewerProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub stories: Rc<Vec<Rc<Story>>>,
    #[prop_or_default]
    pub config: ViewerConfig,
}

/// The story carousel: a window of cards around the current story, at most
/// one of which plays.
#[function_component(StoryViewer)]
pub fn story_viewer(props: &StoryViewerProps) -> Html {
    let carousel = {
        let count = props.stories.len();
        let config = props.config.clone();
        use_reducer(move || CarouselState::new(count, &config))
    };

    {
        let carousel = carousel.dispatcher();
        let behavior = props.config.close_behavior;
        use_effect_with(props.is_open, move |is_open| {
            if !*is_open {
                carousel.dispatch(CarouselAction::Close(behavior));
            }
        });
    }

    let urls = use_memo(props.stories.clone(), |stories| {
        stories
            .iter()
            .flat_map(|story| story.substories.iter().map(|s| s.video_url.clone()))
            .collect::<Vec<_>>()
    });
    use_story_preload(
        urls,
        props.is_open && props.config.preload,
        props.config.preload_delay_ms,
    );

    if !props.is_open || props.stories.is_empty() {
        return html! {};
    }

    let on_story_step = {
        let carousel = carousel.dispatcher();
        Callback::from(move |step: StoryStep| carousel.dispatch(CarouselAction::Step(step)))
    };
    let on_toggle_mute = {
        let carousel = carousel.dispatcher();
        Callback::from(move |_: ()| carousel.dispatch(CarouselAction::ToggleMute))
    };
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    let can_go_previous_story = carousel.can_go_previous_story();
    let can_go_next_story = carousel.can_go_next_story();

    let cards = carousel.visible_cards().into_iter().filter_map(|visible| {
        let story = props.stories.get(visible.story_index)?.clone();
        let id = story.id;
        Some(html! {
            <StoryCard
                key={id}
                {story}
                position={visible.position}
                is_active={visible.position.is_active()}
                is_muted={carousel.is_muted()}
                start_at_last_substory={visible.start_at_last_substory}
                {can_go_previous_story}
                {can_go_next_story}
                on_toggle_mute={on_toggle_mute.clone()}
                on_story_step={on_story_step.clone()}
            />
        })
    });

    html! {
        <div class="story-viewer" role="dialog" aria-modal="true" aria-label="Stories">
            <button
                class="close-button"
                type="button"
                onclick={on_close}
                aria-label="Close story viewer"
                title="Close"
            >
                <Icon icon_id={IconId::LucideX} width={"24"} height={"24"} />
            </button>
            <div class="story-track">
                { for cards }
            </div>
        </div>
    }
}
