use crate::card::{CardController, CardEffect};
use crate::carousel::{CardPosition, StoryStep};
use crate::controls::{NavigationButtons, ProgressBar, VideoControls};
use crate::keyboard::{use_keyboard_navigation, NavAction, NavAvailability};
use crate::playback::PendingPlay;
use crate::presentation::{frame_style, play_pause_label};
use crate::stories::Story;
use crate::video_port::VideoElementPort;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlMediaElement, TouchEvent};
use yew::prelude::*;

type SharedCard = Rc<RefCell<CardController<VideoElementPort>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct StoryCardProps {
    pub story: Rc<Story>,
    pub position: CardPosition,
    pub is_active: bool,
    pub is_muted: bool,
    #[prop_or_default]
    pub start_at_last_substory: bool,
    pub can_go_previous_story: bool,
    pub can_go_next_story: bool,
    pub on_toggle_mute: Callback<()>,
    /// Story-level navigation: bounds reached, last substory ended, or an
    /// adjacent card was selected.
    pub on_story_step: Callback<StoryStep>,
}

fn spawn_play(card: SharedCard, pending: PendingPlay, redraw: UseForceUpdateHandle) {
    wasm_bindgen_futures::spawn_local(async move {
        let PendingPlay { epoch, attempt } = pending;
        let result = attempt.await;
        if card.borrow_mut().settle_play(epoch, result) {
            redraw.force_update();
        }
    });
}

fn apply_effect(effect: CardEffect, redraw: &UseForceUpdateHandle, on_story_step: &Callback<StoryStep>) {
    match effect {
        CardEffect::None => {}
        CardEffect::SubstoryChanged(index) => {
            log::debug!("substory -> {index}");
            redraw.force_update();
        }
        CardEffect::Story(step) => on_story_step.emit(step),
    }
}

#[function_component(StoryCard)]
pub fn story_card(props: &StoryCardProps) -> Html {
    let video_ref = use_node_ref();
    let frame_ref = use_node_ref();
    let redraw = use_force_update();
    let is_hovered = use_state(|| false);

    let card: SharedCard = {
        let port = VideoElementPort::new(video_ref.clone());
        let count = props.story.substories.len();
        let (position, is_active, at_last) =
            (props.position, props.is_active, props.start_at_last_substory);
        use_mut_ref(move || CardController::new(port, count, position, is_active, at_last))
    };

    let (substory_index, view, is_pressed, can_go_previous, can_go_next, is_clickable) = {
        let mut controller = card.borrow_mut();
        let index = controller.sync(props.position, props.is_active, props.start_at_last_substory);
        let nav = controller.navigation();
        (
            index,
            controller.view(),
            controller.is_pressed(),
            nav.can_go_previous(props.can_go_previous_story),
            nav.can_go_next(props.can_go_next_story),
            nav.is_clickable(),
        )
    };
    let substory = props.story.substories.get(substory_index).cloned();
    let substory_id = substory.as_ref().map(|substory| substory.id);

    // Mute first so a fresh element is muted before it is asked to play.
    {
        let card = card.clone();
        use_effect_with((props.is_muted, substory_id), move |(muted, _)| {
            card.borrow_mut().set_muted(*muted);
        });
    }

    // Start or stop playback whenever activation or the substory changes.
    {
        let card = card.clone();
        let redraw = redraw.clone();
        use_effect_with((props.is_active, substory_id), move |_| {
            let pending = card.borrow_mut().apply_activation();
            if let Some(pending) = pending {
                spawn_play(card, pending, redraw.clone());
            }
            redraw.force_update();
        });
    }

    let go_previous = {
        let card = card.clone();
        let redraw = redraw.clone();
        let on_story_step = props.on_story_step.clone();
        Callback::from(move |_: ()| {
            let effect = card.borrow_mut().go_previous();
            apply_effect(effect, &redraw, &on_story_step);
        })
    };

    let go_next = {
        let card = card.clone();
        let redraw = redraw.clone();
        let on_story_step = props.on_story_step.clone();
        Callback::from(move |_: ()| {
            let effect = card.borrow_mut().go_next();
            apply_effect(effect, &redraw, &on_story_step);
        })
    };

    let on_key_action = {
        let go_previous = go_previous.clone();
        let go_next = go_next.clone();
        let on_story_step = props.on_story_step.clone();
        Callback::from(move |action: NavAction| match action {
            NavAction::Previous => go_previous.emit(()),
            NavAction::Next => go_next.emit(()),
            NavAction::PreviousStory => on_story_step.emit(StoryStep::Previous),
            NavAction::NextStory => on_story_step.emit(StoryStep::Next),
        })
    };
    use_keyboard_navigation(
        props.is_active,
        NavAvailability {
            can_go_previous,
            can_go_next,
            can_go_previous_story: props.can_go_previous_story,
            can_go_next_story: props.can_go_next_story,
        },
        on_key_action,
    );

    let toggle_play = {
        let card = card.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            let pending = card.borrow_mut().toggle_play_pause();
            match pending {
                Some(pending) => spawn_play(card.clone(), pending, redraw.clone()),
                None => redraw.force_update(),
            }
        })
    };

    let toggle_mute = {
        let card = card.clone();
        let on_toggle_mute = props.on_toggle_mute.clone();
        Callback::from(move |_: ()| {
            if card.borrow().request_toggle_mute() {
                on_toggle_mute.emit(());
            }
        })
    };

    let on_time_update = {
        let card = card.clone();
        let redraw = redraw.clone();
        Callback::from(move |e: Event| {
            let Some(video) = e.target_dyn_into::<HtmlMediaElement>() else {
                return;
            };
            let updated = card
                .borrow_mut()
                .on_time_update(video.current_time(), video.duration());
            if updated.is_some() {
                redraw.force_update();
            }
        })
    };

    let on_ended = {
        let card = card.clone();
        let redraw = redraw.clone();
        let on_story_step = props.on_story_step.clone();
        Callback::from(move |_: Event| {
            let effect = card.borrow_mut().on_media_ended();
            apply_effect(effect, &redraw, &on_story_step);
        })
    };

    let on_press = {
        let card = card.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            if card.borrow_mut().press() {
                redraw.force_update();
            }
        })
    };

    let on_release = {
        let card = card.clone();
        let redraw = redraw.clone();
        let on_story_step = props.on_story_step.clone();
        Callback::from(move |_: ()| {
            let step = card.borrow_mut().release();
            redraw.force_update();
            if let Some(step) = step {
                on_story_step.emit(step);
            }
        })
    };

    let on_cancel = {
        let card = card.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            let mut controller = card.borrow_mut();
            if controller.is_pressed() {
                controller.cancel_press();
                drop(controller);
                redraw.force_update();
            }
        })
    };

    let on_touch_move = {
        let on_cancel = on_cancel.clone();
        let frame_ref = frame_ref.clone();
        Callback::from(move |e: TouchEvent| {
            let (Some(touch), Some(frame)) = (e.touches().get(0), frame_ref.cast::<web_sys::Element>())
            else {
                return;
            };
            let rect = frame.get_bounding_client_rect();
            let (x, y) = (f64::from(touch.client_x()), f64::from(touch.client_y()));
            let inside = x >= rect.left() && x <= rect.right() && y >= rect.top() && y <= rect.bottom();
            if !inside {
                on_cancel.emit(());
            }
        })
    };

    let on_mouse_enter = {
        let is_hovered = is_hovered.clone();
        Callback::from(move |_: MouseEvent| is_hovered.set(true))
    };

    let on_mouse_leave = {
        let is_hovered = is_hovered.clone();
        let on_cancel = on_cancel.clone();
        Callback::from(move |_: MouseEvent| {
            on_cancel.emit(());
            is_hovered.set(false);
        })
    };

    let on_overlay_key = {
        let toggle_play = toggle_play.clone();
        Callback::from(move |e: KeyboardEvent| {
            if matches!(e.key().as_str(), " " | "Enter") {
                e.prevent_default();
                toggle_play.emit(());
            }
        })
    };

    let Some(substory) = substory else {
        return html! {};
    };
    let is_active = props.is_active;

    html! {
        <div
            ref={frame_ref}
            class={classes!("story-card", is_clickable.then_some("clickable"))}
            style={frame_style(props.position, is_pressed)}
            onmousedown={on_press.reform(|_: MouseEvent| ())}
            onmouseup={on_release.reform(|_: MouseEvent| ())}
            onmouseenter={on_mouse_enter}
            onmouseleave={on_mouse_leave}
            ontouchstart={on_press.reform(|_: TouchEvent| ())}
            ontouchend={on_release.reform(|_: TouchEvent| ())}
            ontouchmove={on_touch_move}
            ontouchcancel={on_cancel.reform(|_: TouchEvent| ())}
        >
            if is_active {
                <NavigationButtons
                    {can_go_previous}
                    {can_go_next}
                    on_previous={go_previous}
                    on_next={go_next}
                />
            }
            <div class="story-card-inner">
                <video
                    key={substory.id.to_string()}
                    ref={video_ref}
                    class="story-video"
                    src={substory.video_url.clone()}
                    muted={props.is_muted}
                    playsinline=true
                    preload="auto"
                    ontimeupdate={on_time_update}
                    onended={on_ended}
                />
                if is_active {
                    <div
                        class="click-overlay"
                        role="button"
                        tabindex="0"
                        aria-label={play_pause_label(view.is_playing)}
                        onclick={toggle_play.reform(|_: MouseEvent| ())}
                        onkeydown={on_overlay_key}
                    />
                    <div class="gradient-top" />
                    <div class="gradient-bottom" />
                    <ProgressBar
                        substory_count={props.story.substories.len()}
                        current={substory_index}
                        progress={view.progress}
                    />
                    <VideoControls
                        is_playing={view.is_playing}
                        is_muted={props.is_muted}
                        is_hovered={*is_hovered}
                        on_toggle_play={toggle_play}
                        on_toggle_mute={toggle_mute}
                    />
                } else {
                    <div class="inactive-overlay" />
                }
            </div>
        </div>
    }
}
