use crate::presentation::{mute_label, play_pause_label, segment_value, NAV_BUTTON_OFFSET_PX};
use yew::prelude::*;
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressBarProps {
    pub substory_count: usize,
    pub current: usize,
    pub progress: f64,
    #[prop_or(AttrValue::Static("story-progress"))]
    pub class: AttrValue,
}

/// One segment per substory. Watched ones are full, the current one tracks
/// playback.
#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let segments = (0..props.substory_count).map(|segment| {
        let value = segment_value(segment, props.current, props.progress);
        let completed = segment < props.current;
        let fill = format!("transform: scaleX({});", value / 100.0);
        html! {
            <div
                key={segment}
                class={classes!("progress-segment", completed.then_some("completed"))}
                role="progressbar"
                aria-valuenow={format!("{value:.0}")}
                aria-valuemin="0"
                aria-valuemax="100"
            >
                if !completed {
                    <div class="progress-fill" style={fill}></div>
                }
            </div>
        }
    });

    html! {
        <div class={props.class.clone()} role="group" aria-label="Story progress">
            { for segments }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct ControlButtonProps {
    onclick: Callback<()>,
    label: AttrValue,
    title: AttrValue,
    children: Html,
}

#[function_component(ControlButton)]
fn control_button(props: &ControlButtonProps) -> Html {
    let onclick = {
        let onclick = props.onclick.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            onclick.emit(());
        })
    };
    html! {
        <button class="ctrl-btn" type="button" {onclick} aria-label={props.label.clone()} title={props.title.clone()}>
            { props.children.clone() }
        </button>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct VideoControlsProps {
    pub is_playing: bool,
    pub is_muted: bool,
    pub is_hovered: bool,
    pub on_toggle_play: Callback<()>,
    pub on_toggle_mute: Callback<()>,
    #[prop_or(true)]
    pub show_play_pause: bool,
    #[prop_or(true)]
    pub show_mute: bool,
    #[prop_or(24)]
    pub icon_size: u32,
}

/// Play/pause and mute buttons; faded out unless the card is hovered.
#[function_component(VideoControls)]
pub fn video_controls(props: &VideoControlsProps) -> Html {
    let size = props.icon_size.to_string();
    let play_icon = if props.is_playing { IconId::LucidePause } else { IconId::LucidePlay };
    let mute_icon = if props.is_muted { IconId::LucideVolumeX } else { IconId::LucideVolume2 };

    html! {
        <div class={classes!("video-controls", props.is_hovered.then_some("visible"))}>
            if props.show_play_pause {
                <ControlButton
                    onclick={props.on_toggle_play.clone()}
                    label={play_pause_label(props.is_playing)}
                    title={if props.is_playing { "Pause" } else { "Play" }}
                >
                    <Icon icon_id={play_icon} width={size.clone()} height={size.clone()} />
                </ControlButton>
            }
            if props.show_mute {
                <ControlButton
                    onclick={props.on_toggle_mute.clone()}
                    label={mute_label(props.is_muted)}
                    title={if props.is_muted { "Unmute" } else { "Mute" }}
                >
                    <Icon icon_id={mute_icon} width={size.clone()} height={size} />
                </ControlButton>
            }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct NavigationButtonsProps {
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub on_previous: Callback<()>,
    pub on_next: Callback<()>,
    #[prop_or(16)]
    pub icon_size: u32,
}

#[function_component(NavigationButtons)]
pub fn navigation_buttons(props: &NavigationButtonsProps) -> Html {
    let size = props.icon_size.to_string();
    let on_previous = props.on_previous.reform(|_: MouseEvent| ());
    let on_next = props.on_next.reform(|_: MouseEvent| ());

    html! {
        <>
            if props.can_go_previous {
                <button
                    class="nav-button"
                    type="button"
                    style={format!("left: -{NAV_BUTTON_OFFSET_PX}px;")}
                    onclick={on_previous}
                    aria-label="Previous"
                    title="Previous"
                >
                    <Icon icon_id={IconId::LucideArrowLeft} width={size.clone()} height={size.clone()} />
                </button>
            }
            if props.can_go_next {
                <button
                    class="nav-button"
                    type="button"
                    style={format!("right: -{NAV_BUTTON_OFFSET_PX}px;")}
                    onclick={on_next}
                    aria-label="Next"
                    title="Next"
                >
                    <Icon icon_id={IconId::LucideArrowRight} width={size.clone()} height={size} />
                </button>
            }
        </>
    }
}
