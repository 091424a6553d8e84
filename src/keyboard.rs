use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    /// Previous substory, or previous story at the first substory.
    Previous,
    Next,
    /// Previous story, skipping whatever substories are left.
    PreviousStory,
    NextStory,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavAvailability {
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub can_go_previous_story: bool,
    pub can_go_next_story: bool,
}

/// Arrow keys to navigation actions. Unavailable actions map to nothing so
/// the key keeps its default behaviour.
pub fn map_key(key: &str, availability: NavAvailability) -> Option<NavAction> {
    match key {
        "ArrowLeft" if availability.can_go_previous => Some(NavAction::Previous),
        "ArrowRight" if availability.can_go_next => Some(NavAction::Next),
        "ArrowUp" if availability.can_go_previous_story => Some(NavAction::PreviousStory),
        "ArrowDown" if availability.can_go_next_story => Some(NavAction::NextStory),
        _ => None,
    }
}

/// Whether key presses aimed at this element are text entry.
pub fn is_text_entry(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || tag_name.eq_ignore_ascii_case("input")
        || tag_name.eq_ignore_ascii_case("textarea")
}

fn targets_text_entry(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        .map(|element| is_text_entry(&element.tag_name(), element.is_content_editable()))
        .unwrap_or(false)
}

/// Window-level arrow key handling, installed only while `enabled`.
#[hook]
pub fn use_keyboard_navigation(
    enabled: bool,
    availability: NavAvailability,
    on_action: Callback<NavAction>,
) {
    use_effect_with((enabled, availability), move |(enabled, availability)| {
        let availability = *availability;
        let listener = if *enabled {
            web_sys::window().map(|window| {
                EventListener::new_with_options(
                    &window,
                    "keydown",
                    EventListenerOptions::enable_prevent_default(),
                    move |event: &Event| {
                        if targets_text_entry(event) {
                            return;
                        }
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        if let Some(action) = map_key(&event.key(), availability) {
                            event.prevent_default();
                            log::trace!("key {} -> {:?}", event.key(), action);
                            on_action.emit(action);
                        }
                    },
                )
            })
        } else {
            None
        };
        move || drop(listener)
    });
}
