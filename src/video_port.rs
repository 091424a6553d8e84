use crate::error::{describe_js, PlaybackError};
use crate::playback::{PlayAttempt, PlaybackPort};
use std::future::ready;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlMediaElement;
use yew::NodeRef;

/// [`PlaybackPort`] over whichever `<video>` element the card currently has
/// mounted. The element is looked up on every call, so a remount for a new
/// substory is picked up without rebuilding the controller.
#[derive(Clone, Debug, Default)]
pub struct VideoElementPort {
    node: NodeRef,
}

impl VideoElementPort {
    pub fn new(node: NodeRef) -> Self {
        Self { node }
    }

    fn element(&self) -> Option<HtmlMediaElement> {
        self.node.cast::<HtmlMediaElement>()
    }
}

impl PlaybackPort for VideoElementPort {
    fn play(&self) -> PlayAttempt {
        let Some(video) = self.element() else {
            return Box::pin(ready(Err(PlaybackError::NoElement)));
        };
        match video.play() {
            Ok(promise) => Box::pin(async move {
                JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err| PlaybackError::Rejected(describe_js(&err)))
            }),
            Err(err) => Box::pin(ready(Err(PlaybackError::Rejected(describe_js(&err))))),
        }
    }

    fn pause(&self) {
        if let Some(video) = self.element() {
            video.pause().ok();
        }
    }

    fn rewind(&self) {
        if let Some(video) = self.element() {
            video.set_current_time(0.0);
        }
    }

    fn set_muted(&self, muted: bool) {
        if let Some(video) = self.element() {
            video.set_muted(muted);
        }
    }

    fn is_paused(&self) -> bool {
        self.element().map(|video| video.paused()).unwrap_or(true)
    }
}
