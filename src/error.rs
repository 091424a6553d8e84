use thiserror::Error;

/// Problems with the bundled story manifest.
#[derive(Debug, Error, PartialEq)]
pub enum StoryDataError {
    #[error("story manifest is not valid JSON: {0}")]
    Parse(String),
    #[error("story manifest contains no stories")]
    Empty,
    #[error("story {story_id} has no substories")]
    NoSubstories { story_id: u32 },
    #[error("story id {story_id} appears more than once")]
    DuplicateStory { story_id: u32 },
    #[error("story {story_id} repeats substory id {substory_id}")]
    DuplicateSubstory { story_id: u32, substory_id: u32 },
    #[error("story {story_id} substory {substory_id} has an empty video url")]
    EmptyVideoUrl { story_id: u32, substory_id: u32 },
}

impl From<serde_json::Error> for StoryDataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A play attempt that did not start. Always recovered locally to "paused".
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("video element is not mounted")]
    NoElement,
    #[error("play request rejected: {0}")]
    Rejected(String),
}

/// Preload failures. These are logged and dropped, never surfaced.
#[derive(Debug, Error)]
pub enum PreloadError {
    #[error("browser window is unavailable")]
    NoWindow,
    #[error("document head is unavailable")]
    NoHead,
    #[error("dom call failed: {0}")]
    Dom(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("server answered {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("reading body failed: {0}")]
    Drain(String),
}

/// Renders a JS error value for logs and error payloads.
pub fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &wasm_bindgen::JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
