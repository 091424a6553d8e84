//! Best-effort cache warming for story videos.
//!
//! Nothing here affects playback. Every failure is logged at debug level and
//! dropped, and unmounting aborts outstanding fetches.

use crate::error::{describe_js, PreloadError};
use gloo_timers::future::TimeoutFuture;
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, HtmlLinkElement, ReadableStreamDefaultReader, RequestCache,
    RequestInit, Response,
};
use yew::prelude::*;

/// Non-empty urls in first-seen order, without repeats.
pub fn unique_urls<'a>(urls: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| !url.is_empty())
        .filter(|url| seen.insert(*url))
        .map(str::to_owned)
        .collect()
}

fn dom_err(err: JsValue) -> PreloadError {
    PreloadError::Dom(describe_js(&err))
}

fn add_preload_hints(urls: &[String]) -> Result<(), PreloadError> {
    let window = web_sys::window().ok_or(PreloadError::NoWindow)?;
    let document = window.document().ok_or(PreloadError::NoWindow)?;
    let head = document.head().ok_or(PreloadError::NoHead)?;

    for url in urls {
        let selector = format!(
            "link[rel=\"preload\"][href=\"{}\"]",
            url.replace('"', "\\\"")
        );
        if let Ok(Some(_)) = head.query_selector(&selector) {
            continue;
        }
        let link: HtmlLinkElement = document
            .create_element("link")
            .map_err(dom_err)?
            .dyn_into()
            .map_err(|_| PreloadError::Dom("created element is not a link".into()))?;
        link.set_rel("preload");
        link.set_as("video");
        link.set_href(url);
        link.set_attribute("fetchpriority", "high").map_err(dom_err)?;
        head.append_child(&link).map_err(dom_err)?;
    }
    Ok(())
}

async fn read_to_end(reader: &ReadableStreamDefaultReader) -> Result<(), PreloadError> {
    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|err| PreloadError::Drain(describe_js(&err)))?;
        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .map_err(|err| PreloadError::Drain(describe_js(&err)))?
            .as_bool()
            .unwrap_or(true);
        if done {
            return Ok(());
        }
    }
}

/// Reads the whole body so the browser commits it to its cache.
async fn drain(response: &Response) -> Result<(), PreloadError> {
    let Some(body) = response.body() else {
        return Ok(());
    };
    let reader: ReadableStreamDefaultReader = body.get_reader().unchecked_into();
    let result = read_to_end(&reader).await;
    reader.release_lock();
    result
}

async fn warm(url: String, signal: AbortSignal) -> Result<(), PreloadError> {
    let window = web_sys::window().ok_or(PreloadError::NoWindow)?;
    let init = RequestInit::new();
    init.set_cache(RequestCache::ForceCache);
    init.set_signal(Some(&signal));

    let response: Response = JsFuture::from(window.fetch_with_str_and_init(&url, &init))
        .await
        .map_err(|err| PreloadError::Fetch(describe_js(&err)))?
        .dyn_into()
        .map_err(|_| PreloadError::Fetch("fetch resolved to a non-response".into()))?;

    if !response.ok() {
        return Err(PreloadError::Status {
            url,
            status: response.status(),
        });
    }
    drain(&response).await
}

/// Warms the cache for `urls` once per mount, after `delay_ms`, while
/// `enabled`. Unmounting or disabling aborts in-flight fetches.
#[hook]
pub fn use_story_preload(urls: Rc<Vec<String>>, enabled: bool, delay_ms: u32) {
    let started = use_mut_ref(|| false);

    use_effect_with(enabled, move |enabled| {
        let mut controller = None;
        if *enabled && !*started.borrow() && !urls.is_empty() {
            match AbortController::new() {
                Ok(abort) => {
                    *started.borrow_mut() = true;
                    let signal = abort.signal();
                    let urls = unique_urls(urls.iter().map(String::as_str));
                    log::debug!("preloading {} videos", urls.len());
                    wasm_bindgen_futures::spawn_local(async move {
                        TimeoutFuture::new(delay_ms).await;
                        if signal.aborted() {
                            return;
                        }
                        if let Err(err) = add_preload_hints(&urls) {
                            log::debug!("preload hints skipped: {err}");
                        }
                        for url in urls {
                            let signal = signal.clone();
                            wasm_bindgen_futures::spawn_local(async move {
                                if let Err(err) = warm(url, signal).await {
                                    log::debug!("preload failed: {err}");
                                }
                            });
                        }
                    });
                    controller = Some(abort);
                }
                Err(err) => log::debug!("preload disabled: {}", describe_js(&err)),
            }
        }
        move || {
            if let Some(controller) = controller {
                controller.abort();
            }
        }
    });
}
