mod app;
mod card;
mod carousel;
mod config;
mod controls;
mod error;
mod keyboard;
mod logging;
mod navigation;
mod playback;
mod preload;
mod presentation;
mod stories;
mod story_card;
mod story_viewer;
mod video_port;

use app::{App, AppProps};
use config::ViewerConfig;
use std::rc::Rc;
use stories::StoryManifest;

fn main() {
    console_error_panic_hook::set_once();

    let manifest = StoryManifest::bundled().map(Rc::new);
    let level = match &manifest {
        Ok(manifest) => manifest.viewer.log_level,
        Err(_) => ViewerConfig::default().log_level,
    };
    logging::init(level.into());

    match &manifest {
        Ok(manifest) => log::info!("{} stories bundled", manifest.stories.len()),
        Err(err) => log::warn!("bundled stories rejected: {err}"),
    }

    yew::Renderer::<App>::with_props(AppProps { manifest }).render();
}
