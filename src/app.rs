use crate::error::StoryDataError;
use crate::stories::{Story, StoryManifest};
use crate::story_viewer::StoryViewer;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub manifest: Result<Rc<StoryManifest>, StoryDataError>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let is_open = use_state(|| false);

    let stories = use_memo(props.manifest.as_ref().ok().cloned(), |manifest| {
        manifest
            .iter()
            .flat_map(|manifest| manifest.stories.iter().cloned().map(Rc::new))
            .collect::<Vec<Rc<Story>>>()
    });

    let on_open = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(true))
    };
    let on_close = {
        let is_open = is_open.clone();
        Callback::from(move |_: ()| {
            log::debug!("viewer closed");
            is_open.set(false);
        })
    };

    let manifest = match &props.manifest {
        Ok(manifest) => manifest,
        Err(err) => {
            return html! {
                <main class="container">
                    <div class="load-error" role="alert">
                        <p>{"Stories could not be loaded."}</p>
                        <p class="load-error-detail">{err.to_string()}</p>
                    </div>
                </main>
            };
        }
    };

    html! {
        <>
            <StoryViewer
                is_open={*is_open}
                {on_close}
                {stories}
                config={manifest.viewer.clone()}
            />
            <main class="container">
                <button class="open-btn" type="button" onclick={on_open}>{"Open stories"}</button>
            </main>
        </>
    }
}
