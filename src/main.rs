use wasm_bindgen::JsCast;
use web_sys::Element;

mod components;
mod config;
mod state;
mod util;

use components::{App, ZoomImage, ZoomImageProps};
use config::ZoomOptions;
use util::clog;

/// Mounts one widget per `.zoom-img-wrap` element in the host document.
/// Each mount point supplies its image via `data-src` and may tune the
/// widget with a JSON `data-zoom` attribute. Unresolvable or incomplete
/// mount points are skipped; the rest of the page continues unaffected.
fn mount_declared_widgets() -> usize {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return 0;
    };
    let Ok(nodes) = document.query_selector_all(".zoom-img-wrap") else {
        return 0;
    };
    let mut mounted = 0;
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(src) = el.get_attribute("data-src") else {
            clog("zoom: skipping mount point without data-src");
            continue;
        };
        let options = match el.get_attribute("data-zoom") {
            Some(raw) => match serde_json::from_str::<ZoomOptions>(&raw) {
                Ok(o) => o,
                Err(e) => {
                    clog(&format!("zoom: bad data-zoom JSON ({e}), using defaults"));
                    ZoomOptions::default()
                }
            },
            None => ZoomOptions::default(),
        };
        let alt = el.get_attribute("data-alt").unwrap_or_default();
        yew::Renderer::<ZoomImage>::with_root_and_props(
            el,
            ZoomImageProps {
                src: src.into(),
                alt: alt.into(),
                options,
            },
        )
        .render();
        mounted += 1;
    }
    mounted
}

fn main() {
    if mount_declared_widgets() == 0 {
        yew::Renderer::<App>::new().render();
    }
}
