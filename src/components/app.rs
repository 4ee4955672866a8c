// Demo page used when the host document declares no mount points

use yew::prelude::*;

use super::zoom_image::ZoomImage;
use crate::config::ZoomOptions;

#[function_component(App)]
pub fn app() -> Html {
    let drag_opts = ZoomOptions {
        buttons: true,
        ..Default::default()
    };
    let lens_opts = ZoomOptions {
        hover_preview: true,
        wheel: false,
        double_click: false,
        ..Default::default()
    };
    html! {
        <div id="root" style="display:flex; gap:24px; padding:24px; flex-wrap:wrap;">
            <div>
                <h3>{"Drag / wheel / double-click"}</h3>
                <div style="width:480px; height:360px; border:1px solid #30363d;">
                    <ZoomImage src="assets/sample.jpg" alt="pan and zoom demo" options={drag_opts} />
                </div>
            </div>
            <div>
                <h3>{"Hover magnifier"}</h3>
                <div style="border:1px solid #30363d;">
                    <ZoomImage src="assets/sample.jpg" alt="magnifier demo" options={lens_opts} />
                </div>
            </div>
        </div>
    }
}
