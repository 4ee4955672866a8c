// Magnifier-lens hover preview, composed next to the pan/zoom widget.
// Shares no state with the drag/zoom transform.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::state::{Size, lens_frame};

#[derive(Properties, PartialEq, Clone)]
pub struct LensPreviewProps {
    /// Container the lens floats over; listeners attach here.
    pub container_ref: NodeRef,
    /// Image whose rendered size scales the lens background.
    pub image_ref: NodeRef,
    pub src: AttrValue,
    pub factor: f64,
}

#[function_component(LensPreview)]
pub fn lens_preview(props: &LensPreviewProps) -> Html {
    let lens_ref = use_node_ref();

    {
        let container_ref = props.container_ref.clone();
        let image_ref = props.image_ref.clone();
        let lens_ref = lens_ref.clone();
        use_effect_with((props.src.clone(), props.factor), move |(src, factor)| {
            let factor = *factor;
            let (Some(container), Some(image), Some(lens)) = (
                container_ref.cast::<HtmlElement>(),
                image_ref.cast::<HtmlElement>(),
                lens_ref.cast::<HtmlElement>(),
            ) else {
                return Box::new(|| ()) as Box<dyn FnOnce()>;
            };

            let bg_w = image.client_width() as f64 * factor;
            let bg_h = image.client_height() as f64 * factor;
            let style = lens.style();
            let _ = style.set_property("background-image", &format!("url({src})"));
            let _ = style.set_property("background-size", &format!("{bg_w}px {bg_h}px"));

            let visible = Rc::new(Cell::new(false));

            let mouseover_cb = {
                let visible = visible.clone();
                let lens = lens.clone();
                Closure::wrap(Box::new(move |_: MouseEvent| {
                    visible.set(true);
                    let _ = lens.class_list().add_1("active");
                    let _ = lens.style().set_property("visibility", "visible");
                }) as Box<dyn FnMut(_)>)
            };
            let mouseout_cb = {
                let visible = visible.clone();
                let lens = lens.clone();
                Closure::wrap(Box::new(move |_: MouseEvent| {
                    visible.set(false);
                    let _ = lens.class_list().remove_1("active");
                    let _ = lens.style().set_property("visibility", "hidden");
                }) as Box<dyn FnMut(_)>)
            };
            let mousemove_cb = {
                let visible = visible.clone();
                let container = container.clone();
                let lens = lens.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if !visible.get() {
                        return;
                    }
                    let rect = container.get_bounding_client_rect();
                    let frame = lens_frame(
                        e.client_x() as f64 - rect.left(),
                        e.client_y() as f64 - rect.top(),
                        Size::new(container.client_width() as f64, container.client_height() as f64),
                        Size::new(lens.client_width() as f64, lens.client_height() as f64),
                        factor,
                    );
                    let style = lens.style();
                    let _ = style.set_property(
                        "transform",
                        &format!("translate3d({}px, {}px, 0)", frame.x, frame.y),
                    );
                    let _ = style.set_property(
                        "background-position",
                        &format!("{}px {}px", frame.bg_x, frame.bg_y),
                    );
                }) as Box<dyn FnMut(_)>)
            };

            let _ = container.add_event_listener_with_callback(
                "mouseover",
                mouseover_cb.as_ref().unchecked_ref(),
            );
            let _ = container.add_event_listener_with_callback(
                "mouseout",
                mouseout_cb.as_ref().unchecked_ref(),
            );
            let _ = container.add_event_listener_with_callback(
                "mousemove",
                mousemove_cb.as_ref().unchecked_ref(),
            );

            Box::new(move || {
                let _ = container.remove_event_listener_with_callback(
                    "mouseover",
                    mouseover_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "mouseout",
                    mouseout_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
            }) as Box<dyn FnOnce()>
        });
    }

    html! {
        <div
            ref={lens_ref}
            class="zoom-lens"
            style="position:absolute; top:0; left:0; width:120px; height:120px; border:1px solid #30363d; border-radius:50%; background-repeat:no-repeat; pointer-events:none; visibility:hidden; z-index:1;"
        ></div>
    }
}
