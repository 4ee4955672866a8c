// Pan/zoom image widget: the drag state machine and zoom triggers wired
// over a container/image DOM pair.

use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlElement, HtmlImageElement, MouseEvent,
    TouchEvent, WheelEvent, Window,
};
use yew::prelude::*;

use crate::config::ZoomOptions;
use crate::state::{Bounds, DragSession, DragUpdate, Size, Transform, ZoomDirection};
use crate::util::clog;

use super::lens_preview::LensPreview;
use super::zoom_controls::ZoomControls;

const WRAP_STYLE: &str = "position:relative; width:100%; height:100%; overflow:hidden;";

/// One gesture session's temporary listeners. `detach` runs exactly once
/// per session and only removes listeners; the closures are freed later,
/// from outside the move handlers (a wasm Closure must not drop itself
/// while it is executing).
struct ActiveDrag {
    session: DragSession,
    detached: bool,
    mouse_move: Closure<dyn FnMut(MouseEvent)>,
    touch_move: Closure<dyn FnMut(TouchEvent)>,
    block_scroll: Closure<dyn FnMut(Event)>,
}

impl ActiveDrag {
    fn detach(&mut self, document: &Document, window: &Window) {
        if self.detached {
            return;
        }
        self.detached = true;
        let _ = document.remove_event_listener_with_callback(
            "mousemove",
            self.mouse_move.as_ref().unchecked_ref(),
        );
        let _ = document.remove_event_listener_with_callback(
            "touchmove",
            self.touch_move.as_ref().unchecked_ref(),
        );
        let _ = window.remove_event_listener_with_callback(
            "touchmove",
            self.block_scroll.as_ref().unchecked_ref(),
        );
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomImageProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub alt: AttrValue,
    #[prop_or_default]
    pub options: ZoomOptions,
}

#[function_component(ZoomImage)]
pub fn zoom_image(props: &ZoomImageProps) -> Html {
    let container_ref = use_node_ref();
    let image_ref = use_node_ref();
    let transform = use_mut_ref(Transform::default);
    let drag = use_mut_ref(|| None::<ActiveDrag>);
    let hover_block = use_mut_ref(|| None::<Closure<dyn FnMut(Event)>>);

    {
        let container_ref = container_ref.clone();
        let image_ref = image_ref.clone();
        let transform = transform.clone();
        let drag = drag.clone();
        let hover_block = hover_block.clone();
        use_effect_with(
            (props.src.clone(), props.options.clone()),
            move |(_, options)| {
                let options = match options.clone().validated() {
                    Ok(o) => o,
                    Err(e) => {
                        clog(&format!("zoom: invalid options, widget disabled: {e}"));
                        return Box::new(|| ()) as Box<dyn FnOnce()>;
                    }
                };
                let (Some(container), Some(image)) = (
                    container_ref.cast::<HtmlElement>(),
                    image_ref.cast::<HtmlImageElement>(),
                ) else {
                    // Unresolvable viewport: stay inert, the page goes on.
                    clog("zoom: container or image not mounted, widget disabled");
                    return Box::new(|| ()) as Box<dyn FnOnce()>;
                };
                let Some(window) = web_sys::window() else {
                    return Box::new(|| ()) as Box<dyn FnOnce()>;
                };
                let Some(document) = window.document() else {
                    return Box::new(|| ()) as Box<dyn FnOnce()>;
                };

                *transform.borrow_mut() =
                    Transform::new(options.initial_scale, options.zoom_step, options.scale_min);

                let apply: Rc<dyn Fn()> = {
                    let transform = transform.clone();
                    let image = image.clone();
                    Rc::new(move || {
                        let css = transform.borrow().css();
                        let _ = image.style().set_property("transform", &css);
                    })
                };

                // Geometry is read once at init; resize handling is out of
                // scope, like the original.
                let image_size =
                    Size::new(image.client_width() as f64, image.client_height() as f64);
                if options.hover_preview {
                    // Preview mode pins the container to the image size and
                    // skips centering.
                    let style = container.style();
                    let _ = style.set_property("width", &format!("{}px", image_size.width));
                    let _ = style.set_property("height", &format!("{}px", image_size.height));
                } else {
                    let container_size = Size::new(
                        container.client_width() as f64,
                        container.client_height() as f64,
                    );
                    transform.borrow_mut().center_in(container_size, image_size);
                }
                apply();

                let begin_drag: Rc<dyn Fn(f64, f64)> = {
                    let transform = transform.clone();
                    let drag = drag.clone();
                    let container = container.clone();
                    let document = document.clone();
                    let window = window.clone();
                    let apply = apply.clone();
                    Rc::new(move |start_x: f64, start_y: f64| {
                        // A second press while a session is live commits and
                        // detaches the old session first; press handlers are
                        // persistent, so dropping the old closures here is safe.
                        if let Some(mut prev) = drag.borrow_mut().take() {
                            prev.detach(&document, &window);
                            let (x, y) = prev.session.finish();
                            transform.borrow_mut().set_offset(x, y);
                        }

                        // Bounds are sampled once per session, not per move.
                        let rect = container.get_bounding_client_rect();
                        let bounds = Bounds {
                            left: rect.left(),
                            right: rect.right(),
                            top: rect.top(),
                            bottom: rect.bottom(),
                        };
                        let session = {
                            let t = transform.borrow();
                            DragSession::begin(start_x, start_y, t.offset_x, t.offset_y, bounds)
                        };

                        let on_point: Rc<dyn Fn(f64, f64)> = {
                            let transform = transform.clone();
                            let drag = drag.clone();
                            let document = document.clone();
                            let window = window.clone();
                            let apply = apply.clone();
                            Rc::new(move |x: f64, y: f64| {
                                let mut slot = drag.borrow_mut();
                                let Some(active) = slot.as_mut() else {
                                    return;
                                };
                                match active.session.on_move(x, y) {
                                    DragUpdate::Track { x, y } => {
                                        transform.borrow_mut().set_offset(x, y);
                                        apply();
                                    }
                                    DragUpdate::Abort { x, y } => {
                                        active.detach(&document, &window);
                                        transform.borrow_mut().set_offset(x, y);
                                        apply();
                                    }
                                    DragUpdate::Ignored => {}
                                }
                            })
                        };

                        let mouse_move = {
                            let on_point = on_point.clone();
                            Closure::wrap(Box::new(move |e: MouseEvent| {
                                on_point(e.client_x() as f64, e.client_y() as f64);
                            }) as Box<dyn FnMut(_)>)
                        };
                        let touch_move = {
                            let on_point = on_point.clone();
                            Closure::wrap(Box::new(move |e: TouchEvent| {
                                // Only the first touch point drives the gesture.
                                if let Some(t0) = e.touches().item(0) {
                                    on_point(t0.client_x() as f64, t0.client_y() as f64);
                                }
                            }) as Box<dyn FnMut(_)>)
                        };
                        let block_scroll = Closure::wrap(Box::new(move |e: Event| {
                            e.prevent_default();
                            e.stop_propagation();
                        }) as Box<dyn FnMut(_)>);

                        let _ = document.add_event_listener_with_callback(
                            "mousemove",
                            mouse_move.as_ref().unchecked_ref(),
                        );
                        let _ = document.add_event_listener_with_callback(
                            "touchmove",
                            touch_move.as_ref().unchecked_ref(),
                        );
                        let opts = AddEventListenerOptions::new();
                        opts.set_passive(false);
                        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                            "touchmove",
                            block_scroll.as_ref().unchecked_ref(),
                            &opts,
                        );

                        *drag.borrow_mut() = Some(ActiveDrag {
                            session,
                            detached: false,
                            mouse_move,
                            touch_move,
                            block_scroll,
                        });
                    })
                };

                let end_drag: Rc<dyn Fn()> = {
                    let transform = transform.clone();
                    let drag = drag.clone();
                    let document = document.clone();
                    let window = window.clone();
                    let apply = apply.clone();
                    Rc::new(move || {
                        // Release handlers are persistent, so the session and
                        // its closures can be dropped here.
                        if let Some(mut active) = drag.borrow_mut().take() {
                            active.detach(&document, &window);
                            let (x, y) = active.session.finish();
                            transform.borrow_mut().set_offset(x, y);
                            apply();
                        }
                    })
                };

                let mousedown_cb = {
                    let begin_drag = begin_drag.clone();
                    Closure::wrap(Box::new(move |e: MouseEvent| {
                        begin_drag(e.client_x() as f64, e.client_y() as f64);
                    }) as Box<dyn FnMut(_)>)
                };
                let touchstart_cb = {
                    let begin_drag = begin_drag.clone();
                    Closure::wrap(Box::new(move |e: TouchEvent| {
                        if let Some(t0) = e.touches().item(0) {
                            begin_drag(t0.client_x() as f64, t0.client_y() as f64);
                        }
                    }) as Box<dyn FnMut(_)>)
                };
                let mouseup_cb = {
                    let end_drag = end_drag.clone();
                    Closure::wrap(Box::new(move |_: MouseEvent| {
                        end_drag();
                    }) as Box<dyn FnMut(_)>)
                };
                let touchend_cb = {
                    let end_drag = end_drag.clone();
                    Closure::wrap(Box::new(move |_: TouchEvent| {
                        end_drag();
                    }) as Box<dyn FnMut(_)>)
                };
                // Native image dragging would race the gesture.
                let dragstart_cb = Closure::wrap(Box::new(move |e: Event| {
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>);

                let _ = image.add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = image.add_event_listener_with_callback(
                    "touchstart",
                    touchstart_cb.as_ref().unchecked_ref(),
                );
                let _ = image.add_event_listener_with_callback(
                    "dragstart",
                    dragstart_cb.as_ref().unchecked_ref(),
                );
                let _ = window.add_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = window.add_event_listener_with_callback(
                    "touchend",
                    touchend_cb.as_ref().unchecked_ref(),
                );

                let dblclick_cb = options.double_click.then(|| {
                    let transform = transform.clone();
                    let apply = apply.clone();
                    let cb = Closure::wrap(Box::new(move |_: MouseEvent| {
                        transform.borrow_mut().zoom(ZoomDirection::In);
                        apply();
                    }) as Box<dyn FnMut(_)>);
                    let _ = image
                        .add_event_listener_with_callback("dblclick", cb.as_ref().unchecked_ref());
                    cb
                });

                // Wheel zoom plus page-scroll suppression while hovered.
                let wheel_cbs = options.wheel.then(|| {
                    let wheel_cb = {
                        let transform = transform.clone();
                        let apply = apply.clone();
                        Closure::wrap(Box::new(move |e: WheelEvent| {
                            e.prevent_default();
                            let dir = if e.delta_y() < 0.0 {
                                ZoomDirection::In
                            } else {
                                ZoomDirection::Out
                            };
                            transform.borrow_mut().zoom(dir);
                            apply();
                        }) as Box<dyn FnMut(_)>)
                    };
                    let mouseover_cb = {
                        let hover_block = hover_block.clone();
                        let window = window.clone();
                        Closure::wrap(Box::new(move |_: MouseEvent| {
                            let mut slot = hover_block.borrow_mut();
                            // Enter can fire twice without a matching leave;
                            // never register the blocker twice.
                            if slot.is_some() {
                                return;
                            }
                            let blocker = Closure::wrap(Box::new(move |e: Event| {
                                e.prevent_default();
                                e.stop_propagation();
                            })
                                as Box<dyn FnMut(_)>);
                            let opts = AddEventListenerOptions::new();
                            opts.set_passive(false);
                            let _ = window
                                .add_event_listener_with_callback_and_add_event_listener_options(
                                    "wheel",
                                    blocker.as_ref().unchecked_ref(),
                                    &opts,
                                );
                            *slot = Some(blocker);
                        }) as Box<dyn FnMut(_)>)
                    };
                    let mouseout_cb = {
                        let hover_block = hover_block.clone();
                        let window = window.clone();
                        Closure::wrap(Box::new(move |_: MouseEvent| {
                            if let Some(blocker) = hover_block.borrow_mut().take() {
                                let _ = window.remove_event_listener_with_callback(
                                    "wheel",
                                    blocker.as_ref().unchecked_ref(),
                                );
                            }
                        }) as Box<dyn FnMut(_)>)
                    };
                    let _ = container.add_event_listener_with_callback(
                        "wheel",
                        wheel_cb.as_ref().unchecked_ref(),
                    );
                    let _ = container.add_event_listener_with_callback(
                        "mouseover",
                        mouseover_cb.as_ref().unchecked_ref(),
                    );
                    let _ = container.add_event_listener_with_callback(
                        "mouseout",
                        mouseout_cb.as_ref().unchecked_ref(),
                    );
                    (wheel_cb, mouseover_cb, mouseout_cb)
                });

                // Pre-existing external trigger elements, resolved once.
                let mut external_clicks: Vec<(Element, Closure<dyn FnMut(MouseEvent)>)> =
                    Vec::new();
                for (selector, dir) in [
                    (options.zoom_in_selector.as_deref(), ZoomDirection::In),
                    (options.zoom_out_selector.as_deref(), ZoomDirection::Out),
                ] {
                    let Some(selector) = selector else {
                        continue;
                    };
                    match document.query_selector(selector) {
                        Ok(Some(el)) => {
                            let cb = {
                                let transform = transform.clone();
                                let apply = apply.clone();
                                Closure::wrap(Box::new(move |_: MouseEvent| {
                                    transform.borrow_mut().zoom(dir);
                                    apply();
                                })
                                    as Box<dyn FnMut(_)>)
                            };
                            let _ = el.add_event_listener_with_callback(
                                "click",
                                cb.as_ref().unchecked_ref(),
                            );
                            external_clicks.push((el, cb));
                        }
                        _ => clog(&format!("zoom: external control '{selector}' not found")),
                    }
                }

                Box::new(move || {
                    let _ = image.remove_event_listener_with_callback(
                        "mousedown",
                        mousedown_cb.as_ref().unchecked_ref(),
                    );
                    let _ = image.remove_event_listener_with_callback(
                        "touchstart",
                        touchstart_cb.as_ref().unchecked_ref(),
                    );
                    let _ = image.remove_event_listener_with_callback(
                        "dragstart",
                        dragstart_cb.as_ref().unchecked_ref(),
                    );
                    let _ = window.remove_event_listener_with_callback(
                        "mouseup",
                        mouseup_cb.as_ref().unchecked_ref(),
                    );
                    let _ = window.remove_event_listener_with_callback(
                        "touchend",
                        touchend_cb.as_ref().unchecked_ref(),
                    );
                    if let Some(cb) = &dblclick_cb {
                        let _ = image.remove_event_listener_with_callback(
                            "dblclick",
                            cb.as_ref().unchecked_ref(),
                        );
                    }
                    if let Some((wheel_cb, mouseover_cb, mouseout_cb)) = &wheel_cbs {
                        let _ = container.remove_event_listener_with_callback(
                            "wheel",
                            wheel_cb.as_ref().unchecked_ref(),
                        );
                        let _ = container.remove_event_listener_with_callback(
                            "mouseover",
                            mouseover_cb.as_ref().unchecked_ref(),
                        );
                        let _ = container.remove_event_listener_with_callback(
                            "mouseout",
                            mouseout_cb.as_ref().unchecked_ref(),
                        );
                    }
                    for (el, cb) in &external_clicks {
                        let _ = el.remove_event_listener_with_callback(
                            "click",
                            cb.as_ref().unchecked_ref(),
                        );
                    }
                    // A session still live at teardown must not leak its
                    // document/window listeners.
                    if let Some(mut active) = drag.borrow_mut().take() {
                        active.detach(&document, &window);
                    }
                    if let Some(blocker) = hover_block.borrow_mut().take() {
                        let _ = window.remove_event_listener_with_callback(
                            "wheel",
                            blocker.as_ref().unchecked_ref(),
                        );
                    }
                }) as Box<dyn FnOnce()>
            },
        );
    }

    let on_zoom_in = {
        let transform = transform.clone();
        let image_ref = image_ref.clone();
        Callback::from(move |_: ()| {
            let css = {
                let mut t = transform.borrow_mut();
                t.zoom(ZoomDirection::In);
                t.css()
            };
            if let Some(img) = image_ref.cast::<HtmlElement>() {
                let _ = img.style().set_property("transform", &css);
            }
        })
    };
    let on_zoom_out = {
        let transform = transform.clone();
        let image_ref = image_ref.clone();
        Callback::from(move |_: ()| {
            let css = {
                let mut t = transform.borrow_mut();
                t.zoom(ZoomDirection::Out);
                t.css()
            };
            if let Some(img) = image_ref.cast::<HtmlElement>() {
                let _ = img.style().set_property("transform", &css);
            }
        })
    };

    match props.options.clone().validated() {
        Ok(options) => html! {
            <div ref={container_ref.clone()} class="zoom-view" style={WRAP_STYLE}>
                <img
                    ref={image_ref.clone()}
                    src={props.src.clone()}
                    alt={props.alt.clone()}
                    draggable="false"
                    style="will-change:transform;"
                />
                if options.buttons {
                    <ZoomControls on_zoom_in={on_zoom_in} on_zoom_out={on_zoom_out} />
                }
                if options.hover_preview {
                    <LensPreview
                        container_ref={container_ref.clone()}
                        image_ref={image_ref.clone()}
                        src={props.src.clone()}
                        factor={options.lens_scale}
                    />
                }
            </div>
        },
        // Invalid options: inert markup, no wiring.
        Err(_) => html! {
            <div ref={container_ref.clone()} class="zoom-view" style={WRAP_STYLE}>
                <img ref={image_ref.clone()} src={props.src.clone()} alt={props.alt.clone()} draggable="false" />
            </div>
        },
    }
}
