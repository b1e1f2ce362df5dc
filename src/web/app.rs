use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, MouseEvent, Response, Window};

use super::{BrowserHistory, BrowserHost};
use crate::camera::{NavEvent, NavigationController, Pose, Projection};
use crate::input::{InputEvent, MouseButton};
use crate::options::Options;
use crate::session::{self, MapManifest, Route};
use crate::sync::{connect, StateSyncBridge};
use crate::util::FrameClock;

type Controller = Rc<RefCell<NavigationController<BrowserHost>>>;
type AnimationFrame = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Boot the viewer on the page.
///
/// `options_toml` overrides the default [`Options`]. `render` is called
/// with the column-major view-projection matrix (a `Float64Array` of 16)
/// whenever the camera turns, moves or settles.
///
/// # Errors
///
/// Fails when the page is missing `canvas_id` or a browser call throws.
/// Map problems are shown in the page's error list instead.
#[wasm_bindgen]
#[allow(clippy::future_not_send, clippy::needless_pass_by_value)]
pub async fn start(
    canvas_id: String,
    options_toml: Option<String>,
    render: js_sys::Function,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let options = match options_toml.as_deref() {
        Some(text) => Options::from_toml(text).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => Options::default(),
    };

    let path = window.location().pathname()?;
    let location = match session::route_for_path(&path) {
        Route::Noclip(location) => location,
        Route::Intro => return show_intro(&document, &options),
    };
    log::info!("loading {}.{}", location.org_id, location.asset_id);

    let surface = document
        .get_element_by_id(&canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?;
    let host = BrowserHost::new(document.clone(), surface.clone());
    let controller: Controller = Rc::new(RefCell::new(NavigationController::new(host, &options)));

    let manifest = match fetch_manifest(&window, &options, &location.org_id, &location.asset_id).await
    {
        Ok(manifest) => manifest,
        Err(e) => {
            controller
                .borrow_mut()
                .host_mut()
                .add_error(&format!("Problem occurred when loading map data: {e}"));
            return Ok(());
        }
    };
    log::info!(
        "{} model(s) under {}",
        manifest.models.len(),
        session::asset_base_url(&options.hosts, &location.org_id, &location.asset_id)
    );
    if let Err(e) = manifest.ensure_ready() {
        controller.borrow_mut().host_mut().add_error(&e.to_string());
        return Ok(());
    }
    let pose = match session::initial_pose(&location, &manifest, &mut rand::rng()) {
        Ok(pose) => pose,
        Err(e) => {
            controller.borrow_mut().host_mut().add_error(&e.to_string());
            return Ok(());
        }
    };

    let projection = Rc::new(RefCell::new(options.camera.projection(
        viewport_dimension(window.inner_width()),
        viewport_dimension(window.inner_height()),
    )));
    {
        let mut nav = controller.borrow_mut();
        nav.set_pose(pose);

        let bridge = StateSyncBridge::for_location(BrowserHistory::new(window.clone()), &location);
        let _ = connect(&mut *nav, bridge);

        let projection = Rc::clone(&projection);
        let render = render.clone();
        let _ = nav.subscribe_all(move |event| {
            if let NavEvent::Change(pose) | NavEvent::Settled(pose) = event {
                draw(&render, &projection.borrow(), pose);
            }
        });
    }
    draw(&render, &projection.borrow(), &controller.borrow().pose());

    register_listeners(&window, &document, &surface, &controller)?;
    register_resize(&window, &controller, &projection, &render)?;
    start_frame_loop(&window, &controller, &projection, &render)?;
    Ok(())
}

fn show_intro(document: &Document, options: &Options) -> Result<(), JsValue> {
    if let Some(intro) = document.get_element_by_id("intro") {
        intro.class_list().remove_1("hide")?;
    }
    if let Some(target) = document.get_element_by_id("try-it-out") {
        let link = document.create_element("a")?;
        link.set_attribute("href", &session::intro_path())?;
        link.set_text_content(Some(&session::intro_link(&options.hosts)));
        target.append_with_str_1("Try it out here: ")?;
        target.append_with_node_1(&link)?;
    }
    Ok(())
}

#[allow(clippy::future_not_send)]
async fn fetch_manifest(
    window: &Window,
    options: &Options,
    org_id: &str,
    asset_id: &str,
) -> Result<MapManifest, String> {
    let url = session::manifest_url(&options.hosts, org_id, asset_id);
    let response: Response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .and_then(|value| value.dyn_into::<Response>())
        .map_err(|e| format!("{e:?}"))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let body = JsFuture::from(response.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?
        .as_string()
        .unwrap_or_default();
    MapManifest::from_json(&body).map_err(|e| e.to_string())
}

fn viewport_dimension(value: Result<JsValue, JsValue>) -> u32 {
    value.ok().and_then(|v| v.as_f64()).map_or(0, |v| v.max(0.0) as u32)
}

fn draw(render: &js_sys::Function, projection: &Projection, pose: &Pose) {
    let matrix = projection.build_matrix(pose).to_cols_array();
    let array = js_sys::Float64Array::from(&matrix[..]);
    if let Err(e) = render.call1(&JsValue::NULL, &array) {
        log::error!("render callback failed: {e:?}");
    }
}

fn listen(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn dispatch(controller: &Controller, event: InputEvent) {
    controller.borrow_mut().handle_event(event);
}

fn register_listeners(
    window: &Window,
    document: &Document,
    surface: &Element,
    controller: &Controller,
) -> Result<(), JsValue> {
    let nav = Rc::clone(controller);
    listen(surface, "mousedown", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            if let Some(button) = MouseButton::from_dom_index(mouse.button()) {
                dispatch(&nav, InputEvent::MouseButton { button, pressed: true });
            }
        }
    })?;

    // Release may happen outside the surface once the pointer is locked.
    let nav = Rc::clone(controller);
    listen(document, "mouseup", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            if let Some(button) = MouseButton::from_dom_index(mouse.button()) {
                dispatch(&nav, InputEvent::MouseButton { button, pressed: false });
            }
        }
    })?;

    let nav = Rc::clone(controller);
    listen(document, "mousemove", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            dispatch(
                &nav,
                InputEvent::PointerMoved {
                    dx: f64::from(mouse.movement_x()),
                    dy: f64::from(mouse.movement_y()),
                },
            );
        }
    })?;

    for (name, pressed) in [("keydown", true), ("keyup", false)] {
        let nav = Rc::clone(controller);
        listen(window, name, move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                dispatch(&nav, InputEvent::Key { code: key.code(), pressed });
            }
        })?;
    }

    let nav = Rc::clone(controller);
    listen(document, "pointerlockchange", move |_| {
        let locked = nav.borrow().host().is_surface_locked();
        dispatch(&nav, InputEvent::LockChanged { locked });
    })?;

    let nav = Rc::clone(controller);
    listen(document, "pointerlockerror", move |_| {
        dispatch(&nav, InputEvent::LockError);
    })?;
    Ok(())
}

fn register_resize(
    window: &Window,
    controller: &Controller,
    projection: &Rc<RefCell<Projection>>,
    render: &js_sys::Function,
) -> Result<(), JsValue> {
    let nav = Rc::clone(controller);
    let projection = Rc::clone(projection);
    let render = render.clone();
    let target = window.clone();
    listen(window, "resize", move |_| {
        projection.borrow_mut().resize(
            viewport_dimension(target.inner_width()),
            viewport_dimension(target.inner_height()),
        );
        draw(&render, &projection.borrow(), &nav.borrow().pose());
    })
}

fn start_frame_loop(
    window: &Window,
    controller: &Controller,
    projection: &Rc<RefCell<Projection>>,
    render: &js_sys::Function,
) -> Result<(), JsValue> {
    let frame: AnimationFrame = Rc::new(RefCell::new(None));
    let next = Rc::clone(&frame);
    let nav = Rc::clone(controller);
    let projection = Rc::clone(projection);
    let render = render.clone();
    let target = window.clone();
    let mut clock = FrameClock::new();

    *frame.borrow_mut() = Some(Closure::new(move |stamp: f64| {
        let dt = clock.tick_at(stamp);
        let moved = nav.borrow_mut().integrate(dt);
        if moved {
            draw(&render, &projection.borrow(), &nav.borrow().pose());
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = target.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {e:?}");
            }
        }
    }));

    if let Some(callback) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}
