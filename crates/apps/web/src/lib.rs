//! Browser binding: mounts the Leaflet map, wires DOM controls and the
//! geolocation watch, and feeds everything into one [`Session`].

mod dom;
mod fetch;
mod geolocation;
mod leaflet;
mod logging;
mod options;

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use session::{AppEvent, Lens, Session, SessionConfig, SessionHandle};
use tracing::{debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::dom::DomStatus;
use crate::fetch::{HttpSource, JsClock};
use crate::leaflet::LeafletView;

type AppSession = SessionHandle<LeafletView, DomStatus>;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

const MAP_ID: &str = "map";
const STATUS_ID: &str = "status";
const WHISPER_ID: &str = "whisper";
const MENU_ID: &str = "menu";
const MENU_BUTTON_ID: &str = "menuBtn";
const RECENTER_BUTTON_ID: &str = "recenterBtn";

thread_local! {
    static SESSION: RefCell<Option<AppSession>> = const { RefCell::new(None) };
}

/// Current session, or `None` before `start_app` or during teardown.
fn with_session() -> Option<AppSession> {
    SESSION.try_with(|s| s.borrow().clone()).ok().flatten()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();
    Ok(())
}

/// Build the session. `config_json` overrides defaults field by field.
#[wasm_bindgen]
pub fn start_app(config_json: Option<String>) -> Result<(), JsValue> {
    if with_session().is_some() {
        return Ok(());
    }
    let config = match config_json.as_deref() {
        Some(json) => SessionConfig::from_json_str(json)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?,
        None => SessionConfig::default(),
    };
    logging::init_logging(&config.log_filter);

    let doc = dom::document()?;
    let map = LeafletView::mount(MAP_ID, &config.basemap)?;
    let status = DomStatus::new(dom::html_element(&doc, STATUS_ID)?);
    let geo = geolocation::geolocation();
    let location = config.location;

    let mut session = Session::new(config, map, status, Rc::new(JsClock), Rc::new(HttpSource));
    session.start(geo.is_some());
    let intro = session.intro();
    let handle = SessionHandle::new(session);
    SESSION.with(|s| *s.borrow_mut() = Some(handle.clone()));

    wire_map_events(&handle);
    wire_controls(&doc)?;
    match dom::html_element(&doc, WHISPER_ID) {
        Ok(whisper) => dom::schedule_whisper(whisper, intro)?,
        Err(err) => debug!(?err, "no whisper element"),
    }
    sync_chrome();

    if let Some(geo) = geo {
        geolocation::watch_position(
            &geo,
            &location,
            |coord| dispatch_now(AppEvent::PositionUpdated(coord)),
            |err| dispatch_now(AppEvent::PositionFailed(err)),
        )?;
    }
    info!("app started");
    Ok(())
}

// Leaflet fires these synchronously from inside `set_view`, while the
// session is borrowed, so they are dispatched on the next tick.
fn wire_map_events(handle: &AppSession) {
    handle.with(|s| {
        let map = s.map();
        let origin = map.zoom_origin();
        // The startup view was set before any handler existed.
        origin.settle();
        map.on("dragstart", || dispatch_later(AppEvent::GestureStarted));
        map.on("zoomstart", {
            let origin = origin.clone();
            move || {
                if origin.zoom_start_is_gesture() {
                    dispatch_later(AppEvent::GestureStarted);
                }
            }
        });
        map.on("zoomend", move || origin.settle());
        map.on("zoomend moveend", || dispatch_later(AppEvent::ViewSettled));
    });
}

fn wire_controls(doc: &web_sys::Document) -> Result<(), JsValue> {
    let menu_btn = dom::html_element(doc, MENU_BUTTON_ID)?;
    dom::on_click(&menu_btn, || dispatch_now(AppEvent::MenuToggled))?;

    let recenter_btn = dom::html_element(doc, RECENTER_BUTTON_ID)?;
    dom::on_click(&recenter_btn, || dispatch_now(AppEvent::RecenterRequested))?;

    dom::on_menu_select(doc, |name| select_lens(&name))
}

/// Dispatch on the current tick. An actions overlay load, if any, finishes
/// in the background.
fn dispatch_now(event: AppEvent) {
    let Some(handle) = with_session() else {
        return;
    };
    if let Some(pending) = handle.dispatch_sync(event) {
        spawn_local(async move {
            handle.complete(pending).await;
        });
    }
    sync_chrome();
}

fn dispatch_later(event: AppEvent) {
    let Some(handle) = with_session() else {
        return;
    };
    spawn_local(async move {
        handle.dispatch(event).await;
    });
}

/// Bring menu visibility and the active lens highlight in line with the
/// session.
fn sync_chrome() {
    let Some(handle) = with_session() else {
        return;
    };
    let (open, lens) = handle.with(|s| (s.is_menu_open(), s.lens()));
    let result = dom::document().and_then(|doc| {
        dom::set_menu_open(&dom::html_element(&doc, MENU_ID)?, open);
        dom::highlight_lens(&doc, lens)
    });
    if let Err(err) = result {
        error!(?err, "menu update failed");
    }
}

#[wasm_bindgen]
pub fn recenter() {
    dispatch_now(AppEvent::RecenterRequested);
}

/// Switch lens by name. Unknown names fall back to `nearby`.
#[wasm_bindgen]
pub fn select_lens(name: &str) {
    dispatch_now(AppEvent::LensSelected(Lens::from_name_lenient(name)));
}

#[wasm_bindgen]
pub fn toggle_menu() {
    dispatch_now(AppEvent::MenuToggled);
}

/// Recent session events, one per line, oldest first.
#[wasm_bindgen]
pub fn session_trace() -> String {
    let Some(handle) = with_session() else {
        return String::new();
    };
    handle.with(|s| {
        let mut out = String::new();
        for ev in s.events().events() {
            let _ = writeln!(out, "{:.3} {} {}", ev.at.0, ev.kind, ev.message);
        }
        out
    })
}
