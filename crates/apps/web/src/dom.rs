use session::{IntroWhisper, Lens, StatusDisplay};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

pub const MENU_ITEM_SELECTOR: &str = ".menuItem";
const LENS_ATTR: &str = "data-lens";

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn html_element(doc: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

/// Attach a click handler that lives as long as the page.
pub fn on_click(target: &Element, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut()>::new(handler);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn menu_items(doc: &Document) -> Result<Vec<Element>, JsValue> {
    let nodes = doc.query_selector_all(MENU_ITEM_SELECTOR)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Wire each menu item to `on_select`, passing its `data-lens` value.
pub fn on_menu_select(
    doc: &Document,
    on_select: impl Fn(String) + Clone + 'static,
) -> Result<(), JsValue> {
    for item in menu_items(doc)? {
        let name = item.get_attribute(LENS_ATTR).unwrap_or_default();
        let on_select = on_select.clone();
        on_click(&item, move || on_select(name.clone()))?;
    }
    Ok(())
}

/// Mark the menu item of `lens` as active and clear the others.
pub fn highlight_lens(doc: &Document, lens: Lens) -> Result<(), JsValue> {
    for item in menu_items(doc)? {
        let active = item.get_attribute(LENS_ATTR).as_deref() == Some(lens.name());
        item.class_list().toggle_with_force("active", active)?;
    }
    Ok(())
}

pub fn set_menu_open(menu: &HtmlElement, open: bool) {
    menu.set_hidden(!open);
}

fn set_timeout(delay_s: f64, f: impl FnOnce() + 'static) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        (delay_s * 1000.0).round() as i32,
    )
}

/// Fade the whisper out after its visible time, then remove it.
pub fn schedule_whisper(whisper: HtmlElement, intro: IntroWhisper) -> Result<(), JsValue> {
    let fade_s = intro.fade_s;
    set_timeout(intro.visible_s, move || {
        if let Err(err) = whisper.style().set_property("opacity", "0") {
            warn!(?err, "whisper fade failed");
        }
        if let Err(err) = set_timeout(fade_s, move || whisper.remove()) {
            warn!(?err, "whisper removal not scheduled");
        }
    })?;
    Ok(())
}

/// Status line backed by a DOM element toggled with `hidden`.
pub struct DomStatus {
    el: HtmlElement,
}

impl DomStatus {
    pub fn new(el: HtmlElement) -> Self {
        Self { el }
    }
}

impl StatusDisplay for DomStatus {
    fn show(&mut self, text: &str) {
        self.el.set_text_content(Some(text));
        self.el.set_hidden(false);
    }

    fn hide(&mut self) {
        self.el.set_hidden(true);
        self.el.set_text_content(Some(""));
    }
}
